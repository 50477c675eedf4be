//! Topic directory: the collaborator the describe handler queries by name.
//!
//! The wire layer never stores topics itself. Deployments supply an
//! implementation of [`TopicDirectory`]; the default [`EmptyDirectory`]
//! resolves nothing, so every described topic answers
//! UNKNOWN_TOPIC_OR_PARTITION.

use std::collections::HashMap;

/// What the directory knows about one topic.
#[derive(Debug, Clone)]
pub struct TopicInfo {
    /// 16-byte topic identifier.
    pub topic_id: [u8; 16],
    /// Whether the topic is broker-internal.
    pub is_internal: bool,
    /// Number of partitions, indexed 0..partitions.
    pub partitions: u32,
    /// Authorized-operations bitmask reported to clients.
    pub authorized_operations: u32,
}

/// Lookup interface for topic metadata.
pub trait TopicDirectory: Send + Sync {
    fn lookup(&self, name: &str) -> Option<TopicInfo>;
}

/// Directory that knows no topics.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyDirectory;

impl TopicDirectory for EmptyDirectory {
    fn lookup(&self, _name: &str) -> Option<TopicInfo> {
        None
    }
}

/// HashMap-backed directory for embedding and tests.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    topics: HashMap<String, TopicInfo>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, info: TopicInfo) {
        self.topics.insert(name.into(), info);
    }
}

impl TopicDirectory for InMemoryDirectory {
    fn lookup(&self, name: &str) -> Option<TopicInfo> {
        self.topics.get(name).cloned()
    }
}
