//! Runestream: a minimal broker head speaking the Kafka binary wire protocol.
//!
//! Frames length-prefixed requests over TCP, answers ApiVersions and
//! DescribeTopicPartitions, and leaves topic metadata to a pluggable
//! directory collaborator.

pub mod directory;
pub mod error;
pub mod observability;
pub mod protocol;
pub mod server;

pub use directory::{EmptyDirectory, InMemoryDirectory, TopicDirectory, TopicInfo};
pub use error::{Result, RunestreamError};
pub use protocol::{ApiKey, RequestHeader, SUPPORTED_APIS};
