//! Api keys, error codes, and the advertised version table.

/// Supported operations (Kafka api key space).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum ApiKey {
    ApiVersions = 18,
    DescribeTopicPartitions = 75,
}

impl ApiKey {
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            18 => Some(ApiKey::ApiVersions),
            75 => Some(ApiKey::DescribeTopicPartitions),
            _ => None,
        }
    }
}

/// Protocol-level error codes reported in-band.
pub mod error_code {
    pub const NONE: i16 = 0;
    pub const UNKNOWN_TOPIC_OR_PARTITION: i16 = 3;
    pub const UNSUPPORTED_VERSION: i16 = 35;
}

/// One advertised (api_key, min_version, max_version) range.
#[derive(Debug, Clone, Copy)]
pub struct ApiVersionRange {
    pub key: ApiKey,
    pub min: i16,
    pub max: i16,
}

/// Version ranges advertised by ApiVersions. Adding an operation means
/// adding a row here; the response encoder is generic over the table.
pub const SUPPORTED_APIS: &[ApiVersionRange] = &[
    ApiVersionRange {
        key: ApiKey::ApiVersions,
        min: 0,
        max: 4,
    },
    ApiVersionRange {
        key: ApiKey::DescribeTopicPartitions,
        min: 0,
        max: 0,
    },
];

/// Bitmask reported for topics the directory carries no ACL data for.
pub const DEFAULT_AUTHORIZED_OPERATIONS: u32 = 0x0000_0df8;

/// True when the table advertises `version` for `key`.
pub fn version_supported(key: ApiKey, version: i16) -> bool {
    SUPPORTED_APIS
        .iter()
        .any(|r| r.key == key && (r.min..=r.max).contains(&version))
}
