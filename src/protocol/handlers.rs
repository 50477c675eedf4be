//! Operation dispatch and the two response builders.
//!
//! ApiVersions answers from the `SUPPORTED_APIS` table;
//! DescribeTopicPartitions walks its request payload with a cursor and
//! answers per topic from the directory collaborator. Api keys with no
//! registered handler produce no response at all; the connection keeps
//! reading the next frame.

use crate::directory::{TopicDirectory, TopicInfo};
use crate::error::{Result, RunestreamError};
use crate::protocol::api::{self, error_code, ApiKey, SUPPORTED_APIS};
use crate::protocol::codec::RequestHeader;
use crate::protocol::wire::{frame_response, put_compact_string, put_unsigned_varint, ByteCursor};
use bytes::{BufMut, BytesMut};
use tracing::warn;

/// Dispatch one request. Returns the framed response, or `None` for api
/// keys this server does not register.
pub fn handle_request(
    directory: &dyn TopicDirectory,
    header: &RequestHeader,
    body: &[u8],
) -> Result<Option<BytesMut>> {
    match ApiKey::from_i16(header.api_key) {
        Some(ApiKey::ApiVersions) => {
            let resp = api_versions_response(header.api_version);
            Ok(Some(frame_response(header.correlation_id, &resp)))
        }
        Some(ApiKey::DescribeTopicPartitions) => {
            let topics = read_describe_request(body)?;
            let resp = describe_topic_partitions_response(directory, &topics);
            Ok(Some(frame_response(header.correlation_id, &resp)))
        }
        None => {
            warn!(api_key = header.api_key, "unhandled api key, no response");
            Ok(None)
        }
    }
}

/// ApiVersions body. Out-of-range version: the two error bytes and nothing
/// else. Otherwise error code, compact array of table rows, throttle, tags.
fn api_versions_response(version: i16) -> BytesMut {
    let mut body = BytesMut::new();
    if !api::version_supported(ApiKey::ApiVersions, version) {
        body.put_i16(error_code::UNSUPPORTED_VERSION);
        return body;
    }
    body.put_i16(error_code::NONE);
    put_unsigned_varint(&mut body, (SUPPORTED_APIS.len() + 1) as u32);
    for range in SUPPORTED_APIS {
        body.put_i16(range.key as i16);
        body.put_i16(range.min);
        body.put_i16(range.max);
        put_unsigned_varint(&mut body, 0); // tagged fields
    }
    body.put_i32(0); // throttle_time_ms
    put_unsigned_varint(&mut body, 0); // tagged fields
    body
}

/// Walk the DescribeTopicPartitions payload and collect the requested topic
/// names: client id, then per topic a compact name, a 16-byte filter block,
/// a compact array of partition indexes, and a tag byte. The trailing
/// response-partition-limit and cursor fields are not consumed.
fn read_describe_request(body: &[u8]) -> Result<Vec<String>> {
    let mut cur = ByteCursor::new(body);
    let _client_id = cur.read_nullable_string()?;
    cur.skip(1)?; // client id tag buffer
    let count = compact_count(cur.read_unsigned_varint()?, "topic array")?;
    let mut topics = Vec::with_capacity(count.min(32));
    for _ in 0..count {
        let name = cur.read_compact_string()?;
        cur.skip(16)?; // partition index filter block, unused here
        let partitions = compact_count(cur.read_unsigned_varint()?, "partition index array")?;
        cur.skip(4 * partitions)?;
        cur.skip(1)?; // topic tag buffer
        topics.push(name);
    }
    Ok(topics)
}

/// Compact-array length: stored value minus one; zero means null.
fn compact_count(raw: u32, what: &str) -> Result<usize> {
    if raw == 0 {
        return Err(RunestreamError::Protocol(format!(
            "null {} where a value is required",
            what
        )));
    }
    Ok((raw - 1) as usize)
}

fn describe_topic_partitions_response(
    directory: &dyn TopicDirectory,
    topics: &[String],
) -> BytesMut {
    let mut body = BytesMut::new();
    put_unsigned_varint(&mut body, 0); // response header tagged fields
    body.put_i32(0); // throttle_time_ms
    put_unsigned_varint(&mut body, (topics.len() + 1) as u32);
    for name in topics {
        match directory.lookup(name) {
            Some(info) => put_known_topic(&mut body, name, &info),
            None => put_unknown_topic(&mut body, name),
        }
    }
    body.put_u8(0xff); // null cursor: no further pages
    put_unsigned_varint(&mut body, 0); // tagged fields
    body
}

fn put_unknown_topic(body: &mut BytesMut, name: &str) {
    body.put_i16(error_code::UNKNOWN_TOPIC_OR_PARTITION);
    put_compact_string(body, name);
    body.put_slice(&[0u8; 16]); // topic id unknown
    body.put_u8(0); // is_internal
    put_unsigned_varint(body, 1); // no partitions
    body.put_u32(api::DEFAULT_AUTHORIZED_OPERATIONS);
    put_unsigned_varint(body, 0); // tagged fields
}

fn put_known_topic(body: &mut BytesMut, name: &str, info: &TopicInfo) {
    body.put_i16(error_code::NONE);
    put_compact_string(body, name);
    body.put_slice(&info.topic_id);
    body.put_u8(info.is_internal as u8);
    put_unsigned_varint(body, info.partitions + 1);
    for index in 0..info.partitions {
        put_partition(body, index as i32);
    }
    body.put_u32(info.authorized_operations);
    put_unsigned_varint(body, 0); // tagged fields
}

/// One partition entry: this head is the sole node, so replica and ISR sets
/// are the single node 0.
fn put_partition(body: &mut BytesMut, index: i32) {
    body.put_i16(error_code::NONE);
    body.put_i32(index);
    body.put_i32(0); // leader id
    body.put_i32(0); // leader epoch
    put_unsigned_varint(body, 2); // replica nodes
    body.put_i32(0);
    put_unsigned_varint(body, 2); // isr nodes
    body.put_i32(0);
    put_unsigned_varint(body, 1); // eligible leader replicas
    put_unsigned_varint(body, 1); // last known elr
    put_unsigned_varint(body, 1); // offline replicas
    put_unsigned_varint(body, 0); // tagged fields
}
