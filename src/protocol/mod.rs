//! Kafka-style binary wire protocol: framing, header decode, dispatch,
//! response encoding.
//!
//! Frame: length (4 bytes BE) | payload. Request payload: api_key (2 BE) |
//! api_version (2 BE) | correlation_id (4 BE) | operation-specific fields.
//! Response payload: correlation_id (4 BE) | operation body.

pub mod api;
mod codec;
mod handlers;
mod wire;

pub use api::{ApiKey, ApiVersionRange, DEFAULT_AUTHORIZED_OPERATIONS, SUPPORTED_APIS};
pub use codec::{decode_request, end_of_stream_check, RequestFrame, RequestHeader};
pub use handlers::handle_request;
pub use wire::{frame_response, put_compact_string, put_unsigned_varint, ByteCursor};
