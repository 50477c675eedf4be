//! Request framing and header decode over a buffered byte stream.

use crate::error::{Result, RunestreamError};
use bytes::{Buf, Bytes, BytesMut};

const MAX_FRAME_LEN: usize = 100 * 1024 * 1024; // 100MB
const HEADER_LEN: usize = 8;

/// Common request header: the first 8 bytes of every frame.
#[derive(Debug, Clone, Copy)]
pub struct RequestHeader {
    pub api_key: i16,
    pub api_version: i16,
    pub correlation_id: i32,
}

/// One framed request: header plus the operation-specific payload.
#[derive(Debug)]
pub struct RequestFrame {
    pub header: RequestHeader,
    pub body: Bytes,
}

/// Decode one request from the buffer. Returns `None` until the 4-byte
/// big-endian length prefix and the declared number of body bytes are
/// buffered; never yields a partial frame. A frame shorter than the common
/// header is fatal: no valid response can be correlated.
pub fn decode_request(src: &mut BytesMut) -> Result<Option<RequestFrame>> {
    if src.len() < 4 {
        return Ok(None);
    }
    let len = u32::from_be_bytes([src[0], src[1], src[2], src[3]]) as usize;
    if len > MAX_FRAME_LEN {
        return Err(RunestreamError::Protocol(format!(
            "frame of {} bytes exceeds the {} byte cap",
            len, MAX_FRAME_LEN
        )));
    }
    if src.len() < 4 + len {
        return Ok(None);
    }
    src.advance(4);
    let mut frame = src.split_to(len);
    if frame.len() < HEADER_LEN {
        return Err(RunestreamError::ShortHeader(frame.len()));
    }
    let header = RequestHeader {
        api_key: frame.get_i16(),
        api_version: frame.get_i16(),
        correlation_id: frame.get_i32(),
    };
    Ok(Some(RequestFrame {
        header,
        body: frame.freeze(),
    }))
}

/// Classify end-of-stream. A residue without a full length prefix is a clean
/// close; a residue with a valid prefix whose body never arrived is a
/// truncated frame, and the connection closes without resynchronizing.
pub fn end_of_stream_check(residue: &BytesMut) -> Result<()> {
    if residue.len() >= 4 {
        let declared =
            u32::from_be_bytes([residue[0], residue[1], residue[2], residue[3]]) as usize;
        return Err(RunestreamError::TruncatedFrame {
            declared,
            buffered: residue.len() - 4,
        });
    }
    Ok(())
}
