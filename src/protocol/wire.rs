//! Wire primitives: a bounds-checked read cursor and big-endian encoders
//! for the protocol's compact-array / tagged-field conventions.

use crate::error::{Result, RunestreamError};
use bytes::{BufMut, BytesMut};

/// Read cursor over one request body. Every read advances an owned offset
/// and fails when the remaining length is insufficient, so decoders never
/// index past the declared frame length.
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(RunestreamError::Protocol(format!(
                "not enough bytes for {}: need {}, have {}",
                what,
                n,
                self.remaining()
            )));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1, "u8")?[0])
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let b = self.take(2, "i16")?;
        Ok(i16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let b = self.take(4, "i32")?;
        Ok(i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n, "skipped field")?;
        Ok(())
    }

    /// Unsigned varint (used for compact-array and compact-string lengths).
    pub fn read_unsigned_varint(&mut self) -> Result<u32> {
        let mut value: u32 = 0;
        let mut shift = 0u32;
        loop {
            let b = self.take(1, "varint")?[0];
            value |= ((b & 0x7f) as u32) << shift;
            if b & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift >= 35 {
                return Err(RunestreamError::Protocol("varint too long".into()));
            }
        }
    }

    /// Compact string: varint length+1, then utf8 bytes. Length 0 (null) is
    /// a protocol violation where a name is required.
    pub fn read_compact_string(&mut self) -> Result<String> {
        let raw = self.read_unsigned_varint()?;
        if raw == 0 {
            return Err(RunestreamError::Protocol(
                "null compact string where a value is required".into(),
            ));
        }
        let len = (raw - 1) as usize;
        let bytes = self.take(len, "compact string")?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| RunestreamError::Protocol("compact string is not utf8".into()))
    }

    /// Nullable string: i16 length (-1 = null), then bytes.
    pub fn read_nullable_string(&mut self) -> Result<Option<String>> {
        let len = self.read_i16()?;
        if len < 0 {
            return Ok(None);
        }
        let bytes = self.take(len as usize, "string")?;
        Ok(Some(
            String::from_utf8(bytes.to_vec())
                .map_err(|_| RunestreamError::Protocol("string is not utf8".into()))?,
        ))
    }
}

/// Unsigned varint (for compact-array lengths and tagged-field counts).
pub fn put_unsigned_varint(dst: &mut BytesMut, mut u: u32) {
    while u > 0x7f {
        dst.put_u8((u as u8) | 0x80);
        u >>= 7;
    }
    dst.put_u8(u as u8);
}

/// Compact string: varint length+1, then utf8 bytes.
pub fn put_compact_string(dst: &mut BytesMut, s: &str) {
    let bytes = s.as_bytes();
    put_unsigned_varint(dst, (bytes.len() + 1) as u32);
    dst.extend_from_slice(bytes);
}

/// Frame a response: length (4 BE, excluding itself) | correlation_id | body.
/// The receiver can re-frame the reply with the same length-prefix algorithm
/// used for requests.
pub fn frame_response(correlation_id: i32, body: &[u8]) -> BytesMut {
    let mut out = BytesMut::with_capacity(8 + body.len());
    out.put_i32((4 + body.len()) as i32);
    out.put_i32(correlation_id);
    out.extend_from_slice(body);
    out
}
