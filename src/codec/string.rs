//! String column codec.
//!
//! ```text
//! key form:    null flag (1 byte) | length (4 bytes, signed) | bytes
//!              null encodes as 0x00 | length 0
//! value form:  length (4 bytes, signed) | bytes; null writes nothing
//! ```
//!
//! The length prefix travels through the buffer's endian-aware writer like
//! every other framing integer. A negative length on decode is malformed, as
//! is a payload that is not valid UTF-8.

use super::{check_nullable, type_mismatch, NOT_NULL_FLAG, NULL_FLAG};
use crate::buffer::Buf;
use crate::error::{CodecError, Result};
use crate::types::{ColumnSchema, ColumnValue};

pub(super) fn encode_key(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    match value {
        ColumnValue::String(s) => {
            buf.write_u8(NOT_NULL_FLAG);
            buf.write_i32(s.len() as i32);
            buf.write_string(s);
            Ok(5 + s.len())
        }
        ColumnValue::Absent => {
            check_nullable(schema)?;
            buf.write_u8(NULL_FLAG);
            buf.write_i32(0);
            Ok(5)
        }
        _ => Err(type_mismatch(schema)),
    }
}

pub(super) fn decode_key(buf: &mut Buf) -> Result<ColumnValue> {
    if buf.read_u8()? == NULL_FLAG {
        buf.read_i32()?;
        return Ok(ColumnValue::Absent);
    }
    let len = read_length(buf)?;
    read_payload(buf, len)
}

pub(super) fn skip_key(buf: &mut Buf) -> Result<usize> {
    buf.read_u8()?;
    let len = read_length(buf)?;
    buf.skip(len)?;
    Ok(5 + len)
}

pub(super) fn encode_value(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    match value {
        ColumnValue::String(s) => {
            buf.write_i32(s.len() as i32);
            buf.write_string(s);
            Ok(4 + s.len())
        }
        ColumnValue::Absent => {
            check_nullable(schema)?;
            Ok(0)
        }
        _ => Err(type_mismatch(schema)),
    }
}

pub(super) fn decode_value(buf: &mut Buf) -> Result<ColumnValue> {
    let len = read_length(buf)?;
    read_payload(buf, len)
}

pub(super) fn skip_value(buf: &mut Buf) -> Result<usize> {
    let len = read_length(buf)?;
    buf.skip(len)?;
    Ok(4 + len)
}

fn read_length(buf: &mut Buf) -> Result<usize> {
    let len = buf.read_i32()?;
    if len < 0 {
        return Err(CodecError::Malformed("negative string length"));
    }
    Ok(len as usize)
}

fn read_payload(buf: &mut Buf, len: usize) -> Result<ColumnValue> {
    let bytes = buf.read_bytes(len)?;
    let text = String::from_utf8(bytes)
        .map_err(|_| CodecError::Malformed("string payload is not valid utf-8"))?;
    Ok(ColumnValue::String(text))
}
