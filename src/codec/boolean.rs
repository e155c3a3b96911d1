//! Boolean column codec.
//!
//! ```text
//! key form:    null flag (1 byte) | value (1 byte, 0x00 or 0x01)
//!              null encodes as 0x00 | 0x00
//! value form:  value (1 byte); null writes nothing
//! ```

use super::{check_nullable, type_mismatch, NOT_NULL_FLAG, NULL_FLAG};
use crate::buffer::Buf;
use crate::error::Result;
use crate::types::{ColumnSchema, ColumnValue};

const VALUE_LEN: usize = 1;
const KEY_LEN: usize = VALUE_LEN + 1;

pub(super) fn encode_key(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    match value {
        ColumnValue::Bool(v) => {
            buf.write_u8(NOT_NULL_FLAG);
            buf.write_u8(u8::from(*v));
        }
        ColumnValue::Absent => {
            check_nullable(schema)?;
            buf.write_u8(NULL_FLAG);
            buf.write_u8(0x00);
        }
        _ => return Err(type_mismatch(schema)),
    }
    Ok(KEY_LEN)
}

pub(super) fn decode_key(buf: &mut Buf) -> Result<ColumnValue> {
    if buf.read_u8()? == NULL_FLAG {
        buf.skip(KEY_LEN - 1)?;
        return Ok(ColumnValue::Absent);
    }
    Ok(ColumnValue::Bool(buf.read_u8()? != 0))
}

pub(super) fn encode_value(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    match value {
        ColumnValue::Bool(v) => {
            buf.write_u8(u8::from(*v));
            Ok(VALUE_LEN)
        }
        ColumnValue::Absent => {
            check_nullable(schema)?;
            Ok(0)
        }
        _ => Err(type_mismatch(schema)),
    }
}

pub(super) fn decode_value(buf: &mut Buf) -> Result<ColumnValue> {
    Ok(ColumnValue::Bool(buf.read_u8()? != 0))
}
