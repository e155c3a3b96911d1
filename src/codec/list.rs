//! List column codecs.
//!
//! Every list shares the layout `count (4 bytes, signed) | element*`, where
//! each element uses its scalar type's compact value form. Lists never appear
//! in keys; the dispatch layer rejects them before reaching this module.

use super::{check_nullable, put_u32, put_u64, take_u32, take_u64, type_mismatch};
use crate::buffer::Buf;
use crate::error::{CodecError, Result};
use crate::types::{ColumnSchema, ColumnType, ColumnValue};

// {n: 4 bytes} | {element}*n
pub(super) fn encode_value(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    if value.is_absent() {
        check_nullable(schema)?;
        return Ok(0);
    }

    match (schema.column_type, value) {
        (ColumnType::BoolList, ColumnValue::BoolList(items)) => {
            buf.write_i32(items.len() as i32);
            for &item in items {
                buf.write_u8(u8::from(item));
            }
            Ok(4 + items.len())
        }
        (ColumnType::Int32List, ColumnValue::Int32List(items)) => {
            buf.write_i32(items.len() as i32);
            for &item in items {
                put_u32(item as u32, schema.is_le, buf);
            }
            Ok(4 + items.len() * 4)
        }
        (ColumnType::Int64List, ColumnValue::Int64List(items)) => {
            buf.write_i32(items.len() as i32);
            for &item in items {
                buf.write_i64(item);
            }
            Ok(4 + items.len() * 8)
        }
        (ColumnType::Float32List, ColumnValue::Float32List(items)) => {
            buf.write_i32(items.len() as i32);
            for &item in items {
                put_u32(item.to_bits(), schema.is_le, buf);
            }
            Ok(4 + items.len() * 4)
        }
        (ColumnType::Float64List, ColumnValue::Float64List(items)) => {
            buf.write_i32(items.len() as i32);
            for &item in items {
                put_u64(item.to_bits(), schema.is_le, buf);
            }
            Ok(4 + items.len() * 8)
        }
        (ColumnType::StringList, ColumnValue::StringList(items)) => {
            buf.write_i32(items.len() as i32);
            let mut size = 4;
            for item in items {
                buf.write_i32(item.len() as i32);
                buf.write_string(item);
                size += 4 + item.len();
            }
            Ok(size)
        }
        _ => Err(type_mismatch(schema)),
    }
}

pub(super) fn decode_value(schema: &ColumnSchema, buf: &mut Buf) -> Result<ColumnValue> {
    let count = read_count(buf)?;
    match schema.column_type {
        ColumnType::BoolList => {
            let mut items = alloc(count, buf);
            for _ in 0..count {
                items.push(buf.read_u8()? != 0);
            }
            Ok(ColumnValue::BoolList(items))
        }
        ColumnType::Int32List => {
            let mut items = alloc(count, buf);
            for _ in 0..count {
                items.push(take_u32(schema.is_le, buf)? as i32);
            }
            Ok(ColumnValue::Int32List(items))
        }
        ColumnType::Int64List => {
            let mut items = alloc(count, buf);
            for _ in 0..count {
                items.push(buf.read_i64()?);
            }
            Ok(ColumnValue::Int64List(items))
        }
        ColumnType::Float32List => {
            let mut items = alloc(count, buf);
            for _ in 0..count {
                items.push(f32::from_bits(take_u32(schema.is_le, buf)?));
            }
            Ok(ColumnValue::Float32List(items))
        }
        ColumnType::Float64List => {
            let mut items = alloc(count, buf);
            for _ in 0..count {
                items.push(f64::from_bits(take_u64(schema.is_le, buf)?));
            }
            Ok(ColumnValue::Float64List(items))
        }
        ColumnType::StringList => {
            let mut items: Vec<String> = alloc(count, buf);
            for _ in 0..count {
                let len = buf.read_i32()?;
                if len < 0 {
                    return Err(CodecError::Malformed("negative string length"));
                }
                let bytes = buf.read_bytes(len as usize)?;
                let text = String::from_utf8(bytes)
                    .map_err(|_| CodecError::Malformed("string payload is not valid utf-8"))?;
                items.push(text);
            }
            Ok(ColumnValue::StringList(items))
        }
        _ => Err(type_mismatch(schema)),
    }
}

pub(super) fn skip_value(schema: &ColumnSchema, buf: &mut Buf) -> Result<usize> {
    let count = read_count(buf)?;
    match schema.column_type {
        ColumnType::BoolList => {
            buf.skip(count)?;
            Ok(4 + count)
        }
        ColumnType::Int32List | ColumnType::Float32List => {
            buf.skip(count * 4)?;
            Ok(4 + count * 4)
        }
        ColumnType::Int64List | ColumnType::Float64List => {
            buf.skip(count * 8)?;
            Ok(4 + count * 8)
        }
        ColumnType::StringList => {
            let mut size = 4;
            for _ in 0..count {
                let len = buf.read_i32()?;
                if len < 0 {
                    return Err(CodecError::Malformed("negative string length"));
                }
                buf.skip(len as usize)?;
                size += 4 + len as usize;
            }
            Ok(size)
        }
        _ => Err(type_mismatch(schema)),
    }
}

fn read_count(buf: &mut Buf) -> Result<usize> {
    let count = buf.read_i32()?;
    if count < 0 {
        return Err(CodecError::Malformed("negative list count"));
    }
    Ok(count as usize)
}

// Pre-size from the remaining byte budget, not the untrusted count.
fn alloc<T>(count: usize, buf: &Buf) -> Vec<T> {
    Vec::with_capacity(count.min(buf.remaining()))
}
