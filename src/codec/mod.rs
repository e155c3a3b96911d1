//! # Per-Type Column Codecs
//!
//! Every logical type supports the same capability set in two wire forms:
//!
//! | Operation | Key form | Value form |
//! |-----------|----------|------------|
//! | encode | null flag + order-preserving payload | compact payload, nulls unwritten |
//! | decode | inverse of encode | inverse of encode |
//! | skip | advance past one column, return bytes | advance past one column, return bytes |
//! | length | fixed width or error | fixed width or error |
//!
//! The type set is closed, so dispatch is a `match` on [`ColumnType`], with no
//! virtual calls on the hot path. List types are value-only: every key-form
//! operation on a list fails with `UnsupportedKeyList`.
//!
//! ## Null handling
//!
//! A null in a **key** is an explicit `0x00` flag byte followed by a zeroed
//! payload, so every key column occupies its full width and keys stay
//! positionally comparable. A null in a **value** writes nothing at all; the
//! record layout marks it with an offset of `-1`. A null for a column with
//! `allow_null == false` fails with `InvalidNull` in either form.

mod boolean;
mod list;
mod numeric;
mod string;


use crate::buffer::Buf;
use crate::error::{CodecError, Result};
use crate::types::{ColumnSchema, ColumnType, ColumnValue};

/// Key-form flag byte for a null column.
pub const NULL_FLAG: u8 = 0x00;
/// Key-form flag byte for a present column.
pub const NOT_NULL_FLAG: u8 = 0x01;

/// Encodes one column into its order-preserving key form.
pub fn encode_key(schema: &ColumnSchema, value: &ColumnValue, buf: &mut Buf) -> Result<usize> {
    match schema.column_type {
        ColumnType::Bool => boolean::encode_key(schema, value, buf),
        ColumnType::Int32 => numeric::encode_i32_key(schema, value, buf),
        ColumnType::Float32 => numeric::encode_f32_key(schema, value, buf),
        ColumnType::Int64 => numeric::encode_i64_key(schema, value, buf),
        ColumnType::Float64 => numeric::encode_f64_key(schema, value, buf),
        ColumnType::String => string::encode_key(schema, value, buf),
        ty => Err(CodecError::UnsupportedKeyList(ty)),
    }
}

/// Encodes one column into its compact value form.
///
/// Returns the number of bytes written; an absent value writes nothing and
/// returns 0.
pub fn encode_value(schema: &ColumnSchema, value: &ColumnValue, buf: &mut Buf) -> Result<usize> {
    match schema.column_type {
        ColumnType::Bool => boolean::encode_value(schema, value, buf),
        ColumnType::Int32 => numeric::encode_i32_value(schema, value, buf),
        ColumnType::Float32 => numeric::encode_f32_value(schema, value, buf),
        ColumnType::Int64 => numeric::encode_i64_value(schema, value, buf),
        ColumnType::Float64 => numeric::encode_f64_value(schema, value, buf),
        ColumnType::String => string::encode_value(schema, value, buf),
        _ => list::encode_value(schema, value, buf),
    }
}

/// Decodes one column from its key form, consuming its full key width.
pub fn decode_key(schema: &ColumnSchema, buf: &mut Buf) -> Result<ColumnValue> {
    match schema.column_type {
        ColumnType::Bool => boolean::decode_key(buf),
        ColumnType::Int32 => numeric::decode_i32_key(schema, buf),
        ColumnType::Float32 => numeric::decode_f32_key(schema, buf),
        ColumnType::Int64 => numeric::decode_i64_key(buf),
        ColumnType::Float64 => numeric::decode_f64_key(schema, buf),
        ColumnType::String => string::decode_key(buf),
        ty => Err(CodecError::UnsupportedKeyList(ty)),
    }
}

/// Decodes one column from its compact value form at the current cursor.
pub fn decode_value(schema: &ColumnSchema, buf: &mut Buf) -> Result<ColumnValue> {
    match schema.column_type {
        ColumnType::Bool => boolean::decode_value(buf),
        ColumnType::Int32 => numeric::decode_i32_value(schema, buf),
        ColumnType::Float32 => numeric::decode_f32_value(schema, buf),
        ColumnType::Int64 => numeric::decode_i64_value(buf),
        ColumnType::Float64 => numeric::decode_f64_value(schema, buf),
        ColumnType::String => string::decode_value(buf),
        _ => list::decode_value(schema, buf),
    }
}

/// Advances past one key-form column, returning the bytes consumed.
pub fn skip_key(schema: &ColumnSchema, buf: &mut Buf) -> Result<usize> {
    match schema.column_type {
        ColumnType::Bool
        | ColumnType::Int32
        | ColumnType::Float32
        | ColumnType::Int64
        | ColumnType::Float64 => {
            let len = key_length(schema.column_type)?;
            buf.skip(len)?;
            Ok(len)
        }
        ColumnType::String => string::skip_key(buf),
        ty => Err(CodecError::UnsupportedKeyList(ty)),
    }
}

/// Advances past one value-form column, returning the bytes consumed.
pub fn skip_value(schema: &ColumnSchema, buf: &mut Buf) -> Result<usize> {
    match schema.column_type {
        ColumnType::Bool
        | ColumnType::Int32
        | ColumnType::Float32
        | ColumnType::Int64
        | ColumnType::Float64 => {
            let len = value_length(schema.column_type)?;
            buf.skip(len)?;
            Ok(len)
        }
        ColumnType::String => string::skip_value(buf),
        _ => list::skip_value(schema, buf),
    }
}

/// Fixed key width of a scalar type: payload plus the null-flag byte.
pub fn key_length(column_type: ColumnType) -> Result<usize> {
    column_type
        .fixed_value_width()
        .map(|w| w + 1)
        .ok_or(CodecError::UnsupportedOperation(
            "length of variable-width column",
        ))
}

/// Fixed value width of a scalar type.
pub fn value_length(column_type: ColumnType) -> Result<usize> {
    column_type
        .fixed_value_width()
        .ok_or(CodecError::UnsupportedOperation(
            "length of variable-width column",
        ))
}

/// Writes `bits` in the column's wire order: big-endian when the producing
/// host is little-endian, memory order otherwise.
fn put_u32(bits: u32, le: bool, buf: &mut Buf) {
    let bytes = if le { bits.to_be_bytes() } else { bits.to_ne_bytes() };
    buf.write_bytes(&bytes);
}

fn put_u64(bits: u64, le: bool, buf: &mut Buf) {
    let bytes = if le { bits.to_be_bytes() } else { bits.to_ne_bytes() };
    buf.write_bytes(&bytes);
}

fn take_u32(le: bool, buf: &mut Buf) -> Result<u32> {
    let bytes = buf.read_array::<4>()?;
    Ok(if le {
        u32::from_be_bytes(bytes)
    } else {
        u32::from_ne_bytes(bytes)
    })
}

fn take_u64(le: bool, buf: &mut Buf) -> Result<u64> {
    let bytes = buf.read_array::<8>()?;
    Ok(if le {
        u64::from_be_bytes(bytes)
    } else {
        u64::from_ne_bytes(bytes)
    })
}

fn check_nullable(schema: &ColumnSchema) -> Result<()> {
    if schema.allow_null {
        Ok(())
    } else {
        Err(CodecError::InvalidNull {
            index: schema.index,
        })
    }
}

fn type_mismatch(schema: &ColumnSchema) -> CodecError {
    CodecError::TypeMismatch {
        index: schema.index,
        expected: schema.column_type,
    }
}
