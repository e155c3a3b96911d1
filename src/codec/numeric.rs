//! # Numeric Column Codecs
//!
//! Two byte-level forms per type:
//!
//! - **Key (order-preserving)**: fixed width, null flag in front, payload
//!   transformed so unsigned lexicographic comparison matches numeric order.
//!   Integers get their sign bit flipped; floats get the sign bit flipped
//!   when the sign bit is clear and all bits inverted when it is set. Null
//!   keys carry a zeroed payload so every key column keeps its width.
//! - **Value (compact)**: the native bit pattern in the column's wire
//!   endianness, no flag. Nulls are never written.
//!
//! The float transform routes on the IEEE-754 sign **bit**, not a `>= 0.0`
//! comparison, so `-0.0` and NaN survive a round trip bit-exactly while
//! every ordered value still sorts correctly: `-inf < -1.0 < -0.0 < 0.0 <
//! 1.0 < inf`.

use super::{
    check_nullable, put_u32, put_u64, take_u32, take_u64, type_mismatch, NOT_NULL_FLAG, NULL_FLAG,
};
use crate::buffer::Buf;
use crate::error::Result;
use crate::types::{ColumnSchema, ColumnValue};

const SIGN_32: u32 = 0x8000_0000;
const SIGN_64: u64 = 0x8000_0000_0000_0000;

const I32_VALUE_LEN: usize = 4;
const I32_KEY_LEN: usize = I32_VALUE_LEN + 1;
const I64_VALUE_LEN: usize = 8;
const I64_KEY_LEN: usize = I64_VALUE_LEN + 1;

fn f32_key_bits(v: f32) -> u32 {
    let bits = v.to_bits();
    if bits & SIGN_32 == 0 {
        bits ^ SIGN_32
    } else {
        !bits
    }
}

fn f32_from_key_bits(encoded: u32) -> f32 {
    if encoded & SIGN_32 != 0 {
        f32::from_bits(encoded ^ SIGN_32)
    } else {
        f32::from_bits(!encoded)
    }
}

fn f64_key_bits(v: f64) -> u64 {
    let bits = v.to_bits();
    if bits & SIGN_64 == 0 {
        bits ^ SIGN_64
    } else {
        !bits
    }
}

fn f64_from_key_bits(encoded: u64) -> f64 {
    if encoded & SIGN_64 != 0 {
        f64::from_bits(encoded ^ SIGN_64)
    } else {
        f64::from_bits(!encoded)
    }
}

// ---- i32 ----

// {null flag: 1 byte} | {sign-flipped value: 4 bytes}
pub(super) fn encode_i32_key(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    match value {
        ColumnValue::Int32(v) => {
            buf.write_u8(NOT_NULL_FLAG);
            put_u32(*v as u32 ^ SIGN_32, schema.is_le, buf);
        }
        ColumnValue::Absent => {
            check_nullable(schema)?;
            buf.write_u8(NULL_FLAG);
            buf.write_i32(0);
        }
        _ => return Err(type_mismatch(schema)),
    }
    Ok(I32_KEY_LEN)
}

pub(super) fn decode_i32_key(schema: &ColumnSchema, buf: &mut Buf) -> Result<ColumnValue> {
    if buf.read_u8()? == NULL_FLAG {
        buf.skip(I32_KEY_LEN - 1)?;
        return Ok(ColumnValue::Absent);
    }
    let bits = take_u32(schema.is_le, buf)?;
    Ok(ColumnValue::Int32((bits ^ SIGN_32) as i32))
}

// {value: 4 bytes}
pub(super) fn encode_i32_value(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    match value {
        ColumnValue::Int32(v) => {
            put_u32(*v as u32, schema.is_le, buf);
            Ok(I32_VALUE_LEN)
        }
        ColumnValue::Absent => {
            check_nullable(schema)?;
            Ok(0)
        }
        _ => Err(type_mismatch(schema)),
    }
}

pub(super) fn decode_i32_value(schema: &ColumnSchema, buf: &mut Buf) -> Result<ColumnValue> {
    Ok(ColumnValue::Int32(take_u32(schema.is_le, buf)? as i32))
}

// ---- i64 ----

// {null flag: 1 byte} | {sign-flipped value: 8 bytes}
pub(super) fn encode_i64_key(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    match value {
        ColumnValue::Int64(v) => {
            buf.write_u8(NOT_NULL_FLAG);
            buf.write_i64_first_bit_flipped(*v);
        }
        ColumnValue::Absent => {
            check_nullable(schema)?;
            buf.write_u8(NULL_FLAG);
            buf.write_i64(0);
        }
        _ => return Err(type_mismatch(schema)),
    }
    Ok(I64_KEY_LEN)
}

pub(super) fn decode_i64_key(buf: &mut Buf) -> Result<ColumnValue> {
    if buf.read_u8()? == NULL_FLAG {
        buf.skip(I64_KEY_LEN - 1)?;
        return Ok(ColumnValue::Absent);
    }
    Ok(ColumnValue::Int64(buf.read_i64_first_bit_flipped()?))
}

// {value: 8 bytes}
pub(super) fn encode_i64_value(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    match value {
        ColumnValue::Int64(v) => {
            buf.write_i64(*v);
            Ok(I64_VALUE_LEN)
        }
        ColumnValue::Absent => {
            check_nullable(schema)?;
            Ok(0)
        }
        _ => Err(type_mismatch(schema)),
    }
}

pub(super) fn decode_i64_value(buf: &mut Buf) -> Result<ColumnValue> {
    Ok(ColumnValue::Int64(buf.read_i64()?))
}

// ---- f32 ----

// {null flag: 1 byte} | {sign-split bits: 4 bytes}
pub(super) fn encode_f32_key(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    match value {
        ColumnValue::Float32(v) => {
            buf.write_u8(NOT_NULL_FLAG);
            put_u32(f32_key_bits(*v), schema.is_le, buf);
        }
        ColumnValue::Absent => {
            check_nullable(schema)?;
            buf.write_u8(NULL_FLAG);
            buf.write_i32(0);
        }
        _ => return Err(type_mismatch(schema)),
    }
    Ok(I32_KEY_LEN)
}

pub(super) fn decode_f32_key(schema: &ColumnSchema, buf: &mut Buf) -> Result<ColumnValue> {
    if buf.read_u8()? == NULL_FLAG {
        buf.skip(I32_KEY_LEN - 1)?;
        return Ok(ColumnValue::Absent);
    }
    let bits = take_u32(schema.is_le, buf)?;
    Ok(ColumnValue::Float32(f32_from_key_bits(bits)))
}

// {bits: 4 bytes}
pub(super) fn encode_f32_value(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    match value {
        ColumnValue::Float32(v) => {
            put_u32(v.to_bits(), schema.is_le, buf);
            Ok(I32_VALUE_LEN)
        }
        ColumnValue::Absent => {
            check_nullable(schema)?;
            Ok(0)
        }
        _ => Err(type_mismatch(schema)),
    }
}

pub(super) fn decode_f32_value(schema: &ColumnSchema, buf: &mut Buf) -> Result<ColumnValue> {
    Ok(ColumnValue::Float32(f32::from_bits(take_u32(
        schema.is_le,
        buf,
    )?)))
}

// ---- f64 ----

// {null flag: 1 byte} | {sign-split bits: 8 bytes}
pub(super) fn encode_f64_key(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    match value {
        ColumnValue::Float64(v) => {
            buf.write_u8(NOT_NULL_FLAG);
            put_u64(f64_key_bits(*v), schema.is_le, buf);
        }
        ColumnValue::Absent => {
            check_nullable(schema)?;
            buf.write_u8(NULL_FLAG);
            buf.write_i64(0);
        }
        _ => return Err(type_mismatch(schema)),
    }
    Ok(I64_KEY_LEN)
}

pub(super) fn decode_f64_key(schema: &ColumnSchema, buf: &mut Buf) -> Result<ColumnValue> {
    if buf.read_u8()? == NULL_FLAG {
        buf.skip(I64_KEY_LEN - 1)?;
        return Ok(ColumnValue::Absent);
    }
    let bits = take_u64(schema.is_le, buf)?;
    Ok(ColumnValue::Float64(f64_from_key_bits(bits)))
}

// {bits: 8 bytes}
pub(super) fn encode_f64_value(
    schema: &ColumnSchema,
    value: &ColumnValue,
    buf: &mut Buf,
) -> Result<usize> {
    match value {
        ColumnValue::Float64(v) => {
            put_u64(v.to_bits(), schema.is_le, buf);
            Ok(I64_VALUE_LEN)
        }
        ColumnValue::Absent => {
            check_nullable(schema)?;
            Ok(0)
        }
        _ => Err(type_mismatch(schema)),
    }
}

pub(super) fn decode_f64_value(schema: &ColumnSchema, buf: &mut Buf) -> Result<ColumnValue> {
    Ok(ColumnValue::Float64(f64::from_bits(take_u64(
        schema.is_le,
        buf,
    )?)))
}
