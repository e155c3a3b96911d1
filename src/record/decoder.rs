//! # Record Decoder
//!
//! Parses `(key, value)` byte strings back into schema-aligned records, with
//! optional projection over a subset of columns.
//!
//! ## Framing checks, in order
//!
//! 1. namespace byte skipped, common id compared -> `PrefixMismatch`
//! 2. trailing 4-byte tag compared -> `CodecMismatch`
//! 3. value's schema version compared -> `SchemaVersionTooNew`
//!
//! ## Cursor discipline
//!
//! Key columns have no per-column offsets, so the key cursor always advances
//! by exactly one column's width, decoded or skipped. The value cursor jumps
//! to the payload region once (unless every non-key column is null) and then
//! advances monotonically; the header's offset map supplies null detection.

use smallvec::SmallVec;

use crate::buffer::{host_is_le, Buf};
use crate::codec;
use crate::dispatch::CodecVersion;
use crate::error::{CodecError, Result};
use crate::record::header::{ValueHeader, NULL_OFFSET};
use crate::types::{ColumnSchema, ColumnValue};

/// Deserializes records of one table partition.
///
/// Like the encoder, holds only immutable configuration and may be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    schema_version: i32,
    common_id: i64,
    schemas: Vec<ColumnSchema>,
    is_le: bool,
}

impl RecordDecoder {
    /// Creates a decoder with the host's endianness convention.
    pub fn new(schema_version: i32, schemas: Vec<ColumnSchema>, common_id: i64) -> Self {
        Self::with_endianness(schema_version, schemas, common_id, host_is_le())
    }

    /// Creates a decoder with an explicit host-endianness flag; the flag is
    /// stamped onto every column schema.
    pub fn with_endianness(
        schema_version: i32,
        mut schemas: Vec<ColumnSchema>,
        common_id: i64,
        is_le: bool,
    ) -> Self {
        for schema in &mut schemas {
            schema.is_le = is_le;
        }
        Self {
            schema_version,
            common_id,
            schemas,
            is_le,
        }
    }

    pub fn schemas(&self) -> &[ColumnSchema] {
        &self.schemas
    }

    /// Decodes a full record.
    pub fn decode(&self, key: &[u8], value: &[u8]) -> Result<Vec<ColumnValue>> {
        let mut key_buf = Buf::from_slice(key, self.is_le);
        let mut value_buf = Buf::from_slice(value, self.is_le);

        self.check_prefix(&mut key_buf)?;
        self.check_codec_tag(&key_buf)?;
        self.check_schema_version(&mut value_buf)?;

        let header = ValueHeader::parse(&mut value_buf)?;
        if !header.all_null() {
            value_buf.set_read_offset(header.data_pos)?;
        }

        let mut record = vec![ColumnValue::Absent; self.schemas.len()];
        for schema in &self.schemas {
            let slot = self.slot(schema.index, record.len())?;
            if schema.is_key {
                record[slot] = codec::decode_key(schema, &mut key_buf)?;
            } else if !value_buf.is_end() {
                match header.offset_of(schema.index) {
                    Some(offset) if offset != NULL_OFFSET => {
                        record[slot] = codec::decode_value(schema, &mut value_buf)?;
                    }
                    _ => {}
                }
            }
        }

        Ok(record)
    }

    /// Decodes only the wanted columns.
    ///
    /// `columns` holds distinct positions into the schema list; the output
    /// record has one slot per requested column, in the caller's order.
    /// Unwanted columns are skipped without materializing: key columns by
    /// reading exactly their width, non-null value columns via `skip_value`.
    pub fn decode_columns(
        &self,
        key: &[u8],
        value: &[u8],
        columns: &[usize],
    ) -> Result<Vec<ColumnValue>> {
        let mut key_buf = Buf::from_slice(key, self.is_le);
        let mut value_buf = Buf::from_slice(value, self.is_le);

        self.check_prefix(&mut key_buf)?;
        self.check_codec_tag(&key_buf)?;
        self.check_schema_version(&mut value_buf)?;

        let header = ValueHeader::parse(&mut value_buf)?;
        if !header.all_null() {
            value_buf.set_read_offset(header.data_pos)?;
        }

        // (wanted schema position, output slot), walked in schema order
        let mut mapping: SmallVec<[(usize, usize); 16]> = columns
            .iter()
            .enumerate()
            .map(|(slot, &column)| (column, slot))
            .collect();
        mapping.sort_unstable();

        let mut record = vec![ColumnValue::Absent; columns.len()];
        let mut matched = 0;

        for (position, schema) in self.schemas.iter().enumerate() {
            if matched == mapping.len() {
                break;
            }

            let wanted = mapping[matched].0 == position;
            if schema.is_key {
                if wanted {
                    record[mapping[matched].1] = codec::decode_key(schema, &mut key_buf)?;
                } else {
                    codec::skip_key(schema, &mut key_buf)?;
                }
            } else if !value_buf.is_end() {
                match header.offset_of(schema.index) {
                    Some(offset) if offset != NULL_OFFSET => {
                        if wanted {
                            record[mapping[matched].1] =
                                codec::decode_value(schema, &mut value_buf)?;
                        } else {
                            codec::skip_value(schema, &mut value_buf)?;
                        }
                    }
                    _ => {}
                }
            }

            if wanted {
                matched += 1;
            }
        }

        Ok(record)
    }

    /// Decodes only the key columns; value slots stay absent.
    pub fn decode_key(&self, key: &[u8]) -> Result<Vec<ColumnValue>> {
        let mut key_buf = Buf::from_slice(key, self.is_le);

        self.check_prefix(&mut key_buf)?;
        self.check_codec_tag(&key_buf)?;

        let mut record = vec![ColumnValue::Absent; self.schemas.len()];
        for schema in &self.schemas {
            if schema.is_key {
                let slot = self.slot(schema.index, record.len())?;
                record[slot] = codec::decode_key(schema, &mut key_buf)?;
            }
        }

        Ok(record)
    }

    fn check_prefix(&self, key_buf: &mut Buf) -> Result<()> {
        key_buf.skip(1)?;
        let found = key_buf.read_i64()?;
        if found != self.common_id {
            return Err(CodecError::PrefixMismatch {
                expected: self.common_id,
                found,
            });
        }
        Ok(())
    }

    fn check_codec_tag(&self, key_buf: &Buf) -> Result<()> {
        let tag_pos = key_buf
            .len()
            .checked_sub(4)
            .ok_or(CodecError::Malformed("key shorter than its framing"))?;
        let found = key_buf.read_i32_at(tag_pos)?;
        if found != CodecVersion::V2 as i32 {
            return Err(CodecError::CodecMismatch {
                expected: CodecVersion::V2 as i32,
                found,
            });
        }
        Ok(())
    }

    fn check_schema_version(&self, value_buf: &mut Buf) -> Result<()> {
        let found = value_buf.read_i32()?;
        if found > self.schema_version {
            return Err(CodecError::SchemaVersionTooNew {
                found,
                supported: self.schema_version,
            });
        }
        Ok(())
    }

    fn slot(&self, index: usize, len: usize) -> Result<usize> {
        if index < len {
            Ok(index)
        } else {
            Err(CodecError::Malformed("schema index out of record range"))
        }
    }
}
