//! # Record Encoder
//!
//! Turns a schema-aligned record into the key and value byte strings:
//!
//! ```text
//! key:   namespace (1 B) | common_id (8 B, big-endian) | key columns | version tag (4 B)
//! value: schema_version (4 B) | cnt_not_null (2 B) | cnt_null (2 B) |
//!        ids (2 B each) | offsets (4 B each) | payload
//! ```
//!
//! The value header region (`8 + 6 * col_cnt` bytes) is reserved up front and
//! filled positionally while payloads append behind it; the two counts are
//! back-patched at the end. The id and offset arrays are always materialized:
//! an all-null record for `n` non-key columns encodes to exactly `8 + 6n`
//! bytes with every offset set to `-1`. That shape is part of this crate's
//! public contract.
//!
//! No operation commits partial output: bytes are handed out only on
//! success.

use crate::buffer::{host_is_le, Buf};
use crate::codec;
use crate::dispatch::CodecVersion;
use crate::error::{CodecError, Result};
use crate::record::header::{FIXED_PREFIX, ID_WIDTH, NULL_OFFSET, OFFSET_WIDTH};
use crate::types::{ColumnSchema, ColumnValue};

// Worker buffer capacity; grows geometrically past this.
const BUF_INIT_CAPACITY: usize = 2048;

/// Serializes records for one table partition.
///
/// Holds only immutable configuration after construction; per-call buffer
/// state is local, so a shared reference can encode from many threads.
#[derive(Debug, Clone)]
pub struct RecordEncoder {
    schema_version: i32,
    common_id: i64,
    schemas: Vec<ColumnSchema>,
    is_le: bool,
}

impl RecordEncoder {
    /// Creates an encoder with the host's endianness convention.
    pub fn new(schema_version: i32, schemas: Vec<ColumnSchema>, common_id: i64) -> Self {
        Self::with_endianness(schema_version, schemas, common_id, host_is_le())
    }

    /// Creates an encoder with an explicit host-endianness flag.
    ///
    /// Every column schema is stamped with the same flag; numeric codecs must
    /// not mix conventions within one record.
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

    pub fn common_id(&self) -> i64 {
        self.common_id
    }

    /// Encodes a full record into `(key, value)`.
    pub fn encode(&self, namespace: u8, record: &[ColumnValue]) -> Result<(Vec<u8>, Vec<u8>)> {
        let key = self.encode_key(namespace, record)?;
        let value = self.encode_value(record)?;
        Ok((key, value))
    }

    /// Encodes only the key string.
    pub fn encode_key(&self, namespace: u8, record: &[ColumnValue]) -> Result<Vec<u8>> {
        self.check_record_len(record)?;
        let mut buf = Buf::with_capacity(BUF_INIT_CAPACITY, self.is_le);

        self.encode_prefix(namespace, &mut buf);
        for schema in &self.schemas {
            if schema.is_key {
                codec::encode_key(schema, column_at(record, schema.index)?, &mut buf)?;
            }
        }
        buf.write_i32(CodecVersion::V2 as i32);

        Ok(buf.into_bytes())
    }

    /// Encodes only the value string.
    pub fn encode_value(&self, record: &[ColumnValue]) -> Result<Vec<u8>> {
        self.check_record_len(record)?;
        let mut buf = Buf::with_capacity(BUF_INIT_CAPACITY, self.is_le);

        let col_cnt = self.schemas.iter().filter(|s| !s.is_key).count();

        buf.write_i32(self.schema_version);

        let cnt_not_null_pos = 4;
        let cnt_null_pos = cnt_not_null_pos + 2;
        let mut ids_pos = FIXED_PREFIX;
        let mut offset_pos = FIXED_PREFIX + ID_WIDTH * col_cnt;
        let mut data_pos = offset_pos + OFFSET_WIDTH * col_cnt;

        buf.resize(data_pos);

        let mut cnt_not_null: i16 = 0;
        let mut cnt_null: i16 = 0;

        for schema in &self.schemas {
            if schema.is_key {
                continue;
            }
            let column = column_at(record, schema.index)?;
            buf.write_i16_at(ids_pos, schema.index as i16)?;
            ids_pos += ID_WIDTH;

            if column.is_absent() {
                // the null check still runs for non-nullable columns
                codec::encode_value(schema, column, &mut buf)?;
                cnt_null += 1;
                buf.write_i32_at(offset_pos, NULL_OFFSET)?;
            } else {
                cnt_not_null += 1;
                buf.write_i32_at(offset_pos, data_pos as i32)?;
                data_pos += codec::encode_value(schema, column, &mut buf)?;
            }
            offset_pos += OFFSET_WIDTH;
        }

        buf.write_i16_at(cnt_not_null_pos, cnt_not_null)?;
        buf.write_i16_at(cnt_null_pos, cnt_null)?;

        Ok(buf.into_bytes())
    }

    /// Smallest key prefix of this partition: `namespace | common_id`.
    pub fn encode_min_key_prefix(&self, namespace: u8) -> Vec<u8> {
        let mut buf = Buf::with_capacity(9, self.is_le);
        buf.write_u8(namespace);
        buf.write_i64(self.common_id);
        buf.into_bytes()
    }

    /// Exclusive upper bound of this partition: `namespace | common_id + 1`.
    pub fn encode_max_key_prefix(&self, namespace: u8) -> Result<Vec<u8>> {
        if self.common_id == i64::MAX {
            return Err(CodecError::CommonIdOverflow);
        }
        let mut buf = Buf::with_capacity(9, self.is_le);
        buf.write_u8(namespace);
        buf.write_i64(self.common_id + 1);
        Ok(buf.into_bytes())
    }

    fn encode_prefix(&self, namespace: u8, buf: &mut Buf) {
        buf.write_u8(namespace);
        buf.write_i64(self.common_id);
    }

    fn check_record_len(&self, record: &[ColumnValue]) -> Result<()> {
        if record.len() != self.schemas.len() {
            return Err(CodecError::Malformed(
                "record column count does not match schema list",
            ));
        }
        Ok(())
    }
}

fn column_at(record: &[ColumnValue], index: usize) -> Result<&ColumnValue> {
    record
        .get(index)
        .ok_or(CodecError::Malformed("schema index out of record range"))
}
