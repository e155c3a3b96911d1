//! # Legacy (V1) Codec Surface
//!
//! The V1 codec lives outside this crate; old rows stay readable through it
//! during and after a rolling upgrade. This module defines the abstract
//! encode/decode surface the versioned wrappers delegate to, the V1 schema
//! representation, and the pure 1-to-1 conversion between the V1 and V2
//! schema forms so either concrete codec can be constructed from either
//! form.

use crate::error::Result;
use crate::types::{ColumnSchema, ColumnType, ColumnValue};

/// V1's names for the logical type set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyColumnType {
    Bool,
    Integer,
    Float,
    Long,
    Double,
    String,
    BoolList,
    IntegerList,
    FloatList,
    LongList,
    DoubleList,
    StringList,
}

/// V1's column description; same field set as [`ColumnSchema`] under the V1
/// type names.
#[derive(Debug, Clone)]
pub struct LegacyColumnSchema {
    pub index: usize,
    pub name: String,
    pub column_type: LegacyColumnType,
    pub is_key: bool,
    pub allow_null: bool,
    pub is_le: bool,
}

/// Abstract encode surface of the V1 codec.
///
/// `encode_key_prefix` builds a scan prefix from the leading `column_count`
/// key columns, an operation only V1 supports.
pub trait LegacyRecordEncoder {
    fn encode(&self, namespace: u8, record: &[ColumnValue]) -> Result<(Vec<u8>, Vec<u8>)>;
    fn encode_key(&self, namespace: u8, record: &[ColumnValue]) -> Result<Vec<u8>>;
    fn encode_value(&self, record: &[ColumnValue]) -> Result<Vec<u8>>;
    fn encode_key_prefix(
        &self,
        namespace: u8,
        record: &[ColumnValue],
        column_count: usize,
    ) -> Result<Vec<u8>>;
    fn encode_min_key_prefix(&self, namespace: u8) -> Result<Vec<u8>>;
    fn encode_max_key_prefix(&self, namespace: u8) -> Result<Vec<u8>>;
}

/// Abstract decode surface of the V1 codec.
pub trait LegacyRecordDecoder {
    fn decode(&self, key: &[u8], value: &[u8]) -> Result<Vec<ColumnValue>>;
    fn decode_columns(&self, key: &[u8], value: &[u8], columns: &[usize])
        -> Result<Vec<ColumnValue>>;
    fn decode_key(&self, key: &[u8]) -> Result<Vec<ColumnValue>>;
}

fn to_legacy_type(column_type: ColumnType) -> LegacyColumnType {
    match column_type {
        ColumnType::Bool => LegacyColumnType::Bool,
        ColumnType::Int32 => LegacyColumnType::Integer,
        ColumnType::Float32 => LegacyColumnType::Float,
        ColumnType::Int64 => LegacyColumnType::Long,
        ColumnType::Float64 => LegacyColumnType::Double,
        ColumnType::String => LegacyColumnType::String,
        ColumnType::BoolList => LegacyColumnType::BoolList,
        ColumnType::Int32List => LegacyColumnType::IntegerList,
        ColumnType::Float32List => LegacyColumnType::FloatList,
        ColumnType::Int64List => LegacyColumnType::LongList,
        ColumnType::Float64List => LegacyColumnType::DoubleList,
        ColumnType::StringList => LegacyColumnType::StringList,
    }
}

fn from_legacy_type(column_type: LegacyColumnType) -> ColumnType {
    match column_type {
        LegacyColumnType::Bool => ColumnType::Bool,
        LegacyColumnType::Integer => ColumnType::Int32,
        LegacyColumnType::Float => ColumnType::Float32,
        LegacyColumnType::Long => ColumnType::Int64,
        LegacyColumnType::Double => ColumnType::Float64,
        LegacyColumnType::String => ColumnType::String,
        LegacyColumnType::BoolList => ColumnType::BoolList,
        LegacyColumnType::IntegerList => ColumnType::Int32List,
        LegacyColumnType::FloatList => ColumnType::Float32List,
        LegacyColumnType::LongList => ColumnType::Int64List,
        LegacyColumnType::DoubleList => ColumnType::Float64List,
        LegacyColumnType::StringList => ColumnType::StringList,
    }
}

/// Converts a V2 schema list into the V1 representation.
pub fn to_legacy_schemas(schemas: &[ColumnSchema]) -> Vec<LegacyColumnSchema> {
    schemas
        .iter()
        .map(|schema| LegacyColumnSchema {
            index: schema.index,
            name: schema.name.clone(),
            column_type: to_legacy_type(schema.column_type),
            is_key: schema.is_key,
            allow_null: schema.allow_null,
            is_le: schema.is_le,
        })
        .collect()
}

/// Converts a V1 schema list into the V2 representation.
pub fn from_legacy_schemas(schemas: &[LegacyColumnSchema]) -> Vec<ColumnSchema> {
    schemas
        .iter()
        .map(|schema| ColumnSchema {
            index: schema.index,
            name: schema.name.clone(),
            column_type: from_legacy_type(schema.column_type),
            is_key: schema.is_key,
            allow_null: schema.allow_null,
            is_le: schema.is_le,
        })
        .collect()
}
