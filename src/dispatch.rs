//! # Codec Version Dispatch
//!
//! Two codec generations coexist in one keyspace. Every key ends in a 4-byte
//! version tag whose low byte is the discriminator, so a consumer can route a
//! record without out-of-band metadata:
//!
//! - **encode**: the wrapper carries a [`CodecVersion`] chosen at
//!   construction (there is no implicit default) and routes every encode
//!   call to the matching codec.
//! - **decode**: the wrapper inspects the key's final byte; `0x01` routes to
//!   the V1 delegate, anything else to V2, which then validates the full tag
//!   itself.
//!
//! The V1 codec is external; callers that still hold V1 data attach it as a
//! boxed [`LegacyRecordEncoder`] / [`LegacyRecordDecoder`]. Operations that
//! need a missing delegate fail with `UnsupportedOperation`.

use crate::error::{CodecError, Result};
use crate::legacy::{LegacyRecordDecoder, LegacyRecordEncoder};
use crate::record::{RecordDecoder, RecordEncoder};
use crate::types::{ColumnSchema, ColumnValue};

/// Codec generation; the numeric value is the wire discriminator.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecVersion {
    V1 = 1,
    V2 = 2,
}

impl CodecVersion {
    /// Reads the discriminator from a key's final byte.
    ///
    /// `0x01` is V1; everything else routes to V2, whose decoder rejects a
    /// wrong tag with `CodecMismatch`.
    pub fn of_key(key: &[u8]) -> Result<CodecVersion> {
        match key.last() {
            None => Err(CodecError::Malformed("empty key")),
            Some(0x01) => Ok(CodecVersion::V1),
            Some(_) => Ok(CodecVersion::V2),
        }
    }
}

/// An encoded row as the storage engine hands it around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValue {
    key: Vec<u8>,
    value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: Vec<u8>, value: Vec<u8>) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Codec generation that produced this row.
    pub fn version(&self) -> Result<CodecVersion> {
        CodecVersion::of_key(&self.key)
    }
}

impl From<(Vec<u8>, Vec<u8>)> for KeyValue {
    fn from((key, value): (Vec<u8>, Vec<u8>)) -> Self {
        Self::new(key, value)
    }
}

/// Encoder wrapper routing by the configured codec version.
pub struct VersionedRecordEncoder {
    version: CodecVersion,
    v2: RecordEncoder,
    legacy: Option<Box<dyn LegacyRecordEncoder>>,
}

impl VersionedRecordEncoder {
    /// Creates a wrapper producing records of the given version.
    ///
    /// The V2 codec is built from the supplied schemas; a caller that picked
    /// `V1` must attach its legacy codec with [`Self::with_legacy`].
    pub fn new(
        version: CodecVersion,
        schema_version: i32,
        schemas: Vec<ColumnSchema>,
        common_id: i64,
    ) -> Self {
        Self {
            version,
            v2: RecordEncoder::new(schema_version, schemas, common_id),
            legacy: None,
        }
    }

    /// Attaches the external V1 codec.
    pub fn with_legacy(mut self, legacy: Box<dyn LegacyRecordEncoder>) -> Self {
        self.legacy = Some(legacy);
        self
    }

    pub fn version(&self) -> CodecVersion {
        self.version
    }

    pub fn encode(&self, namespace: u8, record: &[ColumnValue]) -> Result<(Vec<u8>, Vec<u8>)> {
        match self.version {
            CodecVersion::V1 => self.legacy()?.encode(namespace, record),
            CodecVersion::V2 => self.v2.encode(namespace, record),
        }
    }

    pub fn encode_key(&self, namespace: u8, record: &[ColumnValue]) -> Result<Vec<u8>> {
        match self.version {
            CodecVersion::V1 => self.legacy()?.encode_key(namespace, record),
            CodecVersion::V2 => self.v2.encode_key(namespace, record),
        }
    }

    pub fn encode_value(&self, record: &[ColumnValue]) -> Result<Vec<u8>> {
        match self.version {
            CodecVersion::V1 => self.legacy()?.encode_value(record),
            CodecVersion::V2 => self.v2.encode_value(record),
        }
    }

    /// Builds a scan prefix from the leading `column_count` key columns.
    ///
    /// Only V1 lays keys out in a way that supports this; on V2 it fails
    /// with `UnsupportedOperation`.
    pub fn encode_key_prefix(
        &self,
        namespace: u8,
        record: &[ColumnValue],
        column_count: usize,
    ) -> Result<Vec<u8>> {
        match self.version {
            CodecVersion::V1 => self
                .legacy()?
                .encode_key_prefix(namespace, record, column_count),
            CodecVersion::V2 => Err(CodecError::UnsupportedOperation("encode_key_prefix")),
        }
    }

    pub fn encode_min_key_prefix(&self, namespace: u8) -> Result<Vec<u8>> {
        match self.version {
            CodecVersion::V1 => self.legacy()?.encode_min_key_prefix(namespace),
            CodecVersion::V2 => Ok(self.v2.encode_min_key_prefix(namespace)),
        }
    }

    pub fn encode_max_key_prefix(&self, namespace: u8) -> Result<Vec<u8>> {
        match self.version {
            CodecVersion::V1 => self.legacy()?.encode_max_key_prefix(namespace),
            CodecVersion::V2 => self.v2.encode_max_key_prefix(namespace),
        }
    }

    fn legacy(&self) -> Result<&dyn LegacyRecordEncoder> {
        self.legacy
            .as_deref()
            .ok_or(CodecError::UnsupportedOperation("no V1 codec attached"))
    }
}

/// Decoder wrapper routing by the key's trailing discriminator byte.
pub struct VersionedRecordDecoder {
    v2: RecordDecoder,
    legacy: Option<Box<dyn LegacyRecordDecoder>>,
}

impl VersionedRecordDecoder {
    pub fn new(schema_version: i32, schemas: Vec<ColumnSchema>, common_id: i64) -> Self {
        Self {
            v2: RecordDecoder::new(schema_version, schemas, common_id),
            legacy: None,
        }
    }

    /// Attaches the external V1 codec for reading pre-upgrade rows.
    pub fn with_legacy(mut self, legacy: Box<dyn LegacyRecordDecoder>) -> Self {
        self.legacy = Some(legacy);
        self
    }

    pub fn decode(&self, key: &[u8], value: &[u8]) -> Result<Vec<ColumnValue>> {
        match CodecVersion::of_key(key)? {
            CodecVersion::V1 => self.legacy()?.decode(key, value),
            CodecVersion::V2 => self.v2.decode(key, value),
        }
    }

    pub fn decode_pair(&self, key_value: &KeyValue) -> Result<Vec<ColumnValue>> {
        self.decode(key_value.key(), key_value.value())
    }

    pub fn decode_columns(
        &self,
        key: &[u8],
        value: &[u8],
        columns: &[usize],
    ) -> Result<Vec<ColumnValue>> {
        match CodecVersion::of_key(key)? {
            CodecVersion::V1 => self.legacy()?.decode_columns(key, value, columns),
            CodecVersion::V2 => self.v2.decode_columns(key, value, columns),
        }
    }

    pub fn decode_key(&self, key: &[u8]) -> Result<Vec<ColumnValue>> {
        match CodecVersion::of_key(key)? {
            CodecVersion::V1 => self.legacy()?.decode_key(key),
            CodecVersion::V2 => self.v2.decode_key(key),
        }
    }

    fn legacy(&self) -> Result<&dyn LegacyRecordDecoder> {
        self.legacy
            .as_deref()
            .ok_or(CodecError::UnsupportedOperation("no V1 codec attached"))
    }
}
