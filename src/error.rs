//! # Codec Error Taxonomy
//!
//! Every fallible operation in this crate returns [`CodecError`] through the
//! crate-wide [`Result`] alias. The variants split into three groups:
//!
//! | Group | Variants | Meaning |
//! |-------|----------|---------|
//! | **Routing** | `PrefixMismatch`, `CodecMismatch`, `SchemaVersionTooNew` | The bytes belong to a different partition, codec, or future schema |
//! | **Usage** | `InvalidNull`, `TypeMismatch`, `UnsupportedKeyList`, `UnsupportedOperation`, `CommonIdOverflow` | The caller handed the codec something it cannot encode |
//! | **Corruption** | `Malformed` | The byte strings are inconsistent with the wire format |
//!
//! Routing errors are expected during normal operation (a scan crossing a
//! partition boundary, a rolling upgrade reading new data). Usage errors are
//! programmer errors surfaced as values rather than panics. `Malformed` means
//! the input bytes cannot have been produced by a well-behaved encoder.
//!
//! No operation commits partial output: an encode that fails returns no bytes,
//! a decode that fails returns no record.

use crate::types::ColumnType;

/// Crate-wide result alias.
pub type Result<T, E = CodecError> = std::result::Result<T, E>;

/// Errors produced by encoding, decoding, and buffer primitives.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// The key's namespace/common-id prefix does not match this codec instance.
    #[error("key prefix mismatch: expected common id {expected}, found {found}")]
    PrefixMismatch {
        /// Common id the decoder was constructed with.
        expected: i64,
        /// Common id read from the key.
        found: i64,
    },

    /// The key's trailing codec version tag does not match the decoder.
    #[error("codec version mismatch: expected tag {expected}, found {found}")]
    CodecMismatch {
        /// Version tag this decoder handles.
        expected: i32,
        /// Version tag read from the key tail.
        found: i32,
    },

    /// The value declares a schema version newer than the decoder supports.
    #[error("schema version {found} is newer than supported version {supported}")]
    SchemaVersionTooNew {
        /// Schema version read from the value.
        found: i32,
        /// Highest schema version the decoder accepts.
        supported: i32,
    },

    /// A non-nullable column has no value at encode time.
    #[error("column {index} does not allow null but the record holds no value")]
    InvalidNull {
        /// Schema index of the offending column.
        index: usize,
    },

    /// A record value does not match its column's declared type.
    #[error("column {index} expects {expected:?} but the record holds a different type")]
    TypeMismatch {
        /// Schema index of the offending column.
        index: usize,
        /// Type the schema declares.
        expected: ColumnType,
    },

    /// A list-typed column was placed in a key position.
    #[error("list type {0:?} cannot be used as a key column")]
    UnsupportedKeyList(ColumnType),

    /// The operation is not supported by the active codec version or type.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// `encode_max_key_prefix` was called with `common_id == i64::MAX`.
    #[error("common id is i64::MAX, max key prefix would overflow")]
    CommonIdOverflow,

    /// Under-read, inconsistent header, or out-of-range buffer access.
    #[error("malformed input: {0}")]
    Malformed(&'static str),
}
