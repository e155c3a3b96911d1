//! # rowcodec - Row Codec for Distributed Table Storage
//!
//! `rowcodec` serializes a typed record into two opaque byte strings: a
//! **key** that compares bytewise in the same order as its column values, and
//! a **value** whose fixed header gives O(1) access to any non-key column.
//! Both decode back into typed column values, with optional projection over a
//! subset of columns.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rowcodec::{ColumnSchema, ColumnType, ColumnValue, RecordDecoder, RecordEncoder};
//!
//! let schemas = vec![
//!     ColumnSchema::new(0, "id", ColumnType::Int64).key().not_null(),
//!     ColumnSchema::new(1, "name", ColumnType::String),
//!     ColumnSchema::new(2, "score", ColumnType::Float64),
//! ];
//!
//! let encoder = RecordEncoder::new(1, schemas.clone(), common_id);
//! let (key, value) = encoder.encode(b'r', &record)?;
//!
//! let decoder = RecordDecoder::new(1, schemas, common_id);
//! let record = decoder.decode(&key, &value)?;
//! let name_only = decoder.decode_columns(&key, &value, &[1])?;
//! ```
//!
//! ## Wire Format
//!
//! ```text
//! key:   namespace(1) | common_id(8, big-endian) | key columns | version tag(4)
//! value: schema_version(4) | cnt_not_null(2) | cnt_null(2) |
//!        ids[total](2 each) | offsets[total](4 each) | payload
//! ```
//!
//! Key columns use order-preserving encodings (sign-bit tricks for integers
//! and floats, length-prefixed strings); value columns use the compact native
//! forms. Nulls in keys are explicit flag bytes over a zeroed payload; nulls
//! in values are offset sentinels and cost no payload bytes.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────┐
//! │  Versioned wrappers (V1/V2 dispatch)  │
//! ├───────────────────────────────────────┤
//! │  RecordEncoder  │  RecordDecoder      │
//! ├─────────────────┴─────────────────────┤
//! │  Value header (counts, ids, offsets)  │
//! ├───────────────────────────────────────┤
//! │  Column codecs (per-type key/value)   │
//! ├───────────────────────────────────────┤
//! │  Buf (endian-aware byte buffer)       │
//! └───────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`buffer`]: endian-aware byte buffer with positional and sequential access
//! - [`types`]: logical type set, column schemas, runtime values
//! - [`codec`]: per-type encode/decode/skip in key and value forms
//! - [`record`]: record-level encoder, decoder, and value header
//! - [`dispatch`]: codec version discriminator and versioned wrappers
//! - [`legacy`]: abstract V1 surface and schema conversion
//! - [`error`]: the `CodecError` taxonomy
//!
//! ## Concurrency
//!
//! Every encode or decode call is a self-contained synchronous computation;
//! codec instances hold only immutable configuration after construction and
//! can be shared read-only across threads.

pub mod buffer;
pub mod codec;
pub mod dispatch;
pub mod error;
pub mod legacy;
pub mod record;
pub mod types;

pub use buffer::{host_is_le, Buf};
pub use dispatch::{CodecVersion, KeyValue, VersionedRecordDecoder, VersionedRecordEncoder};
pub use error::{CodecError, Result};
pub use record::{RecordDecoder, RecordEncoder, ValueHeader};
pub use types::{ColumnSchema, ColumnType, ColumnValue};
