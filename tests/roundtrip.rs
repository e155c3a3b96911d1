//! End-to-end scenarios over the public API: full round trips, key ordering,
//! projection, the all-null value shape, version dispatch, and partition
//! prefix boundaries.

use eyre::Result;
use rowcodec::{
    CodecError, CodecVersion, ColumnSchema, ColumnType, ColumnValue, KeyValue, RecordDecoder,
    RecordEncoder, VersionedRecordDecoder, VersionedRecordEncoder,
};

const NAMESPACE: u8 = b'r';
const COMMON_ID: i64 = 100;

fn scenario_schemas() -> Vec<ColumnSchema> {
    vec![
        ColumnSchema::new(0, "seq", ColumnType::Int32).key(),
        ColumnSchema::new(1, "tag", ColumnType::String).key(),
        ColumnSchema::new(2, "ok", ColumnType::Bool),
        ColumnSchema::new(3, "score", ColumnType::Float64),
    ]
}

fn scenario_record() -> Vec<ColumnValue> {
    vec![
        ColumnValue::Int32(7),
        ColumnValue::String("ab".into()),
        ColumnValue::Bool(true),
        ColumnValue::Absent,
    ]
}

mod full_round_trip {
    use super::*;

    #[test]
    fn mixed_type_record_survives_encode_then_decode() -> Result<()> {
        let encoder = RecordEncoder::new(1, scenario_schemas(), COMMON_ID);
        let decoder = RecordDecoder::new(1, scenario_schemas(), COMMON_ID);

        let (key, value) = encoder.encode(NAMESPACE, &scenario_record())?;
        assert_eq!(*key.last().unwrap(), 0x02);

        let decoded = decoder.decode(&key, &value)?;
        assert_eq!(decoded, scenario_record());
        Ok(())
    }

    #[test]
    fn round_trip_law_holds_per_column_including_nulls() -> Result<()> {
        let schemas = vec![
            ColumnSchema::new(0, "id", ColumnType::Int64).key().not_null(),
            ColumnSchema::new(1, "flags", ColumnType::BoolList),
            ColumnSchema::new(2, "title", ColumnType::String),
            ColumnSchema::new(3, "weights", ColumnType::Float64List),
            ColumnSchema::new(4, "count", ColumnType::Int32),
        ];
        let records = vec![
            vec![
                ColumnValue::Int64(1),
                ColumnValue::BoolList(vec![true; 16]),
                ColumnValue::String("first".into()),
                ColumnValue::Float64List(vec![0.5, -0.5]),
                ColumnValue::Int32(3),
            ],
            vec![
                ColumnValue::Int64(2),
                ColumnValue::Absent,
                ColumnValue::String(String::new()),
                ColumnValue::Absent,
                ColumnValue::Absent,
            ],
        ];

        let encoder = RecordEncoder::new(1, schemas.clone(), COMMON_ID);
        let decoder = RecordDecoder::new(1, schemas, COMMON_ID);
        for record in records {
            let (key, value) = encoder.encode(NAMESPACE, &record)?;
            assert_eq!(decoder.decode(&key, &value)?, record);
        }
        Ok(())
    }
}

mod key_ordering {
    use super::*;

    fn i32_key(v: i32) -> Vec<u8> {
        let schemas = vec![ColumnSchema::new(0, "k", ColumnType::Int32).key()];
        RecordEncoder::new(1, schemas, COMMON_ID)
            .encode_key(NAMESPACE, &[ColumnValue::Int32(v)])
            .unwrap()
    }

    #[test]
    fn integer_keys_sort_numerically_under_bytewise_compare() {
        let keys = [i32_key(-5), i32_key(0), i32_key(5)];
        assert!(keys[0] < keys[1]);
        assert!(keys[1] < keys[2]);
    }

    #[test]
    fn float_keys_sort_numerically_under_bytewise_compare() {
        let schemas = vec![ColumnSchema::new(0, "k", ColumnType::Float64).key()];
        let encoder = RecordEncoder::new(1, schemas, COMMON_ID);
        let key = |v: f64| {
            encoder
                .encode_key(NAMESPACE, &[ColumnValue::Float64(v)])
                .unwrap()
        };

        let ordered = [f64::NEG_INFINITY, -2.5, -0.0, 0.0, 2.5, f64::INFINITY];
        for pair in ordered.windows(2) {
            assert!(key(pair[0]) < key(pair[1]), "{} !< {}", pair[0], pair[1]);
        }
    }
}

mod projection {
    use super::*;

    #[test]
    fn projected_decode_returns_wanted_columns_in_caller_order() -> Result<()> {
        let mut schemas = scenario_schemas();
        schemas.push(ColumnSchema::new(4, "n", ColumnType::Int64));
        schemas.push(ColumnSchema::new(5, "s", ColumnType::String));

        let mut record = scenario_record();
        record.push(ColumnValue::Int64(42));
        record.push(ColumnValue::String("xyz".into()));

        let encoder = RecordEncoder::new(1, schemas.clone(), COMMON_ID);
        let decoder = RecordDecoder::new(1, schemas, COMMON_ID);
        let (key, value) = encoder.encode(NAMESPACE, &record)?;

        let projected = decoder.decode_columns(&key, &value, &[5, 2])?;
        assert_eq!(
            projected,
            vec![ColumnValue::String("xyz".into()), ColumnValue::Bool(true)]
        );
        Ok(())
    }
}

mod all_null_layout {
    use super::*;

    #[test]
    fn all_null_value_is_exactly_header_plus_arrays() -> Result<()> {
        let schemas = vec![
            ColumnSchema::new(0, "k", ColumnType::Int32).key(),
            ColumnSchema::new(1, "a", ColumnType::Int32),
            ColumnSchema::new(2, "b", ColumnType::String),
        ];
        let record = vec![ColumnValue::Int32(9), ColumnValue::Absent, ColumnValue::Absent];

        let encoder = RecordEncoder::new(1, schemas.clone(), COMMON_ID);
        let decoder = RecordDecoder::new(1, schemas, COMMON_ID);
        let (key, value) = encoder.encode(NAMESPACE, &record)?;

        // id/offset arrays are always materialized: 8 + 6 * 2 bytes
        assert_eq!(value.len(), 20);
        assert_eq!(&value[4..8], &[0x00, 0x00, 0x00, 0x02]);

        assert_eq!(decoder.decode(&key, &value)?, record);
        Ok(())
    }
}

mod dispatch {
    use super::*;

    struct StubV1;

    impl rowcodec::legacy::LegacyRecordDecoder for StubV1 {
        fn decode(&self, _key: &[u8], _value: &[u8]) -> rowcodec::Result<Vec<ColumnValue>> {
            Ok(vec![ColumnValue::String("from v1".into())])
        }

        fn decode_columns(
            &self,
            _key: &[u8],
            _value: &[u8],
            _columns: &[usize],
        ) -> rowcodec::Result<Vec<ColumnValue>> {
            Ok(vec![])
        }

        fn decode_key(&self, _key: &[u8]) -> rowcodec::Result<Vec<ColumnValue>> {
            Ok(vec![])
        }
    }

    #[test]
    fn trailing_byte_routes_each_record_to_its_codec() -> Result<()> {
        let schemas = scenario_schemas();
        let encoder = VersionedRecordEncoder::new(CodecVersion::V2, 1, schemas.clone(), COMMON_ID);
        let decoder =
            VersionedRecordDecoder::new(1, schemas, COMMON_ID).with_legacy(Box::new(StubV1));

        let (key, value) = encoder.encode(NAMESPACE, &scenario_record())?;
        assert_eq!(KeyValue::new(key.clone(), value.clone()).version()?, CodecVersion::V2);
        assert_eq!(decoder.decode(&key, &value)?, scenario_record());

        // a V1 key (trailing 0x01) lands in the legacy codec
        let v1_key = vec![NAMESPACE, 0x01];
        let decoded = decoder.decode(&v1_key, &[])?;
        assert_eq!(decoded, vec![ColumnValue::String("from v1".into())]);
        Ok(())
    }

    #[test]
    fn partial_key_prefix_is_rejected_on_v2() {
        let encoder = VersionedRecordEncoder::new(CodecVersion::V2, 1, scenario_schemas(), COMMON_ID);
        assert_eq!(
            encoder.encode_key_prefix(NAMESPACE, &scenario_record(), 1),
            Err(CodecError::UnsupportedOperation("encode_key_prefix"))
        );
    }
}

mod partition_prefixes {
    use super::*;

    #[test]
    fn max_prefix_is_the_incremented_common_id() -> Result<()> {
        let schemas = vec![ColumnSchema::new(0, "k", ColumnType::Int32).key()];
        let encoder = RecordEncoder::new(1, schemas, 10);

        let max = encoder.encode_max_key_prefix(NAMESPACE)?;
        assert_eq!(max, vec![NAMESPACE, 0, 0, 0, 0, 0, 0, 0, 11]);
        Ok(())
    }

    #[test]
    fn max_prefix_overflows_at_i64_max() {
        let schemas = vec![ColumnSchema::new(0, "k", ColumnType::Int32).key()];
        let encoder = RecordEncoder::new(1, schemas, i64::MAX);
        assert_eq!(
            encoder.encode_max_key_prefix(NAMESPACE),
            Err(CodecError::CommonIdOverflow)
        );
    }
}
