//! Encode/decode benchmarks for the row codec.
//!
//! Measures the hot paths a storage engine drives: full encode, full decode,
//! projected decode, and key-only decode over a representative mixed-type
//! record.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rowcodec::{ColumnSchema, ColumnType, ColumnValue, RecordDecoder, RecordEncoder};

const NAMESPACE: u8 = b'r';
const COMMON_ID: i64 = 100;

fn schemas() -> Vec<ColumnSchema> {
    vec![
        ColumnSchema::new(0, "id", ColumnType::Int64).key().not_null(),
        ColumnSchema::new(1, "bucket", ColumnType::Int32).key(),
        ColumnSchema::new(2, "name", ColumnType::String),
        ColumnSchema::new(3, "active", ColumnType::Bool),
        ColumnSchema::new(4, "score", ColumnType::Float64),
        ColumnSchema::new(5, "tags", ColumnType::StringList),
        ColumnSchema::new(6, "samples", ColumnType::Float64List),
    ]
}

fn record() -> Vec<ColumnValue> {
    vec![
        ColumnValue::Int64(987_654_321),
        ColumnValue::Int32(17),
        ColumnValue::String("a moderately sized name field".into()),
        ColumnValue::Bool(true),
        ColumnValue::Float64(0.125),
        ColumnValue::StringList(vec!["alpha".into(), "beta".into(), "gamma".into()]),
        ColumnValue::Float64List((0..32).map(f64::from).collect()),
    ]
}

fn bench_encode(c: &mut Criterion) {
    let encoder = RecordEncoder::new(1, schemas(), COMMON_ID);
    let record = record();

    let mut group = c.benchmark_group("encode");
    group.bench_function("full_record", |b| {
        b.iter(|| encoder.encode(black_box(NAMESPACE), black_box(&record)).unwrap());
    });
    group.bench_function("key_only", |b| {
        b.iter(|| {
            encoder
                .encode_key(black_box(NAMESPACE), black_box(&record))
                .unwrap()
        });
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let encoder = RecordEncoder::new(1, schemas(), COMMON_ID);
    let decoder = RecordDecoder::new(1, schemas(), COMMON_ID);
    let (key, value) = encoder.encode(NAMESPACE, &record()).unwrap();

    let mut group = c.benchmark_group("decode");
    group.bench_function("full_record", |b| {
        b.iter(|| decoder.decode(black_box(&key), black_box(&value)).unwrap());
    });
    group.bench_function("project_two_columns", |b| {
        b.iter(|| {
            decoder
                .decode_columns(black_box(&key), black_box(&value), &[4, 2])
                .unwrap()
        });
    });
    group.bench_function("key_only", |b| {
        b.iter(|| decoder.decode_key(black_box(&key)).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
