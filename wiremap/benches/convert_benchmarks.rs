use criterion::{criterion_group, criterion_main, Criterion};

use chrono::{Datelike, NaiveDate};
use wiremap::{
    Codec, CodecError, Dialect, DialectArg, FieldType, FieldValue, RecordSchema, RecordValue,
    Registry, Value,
};

fn ordinal_date_codec() -> Codec {
    Codec::new(
        FieldType::Date,
        |v| match v {
            FieldValue::Date(d) => Ok(Value::I64(i64::from(d.num_days_from_ce()))),
            other => Err(CodecError(format!("expected date, found {other:?}"))),
        },
        |v| match v {
            Value::I64(n) => i32::try_from(*n)
                .ok()
                .and_then(NaiveDate::from_num_days_from_ce_opt)
                .map(FieldValue::Date)
                .ok_or_else(|| CodecError(format!("ordinal {n} out of range"))),
            other => Err(CodecError(format!("expected ordinal, found {other:?}"))),
        },
    )
}

fn setup() -> (Registry, RecordValue) {
    let registry = Registry::new();
    registry
        .define_dialect(Dialect::builder("ordinal").with(ordinal_date_codec()).build())
        .unwrap();
    registry
        .register(
            RecordSchema::builder("Event")
                .field("dt", FieldType::Date)
                .field("i", FieldType::Int)
                .field("name", FieldType::Str)
                .dialect_support(true)
                .default_dialect("ordinal")
                .build(),
        )
        .unwrap();
    let value = RecordValue::new("Event")
        .with(
            "dt",
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
        )
        .with("i", FieldValue::Int(255))
        .with("name", FieldValue::Str("benchmark".to_owned()));
    (registry, value)
}

fn bench_to_mapping(c: &mut Criterion) {
    let (registry, value) = setup();

    // Baked path: every codec was resolved at registration.
    c.bench_function("to_mapping_no_override", |b| {
        b.iter(|| registry.to_mapping(std::hint::black_box(&value)).unwrap())
    });

    // Override path: one dialect lookup per scalar field per call.
    c.bench_function("to_mapping_with_override", |b| {
        b.iter(|| {
            registry
                .to_mapping_with(std::hint::black_box(&value), DialectArg::Named("ordinal"))
                .unwrap()
        })
    });
}

fn bench_from_mapping(c: &mut Criterion) {
    let (registry, value) = setup();
    let mapping = registry.to_mapping(&value).unwrap();

    c.bench_function("from_mapping_no_override", |b| {
        b.iter(|| {
            registry
                .from_mapping("Event", std::hint::black_box(&mapping))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_to_mapping, bench_from_mapping);
criterion_main!(benches);
