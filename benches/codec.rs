//! Codec Benchmarks
//!
//! Measures the marshal and unmarshal engines on a derived record that mixes
//! every field kind, and how both scale with the number of records in a
//! flat-file batch.
//!
//! ## Running
//!
//! ```bash
//! # All codec benchmarks
//! cargo bench --bench codec
//!
//! # Specific categories
//! cargo bench --bench codec -- "codec/marshal"
//! cargo bench --bench codec -- "codec/unmarshal"
//! cargo bench --bench codec -- "batch"
//! ```

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fixedwidth::{from_bytes, marshal, record_width, Record};

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, Default, Record)]
struct Amount {
    #[fixed("len:3")]
    currency: String,
    #[fixed("len:12,pad: ")]
    cents: i64,
}

#[derive(Debug, Default, Record)]
struct Transaction {
    #[fixed("len:10")]
    id: u64,
    #[fixed("len:8,format:%Y%m%d")]
    posted: NaiveDate,
    #[fixed("len:30")]
    memo: String,
    #[fixed("len:15")]
    amount: Amount,
    #[fixed("len:15")]
    fee: Option<Amount>,
    #[fixed("len:8,base:16")]
    checksum: u32,
}

fn transaction(i: u64) -> Transaction {
    Transaction {
        id: i,
        posted: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        memo: format!("payment reference {}", i),
        amount: Amount {
            currency: "USD".to_string(),
            cents: (i as i64) * 125,
        },
        fee: (i % 2 == 0).then(|| Amount {
            currency: "USD".to_string(),
            cents: 99,
        }),
        checksum: (i as u32).wrapping_mul(2_654_435_761),
    }
}

// ============================================================================
// Single record
// ============================================================================

fn codec_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let width = record_width::<Transaction>().unwrap() as u64;
    group.throughput(Throughput::Bytes(width));

    let record = transaction(42);
    group.bench_function("marshal", |b| {
        b.iter(|| black_box(marshal(black_box(&record)).unwrap()));
    });

    let bytes = marshal(&record).unwrap();
    group.bench_function("unmarshal", |b| {
        b.iter(|| black_box(from_bytes::<Transaction>(black_box(&bytes)).unwrap()));
    });

    group.finish();
}

// ============================================================================
// Batch scaling
// ============================================================================

fn codec_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let width = record_width::<Transaction>().unwrap();

    for count in [100u64, 1_000, 10_000] {
        let records: Vec<Transaction> = (0..count).map(transaction).collect();
        let file: Vec<u8> = records
            .iter()
            .flat_map(|r| marshal(r).unwrap())
            .collect();

        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::new("marshal", count), &records, |b, records| {
            b.iter(|| {
                for r in records {
                    black_box(marshal(r).unwrap());
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("unmarshal", count), &file, |b, file| {
            b.iter(|| {
                for line in file.chunks_exact(width) {
                    black_box(from_bytes::<Transaction>(line).unwrap());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, codec_single, codec_batch);
criterion_main!(benches);
