//! Benchmarks for name decoding.
//!
//! These benchmarks measure performance of:
//! - Each decoding strategy on a typical name
//! - Custom-table decoding under lock contention
//!
//! Run with: cargo bench -p safename --bench decode

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use safename::huff0::Table as HuffTable;
use safename::table::{TABLE_CUSTOM, TABLE_RLE, TABLE_UNCOMPRESSED};
use safename::{selector, Decoder, Dictionaries};

const NAME: &[u8] = b"quarterly-report-2024-final.pdf";

fn encode_name(id: u8, payload: &[u8]) -> String {
    let mut name = String::new();
    if let Some(c) = selector::selector_for(id) {
        name.push(c);
    }
    name.push_str(&URL_SAFE_NO_PAD.encode(payload));
    name
}

fn custom_payload(name: &[u8]) -> Vec<u8> {
    let table = HuffTable::from_sample(name).unwrap();
    let mut payload = Vec::new();
    table.write(&mut payload).unwrap();
    payload.extend(table.encoder().compress_1x(name).unwrap());
    payload
}

/// Benchmark every strategy through the raw entry point
fn bench_strategies(c: &mut Criterion) {
    let decoder = Decoder::new();
    let mut group = c.benchmark_group("decode_bytes");
    group.throughput(Throughput::Bytes(NAME.len() as u64));

    group.bench_function("uncompressed", |b| {
        b.iter(|| decoder.decode_bytes(TABLE_UNCOMPRESSED, black_box(NAME)))
    });

    group.bench_function("run_length", |b| {
        b.iter(|| decoder.decode_bytes(TABLE_RLE, black_box(&[0x80, 0x02, b'x'])))
    });

    let custom = custom_payload(NAME);
    group.bench_function("custom", |b| {
        b.iter(|| decoder.decode_bytes(TABLE_CUSTOM, black_box(&custom)))
    });

    let lower = Dictionaries::global().get(0).unwrap();
    let stream = lower.table().encoder().compress_1x(NAME).unwrap();
    group.bench_function("dictionary", |b| {
        b.iter(|| decoder.decode_bytes(0, black_box(&stream)))
    });

    group.finish();
}

/// Benchmark the full path including selector and base64
fn bench_encoded_names(c: &mut Criterion) {
    let decoder = Decoder::new();
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(1));

    let plain = encode_name(TABLE_UNCOMPRESSED, NAME);
    group.bench_function("uncompressed", |b| {
        b.iter(|| decoder.decode(black_box(&plain)))
    });

    let custom = encode_name(TABLE_CUSTOM, &custom_payload(NAME));
    group.bench_function("custom", |b| b.iter(|| decoder.decode(black_box(&custom))));

    group.bench_function("corrupt_selector", |b| {
        b.iter(|| decoder.decode(black_box("!aGVsbG8")))
    });

    group.finish();
}

/// Custom-table decodes from several threads sharing one scratch
fn bench_custom_contention(c: &mut Criterion) {
    let decoder = Decoder::new();
    let payload = custom_payload(NAME);
    let mut group = c.benchmark_group("custom_contention");
    group.throughput(Throughput::Elements(4 * 64));

    group.bench_function("4_threads", |b| {
        b.iter(|| {
            std::thread::scope(|s| {
                for _ in 0..4 {
                    s.spawn(|| {
                        for _ in 0..64 {
                            let _ = black_box(decoder.decode_bytes(TABLE_CUSTOM, &payload));
                        }
                    });
                }
            })
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_strategies,
    bench_encoded_names,
    bench_custom_contention,
);

criterion_main!(benches);
