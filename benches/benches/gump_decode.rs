//! Benchmark suite for gump decoding
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench gump_decode

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mulkit_benches::{generate_gump_data, sizes};
use mulkit_types::file::gump::decode_gump;
use std::hint::black_box;

/// Benchmark full gump decode at several sizes
fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("gump_decode");

	for (name, (w, h)) in [("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)] {
		let data = generate_gump_data(w, h);
		group.throughput(Throughput::Elements(w as u64 * h as u64));
		group.bench_with_input(BenchmarkId::new("decode", name), &data, |b, data| {
			b.iter(|| black_box(decode_gump(black_box(data), w, h)));
		});
	}

	group.finish();
}

/// Benchmark RGBA conversion of a decoded gump
fn bench_to_rgba(c: &mut Criterion) {
	let mut group = c.benchmark_group("gump_rgba");

	let (w, h) = sizes::LARGE;
	let Ok(gump) = decode_gump(&generate_gump_data(w, h), w, h) else {
		eprintln!("Warning: could not decode synthetic gump");
		return;
	};

	group.throughput(Throughput::Bytes(w as u64 * h as u64 * 4));
	group.bench_function("to_rgba_bytes", |b| {
		b.iter(|| black_box(gump.image.to_rgba_bytes()));
	});

	group.finish();
}

criterion_group!(benches, bench_decode, bench_to_rgba);
criterion_main!(benches);
