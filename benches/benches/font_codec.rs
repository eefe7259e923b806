//! Benchmark suite for the legacy font codec
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench font_codec

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mulkit_benches::{generate_font, sizes};
use mulkit_types::file::font::{EncodeConfig, Font, FontContainer};
use std::hint::black_box;

/// Benchmark legacy encoding at several glyph sizes
fn bench_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("font_encode");
	let config = EncodeConfig::default();

	for size in sizes::GLYPH_SIZES {
		let font = generate_font(size);
		group.throughput(Throughput::Elements(224 * size as u64 * size as u64));
		group.bench_with_input(BenchmarkId::new("legacy", size), &font, |b, font| {
			b.iter(|| black_box(black_box(font).to_legacy_bytes(&config)));
		});
	}

	group.finish();
}

/// Benchmark legacy decoding and format detection
fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("font_decode");
	let config = EncodeConfig::default();

	for size in sizes::GLYPH_SIZES {
		let data = generate_font(size).to_legacy_bytes(&config);
		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_with_input(BenchmarkId::new("legacy", size), &data, |b, data| {
			b.iter(|| black_box(Font::from_legacy_bytes(black_box(data))));
		});
		group.bench_with_input(BenchmarkId::new("detect_and_decode", size), &data, |b, data| {
			b.iter(|| black_box(FontContainer::decode(black_box(data))));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
