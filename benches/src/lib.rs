//! Benchmark helper utilities for mulkit-rs
//!
//! This module provides generators for synthetic gump and font data, so the
//! benchmark suite runs without any client files.

use mulkit_types::file::font::constants::GLYPH_COUNT;
use mulkit_types::file::{Font, Glyph};

/// Generates raw `gumpart.mul` bytes for a `width x height` image.
///
/// Every row alternates transparent and colored runs of varying length, which
/// exercises both the run loop and the color expansion.
pub fn generate_gump_data(width: u16, height: u16) -> Vec<u8> {
	let mut table = Vec::with_capacity(height as usize * 4);
	let mut blocks = Vec::new();
	let mut index = 0u32;

	for y in 0..height {
		table.extend_from_slice(&index.to_le_bytes());

		let mut x = 0u16;
		let mut n = y;
		while x < width {
			let run = (n % 13 + 1).min(width - x);
			let value = if n % 2 == 0 {
				0
			} else {
				0x8000 | (n.wrapping_mul(37) & 0x7FFF)
			};
			blocks.extend_from_slice(&value.to_le_bytes());
			blocks.extend_from_slice(&run.to_le_bytes());
			x += run;
			n = n.wrapping_add(1);
			index += 1;
		}
	}

	table.extend_from_slice(&blocks);
	table
}

/// Generates a font with every slot filled by a `size x size` glyph.
///
/// Glyph coverage follows a per-slot diagonal pattern, giving the encoder a
/// mix of short and long runs.
pub fn generate_font(size: u8) -> Font {
	let mut font = Font::new();
	let size_usize = size as usize;
	for slot in 0..GLYPH_COUNT {
		let coverage: Vec<bool> =
			(0..size_usize * size_usize).map(|i| (i / size_usize + i % size_usize + slot) % 5 < 2).collect();
		font.set(slot, Some(Glyph::from_coverage(size, size, &coverage))).expect("slot in range");
	}
	font
}

/// Common benchmark sizes for synthetic test data
pub mod sizes {
	/// Small gump: 64x64 (4,096 pixels) - typical button
	pub const SMALL: (u16, u16) = (64, 64);
	/// Medium gump: 256x256 (65,536 pixels) - dialog background
	pub const MEDIUM: (u16, u16) = (256, 256);
	/// Large gump: 640x480 (307,200 pixels) - login screen
	pub const LARGE: (u16, u16) = (640, 480);

	/// Glyph edge lengths for font benchmarks
	pub const GLYPH_SIZES: [u8; 3] = [8, 16, 32];
}

#[cfg(test)]
mod tests {
	use super::*;
	use mulkit_types::file::gump::decode_gump;

	#[test]
	fn test_generated_gump_decodes_cleanly() {
		let (w, h) = sizes::SMALL;
		let gump = decode_gump(&generate_gump_data(w, h), w, h).unwrap();
		assert!(gump.is_clean());
	}

	#[test]
	fn test_generated_font_is_full() {
		let font = generate_font(8);
		assert_eq!(font.stats().non_blank, 224);
	}
}
