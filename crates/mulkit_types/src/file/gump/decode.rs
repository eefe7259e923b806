//! Gump art decompression.
//!
//! ## Layout
//!
//! One `gumpart.mul` entry is a row lookup table followed by run blocks:
//!
//! | Offset        | Size           | Field                               |
//! |---------------|----------------|-------------------------------------|
//! | 0x00          | `height * 4`   | row table, u32 LE per row           |
//! | `height * 4`  | rest           | run blocks, 4 bytes each            |
//!
//! A run block is `value: u16 LE`, `run: u16 LE`. `value == 0` is
//! transparent; anything else is `value ^ 0x8000` as 5-5-5 RGB.
//!
//! ## Row table
//!
//! Each entry is read as a run-block index relative to the first entry:
//! row `y` starts at block `table[y] - table[0]` and owns
//! `table[y + 1] - table[y]` blocks (the last row owns everything left).
//!
//! This reading was checked against a single reference image only. Byte
//! offsets and absolute word indices were also seen in the wild; if a corpus
//! of images decodes with many row mismatches, the table reading is the first
//! suspect.

use log::warn;

use crate::file::{Color, FileType, MulFileError};

/// Size of one row table entry in bytes.
const ROW_ENTRY_SIZE: usize = 4;

/// Size of one run block in bytes.
const RUN_BLOCK_SIZE: usize = 4;

/// A decoded RGBA bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GumpImage {
	width: u16,
	height: u16,
	pixels: Vec<Color>,
}

impl GumpImage {
	/// Creates a fully transparent image.
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			width,
			height,
			pixels: vec![Color::transparent(); width as usize * height as usize],
		}
	}

	/// Returns the width in pixels.
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Returns the height in pixels.
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Returns the row-major pixels.
	pub fn pixels(&self) -> &[Color] {
		&self.pixels
	}

	/// Gets the pixel at (x, y), or `None` outside the image.
	pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
		if x >= self.width as usize || y >= self.height as usize {
			return None;
		}
		Some(self.pixels[y * self.width as usize + x])
	}

	/// Returns one row of pixels.
	pub fn row(&self, y: usize) -> Option<&[Color]> {
		let w = self.width as usize;
		self.pixels.get(y * w..(y + 1) * w)
	}

	/// Returns the pixels as tightly packed RGBA8 bytes.
	pub fn to_rgba_bytes(&self) -> Vec<u8> {
		self.pixels.iter().flat_map(Color::to_array).collect()
	}
}

/// A row whose run lengths did not add up to the image width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowMismatch {
	/// Row index
	pub row: usize,
	/// Sum of the run lengths consumed for the row
	pub run_sum: usize,
}

/// Result of decoding one gump.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodedGump {
	/// The bitmap, always `width * height`
	pub image: GumpImage,
	/// Rows that did not decode cleanly
	pub mismatches: Vec<RowMismatch>,
}

impl DecodedGump {
	/// Returns `true` if every row summed to the image width.
	pub fn is_clean(&self) -> bool {
		self.mismatches.is_empty()
	}
}

/// Decodes one gump from its raw `gumpart.mul` bytes.
///
/// `width` and `height` come from the matching `gumpidx.mul` entry.
/// Malformed rows are reported in [`DecodedGump::mismatches`] and logged;
/// the returned image is always complete.
///
/// # Errors
///
/// Returns an error only if the data cannot hold the row table.
pub fn decode_gump(data: &[u8], width: u16, height: u16) -> Result<DecodedGump, MulFileError> {
	let h = height as usize;
	let w = width as usize;
	let table_size = h * ROW_ENTRY_SIZE;
	if data.len() < table_size {
		return Err(MulFileError::insufficient_data(FileType::GumpArt, table_size, data.len()));
	}

	let table: Vec<u32> = data[..table_size]
		.chunks_exact(ROW_ENTRY_SIZE)
		.map(|e| u32::from_le_bytes([e[0], e[1], e[2], e[3]]))
		.collect();
	let blocks = &data[table_size..];
	let total_blocks = blocks.len() / RUN_BLOCK_SIZE;
	let base = table.first().copied().unwrap_or(0);

	let mut image = GumpImage::new(width, height);
	let mut mismatches = Vec::new();

	for y in 0..h {
		let block_range = table[y].checked_sub(base).map(|start| start as usize).and_then(|start| {
			let end = match table.get(y + 1) {
				Some(&next) => next.checked_sub(base)? as usize,
				None => total_blocks,
			};
			(start <= end).then_some(start..end.min(total_blocks))
		});

		let row = &mut image.pixels[y * w..(y + 1) * w];
		let run_sum = match block_range {
			Some(range) => fill_row(row, blocks, range),
			None => 0,
		};

		if run_sum != w {
			warn!("gump row {y}: run sum {run_sum} != width {w}");
			mismatches.push(RowMismatch {
				row: y,
				run_sum,
			});
		}
	}

	Ok(DecodedGump {
		image,
		mismatches,
	})
}

/// Paints the run blocks in `range` into `row` and returns the run sum.
///
/// Stops once the row is full; pixels past the end are dropped.
fn fill_row(row: &mut [Color], blocks: &[u8], range: std::ops::Range<usize>) -> usize {
	let mut x = 0usize;
	for index in range {
		if x >= row.len() {
			break;
		}
		let Some(block) = blocks.get(index * RUN_BLOCK_SIZE..(index + 1) * RUN_BLOCK_SIZE) else {
			break;
		};
		let value = u16::from_le_bytes([block[0], block[1]]);
		let run = u16::from_le_bytes([block[2], block[3]]) as usize;

		let end = (x + run).min(row.len());
		row[x..end].fill(Color::from_argb1555(value));
		x += run;
	}
	x
}
