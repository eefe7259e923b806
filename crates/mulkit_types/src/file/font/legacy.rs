//! Legacy RLE font layout.
//!
//! | Offset | Size     | Field                                        |
//! |--------|----------|----------------------------------------------|
//! | 0x000  | 224 * 4  | absolute glyph offsets (u32 LE, 0 = blank)  |
//! | 0x380  | ...      | glyph records                                |
//!
//! Each glyph record is `width: u8`, `height: u8`, then one run list per row.
//! A run list is a sequence of `(run_length: u8, value: u8)` pairs closed by a
//! single `0` byte. `value != 0` means the run is covered.

use log::debug;

use super::{EncodeConfig, Font, Glyph, constants};
use crate::file::{FileType, MulFileError};

/// Decodes a legacy font.
///
/// Glyphs that point outside the data, declare a zero size or run out of
/// bytes are decoded as far as possible; nothing here fails once the offset
/// table is present.
pub(super) fn decode(data: &[u8]) -> Result<Font, MulFileError> {
	if data.len() < constants::OFFSET_TABLE_SIZE {
		return Err(MulFileError::insufficient_data(
			FileType::Font,
			constants::OFFSET_TABLE_SIZE,
			data.len(),
		));
	}

	let mut font = Font::new();
	for (slot, entry) in data[..constants::OFFSET_TABLE_SIZE].chunks_exact(4).enumerate() {
		let offset = u32::from_le_bytes(entry.try_into()?) as usize;
		if offset == 0 {
			continue;
		}
		if offset >= data.len() {
			debug!("glyph {slot}: offset {offset} beyond end of data ({} bytes)", data.len());
			continue;
		}
		if let Some(glyph) = decode_glyph(data, offset) {
			font.glyphs[slot] = Some(glyph);
		}
	}

	Ok(font)
}

/// Decodes the glyph record starting at `offset`.
fn decode_glyph(data: &[u8], offset: usize) -> Option<Glyph> {
	let width = *data.get(offset)?;
	let height = *data.get(offset + 1)?;
	if width == 0 || height == 0 {
		return None;
	}

	let w = width as usize;
	let mut coverage = vec![false; w * height as usize];
	let mut pos = offset + 2;

	'rows: for row in coverage.chunks_mut(w) {
		let mut x = 0;
		loop {
			let Some(&run) = data.get(pos) else {
				break 'rows;
			};
			pos += 1;
			if run == 0 {
				break;
			}
			let Some(&value) = data.get(pos) else {
				break 'rows;
			};
			pos += 1;

			let end = (x + run as usize).min(w);
			if x < end {
				row[x..end].fill(value != 0);
			}
			x += run as usize;
		}
	}

	Some(Glyph::from_coverage(width, height, &coverage))
}

/// Encodes a font to the legacy layout.
pub(super) fn encode(font: &Font, config: &EncodeConfig) -> Vec<u8> {
	let mut offsets = [0u32; constants::GLYPH_COUNT];
	let mut stream = Vec::new();

	for (slot, glyph) in font.glyphs.iter().enumerate() {
		let Some(glyph) = glyph.as_ref().filter(|g| !g.is_empty()) else {
			continue;
		};
		offsets[slot] = (constants::OFFSET_TABLE_SIZE + stream.len()) as u32;
		encode_glyph(glyph, config, &mut stream);
	}

	let mut buffer = Vec::with_capacity(constants::OFFSET_TABLE_SIZE + stream.len());
	for offset in &offsets {
		buffer.extend_from_slice(&offset.to_le_bytes());
	}
	buffer.extend_from_slice(&stream);
	buffer
}

/// Appends one glyph record to `out`.
pub(super) fn encode_glyph(glyph: &Glyph, config: &EncodeConfig, out: &mut Vec<u8>) {
	let max_run = config.max_run.max(1) as usize;
	let w = glyph.width() as usize;

	out.push(glyph.width());
	out.push(glyph.height());

	let coverage = glyph.coverage(config.threshold);
	for row in coverage.chunks(w) {
		let mut x = 0;
		while x < row.len() {
			let value = row[x];
			let run = row[x..].iter().take(max_run).take_while(|&&v| v == value).count();
			out.push(run as u8);
			out.push(u8::from(value));
			x += run;
		}
		out.push(0);
	}
}
