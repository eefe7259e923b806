//! Sequential 16bpp font layout.
//!
//! The file is a plain concatenation of up to ten fonts with no offset table:
//!
//! ```text
//! font    := header:u8 glyph{224}
//! glyph   := width:u8 height:u8 delimiter:u8 pixel{width * height}
//! pixel   := u16 LE, 0 = transparent, otherwise value ^ 0x8000 as 5-5-5 RGB
//! ```
//!
//! A glyph with a zero width or height carries no pixel data.

use log::{debug, warn};

use super::{Font, Glyph, constants};
use crate::file::Color;

/// One embedded font of a sequential container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequentialFont {
	/// Leading header byte, preserved as read
	pub header: u8,

	/// The 224 glyph slots
	pub font: Font,

	/// Per-glyph delimiter byte, preserved as read
	pub delimiters: Vec<u8>,
}

impl SequentialFont {
	/// Wraps a font with a zero header and zero delimiters.
	pub fn new(font: Font) -> Self {
		Self {
			header: 0,
			font,
			delimiters: vec![0; constants::GLYPH_COUNT],
		}
	}

	/// Returns the delimiter stored for `slot`, 0 if none was read.
	pub fn delimiter(&self, slot: usize) -> u8 {
		self.delimiters.get(slot).copied().unwrap_or(0)
	}
}

impl Default for SequentialFont {
	fn default() -> Self {
		Self::new(Font::new())
	}
}

/// Decodes every font in the container.
///
/// A truncated glyph ends the whole container: the glyph and the rest of its
/// font are blank, and no further fonts are read.
pub(super) fn decode(data: &[u8]) -> Vec<SequentialFont> {
	let mut fonts = Vec::new();
	let mut pos = 0usize;
	let mut truncated = false;

	while fonts.len() < constants::MAX_SEQUENTIAL_FONTS && pos < data.len() && !truncated {
		let index = fonts.len();
		let mut current = SequentialFont {
			header: data[pos],
			font: Font::new(),
			delimiters: vec![0; constants::GLYPH_COUNT],
		};
		pos += 1;

		for slot in 0..constants::GLYPH_COUNT {
			let Some(&[width, height, delimiter]) = data.get(pos..pos + 3) else {
				warn!("font {index}: incomplete glyph header at slot {slot}, offset {pos}");
				truncated = true;
				break;
			};
			pos += 3;
			current.delimiters[slot] = delimiter;

			if width == 0 || height == 0 {
				continue;
			}

			let byte_count = width as usize * height as usize * 2;
			let Some(raw) = data.get(pos..pos + byte_count) else {
				warn!(
					"font {index}: incomplete pixel data at slot {slot}, offset {pos}, need {byte_count} bytes"
				);
				truncated = true;
				break;
			};
			pos += byte_count;

			let pixels = raw
				.chunks_exact(2)
				.map(|px| decode_pixel(u16::from_le_bytes([px[0], px[1]])))
				.collect();
			current.font.glyphs[slot] = Some(Glyph::new(width, height, pixels));
		}

		debug!(
			"font {index}: header 0x{:02X}, {} non-blank glyphs",
			current.header,
			current.font.iter().count()
		);
		fonts.push(current);
	}

	fonts
}

/// Font pixels treat pure black as transparent even when the flag bit is set.
fn decode_pixel(value: u16) -> Color {
	let color = Color::from_argb1555(value);
	if color.is_black() {
		Color::transparent()
	} else {
		color
	}
}

/// Encodes fonts to the sequential layout.
pub(super) fn encode(fonts: &[SequentialFont]) -> Vec<u8> {
	let mut buffer = Vec::new();

	for font in fonts {
		buffer.push(font.header);
		for (slot, glyph) in font.font.glyphs.iter().enumerate() {
			let delimiter = font.delimiter(slot);
			match glyph.as_ref().filter(|g| !g.is_empty()) {
				Some(glyph) => {
					buffer.extend_from_slice(&[glyph.width(), glyph.height(), delimiter]);
					for pixel in glyph.pixels() {
						buffer.extend_from_slice(&pixel.to_argb1555().to_le_bytes());
					}
				}
				None => buffer.extend_from_slice(&[0, 0, delimiter]),
			}
		}
	}

	buffer
}
