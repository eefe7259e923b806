//! Glyph bitmap for font files.

use crate::file::{Color, FileType, MulFileError};

/// Glyph structure, representing a single character bitmap.
///
/// Pixels are stored row-major as RGBA. The legacy format only keeps one bit
/// per pixel, so a pixel counts as covered when its luminance is above the
/// encoder threshold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Glyph {
	/// Width in pixels
	width: u8,

	/// Height in pixels
	height: u8,

	/// `width * height` pixels, row-major
	pixels: Vec<Color>,
}

impl Glyph {
	/// Creates a new Glyph instance.
	///
	/// `pixels` is padded with transparent pixels or truncated so it always
	/// holds exactly `width * height` entries.
	///
	/// # Arguments
	///
	/// * `width` - Width in pixels.
	/// * `height` - Height in pixels.
	/// * `pixels` - Row-major pixel data.
	pub fn new(width: u8, height: u8, mut pixels: Vec<Color>) -> Self {
		pixels.resize(width as usize * height as usize, Color::transparent());
		Self {
			width,
			height,
			pixels,
		}
	}

	/// Creates a glyph with every pixel off.
	pub fn blank(width: u8, height: u8) -> Self {
		Self::new(width, height, Vec::new())
	}

	/// Creates a glyph from one-bit coverage: covered pixels become opaque
	/// white, the rest transparent.
	pub fn from_coverage(width: u8, height: u8, coverage: &[bool]) -> Self {
		let pixels = coverage
			.iter()
			.map(|&on| {
				if on {
					Color::white()
				} else {
					Color::transparent()
				}
			})
			.collect();
		Self::new(width, height, pixels)
	}

	/// Creates a glyph from tightly packed RGBA8 bytes.
	///
	/// # Errors
	///
	/// Returns an error if the dimensions exceed 255 or `rgba` is shorter
	/// than `width * height * 4`.
	pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, MulFileError> {
		let (Ok(w), Ok(h)) = (u8::try_from(width), u8::try_from(height)) else {
			return Err(MulFileError::GlyphTooLarge {
				file_type: FileType::Font,
				width,
				height,
			});
		};

		let expected = width as usize * height as usize * 4;
		if rgba.len() < expected {
			return Err(MulFileError::insufficient_data(FileType::Font, expected, rgba.len()));
		}

		let pixels = rgba[..expected]
			.chunks_exact(4)
			.map(|px| Color::new(px[0], px[1], px[2], px[3]))
			.collect();
		Ok(Self::new(w, h, pixels))
	}

	/// Returns the width in pixels.
	pub fn width(&self) -> u8 {
		self.width
	}

	/// Returns the height in pixels.
	pub fn height(&self) -> u8 {
		self.height
	}

	/// Returns the number of pixels.
	pub fn area(&self) -> usize {
		self.pixels.len()
	}

	/// A glyph with no width or no height has nothing to draw and is stored
	/// as a blank slot.
	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	/// Returns the row-major pixels.
	pub fn pixels(&self) -> &[Color] {
		&self.pixels
	}

	/// Returns the row-major pixels mutably.
	pub fn pixels_mut(&mut self) -> &mut [Color] {
		&mut self.pixels
	}

	/// Gets the pixel at (x, y), or `None` outside the bitmap.
	pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
		if x >= self.width as usize || y >= self.height as usize {
			return None;
		}
		Some(self.pixels[y * self.width as usize + x])
	}

	/// Sets the pixel at (x, y). Coordinates outside the bitmap are ignored.
	pub fn put_pixel(&mut self, x: usize, y: usize, color: Color) {
		if x >= self.width as usize || y >= self.height as usize {
			return;
		}
		self.pixels[y * self.width as usize + x] = color;
	}

	/// Returns `true` if the pixel at (x, y) is covered.
	pub fn is_on(&self, x: usize, y: usize, threshold: u8) -> bool {
		self.get_pixel(x, y).is_some_and(|c| c.luminance() > threshold)
	}

	/// Thresholds every pixel to one-bit coverage.
	pub fn coverage(&self, threshold: u8) -> Vec<bool> {
		self.pixels.iter().map(|c| c.luminance() > threshold).collect()
	}

	/// Returns the pixels as tightly packed RGBA8 bytes.
	pub fn to_rgba_bytes(&self) -> Vec<u8> {
		self.pixels.iter().flat_map(Color::to_array).collect()
	}

	/// Converts the glyph to an ASCII art representation.
	pub fn to_ascii_art(&self, threshold: u8, one: char, zero: char) -> String {
		let w = self.width as usize;
		let mut art = String::with_capacity((w + 1) * self.height as usize);

		for row in self.pixels.chunks(w.max(1)).take(self.height as usize) {
			for c in row {
				art.push(if c.luminance() > threshold {
					one
				} else {
					zero
				});
			}
			art.push('\n');
		}

		art
	}
}
