//! 16-bit client colors.
//!
//! Both the gump art and the sequential font format store pixels as
//! little-endian `u16` values with 5 bits per channel. A stored value of 0 is
//! transparent; every other value carries the high bit, which is stripped with
//! `value ^ 0x8000` before the channels are unpacked.

use std::fmt;

/// High bit of a stored 16-bit pixel.
pub const ARGB1555_FLAG: u16 = 0x8000;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Opaque white, used for covered font pixels.
	pub const fn white() -> Self {
		Self::rgb(255, 255, 255)
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Decodes a stored 16-bit pixel.
	///
	/// 0 maps to transparent black. Any other value is XOR'd with `0x8000`,
	/// unpacked as 5-5-5 RGB and returned fully opaque.
	pub const fn from_argb1555(value: u16) -> Self {
		if value == 0 {
			return Self::transparent();
		}
		let value = value ^ ARGB1555_FLAG;
		Self::rgb(
			expand_5bit((value >> 10) & 0x1F),
			expand_5bit((value >> 5) & 0x1F),
			expand_5bit(value & 0x1F),
		)
	}

	/// Encodes the color as a stored 16-bit pixel.
	///
	/// Transparent colors become 0, everything else gets the high bit set.
	pub const fn to_argb1555(&self) -> u16 {
		if self.a == 0 {
			return 0;
		}
		ARGB1555_FLAG | self.to_rgb555()
	}

	/// Packs the RGB channels into 15 bits, dropping alpha.
	pub const fn to_rgb555(&self) -> u16 {
		((self.r as u16 >> 3) << 10) | ((self.g as u16 >> 3) << 5) | (self.b as u16 >> 3)
	}

	/// Returns `true` when red, green and blue are all zero.
	pub const fn is_black(&self) -> bool {
		self.r == 0 && self.g == 0 && self.b == 0
	}

	/// ITU-R 601-2 luma, the same weighting image editors use for grayscale.
	pub const fn luminance(&self) -> u8 {
		((self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114) / 1000) as u8
	}

	/// Returns the channels as an `[r, g, b, a]` array.
	pub const fn to_array(&self) -> [u8; 4] {
		[self.r, self.g, self.b, self.a]
	}

	/// Builds a color from an `[r, g, b, a]` array.
	pub const fn from_array(rgba: [u8; 4]) -> Self {
		Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::transparent()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
	}
}

/// Scales a 5-bit channel to 0-255.
const fn expand_5bit(channel: u16) -> u8 {
	(channel as u32 * 255 / 31) as u8
}
