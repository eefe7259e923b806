//! Font file support (`fonts.mul` and friends).
//!
//! Two incompatible layouts share the same file names:
//!
//! - **Legacy**: a 224-entry offset table followed by one-bit RLE glyphs.
//! - **Sequential**: up to ten fonts of 16bpp glyphs written back to back.
//!
//! [`detect_format`] picks one from the raw bytes and [`FontContainer::decode`]
//! returns the matching tagged result.
//!
//! # Examples
//!
//! ```no_run
//! use mulkit_types::file::font::{EncodeConfig, FontContainer, Glyph};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut container = FontContainer::open("fonts.mul")?;
//! if let Some(font) = container.font_mut(0) {
//!     font.set(65, Some(Glyph::from_coverage(2, 2, &[true; 4])))?;
//! }
//! container.save("fonts_edited.mul", &EncodeConfig::default())?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use log::{debug, info};

use crate::file::{FileType, MulFileError};

pub mod glyph;
mod legacy;
mod sequential;

pub use glyph::Glyph;
pub use sequential::SequentialFont;

/// Font file constants.
pub mod constants {
	/// Glyph slots per font
	pub const GLYPH_COUNT: usize = 224;

	/// Legacy offset table size in bytes (224 entries * 4 bytes each)
	pub const OFFSET_TABLE_SIZE: usize = GLYPH_COUNT * 4;

	/// Most fonts a sequential container holds
	pub const MAX_SEQUENTIAL_FONTS: usize = 10;

	/// Longest run a single legacy RLE pair can express
	pub const MAX_RUN_LENGTH: u8 = 255;

	/// Default luminance threshold for one-bit coverage
	pub const DEFAULT_THRESHOLD: u8 = 127;

	/// A legacy table with fewer non-zero entries than this is treated as a
	/// master index rather than a single font
	pub const MASTER_INDEX_MAX_ENTRIES: usize = 10;
}

/// Options for the legacy one-bit encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeConfig {
	/// A pixel is covered when its luminance is greater than this
	pub threshold: u8,
	/// Longest run written in one RLE pair
	pub max_run: u8,
}

impl Default for EncodeConfig {
	fn default() -> Self {
		Self {
			threshold: constants::DEFAULT_THRESHOLD,
			max_run: constants::MAX_RUN_LENGTH,
		}
	}
}

/// Layout of a font container, as guessed by [`detect_format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFormat {
	/// Offset table + one-bit RLE glyphs
	Legacy,
	/// Concatenated 16bpp fonts
	Sequential,
	/// Nothing usable
	Unrecognized,
}

impl std::fmt::Display for FontFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			FontFormat::Legacy => write!(f, "Legacy"),
			FontFormat::Sequential => write!(f, "Sequential"),
			FontFormat::Unrecognized => write!(f, "Unrecognized"),
		}
	}
}

/// Guesses the layout of a font container.
///
/// The first 896 bytes are read as a legacy offset table. If there is at least
/// one non-zero entry and every non-zero entry points inside the data, the
/// file is taken as legacy; otherwise it is assumed to be sequential. This is
/// best effort: a sequential file whose leading bytes happen to form valid
/// offsets is misclassified.
pub fn detect_format(data: &[u8]) -> FontFormat {
	if data.is_empty() {
		return FontFormat::Unrecognized;
	}
	if data.len() < constants::OFFSET_TABLE_SIZE {
		return FontFormat::Sequential;
	}

	let mut nonzero = offset_table(data).filter(|&(_, offset)| offset != 0).peekable();
	if nonzero.peek().is_none() {
		return FontFormat::Sequential;
	}
	if nonzero.all(|(_, offset)| (offset as usize) < data.len()) {
		FontFormat::Legacy
	} else {
		FontFormat::Sequential
	}
}

/// Iterates over the complete `(slot, offset)` entries in the first 896 bytes.
fn offset_table(data: &[u8]) -> impl Iterator<Item = (usize, u32)> + '_ {
	let table = &data[..data.len().min(constants::OFFSET_TABLE_SIZE)];
	table
		.chunks_exact(4)
		.enumerate()
		.map(|(slot, entry)| (slot, u32::from_le_bytes([entry[0], entry[1], entry[2], entry[3]])))
}

/// Returns the non-zero `(slot, offset)` pairs of the leading offset table.
pub fn offset_table_summary(data: &[u8]) -> Vec<(usize, u32)> {
	offset_table(data).filter(|&(_, offset)| offset != 0).collect()
}

/// Returns `true` if the leading table looks like a master index of font
/// blocks (very few non-zero entries) rather than a glyph table.
pub fn looks_like_master_index(data: &[u8]) -> bool {
	offset_table_summary(data).len() < constants::MASTER_INDEX_MAX_ENTRIES
}

/// Glyph statistics of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontStats {
	/// Slot count (always 224)
	pub glyphs: usize,
	/// Non-blank slots
	pub non_blank: usize,
	/// Average pixel area of the non-blank glyphs
	pub average_area: usize,
}

/// A single font: 224 glyph slots, each blank or holding a bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
	/// Glyph slots, always `GLYPH_COUNT` long
	glyphs: Vec<Option<Glyph>>,
}

impl Font {
	/// Creates a font with every slot blank.
	pub fn new() -> Self {
		Self {
			glyphs: vec![None; constants::GLYPH_COUNT],
		}
	}

	/// Decodes a legacy font from bytes.
	///
	/// # Errors
	///
	/// Returns an error if the data is shorter than the offset table.
	pub fn from_legacy_bytes(data: &[u8]) -> Result<Self, MulFileError> {
		legacy::decode(data)
	}

	/// Encodes the font in the legacy layout.
	///
	/// Glyphs are thresholded to one bit per pixel, so colors and
	/// anti-aliasing are lost.
	pub fn to_legacy_bytes(&self, config: &EncodeConfig) -> Vec<u8> {
		legacy::encode(self, config)
	}

	/// Returns the glyph in `slot`, or `None` if the slot is blank or out of range.
	pub fn get(&self, slot: usize) -> Option<&Glyph> {
		self.glyphs.get(slot)?.as_ref()
	}

	/// Returns the glyph in `slot` mutably.
	pub fn get_mut(&mut self, slot: usize) -> Option<&mut Glyph> {
		self.glyphs.get_mut(slot)?.as_mut()
	}

	/// Replaces the glyph in `slot`. Empty glyphs are stored as blank.
	///
	/// # Errors
	///
	/// Returns an error if `slot` is not in `[0, 224)`.
	pub fn set(&mut self, slot: usize, glyph: Option<Glyph>) -> Result<(), MulFileError> {
		let Some(entry) = self.glyphs.get_mut(slot) else {
			return Err(MulFileError::SlotOutOfRange {
				file_type: FileType::Font,
				slot,
				max: constants::GLYPH_COUNT - 1,
			});
		};
		*entry = glyph.filter(|g| !g.is_empty());
		Ok(())
	}

	/// Blanks `slot`.
	///
	/// # Errors
	///
	/// Returns an error if `slot` is out of range.
	pub fn clear(&mut self, slot: usize) -> Result<(), MulFileError> {
		self.set(slot, None)
	}

	/// Blanks every slot.
	pub fn clear_all(&mut self) {
		self.glyphs.fill(None);
	}

	/// Returns all slots in order.
	pub fn slots(&self) -> &[Option<Glyph>] {
		&self.glyphs
	}

	/// Returns an iterator over the non-blank glyphs and their slots.
	pub fn iter(&self) -> GlyphIter<'_> {
		GlyphIter {
			font: self,
			slot: 0,
		}
	}

	/// Computes glyph statistics.
	pub fn stats(&self) -> FontStats {
		let (non_blank, total_area) =
			self.iter().fold((0usize, 0usize), |(count, area), (_, g)| (count + 1, area + g.area()));
		FontStats {
			glyphs: constants::GLYPH_COUNT,
			non_blank,
			average_area: total_area.checked_div(non_blank).unwrap_or(0),
		}
	}
}

impl Default for Font {
	fn default() -> Self {
		Self::new()
	}
}

/// Iterator over the non-blank glyphs of a font.
#[derive(Debug)]
pub struct GlyphIter<'a> {
	font: &'a Font,
	slot: usize,
}

impl<'a> Iterator for GlyphIter<'a> {
	type Item = (usize, &'a Glyph);

	fn next(&mut self) -> Option<Self::Item> {
		while self.slot < constants::GLYPH_COUNT {
			let slot = self.slot;
			self.slot += 1;

			if let Some(glyph) = self.font.get(slot) {
				return Some((slot, glyph));
			}
		}
		None
	}
}

impl<'a> IntoIterator for &'a Font {
	type Item = (usize, &'a Glyph);
	type IntoIter = GlyphIter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Decoded font container, tagged by the layout it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontContainer {
	/// A single legacy font
	Legacy(Font),
	/// One to ten sequential fonts
	Sequential(Vec<SequentialFont>),
	/// The data matched neither layout
	Unrecognized,
}

impl FontContainer {
	/// Detects the layout and decodes the data.
	pub fn decode(data: &[u8]) -> Self {
		let format = detect_format(data);
		debug!("detected {format} font layout ({} bytes)", data.len());

		match format {
			FontFormat::Legacy => match legacy::decode(data) {
				Ok(font) => Self::Legacy(font),
				Err(_) => Self::Unrecognized,
			},
			FontFormat::Sequential => {
				let fonts = sequential::decode(data);
				if fonts.is_empty() {
					Self::Unrecognized
				} else {
					Self::Sequential(fonts)
				}
			}
			FontFormat::Unrecognized => Self::Unrecognized,
		}
	}

	/// Opens and decodes a font container from the specified path.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read. Unrecognized content is
	/// not an error; check for [`FontContainer::Unrecognized`].
	pub fn open(path: impl AsRef<Path>) -> Result<Self, MulFileError> {
		let path = path.as_ref();
		let data = std::fs::read(path)?;
		let container = Self::decode(&data);
		info!("{}: {} layout, {} font(s)", path.display(), container.format(), container.font_count());
		Ok(container)
	}

	/// Returns the layout this container was decoded from.
	pub fn format(&self) -> FontFormat {
		match self {
			Self::Legacy(_) => FontFormat::Legacy,
			Self::Sequential(_) => FontFormat::Sequential,
			Self::Unrecognized => FontFormat::Unrecognized,
		}
	}

	/// Returns the number of fonts held.
	pub fn font_count(&self) -> usize {
		match self {
			Self::Legacy(_) => 1,
			Self::Sequential(fonts) => fonts.len(),
			Self::Unrecognized => 0,
		}
	}

	/// Returns the font at `index`.
	pub fn font(&self, index: usize) -> Option<&Font> {
		match self {
			Self::Legacy(font) if index == 0 => Some(font),
			Self::Sequential(fonts) => fonts.get(index).map(|f| &f.font),
			_ => None,
		}
	}

	/// Returns the font at `index` mutably.
	pub fn font_mut(&mut self, index: usize) -> Option<&mut Font> {
		match self {
			Self::Legacy(font) if index == 0 => Some(font),
			Self::Sequential(fonts) => fonts.get_mut(index).map(|f| &mut f.font),
			_ => None,
		}
	}

	/// Serializes the container in the layout it was read from.
	///
	/// # Errors
	///
	/// Returns an error for [`FontContainer::Unrecognized`].
	pub fn to_bytes(&self, config: &EncodeConfig) -> Result<Vec<u8>, MulFileError> {
		match self {
			Self::Legacy(font) => Ok(legacy::encode(font, config)),
			Self::Sequential(fonts) => Ok(sequential::encode(fonts)),
			Self::Unrecognized => Err(MulFileError::UnrecognizedFormat {
				file_type: FileType::Font,
			}),
		}
	}

	/// Writes the container to `path`.
	///
	/// # Errors
	///
	/// Returns an error if the container is unrecognized or the file cannot
	/// be written.
	pub fn save(&self, path: impl AsRef<Path>, config: &EncodeConfig) -> Result<(), MulFileError> {
		let bytes = self.to_bytes(config)?;
		std::fs::write(path, bytes)?;
		Ok(())
	}

	/// Converts to a legacy container holding font `index`.
	pub fn into_legacy(self, index: usize) -> Option<Self> {
		match self {
			Self::Legacy(font) if index == 0 => Some(Self::Legacy(font)),
			Self::Sequential(mut fonts) if index < fonts.len() => {
				Some(Self::Legacy(fonts.swap_remove(index).font))
			}
			_ => None,
		}
	}

	/// Converts to a sequential container.
	pub fn into_sequential(self) -> Option<Self> {
		match self {
			Self::Legacy(font) => Some(Self::Sequential(vec![SequentialFont::new(font)])),
			Self::Sequential(fonts) => Some(Self::Sequential(fonts)),
			Self::Unrecognized => None,
		}
	}
}

impl From<&[u8]> for FontContainer {
	fn from(value: &[u8]) -> Self {
		Self::decode(value)
	}
}

impl From<Vec<u8>> for FontContainer {
	fn from(value: Vec<u8>) -> Self {
		Self::decode(&value)
	}
}
