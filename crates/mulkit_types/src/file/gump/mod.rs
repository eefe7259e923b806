//! Gump art support (`gumpidx.mul` + `gumpart.mul`).
//!
//! `gumpidx.mul` is a flat table of 12-byte entries, one per gump id:
//!
//! | Offset | Size | Field    | Description                                   |
//! |--------|------|----------|-----------------------------------------------|
//! | 0x00   | 4    | `offset` | byte offset into `gumpart.mul` (i32, -1 none) |
//! | 0x04   | 4    | `length` | byte length of the entry (i32)                |
//! | 0x08   | 4    | `extra`  | `width << 16 \| height` (i32, -1 none)        |
//!
//! The art bytes of each entry are decoded by [`decode_gump`].
//!
//! # Examples
//!
//! ```no_run
//! use mulkit_types::file::gump::{GumpFile, parse_gump_id};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gumps = GumpFile::open("client/")?;
//! let id = parse_gump_id("button_0x002F").unwrap_or(0);
//! if let Some(gump) = gumps.gump(id) {
//!     println!("{}x{}, {} bad rows", gump.image.width(), gump.image.height(), gump.mismatches.len());
//! }
//! # Ok(())
//! # }
//! ```

mod decode;
mod id;

use std::path::Path;

use log::{debug, info, warn};

use crate::file::{FileType, MulFileError};

pub use decode::{DecodedGump, GumpImage, RowMismatch, decode_gump};
pub use id::parse_gump_id;

/// Gump file constants.
pub mod constants {
	/// Size of one `gumpidx.mul` entry in bytes
	pub const INDEX_ENTRY_SIZE: usize = 12;

	/// Index file name
	pub const INDEX_FILE_NAME: &str = "gumpidx.mul";

	/// Art file name
	pub const ART_FILE_NAME: &str = "gumpart.mul";
}

/// One `gumpidx.mul` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GumpIndexEntry {
	/// Byte offset into `gumpart.mul`
	pub offset: i32,
	/// Byte length of the art data
	pub length: i32,
	/// Packed dimensions: `width << 16 | height`
	pub extra: i32,
}

impl GumpIndexEntry {
	/// Parses an entry from 12 bytes.
	pub fn from_bytes(data: &[u8; constants::INDEX_ENTRY_SIZE]) -> Self {
		Self {
			offset: i32::from_le_bytes([data[0], data[1], data[2], data[3]]),
			length: i32::from_le_bytes([data[4], data[5], data[6], data[7]]),
			extra: i32::from_le_bytes([data[8], data[9], data[10], data[11]]),
		}
	}

	/// Serializes the entry to 12 bytes.
	pub fn to_bytes(&self) -> [u8; constants::INDEX_ENTRY_SIZE] {
		let mut bytes = [0u8; constants::INDEX_ENTRY_SIZE];
		bytes[0..4].copy_from_slice(&self.offset.to_le_bytes());
		bytes[4..8].copy_from_slice(&self.length.to_le_bytes());
		bytes[8..12].copy_from_slice(&self.extra.to_le_bytes());
		bytes
	}

	/// Image width in pixels.
	pub fn width(&self) -> u16 {
		((self.extra >> 16) & 0xFFFF) as u16
	}

	/// Image height in pixels.
	pub fn height(&self) -> u16 {
		(self.extra & 0xFFFF) as u16
	}

	/// Returns `true` if the entry points at a drawable image.
	pub fn is_valid(&self) -> bool {
		self.offset >= 0 &&
			self.length > 0 &&
			self.extra != -1 &&
			self.width() > 0 &&
			self.height() > 0
	}
}

impl std::fmt::Display for GumpIndexEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"offset: {}, length: {}, size: {}x{}",
			self.offset,
			self.length,
			self.width(),
			self.height()
		)
	}
}

/// Parsed `gumpidx.mul`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GumpIndex {
	entries: Vec<GumpIndexEntry>,
}

impl GumpIndex {
	/// Parses an index from bytes. Trailing bytes that do not form a whole
	/// entry are ignored.
	pub fn from_bytes(data: &[u8]) -> Self {
		let chunks = data.chunks_exact(constants::INDEX_ENTRY_SIZE);
		if !chunks.remainder().is_empty() {
			warn!(
				"{}: ignoring {} trailing bytes",
				constants::INDEX_FILE_NAME,
				chunks.remainder().len()
			);
		}

		let entries = chunks
			.map(|chunk| {
				let mut buf = [0u8; constants::INDEX_ENTRY_SIZE];
				buf.copy_from_slice(chunk);
				GumpIndexEntry::from_bytes(&buf)
			})
			.collect();

		Self {
			entries,
		}
	}

	/// Reads an index from the specified path.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, MulFileError> {
		let data = std::fs::read(path)?;
		Ok(Self::from_bytes(&data))
	}

	/// Serializes the index to bytes.
	pub fn to_bytes(&self) -> Vec<u8> {
		self.entries.iter().flat_map(GumpIndexEntry::to_bytes).collect()
	}

	/// Returns the number of entries, valid or not.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if the index has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the entry for `id`.
	pub fn entry(&self, id: u32) -> Option<&GumpIndexEntry> {
		self.entries.get(id as usize)
	}

	/// Returns all entries.
	pub fn entries(&self) -> &[GumpIndexEntry] {
		&self.entries
	}

	/// Returns the ids of all drawable entries, ascending.
	pub fn valid_ids(&self) -> Vec<u32> {
		self.entries
			.iter()
			.enumerate()
			.filter(|(_, e)| e.is_valid())
			.map(|(id, _)| id as u32)
			.collect()
	}
}

impl From<Vec<GumpIndexEntry>> for GumpIndex {
	fn from(entries: Vec<GumpIndexEntry>) -> Self {
		Self {
			entries,
		}
	}
}

/// A `gumpidx.mul` / `gumpart.mul` pair held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GumpFile {
	index: GumpIndex,
	art: Vec<u8>,
}

impl GumpFile {
	/// Creates a gump file from an index and the art bytes.
	pub fn new(index: GumpIndex, art: Vec<u8>) -> Self {
		Self {
			index,
			art,
		}
	}

	/// Opens `gumpidx.mul` and `gumpart.mul` from `dir`.
	///
	/// # Errors
	///
	/// Returns an error if either file is missing or unreadable.
	pub fn open(dir: impl AsRef<Path>) -> Result<Self, MulFileError> {
		let dir = dir.as_ref();
		let index = GumpIndex::open(dir.join(constants::INDEX_FILE_NAME))?;
		let art = std::fs::read(dir.join(constants::ART_FILE_NAME))?;
		info!(
			"{}: {} gump entries, {} valid, {} art bytes",
			dir.display(),
			index.len(),
			index.valid_ids().len(),
			art.len()
		);
		Ok(Self::new(index, art))
	}

	/// Returns the index.
	pub fn index(&self) -> &GumpIndex {
		&self.index
	}

	/// Returns the raw art bytes of `id`.
	///
	/// # Errors
	///
	/// Returns an error if the id is unknown, not drawable, or its byte
	/// range lies outside the art data.
	pub fn raw(&self, id: u32) -> Result<(&GumpIndexEntry, &[u8]), MulFileError> {
		let entry = self
			.index
			.entry(id)
			.ok_or_else(|| MulFileError::entry_not_found(FileType::GumpIndex, format!("gump {id} out of range")))?;
		if !entry.is_valid() {
			return Err(MulFileError::entry_not_found(
				FileType::GumpIndex,
				format!("gump {id} is not a valid entry ({entry})"),
			));
		}

		let start = entry.offset as usize;
		let end = start + entry.length as usize;
		let data = self
			.art
			.get(start..end)
			.ok_or_else(|| MulFileError::insufficient_data(FileType::GumpArt, end, self.art.len()))?;
		Ok((entry, data))
	}

	/// Decodes gump `id`.
	///
	/// # Errors
	///
	/// Returns an error if the raw data cannot be located or decoded.
	pub fn decode(&self, id: u32) -> Result<DecodedGump, MulFileError> {
		let (entry, data) = self.raw(id)?;
		decode_gump(data, entry.width(), entry.height())
	}

	/// Decodes gump `id`, returning `None` for unknown, invalid or undecodable
	/// entries. Failures are logged.
	pub fn gump(&self, id: u32) -> Option<DecodedGump> {
		match self.decode(id) {
			Ok(gump) => Some(gump),
			Err(e) => {
				debug!("gump {id}: {e}");
				None
			}
		}
	}
}
