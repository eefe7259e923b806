//! Error types for file format parsing and manipulation.

use std::fmt;

use thiserror::Error;

/// MUL container kinds, used to tag errors with their origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	/// `fonts.mul` and its variants
	Font,
	/// `gumpidx.mul`
	GumpIndex,
	/// `gumpart.mul`
	GumpArt,
	/// `map#.mul`
	Map,
}

impl fmt::Display for FileType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FileType::Font => write!(f, "FONT"),
			FileType::GumpIndex => write!(f, "GUMPIDX"),
			FileType::GumpArt => write!(f, "GUMPART"),
			FileType::Map => write!(f, "MAP"),
		}
	}
}

/// Unified error type for every MUL container.
#[derive(Debug, Error)]
pub enum MulFileError {
	/// Not enough data to parse
	#[error("{file_type}: insufficient data, expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Container that failed to parse
		file_type: FileType,
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Glyph slot outside of the fixed font alphabet
	#[error("{file_type}: slot {slot} out of range (max {max})")]
	SlotOutOfRange {
		/// Container the slot belongs to
		file_type: FileType,
		/// Requested slot
		slot: usize,
		/// Largest valid slot
		max: usize,
	},

	/// Requested entry does not exist or is not usable
	#[error("{file_type}: entry not found: {message}")]
	EntryNotFound {
		/// Container that was searched
		file_type: FileType,
		/// Description of the missing entry
		message: String,
	},

	/// Data matches none of the known layouts
	#[error("{file_type}: unrecognized format")]
	UnrecognizedFormat {
		/// Container that failed detection
		file_type: FileType,
	},

	/// Glyph dimensions do not fit the one-byte size fields
	#[error("{file_type}: glyph {width}x{height} exceeds 255x255")]
	GlyphTooLarge {
		/// Container being written
		file_type: FileType,
		/// Requested width
		width: u32,
		/// Requested height
		height: u32,
	},

	/// Layout parameters that cannot address anything
	#[error("{file_type}: invalid configuration: {message}")]
	InvalidConfig {
		/// Container the configuration was meant for
		file_type: FileType,
		/// What is wrong with it
		message: String,
	},

	/// IO error
	#[error(transparent)]
	IoError(#[from] std::io::Error),

	/// Slice conversion error
	#[error(transparent)]
	InvalidSlice(#[from] std::array::TryFromSliceError),
}

impl MulFileError {
	/// Shorthand for [`MulFileError::InsufficientData`].
	pub fn insufficient_data(file_type: FileType, expected: usize, actual: usize) -> Self {
		Self::InsufficientData {
			file_type,
			expected,
			actual,
		}
	}

	/// Shorthand for [`MulFileError::EntryNotFound`].
	pub fn entry_not_found(file_type: FileType, message: impl Into<String>) -> Self {
		Self::EntryNotFound {
			file_type,
			message: message.into(),
		}
	}
}
