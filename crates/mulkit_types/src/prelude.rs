//! Prelude module for `mulkit_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use mulkit_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let font = Font::new();
//! let glyph = Glyph::blank(8, 12);
//! let config = MapConfig::default();
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Color
	Color,

	// Gump types
	DecodedGump,
	FileType,

	// Font types
	Font,
	FontContainer,
	FontEncodeConfig,
	FontFormat,
	Glyph,
	GlyphIter,
	GumpFile,
	GumpImage,
	GumpIndex,
	GumpIndexEntry,

	// Map types
	MapConfig,
	MapFile,
	MapRegion,
	MapTile,

	MulFileError,
	RowMismatch,
	SequentialFont,
};

#[doc(inline)]
pub use crate::file::gump::{decode_gump, parse_gump_id};

#[doc(inline)]
pub use crate::file::map::{Discrepancy, KnownTile, KnownTiles, LandFilter, SearchEvent, spawn_land_search};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
