//! File type support for `mulkit-rs` project.

mod error;

pub mod color;
pub mod font;
pub mod gump;
pub mod map;

// Re-export unified error type
pub use error::{FileType, MulFileError};

// Re-export main file types
pub use color::Color;
pub use font::{
	EncodeConfig as FontEncodeConfig, Font, FontContainer, FontFormat, GlyphIter, SequentialFont,
	glyph::Glyph,
};
pub use gump::{DecodedGump, GumpFile, GumpImage, GumpIndex, GumpIndexEntry, RowMismatch};
pub use map::{File as MapFile, MapConfig, Region as MapRegion, Tile as MapTile};
