//! This crate provides core data types and file format support for the `mulkit-rs` project.
//!
//! # File Formats
//!
//! - **Font**: `fonts.mul` in either the legacy run-length layout (224-entry
//!   offset table) or the sequential multi-font layout
//! - **Gump**: `gumpidx.mul` index entries and run-length `gumpart.mul` images
//! - **Map**: `map#.mul` land tiles addressed by coordinate
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use mulkit_types::prelude::*;
//!
//! # fn main() -> Result<(), MulFileError> {
//! // Work with fonts
//! let fonts = FontContainer::open("fonts.mul")?;
//! println!("{} ({} fonts)", fonts.format(), fonts.font_count());
//!
//! // Work with maps
//! let mut map = MapFile::open("map0.mul", MapConfig::default())?;
//! let tile = map.get_tile(1000, 1000, false);
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use mulkit_types::file::gump::{GumpFile, parse_gump_id};
//!
//! let gumps = GumpFile::open("client/").unwrap();
//! let image = parse_gump_id("0x2F").and_then(|id| gumps.gump(id));
//! ```

pub mod file;

/// `use mulkit_types::prelude::*;` to import commonly used items.
pub mod prelude;
