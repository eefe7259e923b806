//! This module is separated into its own crate to enable simple dynamic linking for `mulkit`, and should not be used directly.

/// `use mulkit::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export mulkit_types for convenience
pub use mulkit_types;

// Re-export commonly used types at crate root
pub use mulkit_types::file::{
	Color, FontContainer, GumpFile, GumpIndex, MapConfig, MapFile, MulFileError,
};
