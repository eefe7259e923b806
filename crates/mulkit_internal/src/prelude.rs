//! Prelude module for `mulkit_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use mulkit_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let mut font = Font::new();
//! font.set(1, Some(Glyph::from_coverage(2, 2, &[true; 4]))).unwrap();
//! let bytes = font.to_legacy_bytes(&FontEncodeConfig::default());
//!
//! // Work with gump ids
//! assert_eq!(parse_gump_id("0x2F"), Some(47));
//! ```

// Re-export everything from mulkit_types::prelude
#[doc(inline)]
pub use mulkit_types::prelude::*;

// Re-export the entire mulkit_types module for advanced usage
#[doc(inline)]
pub use mulkit_types;
