#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `mulkit-rs` reads and writes the binary MUL asset containers of a classic
//! MMORPG client: bitmap fonts, gump interface art and land maps.
//!
pub use mulkit_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use mulkit_dylib;
