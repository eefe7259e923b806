//! Forces dynamic linking of `mulkit_internal` when the `dynamic_linking` feature is enabled.
//!
//! This crate should not be used directly.

#[allow(unused_imports)]
use mulkit_internal;
