//! Integration tests for the `mulkit-rs` file types

mod font;
mod gump;
mod map;

use tempfile::TempDir;

/// Creates a scratch directory for one test, removed when the guard drops.
pub(crate) fn scratch_dir(name: &str) -> TempDir {
	tempfile::Builder::new().prefix(&format!("mulkit_rs_{name}_")).tempdir().expect("tempdir")
}

#[test]
fn test_scratch_dir_is_removed_on_drop() {
	let dir = scratch_dir("cleanup");
	let path = dir.path().to_path_buf();
	std::fs::write(path.join("data.mul"), [0u8; 4]).unwrap();
	assert!(path.is_dir());

	drop(dir);
	assert!(!path.exists());
}
