//! font support test

use mulkit_rs::prelude::*;
use mulkit_rs::prelude::file::font::{constants, detect_format};

use crate::scratch_dir;

fn sample_font() -> Font {
	let mut font = Font::new();
	// "!" as a 2x5 bar with a gap
	let bang: Vec<bool> = [1, 1, 1, 1, 1, 1, 0, 0, 1, 1].iter().map(|&v| v == 1).collect();
	font.set(1, Some(Glyph::from_coverage(2, 5, &bang))).unwrap();
	font.set(33, Some(Glyph::from_coverage(3, 3, &[true; 9]))).unwrap();
	font.set(constants::GLYPH_COUNT - 1, Some(Glyph::from_coverage(1, 1, &[true]))).unwrap();
	font
}

#[test_log::test]
fn test_legacy_file_round_trip() {
	let dir = scratch_dir("font_legacy");
	let path = dir.path().join("fonts.mul");

	let container = FontContainer::Legacy(sample_font());
	container.save(&path, &FontEncodeConfig::default()).unwrap();

	let data = std::fs::read(&path).unwrap();
	assert_eq!(detect_format(&data), FontFormat::Legacy);

	let reopened = FontContainer::open(&path).unwrap();
	assert_eq!(reopened, container);
	assert_eq!(reopened.font(0).unwrap().stats().non_blank, 3);
}

#[test_log::test]
fn test_legacy_to_sequential_and_back() {
	let dir = scratch_dir("font_convert");
	let path = dir.path().join("fonts_seq.mul");

	let sequential = FontContainer::Legacy(sample_font()).into_sequential().unwrap();
	sequential.save(&path, &FontEncodeConfig::default()).unwrap();

	let reopened = FontContainer::open(&path).unwrap();
	assert_eq!(reopened.format(), FontFormat::Sequential);
	assert_eq!(reopened.font_count(), 1);

	let legacy = reopened.into_legacy(0).unwrap();
	assert_eq!(legacy, FontContainer::Legacy(sample_font()));
}

#[test]
fn test_edit_glyph_in_place() {
	let bytes = sample_font().to_legacy_bytes(&FontEncodeConfig::default());
	let mut container = FontContainer::from(bytes);

	let font = container.font_mut(0).unwrap();
	font.clear(33).unwrap();
	font.set(65, Some(Glyph::from_coverage(2, 2, &[true, false, false, true]))).unwrap();
	assert!(font.set(constants::GLYPH_COUNT, None).is_err());

	let reread = FontContainer::decode(&container.to_bytes(&FontEncodeConfig::default()).unwrap());
	let font = reread.font(0).unwrap();
	assert!(font.get(33).is_none());
	assert_eq!(font.get(65).unwrap().to_ascii_art(127, '#', '.'), "#.\n.#\n");
}

#[test]
fn test_unrecognized_container() {
	let container = FontContainer::decode(&[]);
	assert_eq!(container.format(), FontFormat::Unrecognized);
	assert!(matches!(
		container.to_bytes(&FontEncodeConfig::default()),
		Err(MulFileError::UnrecognizedFormat { .. })
	));
}
