//! gump support test

use mulkit_rs::prelude::*;
use mulkit_rs::prelude::file::gump::constants;

use crate::scratch_dir;

/// Writes a two-gump pair: id 0 unused, id 1 a 2x2 checker, id 2 with a
/// broken second row.
fn write_pair(dir: &std::path::Path) {
	let mut art = Vec::new();
	let mut entries = vec![GumpIndexEntry {
		offset: -1,
		length: -1,
		extra: -1,
	}];

	let mut push = |art: &mut Vec<u8>, width: u16, table: &[u32], runs: &[(u16, u16)]| {
		let offset = art.len() as i32;
		for entry in table {
			art.extend_from_slice(&entry.to_le_bytes());
		}
		for &(value, run) in runs {
			art.extend_from_slice(&value.to_le_bytes());
			art.extend_from_slice(&run.to_le_bytes());
		}
		entries.push(GumpIndexEntry {
			offset,
			length: art.len() as i32 - offset,
			extra: ((width as i32) << 16) | table.len() as i32,
		});
	};

	push(&mut art, 2, &[0, 2], &[(0xFC00, 1), (0, 1), (0, 1), (0xFC00, 1)]);
	push(&mut art, 3, &[0, 1], &[(0x83E0, 3), (0x83E0, 1)]);

	let index = GumpIndex::from(entries);
	std::fs::write(dir.join(constants::INDEX_FILE_NAME), index.to_bytes()).unwrap();
	std::fs::write(dir.join(constants::ART_FILE_NAME), art).unwrap();
}

#[test_log::test]
fn test_open_and_decode() {
	let dir = scratch_dir("gump_decode");
	write_pair(dir.path());

	let gumps = GumpFile::open(dir.path()).unwrap();
	assert_eq!(gumps.index().len(), 3);
	assert_eq!(gumps.index().valid_ids(), vec![1, 2]);

	let id = parse_gump_id("checker_0x0001.png").unwrap();
	let checker = gumps.gump(id).unwrap();
	assert!(checker.is_clean());

	let red = Color::rgb(255, 0, 0);
	let clear = Color::transparent();
	assert_eq!(checker.image.pixels(), &[red, clear, clear, red]);

	let broken = gumps.decode(2).unwrap();
	assert_eq!(broken.mismatches, vec![RowMismatch {
		row: 1,
		run_sum: 1
	}]);
	assert_eq!(broken.image.get_pixel(0, 1), Some(Color::rgb(0, 255, 0)));
	assert_eq!(broken.image.get_pixel(2, 1), Some(clear));

	assert!(gumps.gump(0).is_none());
	assert!(gumps.gump(3).is_none());
}

#[test]
fn test_missing_files() {
	let dir = scratch_dir("gump_missing");
	assert!(matches!(GumpFile::open(dir.path()), Err(MulFileError::IoError(_))));
}
