//! map support test

use std::collections::HashSet;

use mulkit_rs::prelude::*;
use mulkit_rs::prelude::file::map::constants;

use crate::scratch_dir;

/// Writes a map of two block columns, 4 blocks tall, where every tile's land
/// id is `x * 1000 + y` and z is `x - y` clamped.
fn write_map(path: &std::path::Path, config: MapConfig) {
	let columns = 2u32;
	let blocks = (columns * config.blocks_per_column) as usize;
	let mut data = vec![0u8; blocks * config.block_size as usize];

	let tpb = config.tiles_per_block;
	for x in 0..columns * tpb {
		for y in 0..config.blocks_per_column * tpb {
			let offset = config.locate(x, y).byte_offset as usize;
			let tile = MapTile {
				land_id: (x * 1000 + y) as u16,
				z: (x as i32 - y as i32).clamp(-128, 127) as i8,
			};
			data[offset..offset + 3].copy_from_slice(&tile.to_bytes());
		}
	}
	std::fs::write(path, data).unwrap();
}

#[test_log::test]
fn test_open_and_lookup() {
	let dir = scratch_dir("map_lookup");
	let path = dir.path().join("map0.mul");
	let config = MapConfig::with_blocks_per_column(4);
	write_map(&path, config);

	let mut map = MapFile::open(&path, config).unwrap();
	assert_eq!(map.width(), 16);
	assert_eq!(map.height(), 32);

	let tile = map.get_tile(9, 20, false).unwrap();
	assert_eq!(tile.land_id, 9020);
	assert_eq!(tile.z, -11);
	assert_eq!(map.get_tile(20, 9, true), Some(tile));
	assert_eq!(map.get_tile(16, 0, false), None);
	assert_eq!(map.get_tile(0, 32, false), None);
}

#[test_log::test]
fn test_export_search_verify() {
	let dir = scratch_dir("map_export");
	let path = dir.path().join("map0.mul");
	let config = MapConfig::with_blocks_per_column(4);
	write_map(&path, config);

	let mut map = MapFile::open(&path, config).unwrap();
	let csv_path = dir.path().join("region.csv");
	let mut csv = std::fs::File::create(&csv_path).unwrap();
	let rows = map
		.export_region_csv(&mut csv, MapRegion::new(8, 9, 30, 31), &LandFilter::all(), false)
		.unwrap();
	assert_eq!(rows, 4);
	drop(csv);

	let text = std::fs::read_to_string(&csv_path).unwrap();
	let lines: Vec<&str> = text.lines().collect();
	assert_eq!(lines, ["x,y,Land_ID,Z", "8,30,8030,-22", "9,30,9030,-21", "8,31,8031,-23", "9,31,9031,-22"]);

	let known: Vec<KnownTile> =
		serde_json::from_str(r#"[{"x": 1, "y": 2, "land_id": "0x03EA", "z": -1}, {"x": 1, "y": 3, "land_id": 0, "z": 0}]"#)
			.unwrap();
	let findings = map.verify_known_tiles(&known, false);
	assert_eq!(findings.len(), 1);
	assert!(matches!(findings[0], Discrepancy::Mismatch {
		x: 1,
		y: 3,
		..
	}));

	let search =
		spawn_land_search(map, HashSet::from([15031, 3]), MapRegion::new(0, 15, 0, 31), false).unwrap();
	let found: Vec<SearchEvent> = search.events().iter().collect();
	assert_eq!(found.len(), 3);
	assert!(matches!(found[0], SearchEvent::Found {
		x: 0,
		y: 3,
		..
	}));
	assert!(matches!(found[1], SearchEvent::Found {
		x: 15,
		y: 31,
		..
	}));
	assert_eq!(found[2], SearchEvent::Finished {
		matches: 2
	});
	assert!(search.join().is_some());
}

#[test]
fn test_classic_layout_constants() {
	let config = MapConfig::default();
	assert_eq!(config.blocks_per_column, constants::BLOCKS_PER_COLUMN);
	assert_eq!(config.locate(8, 0).byte_offset, 512 * 196 + 4);
}
