use std::collections::HashSet;
use std::io::Cursor;

use super::*;

/// Tile content used by the synthetic maps below.
fn tile_at(x: u32, y: u32) -> Tile {
	Tile {
		land_id: (y * 100 + x) as u16,
		z: (x as i8) - (y as i8),
	}
}

/// Builds a map of `columns` block columns with the given layout.
fn build_map(config: MapConfig, columns: u32) -> Vec<u8> {
	let tpb = config.tiles_per_block;
	let total_blocks = (columns * config.blocks_per_column) as usize;
	let mut data = vec![0u8; total_blocks * config.block_size as usize];

	for x in 0..columns * tpb {
		for y in 0..config.blocks_per_column * tpb {
			let offset = config.locate(x, y).byte_offset as usize;
			data[offset..offset + 3].copy_from_slice(&tile_at(x, y).to_bytes());
		}
	}
	data
}

fn small_map() -> File<Cursor<Vec<u8>>> {
	let config = MapConfig::with_blocks_per_column(2);
	File::from_reader(Cursor::new(build_map(config, 2)), config).unwrap()
}

#[test]
fn test_locate_classic_layout() {
	let config = MapConfig::default();

	let origin = config.locate(0, 0);
	assert_eq!(origin.block_index, 0);
	assert_eq!(origin.tile_index_in_block, 0);
	assert_eq!(origin.byte_offset, 4);

	let next_column = config.locate(8, 0);
	assert_eq!(next_column.block_index, 512);
	assert_eq!(next_column.byte_offset, 512 * 196 + 4);

	let inner = config.locate(3, 2);
	assert_eq!(inner.block_index, 0);
	assert_eq!(inner.tile_index_in_block, 19);
	assert_eq!(inner.byte_offset, 4 + 19 * 3);

	assert_eq!(config.locate(0, 8).block_index, 1);
}

#[test]
fn test_config_validation() {
	assert!(MapConfig::default().validate().is_ok());
	assert!(MapConfig::with_blocks_per_column(0).validate().is_err());

	let cramped = MapConfig {
		block_size: 100,
		..MapConfig::default()
	};
	assert!(matches!(cramped.validate(), Err(MulFileError::InvalidConfig { .. })));
	assert!(File::from_reader(Cursor::new(vec![0u8; 1000]), cramped).is_err());
}

#[test]
fn test_dimensions() {
	let map = small_map();
	assert_eq!(map.total_blocks(), 4);
	assert_eq!(map.blocks_per_row(), 2);
	assert_eq!(map.width(), 16);
	assert_eq!(map.height(), 16);
	assert_eq!(map.bounds(), Some(Region::new(0, 15, 0, 15)));
}

#[test_log::test]
fn test_partial_column_is_unreachable() {
	let config = MapConfig::with_blocks_per_column(2);
	let mut data = build_map(config, 1);
	// one extra block that does not complete a column
	data.extend(std::iter::repeat_n(0u8, config.block_size as usize));
	// and a few trailing bytes that do not form a block
	data.extend_from_slice(&[1, 2, 3]);

	let mut map = File::from_reader(Cursor::new(data), config).unwrap();
	assert_eq!(map.total_blocks(), 3);
	assert_eq!(map.width(), 8);
	assert_eq!(map.get_tile(8, 0, false), None);
	assert_eq!(map.get_tile(7, 15, false), Some(tile_at(7, 15)));
}

#[test]
fn test_get_tile() {
	let mut map = small_map();
	for (x, y) in [(0, 0), (7, 7), (8, 0), (3, 12), (15, 15)] {
		assert_eq!(map.get_tile(x, y, false), Some(tile_at(x, y)), "tile ({x},{y})");
	}
	assert_eq!(map.get_tile(16, 0, false), None);
	assert_eq!(map.get_tile(0, 16, false), None);
}

#[test]
fn test_every_coordinate_is_addressable() {
	let map = small_map();
	for x in 0..map.width() {
		for y in 0..map.height() {
			let location = map.tile_location(x, y, false);
			assert!(location.is_some_and(|l| l.block_index < map.total_blocks()), "tile ({x},{y})");
		}
	}
}

#[test]
fn test_get_tile_swapped() {
	let mut map = small_map();
	assert_eq!(map.get_tile(2, 9, true), Some(tile_at(9, 2)));
	assert_eq!(map.tile_location(2, 9, true), map.tile_location(9, 2, false));
}

#[test]
fn test_incomplete_block_is_not_addressable() {
	let config = MapConfig::with_blocks_per_column(1);
	let mut data = build_map(config, 1);
	data.truncate(config.locate(7, 7).byte_offset as usize + 2);

	let mut map = File::from_reader(Cursor::new(data), config).unwrap();
	assert_eq!(map.total_blocks(), 0);
	assert_eq!(map.bounds(), None);
	assert_eq!(map.get_tile(0, 0, false), None);
}

#[test]
fn test_region() {
	let region = Region::new(5, 2, 1, 1);
	assert_eq!(region.x_min, 2);
	assert_eq!(region.x_max, 5);
	assert_eq!(region.tile_count(), 4);
	assert!(region.contains(5, 1));
	assert!(!region.contains(6, 1));
}

#[test]
fn test_land_filter() {
	assert!(LandFilter::all().accepts(7));

	let only = LandFilter::only([1, 2]);
	assert!(only.accepts(1));
	assert!(!only.accepts(3));

	let filter = LandFilter {
		include: HashSet::new(),
		exclude: HashSet::from([0]),
	};
	assert!(!filter.accepts(0));
	assert!(filter.accepts(1));
}

#[test]
fn test_scan_region_order() {
	let mut map = small_map();
	let filter = LandFilter::all();
	let coords: Vec<(u32, u32)> = map
		.scan_region(Region::new(7, 8, 0, 1), &filter, false)
		.map(|(x, y, _)| (x, y))
		.collect();
	assert_eq!(coords, vec![(7, 0), (8, 0), (7, 1), (8, 1)]);
}

#[test]
fn test_scan_region_skips_unreadable() {
	let mut map = small_map();
	let filter = LandFilter::all();
	let count = map.scan_region(Region::new(14, 20, 0, 0), &filter, false).count();
	assert_eq!(count, 2);
}

#[test_log::test]
fn test_export_region_csv() {
	let mut map = small_map();
	let filter = LandFilter {
		include: HashSet::new(),
		exclude: HashSet::from([tile_at(1, 0).land_id]),
	};

	let mut out = Vec::new();
	let rows = map.export_region_csv(&mut out, Region::new(0, 1, 0, 1), &filter, false).unwrap();
	assert_eq!(rows, 3);

	let text = String::from_utf8(out).unwrap();
	assert_eq!(text, "x,y,Land_ID,Z\n0,0,0,0\n0,1,100,-1\n1,1,101,0\n");
}

#[test]
fn test_verify_known_tiles() {
	let mut map = small_map();
	let swapped = tile_at(9, 2);
	let known = [
		KnownTile {
			x: 3,
			y: 4,
			land_id: tile_at(3, 4).land_id,
			z: tile_at(3, 4).z,
		},
		KnownTile {
			x: 2,
			y: 9,
			land_id: swapped.land_id,
			z: swapped.z,
		},
		KnownTile {
			x: 40,
			y: 0,
			land_id: 1,
			z: 0,
		},
	];

	let found = map.verify_known_tiles(&known, true);
	assert_eq!(
		found,
		vec![
			Discrepancy::Mismatch {
				x: 2,
				y: 9,
				expected: swapped,
				actual: tile_at(2, 9),
			},
			Discrepancy::MatchesSwapped {
				x: 2,
				y: 9,
				tile: swapped,
			},
			Discrepancy::Unreadable {
				x: 40,
				y: 0,
			},
		]
	);

	assert_eq!(map.verify_known_tiles(&known, false).len(), 2);
}

#[test]
fn test_known_tile_json() {
	let tiles: Vec<KnownTile> = serde_json::from_str(
		r#"[
			{"position_x": 1, "position_y": 2, "land_id": "0x00A8", "position_z": -5},
			{"x": 3, "y": 4, "land_id": 12, "z": 0}
		]"#,
	)
	.unwrap();

	assert_eq!(tiles[0].land_id, 0xA8);
	assert_eq!(tiles[0].z, -5);
	assert_eq!(tiles[1].tile(), Tile {
		land_id: 12,
		z: 0
	});
	assert!(serde_json::from_str::<KnownTile>(r#"{"x":0,"y":0,"land_id":"0xZZ","z":0}"#).is_err());
}

#[test]
fn test_known_tile_text_ids_are_hex() {
	let tiles: Vec<KnownTile> = serde_json::from_str(
		r#"[
			{"position_x": 0, "position_y": 0, "land_id": "00A8", "position_z": 0},
			{"x": 1, "y": 1, "land_id": "168", "z": 0},
			{"x": 2, "y": 2, "land_id": 168, "z": 0}
		]"#,
	)
	.unwrap();

	assert_eq!(tiles[0].land_id, 0xA8);
	assert_eq!(tiles[1].land_id, 0x168);
	assert_eq!(tiles[2].land_id, 168);
}

#[test]
fn test_known_tiles_accepts_single_object() {
	let one: KnownTiles = serde_json::from_str(r#"{"x": 5, "y": 6, "land_id": "0x3", "z": 1}"#).unwrap();
	assert_eq!(one.into_vec(), vec![KnownTile {
		x: 5,
		y: 6,
		land_id: 3,
		z: 1
	}]);

	let many: KnownTiles = serde_json::from_str(r#"[{"x": 0, "y": 0, "land_id": 1, "z": 0}]"#).unwrap();
	assert_eq!(many.into_vec().len(), 1);

	let empty: KnownTiles = serde_json::from_str("[]").unwrap();
	assert!(empty.into_vec().is_empty());
}

#[test_log::test]
fn test_land_search() {
	let map = small_map();
	let wanted = HashSet::from([tile_at(4, 4).land_id, tile_at(12, 3).land_id]);

	let search = spawn_land_search(map, wanted, Region::new(0, 15, 0, 15), false).unwrap();
	let events: Vec<SearchEvent> = search.events().iter().collect();
	assert_eq!(
		events,
		vec![
			SearchEvent::Found {
				x: 12,
				y: 3,
				tile: tile_at(12, 3),
			},
			SearchEvent::Found {
				x: 4,
				y: 4,
				tile: tile_at(4, 4),
			},
			SearchEvent::Finished {
				matches: 2
			},
		]
	);

	let map = search.join().unwrap();
	assert_eq!(map.width(), 16);
}
