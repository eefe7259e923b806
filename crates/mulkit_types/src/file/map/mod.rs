//! Map file support (`map#.mul`).
//!
//! A map file is a flat sequence of fixed-size blocks. Each block covers
//! 8x8 tiles and is laid out as a 4-byte header followed by 64 tile records
//! of 3 bytes (`land_id: u16 LE`, `z: i8`), row-major within the block.
//!
//! Blocks are ordered column-major: all blocks of block column 0 first, then
//! column 1, and so on, with `blocks_per_column` blocks per column.
//!
//! ```text
//! block_index = (x / 8) * blocks_per_column + (y / 8)
//! byte_offset = block_index * 196 + 4 + ((y % 8) * 8 + (x % 8)) * 3
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use mulkit_types::file::map::{File, MapConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut map = File::open("map0.mul", MapConfig::default())?;
//! println!("{}x{} tiles", map.width(), map.height());
//! if let Some(tile) = map.get_tile(1000, 1000, false) {
//!     println!("land 0x{:04X} at z {}", tile.land_id, tile.z);
//! }
//! # Ok(())
//! # }
//! ```

mod search;
mod verify;

use std::collections::HashSet;
use std::io::{Read, Seek, SeekFrom, Write};

use log::{debug, info, warn};

use crate::file::{FileType, MulFileError};

pub use search::{LandSearch, SearchEvent, spawn_land_search};
pub use verify::{Discrepancy, KnownTile, KnownTiles};

/// Map file constants.
pub mod constants {
	/// Tiles along each side of a block
	pub const TILES_PER_BLOCK: u32 = 8;

	/// Blocks per column of the classic maps
	pub const BLOCKS_PER_COLUMN: u32 = 512;

	/// Bytes per block (header + 64 tile records)
	pub const BLOCK_SIZE: u64 = 196;

	/// Bytes of block header before the tile records
	pub const BLOCK_HEADER_SIZE: u64 = 4;

	/// Bytes per tile record
	pub const TILE_RECORD_SIZE: u64 = 3;

	/// CSV export logs progress every this many rows
	pub const EXPORT_PROGRESS_INTERVAL: usize = 100_000;
}

/// Block layout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapConfig {
	/// Tiles along each side of a block
	pub tiles_per_block: u32,
	/// Blocks per block column
	pub blocks_per_column: u32,
	/// Bytes per block
	pub block_size: u64,
	/// Bytes of header at the start of each block
	pub block_header_size: u64,
	/// Bytes per tile record
	pub tile_record_size: u64,
}

impl Default for MapConfig {
	fn default() -> Self {
		Self {
			tiles_per_block: constants::TILES_PER_BLOCK,
			blocks_per_column: constants::BLOCKS_PER_COLUMN,
			block_size: constants::BLOCK_SIZE,
			block_header_size: constants::BLOCK_HEADER_SIZE,
			tile_record_size: constants::TILE_RECORD_SIZE,
		}
	}
}

impl MapConfig {
	/// Returns the default layout with a different column height.
	pub fn with_blocks_per_column(blocks_per_column: u32) -> Self {
		Self {
			blocks_per_column,
			..Self::default()
		}
	}

	/// Checks that the layout can address tiles.
	///
	/// # Errors
	///
	/// Returns an error if a dimension is zero or the tile records do not fit
	/// in a block.
	pub fn validate(&self) -> Result<(), MulFileError> {
		let invalid = |message: String| MulFileError::InvalidConfig {
			file_type: FileType::Map,
			message,
		};

		if self.tiles_per_block == 0 || self.blocks_per_column == 0 {
			return Err(invalid(format!(
				"tiles_per_block ({}) and blocks_per_column ({}) must be non-zero",
				self.tiles_per_block, self.blocks_per_column
			)));
		}
		if self.tile_record_size < 3 {
			return Err(invalid(format!("tile records need 3 bytes, got {}", self.tile_record_size)));
		}

		let tiles = self.tiles_per_block as u64 * self.tiles_per_block as u64;
		let needed = self.block_header_size + tiles * self.tile_record_size;
		if needed > self.block_size {
			return Err(invalid(format!("block of {} bytes cannot hold {needed} bytes of tiles", self.block_size)));
		}
		Ok(())
	}

	/// Computes where tile (x, y) lives. No bounds checks.
	pub fn locate(&self, x: u32, y: u32) -> TileLocation {
		let tpb = self.tiles_per_block;
		let block_index = (x / tpb) as u64 * self.blocks_per_column as u64 + (y / tpb) as u64;
		let tile_index_in_block = (y % tpb) * tpb + (x % tpb);
		let byte_offset = block_index * self.block_size +
			self.block_header_size +
			tile_index_in_block as u64 * self.tile_record_size;

		TileLocation {
			block_index,
			tile_index_in_block,
			byte_offset,
		}
	}
}

/// Where a tile record lives in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileLocation {
	/// Block holding the tile
	pub block_index: u64,
	/// Row-major index of the tile inside its block
	pub tile_index_in_block: u32,
	/// Absolute byte offset of the 3-byte record
	pub byte_offset: u64,
}

/// One land tile record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
	/// Land type id
	pub land_id: u16,
	/// Height
	pub z: i8,
}

impl Tile {
	/// Parses a 3-byte tile record.
	pub fn from_bytes(data: [u8; 3]) -> Self {
		Self {
			land_id: u16::from_le_bytes([data[0], data[1]]),
			z: data[2] as i8,
		}
	}

	/// Serializes the tile to its 3-byte record.
	pub fn to_bytes(&self) -> [u8; 3] {
		let id = self.land_id.to_le_bytes();
		[id[0], id[1], self.z as u8]
	}
}

/// Inclusive rectangle of tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
	/// Smallest x
	pub x_min: u32,
	/// Largest x
	pub x_max: u32,
	/// Smallest y
	pub y_min: u32,
	/// Largest y
	pub y_max: u32,
}

impl Region {
	/// Creates a region, ordering each pair of bounds.
	pub fn new(x_min: u32, x_max: u32, y_min: u32, y_max: u32) -> Self {
		Self {
			x_min: x_min.min(x_max),
			x_max: x_min.max(x_max),
			y_min: y_min.min(y_max),
			y_max: y_min.max(y_max),
		}
	}

	/// Number of tile coordinates covered.
	pub fn tile_count(&self) -> u64 {
		(self.x_max as u64 - self.x_min as u64 + 1) * (self.y_max as u64 - self.y_min as u64 + 1)
	}

	/// Returns `true` if (x, y) lies inside the region.
	pub fn contains(&self, x: u32, y: u32) -> bool {
		(self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
	}
}

/// Land id inclusion/exclusion filter for region scans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LandFilter {
	/// If non-empty, only these ids pass
	pub include: HashSet<u16>,
	/// These ids never pass
	pub exclude: HashSet<u16>,
}

impl LandFilter {
	/// A filter that lets everything through.
	pub fn all() -> Self {
		Self::default()
	}

	/// A filter that only lets `ids` through.
	pub fn only(ids: impl IntoIterator<Item = u16>) -> Self {
		Self {
			include: ids.into_iter().collect(),
			exclude: HashSet::new(),
		}
	}

	/// Returns `true` if `land_id` passes the filter.
	pub fn accepts(&self, land_id: u16) -> bool {
		(self.include.is_empty() || self.include.contains(&land_id)) && !self.exclude.contains(&land_id)
	}
}

/// Map file structure, reading tiles on demand through a seekable reader.
#[derive(Debug)]
pub struct File<R> {
	reader: R,
	config: MapConfig,
	total_blocks: u64,
	blocks_per_row: u32,
}

impl<R: Read + Seek> File<R> {
	/// Reads map dimensions from the given reader.
	///
	/// Blocks beyond the last full block column cannot be addressed; their
	/// count is logged as a warning.
	///
	/// # Errors
	///
	/// Returns an error if the configuration is invalid or the stream length
	/// cannot be determined.
	pub fn from_reader(mut reader: R, config: MapConfig) -> Result<Self, MulFileError> {
		config.validate()?;

		let size = reader.seek(SeekFrom::End(0))?;
		let total_blocks = size / config.block_size;
		let blocks_per_row = (total_blocks / config.blocks_per_column as u64) as u32;
		let remainder = total_blocks % config.blocks_per_column as u64;
		if remainder != 0 {
			warn!(
				"total blocks ({total_blocks}) not divisible by blocks per column ({}); {remainder} blocks are unreachable",
				config.blocks_per_column
			);
		}

		let file = Self {
			reader,
			config,
			total_blocks,
			blocks_per_row,
		};
		info!(
			"map: {size} bytes, {total_blocks} blocks, {}x{} tiles",
			file.width(),
			file.height()
		);
		Ok(file)
	}

	/// Returns the layout configuration.
	pub fn config(&self) -> &MapConfig {
		&self.config
	}

	/// Returns the number of whole blocks in the file.
	pub fn total_blocks(&self) -> u64 {
		self.total_blocks
	}

	/// Returns the number of block columns.
	pub fn blocks_per_row(&self) -> u32 {
		self.blocks_per_row
	}

	/// Map width in tiles.
	pub fn width(&self) -> u32 {
		self.blocks_per_row.saturating_mul(self.config.tiles_per_block)
	}

	/// Map height in tiles.
	pub fn height(&self) -> u32 {
		self.config.blocks_per_column.saturating_mul(self.config.tiles_per_block)
	}

	/// Region covering the whole map, or `None` for a map with no full column.
	pub fn bounds(&self) -> Option<Region> {
		if self.width() == 0 || self.height() == 0 {
			return None;
		}
		Some(Region::new(0, self.width() - 1, 0, self.height() - 1))
	}

	/// Locates tile (x, y), swapping the axes first if `swap` is set.
	///
	/// Returns `None` if the tile lies outside the map or its block is not
	/// in the file.
	pub fn tile_location(&self, x: u32, y: u32, swap: bool) -> Option<TileLocation> {
		let (x, y) = if swap {
			(y, x)
		} else {
			(x, y)
		};

		if x >= self.width() || y >= self.height() {
			debug!("tile ({x},{y}) is out of bounds");
			return None;
		}

		let location = self.config.locate(x, y);
		if location.block_index >= self.total_blocks {
			debug!("block index {} for tile ({x},{y}) exceeds total blocks", location.block_index);
			return None;
		}
		Some(location)
	}

	/// Reads tile (x, y).
	///
	/// Returns `None` if the tile is unaddressable or the record cannot be
	/// read in full.
	pub fn get_tile(&mut self, x: u32, y: u32, swap: bool) -> Option<Tile> {
		let location = self.tile_location(x, y, swap)?;
		match self.read_record(location.byte_offset) {
			Ok(tile) => Some(tile),
			Err(e) => {
				debug!("tile ({x},{y}) at offset {}: {e}", location.byte_offset);
				None
			}
		}
	}

	fn read_record(&mut self, offset: u64) -> std::io::Result<Tile> {
		let mut buf = [0u8; 3];
		self.reader.seek(SeekFrom::Start(offset))?;
		self.reader.read_exact(&mut buf)?;
		Ok(Tile::from_bytes(buf))
	}

	/// Iterates over the readable tiles of `region` that pass `filter`, row
	/// by row.
	pub fn scan_region<'a>(
		&'a mut self,
		region: Region,
		filter: &'a LandFilter,
		swap: bool,
	) -> RegionIter<'a, R> {
		RegionIter {
			file: self,
			region,
			filter,
			swap,
			x: region.x_min,
			y: region.y_min,
			done: false,
		}
	}

	/// Writes the tiles of `region` that pass `filter` as CSV with header
	/// `x,y,Land_ID,Z`.
	///
	/// Returns the number of tile rows written.
	///
	/// # Errors
	///
	/// Returns an error if writing fails.
	pub fn export_region_csv<W: Write>(
		&mut self,
		writer: &mut W,
		region: Region,
		filter: &LandFilter,
		swap: bool,
	) -> Result<usize, MulFileError> {
		info!(
			"exporting region x={}..={}, y={}..={} (swap: {swap})",
			region.x_min, region.x_max, region.y_min, region.y_max
		);
		let total = region.tile_count();

		writeln!(writer, "x,y,Land_ID,Z")?;
		let mut rows = 0usize;
		for (x, y, tile) in self.scan_region(region, filter, swap) {
			writeln!(writer, "{x},{y},{},{}", tile.land_id, tile.z)?;
			rows += 1;
			if rows % constants::EXPORT_PROGRESS_INTERVAL == 0 {
				info!(
					"export progress: {rows}/{total} tiles ({:.2}%)",
					rows as f64 / total as f64 * 100.0
				);
			}
		}

		info!("export completed: {rows} tiles");
		Ok(rows)
	}

	/// Checks `known` tiles against the map.
	///
	/// With `try_swapped`, every mismatch is retried with swapped axes and an
	/// extra [`Discrepancy::MatchesSwapped`] entry is added when that matches.
	pub fn verify_known_tiles(&mut self, known: &[KnownTile], try_swapped: bool) -> Vec<Discrepancy> {
		verify::verify(self, known, try_swapped)
	}

	/// Returns the underlying reader.
	pub fn into_inner(self) -> R {
		self.reader
	}
}

impl File<std::io::BufReader<std::fs::File>> {
	/// Opens a map file from the given path.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be opened or the configuration is
	/// invalid.
	pub fn open(path: impl AsRef<std::path::Path>, config: MapConfig) -> Result<Self, MulFileError> {
		let file = std::fs::File::open(path)?;
		Self::from_reader(std::io::BufReader::new(file), config)
	}
}

/// Iterator over the tiles of a region.
#[derive(Debug)]
pub struct RegionIter<'a, R> {
	file: &'a mut File<R>,
	region: Region,
	filter: &'a LandFilter,
	swap: bool,
	x: u32,
	y: u32,
	done: bool,
}

impl<R: Read + Seek> RegionIter<'_, R> {
	fn advance(&mut self) {
		if self.x < self.region.x_max {
			self.x += 1;
		} else if self.y < self.region.y_max {
			self.x = self.region.x_min;
			self.y += 1;
		} else {
			self.done = true;
		}
	}
}

impl<R: Read + Seek> Iterator for RegionIter<'_, R> {
	type Item = (u32, u32, Tile);

	fn next(&mut self) -> Option<Self::Item> {
		while !self.done {
			let (x, y) = (self.x, self.y);
			self.advance();

			if let Some(tile) = self.file.get_tile(x, y, self.swap) &&
				self.filter.accepts(tile.land_id)
			{
				return Some((x, y, tile));
			}
		}
		None
	}
}

#[cfg(test)]
mod tests;
