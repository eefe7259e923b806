//! Map (`map#.mul`) CLI Utility
//!
//! # Features
//!
//! - **info**: Display block counts and map dimensions
//! - **tile**: Look up a single tile
//! - **export**: Write a region to CSV (`x,y,Land_ID,Z`)
//! - **search**: Find land ids in a region on a background thread
//! - **verify**: Compare the map against known tiles from JSON files
//!
//! # Usage Examples
//!
//! ```bash
//! cargo run --example map_utils -- info map0.mul
//! cargo run --example map_utils -- tile map0.mul 1000 1000
//! cargo run --example map_utils -- export map0.mul -o region.csv --x-min 0 --x-max 99 --y-min 0 --y-max 99
//! cargo run --example map_utils -- search map0.mul --ids 0xA8,0xA9
//! cargo run --example map_utils -- verify map0.mul known_tiles.json --try-swapped
//! ```

use std::{
	collections::HashSet,
	fs,
	io::{BufWriter, Write},
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use mulkit_rs::prelude::file::map::{
	Discrepancy, File as MapFile, KnownTile, KnownTiles, LandFilter, MapConfig, Region, SearchEvent,
	constants, spawn_land_search,
};

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Info(opts) => run_info(opts),
		Command::Tile(opts) => run_tile(opts),
		Command::Export(opts) => run_export(opts),
		Command::Search(opts) => run_search(opts),
		Command::Verify(opts) => run_verify(opts),
	}
}

#[derive(Parser)]
#[command(name = "map_utils")]
#[command(author = "mulkit-rs project")]
#[command(version)]
#[command(about = "Map utility - inspect, export and search land tiles", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Display map dimensions
	Info(MapArgs),
	/// Look up one tile
	Tile(TileArgs),
	/// Export a region to CSV
	Export(ExportArgs),
	/// Search a region for land ids
	Search(SearchArgs),
	/// Check known tiles against the map
	Verify(VerifyArgs),
}

#[derive(Args)]
struct MapArgs {
	/// Input map file
	#[arg(value_name = "MAP")]
	map: PathBuf,

	/// Blocks per block column
	#[arg(long, default_value_t = constants::BLOCKS_PER_COLUMN)]
	blocks_per_column: u32,
}

#[derive(Args)]
struct RegionArgs {
	/// Smallest x (defaults to 0)
	#[arg(long)]
	x_min: Option<u32>,
	/// Largest x (defaults to the map width - 1)
	#[arg(long)]
	x_max: Option<u32>,
	/// Smallest y (defaults to 0)
	#[arg(long)]
	y_min: Option<u32>,
	/// Largest y (defaults to the map height - 1)
	#[arg(long)]
	y_max: Option<u32>,
	/// Swap x and y before addressing tiles
	#[arg(long, default_value_t = false)]
	swap: bool,
}

#[derive(Args)]
struct TileArgs {
	#[command(flatten)]
	map: MapArgs,
	/// Tile x
	x: u32,
	/// Tile y
	y: u32,
	/// Swap x and y before addressing the tile
	#[arg(long, default_value_t = false)]
	swap: bool,
}

#[derive(Args)]
struct ExportArgs {
	#[command(flatten)]
	map: MapArgs,
	#[command(flatten)]
	region: RegionArgs,
	/// Output CSV file
	#[arg(short, long, value_name = "OUTPUT_CSV")]
	output: PathBuf,
	/// Only export these land ids (decimal or 0x hex, comma separated)
	#[arg(long, value_delimiter = ',', value_parser = parse_land_id)]
	include: Vec<u16>,
	/// Never export these land ids
	#[arg(long, value_delimiter = ',', value_parser = parse_land_id)]
	exclude: Vec<u16>,
}

#[derive(Args)]
struct SearchArgs {
	#[command(flatten)]
	map: MapArgs,
	#[command(flatten)]
	region: RegionArgs,
	/// Land ids to find (decimal or 0x hex, comma separated)
	#[arg(long, required = true, value_delimiter = ',', value_parser = parse_land_id)]
	ids: Vec<u16>,
	/// Stop printing after this many matches
	#[arg(long)]
	limit: Option<usize>,
}

#[derive(Args)]
struct VerifyArgs {
	#[command(flatten)]
	map: MapArgs,
	/// JSON files holding known tiles (an array or a single object)
	#[arg(value_name = "KNOWN_JSON", required = true)]
	known: Vec<PathBuf>,
	/// Retry mismatches with swapped axes
	#[arg(long, default_value_t = false)]
	try_swapped: bool,
}

fn parse_land_id(s: &str) -> Result<u16, String> {
	let s = s.trim();
	let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
		Some(hex) => u16::from_str_radix(hex, 16),
		None => s.parse(),
	};
	parsed.map_err(|e| format!("invalid land id {s:?}: {e}"))
}

fn open_map(args: &MapArgs) -> Result<MapFile<std::io::BufReader<fs::File>>> {
	let config = MapConfig::with_blocks_per_column(args.blocks_per_column);
	MapFile::open(&args.map, config).with_context(|| format!("Failed to open {}", args.map.display()))
}

fn resolve_region<R>(map: &MapFile<R>, args: &RegionArgs) -> Result<Region>
where
	R: std::io::Read + std::io::Seek,
{
	let Some(bounds) = map.bounds() else {
		bail!("Map has no addressable tiles");
	};
	Ok(Region::new(
		args.x_min.unwrap_or(bounds.x_min),
		args.x_max.unwrap_or(bounds.x_max),
		args.y_min.unwrap_or(bounds.y_min),
		args.y_max.unwrap_or(bounds.y_max),
	))
}

fn run_info(args: MapArgs) -> Result<()> {
	let map = open_map(&args)?;

	println!("\n=== Map ===");
	println!("File: {}", args.map.display());
	println!("Total blocks: {}", map.total_blocks());
	println!("Blocks per column: {}", map.config().blocks_per_column);
	println!("Blocks per row: {}", map.blocks_per_row());
	println!("Size: {}x{} tiles", map.width(), map.height());
	Ok(())
}

fn run_tile(args: TileArgs) -> Result<()> {
	let mut map = open_map(&args.map)?;

	let Some(location) = map.tile_location(args.x, args.y, args.swap) else {
		bail!("Tile ({},{}) is outside the map", args.x, args.y);
	};
	let Some(tile) = map.get_tile(args.x, args.y, args.swap) else {
		bail!("Tile ({},{}) could not be read", args.x, args.y);
	};

	println!("Tile ({},{}):", args.x, args.y);
	println!("  Block: {} (tile {} in block)", location.block_index, location.tile_index_in_block);
	println!("  Offset: 0x{:X}", location.byte_offset);
	println!("  Land ID: {} (0x{:04X})", tile.land_id, tile.land_id);
	println!("  Z: {}", tile.z);
	Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
	let mut map = open_map(&args.map)?;
	let region = resolve_region(&map, &args.region)?;
	let filter = LandFilter {
		include: args.include.into_iter().collect(),
		exclude: args.exclude.into_iter().collect(),
	};

	let file = fs::File::create(&args.output)
		.with_context(|| format!("Failed to create {}", args.output.display()))?;
	let mut writer = BufWriter::new(file);
	let rows = map.export_region_csv(&mut writer, region, &filter, args.region.swap)?;
	writer.flush()?;

	println!("✓ Exported {rows} tiles to {}", args.output.display());
	Ok(())
}

fn run_search(args: SearchArgs) -> Result<()> {
	let map = open_map(&args.map)?;
	let region = resolve_region(&map, &args.region)?;
	let ids: HashSet<u16> = args.ids.into_iter().collect();

	let search = spawn_land_search(map, ids, region, args.region.swap)?;
	let mut shown = 0usize;
	for event in search.events() {
		match event {
			SearchEvent::Found {
				x,
				y,
				tile,
			} => {
				if args.limit.is_some_and(|limit| shown >= limit) {
					break;
				}
				println!("({x},{y}): land 0x{:04X}, z {}", tile.land_id, tile.z);
				shown += 1;
			}
			SearchEvent::Finished {
				matches,
			} => {
				println!("✓ Search finished: {matches} matches");
			}
		}
	}

	search.join().context("Search thread panicked")?;
	Ok(())
}

fn load_known(path: &Path) -> Result<Vec<KnownTile>> {
	let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
	let tiles: KnownTiles =
		serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
	Ok(tiles.into_vec())
}

fn run_verify(args: VerifyArgs) -> Result<()> {
	let mut map = open_map(&args.map)?;

	let mut known = Vec::new();
	for path in &args.known {
		match load_known(path) {
			Ok(tiles) => {
				info!("{}: {} known tiles", path.display(), tiles.len());
				known.extend(tiles);
			}
			Err(e) => warn!("{e:#}, skipped"),
		}
	}
	if known.is_empty() {
		bail!("No known tiles loaded");
	}

	let findings = map.verify_known_tiles(&known, args.try_swapped);
	for finding in &findings {
		match finding {
			Discrepancy::Unreadable {
				x,
				y,
			} => println!("({x},{y}): unreadable"),
			Discrepancy::Mismatch {
				x,
				y,
				expected,
				actual,
			} => println!(
				"({x},{y}): expected 0x{:04X}/{}, found 0x{:04X}/{}",
				expected.land_id, expected.z, actual.land_id, actual.z
			),
			Discrepancy::MatchesSwapped {
				x,
				y,
				..
			} => println!("({x},{y}): matches with swapped axes"),
		}
	}

	let failures = findings.iter().filter(|f| !matches!(f, Discrepancy::MatchesSwapped { .. })).count();
	if failures > 0 {
		bail!("{failures} of {} known tiles do not match", known.len());
	}
	println!("✓ All {} known tiles match", known.len());
	Ok(())
}
