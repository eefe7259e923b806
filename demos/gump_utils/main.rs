//! Gump (`gumpidx.mul` + `gumpart.mul`) CLI Utility
//!
//! # Features
//!
//! - **info**: Display index statistics and a sample of valid ids
//! - **export**: Decode one gump to PNG; the id may be decimal, hex, or
//!   embedded in a file name such as `menu_button_0x002F`
//! - **export-all**: Decode every valid gump, skipping failures
//!
//! # Usage Examples
//!
//! ```bash
//! cargo run --example gump_utils -- info client/
//! cargo run --example gump_utils -- export client/ 0x2F -o button.png
//! cargo run --example gump_utils -- export-all client/ -o gumps/
//! ```

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use log::warn;
use mulkit_rs::prelude::file::gump::{DecodedGump, GumpFile, parse_gump_id};

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Info(opts) => run_info(opts),
		Command::Export(opts) => run_export(opts),
		Command::ExportAll(opts) => run_export_all(opts),
	}
}

#[derive(Parser)]
#[command(name = "gump_utils")]
#[command(author = "mulkit-rs project")]
#[command(version)]
#[command(about = "Gump utility - inspect and export gump art", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Display gump index information
	Info(InfoArgs),
	/// Export one gump to PNG
	Export(ExportArgs),
	/// Export every valid gump to PNG
	ExportAll(ExportAllArgs),
}

#[derive(Args)]
struct InfoArgs {
	/// Directory containing gumpidx.mul and gumpart.mul
	#[arg(value_name = "DIR")]
	dir: PathBuf,

	/// Number of valid ids to list
	#[arg(short, long, default_value_t = 20)]
	sample: usize,
}

#[derive(Args)]
struct ExportArgs {
	/// Directory containing gumpidx.mul and gumpart.mul
	#[arg(value_name = "DIR")]
	dir: PathBuf,

	/// Gump id: decimal, hex, or a name containing one
	#[arg(value_name = "ID")]
	id: String,

	/// Output PNG (defaults to `gump_XXXX.png`)
	#[arg(short, long, value_name = "OUTPUT_PNG")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct ExportAllArgs {
	/// Directory containing gumpidx.mul and gumpart.mul
	#[arg(value_name = "DIR")]
	dir: PathBuf,

	/// Output directory
	#[arg(short, long, value_name = "OUT_DIR")]
	output: PathBuf,
}

fn open_gumps(dir: &Path) -> Result<GumpFile> {
	GumpFile::open(dir).with_context(|| format!("Failed to open gump files in {}", dir.display()))
}

fn save_png(gump: &DecodedGump, path: &Path) -> Result<()> {
	let image = &gump.image;
	let img = RgbaImage::from_raw(image.width() as u32, image.height() as u32, image.to_rgba_bytes())
		.context("Gump buffer does not match its dimensions")?;
	img.save(path).with_context(|| format!("Failed to save {}", path.display()))
}

fn run_info(args: InfoArgs) -> Result<()> {
	let gumps = open_gumps(&args.dir)?;
	let index = gumps.index();
	let valid = index.valid_ids();

	println!("\n=== Gump Index ===");
	println!("Directory: {}", args.dir.display());
	println!("Entries: {}", index.len());
	println!("Valid: {}", valid.len());

	if !valid.is_empty() {
		println!("\n=== Sample Valid Ids ===");
		for &id in valid.iter().take(args.sample) {
			if let Some(entry) = index.entry(id) {
				println!("  {id:5} (0x{id:04X}): {entry}");
			}
		}
	}
	Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
	let Some(id) = parse_gump_id(&args.id) else {
		bail!("Cannot parse a gump id from {:?}", args.id);
	};

	let gumps = open_gumps(&args.dir)?;
	let gump = gumps.decode(id).with_context(|| format!("Failed to decode gump {id} (0x{id:04X})"))?;
	if !gump.is_clean() {
		warn!("gump 0x{id:04X}: {} rows did not decode cleanly", gump.mismatches.len());
	}

	let output = args.output.unwrap_or_else(|| PathBuf::from(format!("gump_{id:04X}.png")));
	save_png(&gump, &output)?;

	println!(
		"✓ Gump 0x{id:04X} ({}x{}) saved: {}",
		gump.image.width(),
		gump.image.height(),
		output.display()
	);
	Ok(())
}

fn run_export_all(args: ExportAllArgs) -> Result<()> {
	let gumps = open_gumps(&args.dir)?;
	fs::create_dir_all(&args.output)
		.with_context(|| format!("Failed to create {}", args.output.display()))?;

	let (mut exported, mut failed, mut unclean) = (0usize, 0usize, 0usize);
	for id in gumps.index().valid_ids() {
		let Some(gump) = gumps.gump(id) else {
			failed += 1;
			continue;
		};
		if !gump.is_clean() {
			unclean += 1;
		}

		let path = args.output.join(format!("gump_{id:04X}.png"));
		match save_png(&gump, &path) {
			Ok(()) => exported += 1,
			Err(e) => {
				warn!("gump 0x{id:04X}: {e:#}");
				failed += 1;
			}
		}
	}

	println!("✓ Exported {exported} gumps to {} ({failed} failed, {unclean} with bad rows)", args.output.display());
	Ok(())
}
