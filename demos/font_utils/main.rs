//! Font (`fonts.mul`) CLI Utility
//!
//! A command-line tool for inspecting, exporting and rebuilding MUL font containers.
//!
//! # Features
//!
//! - **info**: Display layout, font count and glyph statistics
//! - **dump**: Print glyphs as ASCII art
//! - **export**: Write every glyph to `<slot>.png`
//! - **import**: Build a font from a folder of `<slot>.png` files
//! - **convert**: Re-save a container as legacy or sequential
//! - **verify**: Check that a container survives an encode/decode round trip
//!
//! # Usage Examples
//!
//! ```bash
//! # Display font information
//! cargo run --example font_utils -- info fonts.mul
//!
//! # Print glyph 33 of the second font
//! cargo run --example font_utils -- dump fonts.mul --font 1 --slot 33
//!
//! # Export glyphs, edit them, and import them back over the original
//! cargo run --example font_utils -- export fonts.mul -o glyphs/
//! cargo run --example font_utils -- import glyphs/font_0 --base fonts.mul -o fonts_new.mul
//! ```

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::RgbaImage;
use log::{info, warn};
use mulkit_rs::prelude::file::font::{
	EncodeConfig, Font, FontContainer, FontFormat, Glyph, constants, looks_like_master_index,
	offset_table_summary,
};
use walkdir::WalkDir;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Info(opts) => run_info(opts),
		Command::Dump(opts) => run_dump(opts),
		Command::Export(opts) => run_export(opts),
		Command::Import(opts) => run_import(opts),
		Command::Convert(opts) => run_convert(opts),
		Command::Verify(opts) => run_verify(opts),
	}
}

#[derive(Parser)]
#[command(name = "font_utils")]
#[command(author = "mulkit-rs project")]
#[command(version)]
#[command(about = "MUL font utility - inspect, export and rebuild font containers", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Display font container information
	Info(InfoArgs),
	/// Print glyphs as ASCII art
	Dump(DumpArgs),
	/// Export glyphs to PNG files
	Export(ExportArgs),
	/// Build a font from a folder of PNG files
	Import(ImportArgs),
	/// Re-save a container in another layout
	Convert(ConvertArgs),
	/// Check that a container round-trips
	Verify(VerifyArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum Layout {
	Legacy,
	Sequential,
}

#[derive(Args)]
struct InfoArgs {
	/// Input font file
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Also list the non-zero legacy offset table entries
	#[arg(short, long, default_value_t = false)]
	offsets: bool,
}

#[derive(Args)]
struct DumpArgs {
	/// Input font file
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Font index inside the container
	#[arg(short, long, default_value_t = 0)]
	font: usize,

	/// Only dump this slot
	#[arg(short, long)]
	slot: Option<usize>,

	/// Luminance threshold for "on" pixels
	#[arg(short, long, default_value_t = constants::DEFAULT_THRESHOLD)]
	threshold: u8,
}

#[derive(Args)]
struct ExportArgs {
	/// Input font file
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Output directory; each font gets a `font_<n>` sub-directory
	#[arg(short, long, value_name = "DIR")]
	output: PathBuf,
}

#[derive(Args)]
struct ImportArgs {
	/// Directory containing `<slot>.png` files
	#[arg(value_name = "DIR")]
	input: PathBuf,

	/// Output font file
	#[arg(short, long, value_name = "OUTPUT")]
	output: PathBuf,

	/// Existing legacy font to start from; otherwise all slots start blank
	#[arg(short, long, value_name = "BASE")]
	base: Option<PathBuf>,

	/// Output layout
	#[arg(long, value_enum, default_value_t = Layout::Legacy)]
	layout: Layout,

	/// Luminance threshold for "on" pixels
	#[arg(short, long, default_value_t = constants::DEFAULT_THRESHOLD)]
	threshold: u8,
}

#[derive(Args)]
struct ConvertArgs {
	/// Input font file
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Output font file
	#[arg(short, long, value_name = "OUTPUT")]
	output: PathBuf,

	/// Output layout
	#[arg(long, value_enum)]
	to: Layout,

	/// Font to keep when converting a sequential container to legacy
	#[arg(short, long, default_value_t = 0)]
	font: usize,

	/// Luminance threshold for "on" pixels
	#[arg(short, long, default_value_t = constants::DEFAULT_THRESHOLD)]
	threshold: u8,
}

#[derive(Args)]
struct VerifyArgs {
	/// Input font file
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Luminance threshold for "on" pixels
	#[arg(short, long, default_value_t = constants::DEFAULT_THRESHOLD)]
	threshold: u8,
}

fn encode_config(threshold: u8) -> EncodeConfig {
	EncodeConfig {
		threshold,
		..EncodeConfig::default()
	}
}

fn open_container(path: &Path) -> Result<FontContainer> {
	let container =
		FontContainer::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
	if container.format() == FontFormat::Unrecognized {
		bail!("{} is not a recognized font container", path.display());
	}
	Ok(container)
}

fn run_info(args: InfoArgs) -> Result<()> {
	let data = fs::read(&args.input).with_context(|| format!("Failed to read {}", args.input.display()))?;
	let container = FontContainer::decode(&data);

	println!("\n=== Font Container ===");
	println!("File: {}", args.input.display());
	println!("Size: {} bytes", data.len());
	println!("Layout: {}", container.format());
	println!("Fonts: {}", container.font_count());

	if container.format() == FontFormat::Legacy && looks_like_master_index(&data) {
		warn!("offset table has very few entries; this may be a master index rather than a font");
	}

	for index in 0..container.font_count() {
		let Some(font) = container.font(index) else {
			continue;
		};
		let stats = font.stats();
		println!(
			"  font {index}: {}/{} glyphs, average area {} px",
			stats.non_blank, stats.glyphs, stats.average_area
		);
	}

	if args.offsets {
		println!("\n=== Offset Table ===");
		for (slot, offset) in offset_table_summary(&data) {
			println!("  slot {slot:3}: 0x{offset:08X}");
		}
	}

	Ok(())
}

fn run_dump(args: DumpArgs) -> Result<()> {
	let container = open_container(&args.input)?;
	let font = container
		.font(args.font)
		.with_context(|| format!("Font {} not present ({} fonts)", args.font, container.font_count()))?;

	let print = |slot: usize, glyph: &Glyph| {
		println!("\nGlyph {slot} ({}x{}):", glyph.width(), glyph.height());
		println!("{}", glyph.to_ascii_art(args.threshold, '#', '.'));
	};

	match args.slot {
		Some(slot) => match font.get(slot) {
			Some(glyph) => print(slot, glyph),
			None => println!("Glyph {slot} is blank"),
		},
		None => font.iter().for_each(|(slot, glyph)| print(slot, glyph)),
	}
	Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
	let container = open_container(&args.input)?;

	let (mut written, mut failed) = (0usize, 0usize);
	for index in 0..container.font_count() {
		let Some(font) = container.font(index) else {
			continue;
		};
		let dir = args.output.join(format!("font_{index}"));
		fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

		for (slot, glyph) in font {
			let path = dir.join(format!("{slot}.png"));
			match save_glyph(glyph, &path) {
				Ok(()) => written += 1,
				Err(e) => {
					warn!("font {index} slot {slot}: {e:#}");
					failed += 1;
				}
			}
		}
	}

	println!("✓ Exported {written} glyphs to {} ({failed} failed)", args.output.display());
	Ok(())
}

fn save_glyph(glyph: &Glyph, path: &Path) -> Result<()> {
	let img = RgbaImage::from_raw(glyph.width() as u32, glyph.height() as u32, glyph.to_rgba_bytes())
		.context("Glyph buffer does not match its dimensions")?;
	img.save(path).with_context(|| format!("Failed to save {}", path.display()))
}

/// Loads `<slot>.png` into a glyph. Returns `None` for files that are not
/// glyph images.
fn load_glyph(path: &Path) -> Result<Option<(usize, Glyph)>> {
	let Some(slot) = path.file_stem().and_then(|s| s.to_str()).and_then(|s| s.parse::<usize>().ok()) else {
		return Ok(None);
	};
	if slot >= constants::GLYPH_COUNT {
		warn!("{}: slot {slot} is out of range, skipped", path.display());
		return Ok(None);
	}

	let img = image::open(path)?.to_rgba8();
	let glyph = Glyph::from_rgba(img.width(), img.height(), img.as_raw())?;
	Ok(Some((slot, glyph)))
}

fn run_import(args: ImportArgs) -> Result<()> {
	if !args.input.is_dir() {
		bail!("{} is not a directory", args.input.display());
	}

	let mut font = match &args.base {
		Some(base) => match open_container(base)? {
			FontContainer::Legacy(font) => font,
			other => other.font(0).cloned().context("Base container holds no font")?,
		},
		None => Font::new(),
	};

	let mut imported = 0usize;
	for entry in WalkDir::new(&args.input).max_depth(1).sort_by_file_name() {
		let entry = entry?;
		let path = entry.path();
		if !path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")) {
			continue;
		}

		match load_glyph(path) {
			Ok(Some((slot, glyph))) => {
				font.set(slot, Some(glyph))?;
				imported += 1;
			}
			Ok(None) => {}
			Err(e) => warn!("{}: {e:#}, skipped", path.display()),
		}
	}
	info!("imported {imported} glyphs from {}", args.input.display());

	let container = match args.layout {
		Layout::Legacy => FontContainer::Legacy(font),
		Layout::Sequential => FontContainer::Legacy(font)
			.into_sequential()
			.context("Failed to build sequential container")?,
	};
	container.save(&args.output, &encode_config(args.threshold))?;

	println!("✓ Font saved: {} ({imported} glyphs imported)", args.output.display());
	Ok(())
}

fn run_convert(args: ConvertArgs) -> Result<()> {
	let container = open_container(&args.input)?;
	let font_count = container.font_count();

	let converted = match args.to {
		Layout::Legacy => container.into_legacy(args.font),
		Layout::Sequential => container.into_sequential(),
	}
	.with_context(|| format!("Cannot convert font {} of {font_count}", args.font))?;

	converted.save(&args.output, &encode_config(args.threshold))?;
	println!("✓ {} container saved: {}", converted.format(), args.output.display());
	Ok(())
}

fn run_verify(args: VerifyArgs) -> Result<()> {
	let container = open_container(&args.input)?;
	let bytes = container.to_bytes(&encode_config(args.threshold))?;
	let reread = FontContainer::decode(&bytes);

	if reread.font_count() != container.font_count() {
		bail!("Font count changed: {} -> {}", container.font_count(), reread.font_count());
	}

	let mut differing = 0usize;
	for index in 0..container.font_count() {
		let (Some(a), Some(b)) = (container.font(index), reread.font(index)) else {
			continue;
		};
		for slot in 0..constants::GLYPH_COUNT {
			let same = match (a.get(slot), b.get(slot)) {
				(Some(x), Some(y)) => {
					x.width() == y.width() &&
						x.height() == y.height() &&
						x.coverage(args.threshold) == y.coverage(args.threshold)
				}
				(None, None) => true,
				_ => false,
			};
			if !same {
				warn!("font {index} slot {slot} differs after round trip");
				differing += 1;
			}
		}
	}

	if differing > 0 {
		bail!("{differing} glyphs differ after round trip");
	}
	println!("✓ {} survives a round trip ({} bytes)", args.input.display(), bytes.len());
	Ok(())
}
