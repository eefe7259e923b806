//! Known-tile verification.

use std::io::{Read, Seek};

use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};

use super::{File, Tile};

/// A tile whose contents are known from another source.
///
/// Accepts `x`/`y`/`z` or `position_x`/`position_y`/`position_z` keys, and a
/// land id given as a number or a hex string. Strings are always hex, with
/// or without a prefix: `"0x00A8"` and `"00A8"` are both `0xA8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KnownTile {
	/// Tile x
	#[serde(alias = "position_x")]
	pub x: u32,
	/// Tile y
	#[serde(alias = "position_y")]
	pub y: u32,
	/// Expected land id
	#[serde(deserialize_with = "land_id_from_any")]
	pub land_id: u16,
	/// Expected height
	#[serde(alias = "position_z")]
	pub z: i8,
}

impl KnownTile {
	/// Returns the expected tile record.
	pub fn tile(&self) -> Tile {
		Tile {
			land_id: self.land_id,
			z: self.z,
		}
	}
}

/// Known tiles as stored in a JSON file: a list, or a single object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KnownTiles {
	/// An array of tiles
	Many(Vec<KnownTile>),
	/// One top-level tile object
	One(KnownTile),
}

impl KnownTiles {
	/// Flattens into a list.
	pub fn into_vec(self) -> Vec<KnownTile> {
		match self {
			Self::Many(tiles) => tiles,
			Self::One(tile) => vec![tile],
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LandIdRepr {
	Number(u16),
	Text(String),
}

fn land_id_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
	match LandIdRepr::deserialize(deserializer)? {
		LandIdRepr::Number(id) => Ok(id),
		LandIdRepr::Text(text) => {
			let text = text.trim();
			let hex = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
			u16::from_str_radix(hex, 16).map_err(|e| serde::de::Error::custom(format!("invalid land id {text:?}: {e}")))
		}
	}
}

/// One verification finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discrepancy {
	/// The known tile could not be read from the map
	Unreadable {
		/// Tile x
		x: u32,
		/// Tile y
		y: u32,
	},
	/// The map holds something else at the known position
	Mismatch {
		/// Tile x
		x: u32,
		/// Tile y
		y: u32,
		/// Tile from the known list
		expected: Tile,
		/// Tile read from the map
		actual: Tile,
	},
	/// The known tile matches once the axes are swapped
	MatchesSwapped {
		/// Tile x
		x: u32,
		/// Tile y
		y: u32,
		/// Tile read with swapped axes
		tile: Tile,
	},
}

pub(super) fn verify<R: Read + Seek>(
	file: &mut File<R>,
	known: &[KnownTile],
	try_swapped: bool,
) -> Vec<Discrepancy> {
	let mut found = Vec::new();

	for k in known {
		let (x, y) = (k.x, k.y);
		let expected = k.tile();

		let Some(actual) = file.get_tile(x, y, false) else {
			warn!("known tile ({x},{y}) could not be read");
			found.push(Discrepancy::Unreadable {
				x,
				y,
			});
			continue;
		};
		if actual == expected {
			continue;
		}

		warn!(
			"tile ({x},{y}): expected land 0x{:04X} z {}, found land 0x{:04X} z {}",
			expected.land_id, expected.z, actual.land_id, actual.z
		);
		found.push(Discrepancy::Mismatch {
			x,
			y,
			expected,
			actual,
		});

		if try_swapped && let Some(tile) = file.get_tile(x, y, true) && tile == expected {
			info!("tile ({x},{y}) matches with swapped axes");
			found.push(Discrepancy::MatchesSwapped {
				x,
				y,
				tile,
			});
		}
	}

	info!("verified {} known tiles, {} findings", known.len(), found.len());
	found
}
