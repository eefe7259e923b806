//! Gump id parsing from free-form user input.

use std::sync::LazyLock;

use regex::Regex;

static PREFIXED_HEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"0[xX]([0-9a-fA-F]+)").expect("valid regex"));

static BARE_HEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"([0-9a-fA-F]{2,6})").expect("valid regex"));

/// Longest bare hex string accepted as a whole.
const MAX_BARE_HEX_DIGITS: usize = 6;

/// Parses a gump id typed by a user or embedded in a file name.
///
/// Tried in order:
/// 1. decimal (`"25"`)
/// 2. `0x`-prefixed hex (`"0x002F"`)
/// 3. bare hex of at most six digits (`"2F"`)
/// 4. `0x` hex anywhere in the text (`"menu_button_start_0x002F"`)
/// 5. the first run of two to six hex digits
///
/// # Examples
///
/// ```
/// use mulkit_types::file::gump::parse_gump_id;
///
/// assert_eq!(parse_gump_id("25"), Some(25));
/// assert_eq!(parse_gump_id("0x002F"), Some(0x2F));
/// assert_eq!(parse_gump_id("menu_button_start_0x002F.png"), Some(0x2F));
/// assert_eq!(parse_gump_id("???"), None);
/// ```
pub fn parse_gump_id(input: &str) -> Option<u32> {
	let raw = input.trim();
	if raw.is_empty() {
		return None;
	}

	if let Ok(id) = raw.parse::<u32>() {
		return Some(id);
	}

	if let Some(id) = raw
		.strip_prefix("0x")
		.or_else(|| raw.strip_prefix("0X"))
		.and_then(|hex| u32::from_str_radix(hex, 16).ok())
	{
		return Some(id);
	}

	if raw.len() <= MAX_BARE_HEX_DIGITS && raw.chars().all(|c| c.is_ascii_hexdigit()) {
		return u32::from_str_radix(raw, 16).ok();
	}

	if let Some(caps) = PREFIXED_HEX.captures(raw) {
		return u32::from_str_radix(&caps[1], 16).ok();
	}

	BARE_HEX.captures(raw).and_then(|caps| u32::from_str_radix(&caps[1], 16).ok())
}
