//! # ESC/POS Text Styling Commands
//!
//! This module implements text formatting commands and the fixed lookup
//! tables (alignment, language, font) that map document parameter values to
//! protocol codes.
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Emphasize | ESC G n | Double-strike text |
//! | Underline | ESC - n | Underlined text (1 or 2 dots) |
//! | Upside Down | ESC { n | 180° rotation |
//! | Rotate | ESC R n | Rotated printing |
//! | Reverse | GS B n | White on black |
//! | Smoothing | GS b n | Smoothed enlarged glyphs |
//! | Size | GS ! n | 1-8× width and height |
//!
//! Every toggle takes a `0`/`1` parameter byte, so turning a style off is
//! the same command with `0`.

use std::str::FromStr;

use super::commands::{ESC, GS};
use crate::error::EstampaError;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl FromStr for Alignment {
    type Err = EstampaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(EstampaError::invalid("alignment", s)),
        }
    }
}

/// # Select Justification (ESC a n)
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC a n  |
/// | Hex     | 1B 61 n  |
///
/// ## Parameters
///
/// - `n`: 0 = left, 1 = center, 2 = right
///
/// ## Example
///
/// ```
/// use estampa::protocol::text::{self, Alignment};
///
/// assert_eq!(text::align(Alignment::Center), vec![0x1B, 0x61, 1]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// INTERNATIONAL CHARACTER SET
// ============================================================================

/// International character set, selected by two-letter language code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English = 0,
    French = 1,
    German = 2,
    UnitedKingdom = 3,
    Danish = 4,
    Swedish = 5,
    Italian = 6,
    Spanish = 7,
    Japanese = 8,
    Norwegian = 9,
}

impl Language {
    /// Language code table, in protocol order.
    pub const CODES: [(&'static str, Language); 10] = [
        ("en", Language::English),
        ("fr", Language::French),
        ("de", Language::German),
        ("uk", Language::UnitedKingdom),
        ("da", Language::Danish),
        ("sv", Language::Swedish),
        ("it", Language::Italian),
        ("es", Language::Spanish),
        ("ja", Language::Japanese),
        ("no", Language::Norwegian),
    ];
}

impl FromStr for Language {
    type Err = EstampaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::CODES
            .iter()
            .find(|(code, _)| *code == s)
            .map(|(_, lang)| *lang)
            .ok_or_else(|| EstampaError::invalid("language", s))
    }
}

/// # Select International Character Set (ESC R n)
///
/// ## Example
///
/// ```
/// use estampa::protocol::text::{self, Language};
///
/// assert_eq!(text::language(Language::Japanese), vec![0x1B, b'R', 8]);
/// ```
pub fn language(lang: Language) -> Vec<u8> {
    vec![ESC, b'R', lang as u8]
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Available fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Font A: 12×24 dots
    #[default]
    A = 0,
    /// Font B: 9×17 dots
    B = 1,
}

impl FromStr for Font {
    type Err = EstampaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            _ => Err(EstampaError::invalid("font", s)),
        }
    }
}

/// # Select Character Font (ESC M n)
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, b'M', f as u8]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// Largest width or height multiplier accepted by `GS !`.
pub const MAX_SCALE: u8 = 8;

/// Pack width and height multipliers into the `GS !` parameter byte.
///
/// Width goes in the high nibble, height in the low nibble, both stored
/// as `multiplier - 1`.
///
/// ```
/// use estampa::protocol::text::size_byte;
///
/// assert_eq!(size_byte(1, 1), 0x00);
/// assert_eq!(size_byte(2, 3), 0x12);
/// assert_eq!(size_byte(8, 8), 0x77);
/// ```
///
/// # Panics
///
/// Panics if either multiplier is outside 1-8.
#[inline]
pub const fn size_byte(width: u8, height: u8) -> u8 {
    assert!(
        width >= 1 && width <= MAX_SCALE && height >= 1 && height <= MAX_SCALE,
        "size multipliers must be 1-8"
    );
    ((width - 1) << 4) | (height - 1)
}

/// # Select Character Size (GS ! n)
///
/// ## Parameters
///
/// - `width`: Horizontal multiplier (1-8)
/// - `height`: Vertical multiplier (1-8)
///
/// # Panics
///
/// Panics if either multiplier is outside 1-8; the encoder validates
/// before calling.
pub fn size(width: u8, height: u8) -> Vec<u8> {
    vec![GS, b'!', size_byte(width, height)]
}

// ============================================================================
// STYLE TOGGLES
// ============================================================================

/// # Underline Mode (ESC - n)
///
/// - `n = 0`: off
/// - `n = 1`: 1-dot underline
/// - `n = 2`: 2-dot underline
pub fn underline(n: u8) -> Vec<u8> {
    vec![ESC, b'-', n]
}

/// # Emphasized / Double-Strike Mode (ESC G n)
pub fn emphasize(on: bool) -> Vec<u8> {
    vec![ESC, b'G', on as u8]
}

/// # Upside-Down Mode (ESC { n)
pub fn upside_down(on: bool) -> Vec<u8> {
    vec![ESC, b'{', on as u8]
}

/// # Rotated Printing (ESC R n)
///
/// Shares its command byte with [`language`]; printers in this family treat
/// the parameter according to the active mode.
pub fn rotate(on: bool) -> Vec<u8> {
    vec![ESC, b'R', on as u8]
}

/// # White/Black Reverse Printing (GS B n)
pub fn reverse(on: bool) -> Vec<u8> {
    vec![GS, b'B', on as u8]
}

/// # Smoothing (GS b n)
pub fn smoothing(on: bool) -> Vec<u8> {
    vec![GS, b'b', on as u8]
}

// ============================================================================
// TESTS
// ============================================================================
