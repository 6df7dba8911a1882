//! # Color Palette
//!
//! The fixed table of strand colors known to the CORE.
//!
//! The table is a compile-time constant shared by the validator, the
//! diagram builder and the API layer. Lookups never fail: an unrecognized
//! code resolves to `FALLBACK_COLOR` and the label `"Unknown"`.

use crate::{ColorCode, DisplayColor};
use serde::Serialize;

/// Display color for codes outside the palette.
pub const FALLBACK_COLOR: DisplayColor = DisplayColor::rgb(0x00, 0x00, 0x00);

/// Label for codes outside the palette.
pub const FALLBACK_LABEL: &str = "Unknown";

/// One palette row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub code: ColorCode,
    pub label: &'static str,
    #[serde(rename = "displayColor")]
    pub color: DisplayColor,
}

const fn entry(code: ColorCode, label: &'static str, color: DisplayColor) -> PaletteEntry {
    PaletteEntry { code, label, color }
}

/// The eight palette entries. The first one is the default knot color.
pub const ENTRIES: [PaletteEntry; 8] = [
    entry(ColorCode::Red, "Red", DisplayColor::rgb(0xFF, 0x00, 0x00)),
    entry(ColorCode::Blue, "Blue", DisplayColor::rgb(0x00, 0x00, 0xFF)),
    entry(ColorCode::Green, "Green", DisplayColor::rgb(0x00, 0xFF, 0x00)),
    entry(ColorCode::Yellow, "Yellow", DisplayColor::rgb(0xFF, 0xFF, 0x00)),
    entry(ColorCode::White, "White", DisplayColor::rgb(0xFF, 0xFF, 0xFF)),
    entry(ColorCode::Black, "Black", DisplayColor::rgb(0x00, 0x00, 0x00)),
    entry(ColorCode::Purple, "Purple", DisplayColor::rgb(0x80, 0x00, 0x80)),
    entry(ColorCode::Orange, "Orange", DisplayColor::rgb(0xFF, 0xA5, 0x00)),
];

/// Lookup facade over `ENTRIES`.
pub struct Palette;

impl Palette {
    /// All entries in palette order.
    #[must_use]
    pub const fn entries() -> &'static [PaletteEntry] {
        &ENTRIES
    }

    /// Find the entry for a code.
    #[must_use]
    pub fn entry(code: ColorCode) -> Option<&'static PaletteEntry> {
        ENTRIES.iter().find(|e| e.code == code)
    }

    /// Display color for a code, `FALLBACK_COLOR` if unknown.
    #[must_use]
    pub fn resolve(code: ColorCode) -> DisplayColor {
        Self::entry(code).map_or(FALLBACK_COLOR, |e| e.color)
    }

    /// Human label for a code, `FALLBACK_LABEL` if unknown.
    #[must_use]
    pub fn label_of(code: ColorCode) -> &'static str {
        Self::entry(code).map_or(FALLBACK_LABEL, |e| e.label)
    }

    /// Color used to fill newly added knots.
    #[must_use]
    pub const fn default_code() -> ColorCode {
        ENTRIES[0].code
    }
}
