//! # Core Type Definitions
//!
//! This module contains the value types shared by every part of the CORE:
//! - Strand colors (`ColorCode`) and their rendered form (`DisplayColor`)
//! - Knot crossings (`KnotMove`)
//! - Strand count selection (`StrandCount`)
//! - Error types (`ValidationError`, `KumihimoError`)
//!
//! ## Wire Compatibility
//!
//! Color codes travel as one-letter strings (`"R"`, `"G"`, ...) and knot
//! moves as the solver's two-character symbols (`"右右"`, ...). Codes the
//! CORE does not know decode to an explicit `Unrecognized` variant instead
//! of failing, so a forward-incompatible solver reply still renders.

use crate::primitives::STRAND_COUNT_OPTIONS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// COLOR CODE
// =============================================================================

/// One of the eight strand colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorCode {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "B")]
    Blue,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "Y")]
    Yellow,
    #[serde(rename = "W")]
    White,
    #[serde(rename = "K")]
    Black,
    #[serde(rename = "P")]
    Purple,
    #[serde(rename = "O")]
    Orange,
    /// A code outside the palette. Never counts as an assigned color.
    #[serde(rename = "?", other)]
    Unrecognized,
}

impl ColorCode {
    /// The eight palette colors, in palette order.
    pub const ALL: [Self; 8] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::White,
        Self::Black,
        Self::Purple,
        Self::Orange,
    ];

    /// The one-letter wire code.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Yellow => 'Y',
            Self::White => 'W',
            Self::Black => 'K',
            Self::Purple => 'P',
            Self::Orange => 'O',
            Self::Unrecognized => '?',
        }
    }

    /// Parse a one-letter code. Lowercase letters are accepted.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.symbol() == symbol.to_ascii_uppercase())
    }

    /// True for the eight palette colors.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Parse a compact color string such as `"RGBY"` into codes.
///
/// Whitespace and commas are ignored; `_` or `.` marks an unassigned slot.
pub fn parse_color_row(s: &str) -> Result<Vec<Option<ColorCode>>, KumihimoError> {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c {
            '_' | '.' => Ok(None),
            _ => ColorCode::from_symbol(c).map(Some).ok_or_else(|| {
                KumihimoError::InvalidEdit(format!("Unknown color code: {:?}", c))
            }),
        })
        .collect()
}

// =============================================================================
// DISPLAY COLOR
// =============================================================================

/// A rendered RGB color, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DisplayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DisplayColor {
    /// Create a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for DisplayColor {
    type Err = KumihimoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KumihimoError::SerializationError(format!("Invalid display color: {}", s));
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl From<DisplayColor> for String {
    fn from(color: DisplayColor) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for DisplayColor {
    type Error = KumihimoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// =============================================================================
// KNOT MOVE
// =============================================================================

/// One elementary crossing of two adjacent strands.
///
/// The solver names moves by the direction of each of the two half-knots
/// (`右` right, `左` left). The short ASCII names are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnotMove {
    #[serde(rename = "右右", alias = "RR")]
    RightRight,
    #[serde(rename = "左左", alias = "LL")]
    LeftLeft,
    #[serde(rename = "左右", alias = "LR")]
    LeftRight,
    #[serde(rename = "右左", alias = "RL")]
    RightLeft,
    /// A move symbol outside the known four.
    #[serde(rename = "?", other)]
    Unrecognized,
}

impl KnotMove {
    /// The four known crossings.
    pub const ALL: [Self; 4] = [
        Self::RightRight,
        Self::LeftLeft,
        Self::LeftRight,
        Self::RightLeft,
    ];

    /// Diagram glyph for the move, `None` for unrecognized moves.
    #[must_use]
    pub const fn glyph(self) -> Option<char> {
        match self {
            Self::RightRight => Some('\\'),
            Self::LeftLeft => Some('/'),
            Self::LeftRight => Some('<'),
            Self::RightLeft => Some('>'),
            Self::Unrecognized => None,
        }
    }
}

// =============================================================================
// STRAND COUNT
// =============================================================================

/// A strand count picked from `STRAND_COUNT_OPTIONS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "usize", try_from = "usize")]
pub struct StrandCount(usize);

impl StrandCount {
    /// Accept only one of the offered strand counts.
    pub fn new(count: usize) -> Result<Self, KumihimoError> {
        if STRAND_COUNT_OPTIONS.contains(&count) {
            Ok(Self(count))
        } else {
            Err(KumihimoError::InvalidEdit(format!(
                "Unsupported strand count {} (choose one of {:?})",
                count, STRAND_COUNT_OPTIONS
            )))
        }
    }

    /// The raw count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for StrandCount {
    fn default() -> Self {
        Self(crate::primitives::DEFAULT_STRAND_COUNT)
    }
}

impl From<StrandCount> for usize {
    fn from(count: StrandCount) -> Self {
        count.0
    }
}

impl TryFrom<usize> for StrandCount {
    type Error = KumihimoError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl fmt::Display for StrandCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Why a design was refused before submission.
///
/// Variants are listed in the order the validator checks them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// At least one start strand has no color.
    #[error("incomplete start colors")]
    IncompleteStartColors,

    /// The start state does not hold one color per strand.
    #[error("start colors cover {actual} strands, expected {expected}")]
    StartLengthMismatch { expected: usize, actual: usize },

    /// Odd strand counts cannot be braided in this structure.
    #[error("strand count must be even (got {0})")]
    OddStrandCount(usize),

    /// The pattern has no rows.
    #[error("no target pattern set")]
    EmptyPattern,

    /// A row has the wrong number of knots. `row` is 1-based.
    #[error("row {row} should have {expected} knots (has {actual})")]
    RowKnotCount {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A row has a knot without a color. `row` is 1-based.
    #[error("row {row} has knots without a color")]
    RowMissingColor { row: usize },

    /// The design exceeds the boundary limits.
    #[error("design too large: {0}")]
    TooLarge(String),
}

/// Errors that can occur in the Kumihimo system.
///
/// - Validation rejections are recovered locally and shown to the user
/// - Solver failures are reported once, never retried
/// - Diagram construction has no error path; see `DiagramDiagnostic`
#[derive(Debug, Error)]
pub enum KumihimoError {
    /// The design failed a structural rule.
    #[error("Invalid design: {0}")]
    Validation(#[from] ValidationError),

    /// The solver could not be reached or refused the request.
    #[error("Solver unavailable: {0}")]
    SolverUnavailable(String),

    /// The solver answered 200 with a payload that cannot be decoded.
    #[error("Malformed solver response: {0}")]
    MalformedResponse(String),

    /// An editing operation referenced something that does not exist.
    #[error("Invalid edit: {0}")]
    InvalidEdit(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================
