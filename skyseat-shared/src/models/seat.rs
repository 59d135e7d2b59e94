use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of seats per row (A through F).
pub const SEATS_PER_ROW: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid seat column: {0:?} (expected A-F)")]
    InvalidColumn(String),

    #[error("Invalid seat row: {0:?} (expected a positive integer)")]
    InvalidRow(String),

    #[error("Invalid travel class: {0:?} (expected First, Business or Economy)")]
    InvalidClass(String),
}

/// Cabin class, also used to name the row zones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TravelClass {
    First,
    Business,
    Economy,
}

impl TravelClass {
    pub const ALL: [TravelClass; 3] = [
        TravelClass::First,
        TravelClass::Business,
        TravelClass::Economy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::First => "First",
            TravelClass::Business => "Business",
            TravelClass::Economy => "Economy",
        }
    }

    /// Five-letter band label used on the seat map.
    pub fn band_label(&self) -> &'static str {
        match self {
            TravelClass::First => "First",
            TravelClass::Business => "Busin",
            TravelClass::Economy => "Econo",
        }
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelClass {
    type Err = ParseError;

    /// Accepts `first`, `business`/`busin` and anything starting with `eco`,
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "first" => Ok(TravelClass::First),
            "business" | "busin" => Ok(TravelClass::Business),
            other if other.starts_with("eco") => Ok(TravelClass::Economy),
            _ => Err(ParseError::InvalidClass(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeatColumn {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl SeatColumn {
    pub const ALL: [SeatColumn; SEATS_PER_ROW] = [
        SeatColumn::A,
        SeatColumn::B,
        SeatColumn::C,
        SeatColumn::D,
        SeatColumn::E,
        SeatColumn::F,
    ];

    /// Zero-based index into a grid row.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn letter(&self) -> char {
        (b'A' + *self as u8) as char
    }
}

impl fmt::Display for SeatColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for SeatColumn {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => match c.to_ascii_uppercase() {
                'A' => Ok(SeatColumn::A),
                'B' => Ok(SeatColumn::B),
                'C' => Ok(SeatColumn::C),
                'D' => Ok(SeatColumn::D),
                'E' => Ok(SeatColumn::E),
                'F' => Ok(SeatColumn::F),
                _ => Err(ParseError::InvalidColumn(s.to_string())),
            },
            _ => Err(ParseError::InvalidColumn(s.to_string())),
        }
    }
}

/// A validated seat: 1-based row plus column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "RawSeatPosition")]
pub struct SeatPosition {
    row: u32,
    column: SeatColumn,
}

/// Wire form of a seat, validated through [`SeatPosition::new`].
#[derive(Deserialize)]
struct RawSeatPosition {
    row: u32,
    column: SeatColumn,
}

impl TryFrom<RawSeatPosition> for SeatPosition {
    type Error = ParseError;

    fn try_from(raw: RawSeatPosition) -> Result<Self, Self::Error> {
        SeatPosition::new(raw.row, raw.column)
    }
}

impl SeatPosition {
    pub fn new(row: u32, column: SeatColumn) -> Result<Self, ParseError> {
        if row == 0 {
            return Err(ParseError::InvalidRow(row.to_string()));
        }
        Ok(Self { row, column })
    }

    /// Parses raw row and column fields as they arrive from input.
    pub fn parse(row: &str, column: &str) -> Result<Self, ParseError> {
        let row: u32 = row
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidRow(row.to_string()))?;
        Self::new(row, column.parse()?)
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn column(&self) -> SeatColumn {
        self.column
    }

    /// Zero-based (row, column) grid coordinates.
    pub fn grid_index(&self) -> (usize, usize) {
        ((self.row - 1) as usize, self.column.index())
    }
}

impl fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}
