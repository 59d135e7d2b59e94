//! Input handling for the interactive terminal: menu choices, validated seat
//! fields, page navigation and timing output.

use skyseat_shared::{SeatColumn, TravelClass};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Please enter a valid row number (1-{last_row})")]
    Row { last_row: u32 },

    #[error("Column must be A, B, C, D, E, or F")]
    Column,

    #[error("Class must be First, Business, or Economy")]
    Class,

    #[error("Passenger ID is required")]
    EmptyId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Reserve,
    Cancel,
    Search,
    SeatMap,
    Manifest,
    SortByName,
    SortById,
    SwitchBackend,
    ExportJournal,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Reserve),
            "2" => Some(MenuChoice::Cancel),
            "3" => Some(MenuChoice::Search),
            "4" => Some(MenuChoice::SeatMap),
            "5" => Some(MenuChoice::Manifest),
            "6" => Some(MenuChoice::SortByName),
            "7" => Some(MenuChoice::SortById),
            "8" => Some(MenuChoice::SwitchBackend),
            "9" => Some(MenuChoice::ExportJournal),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub fn parse_id(input: &str) -> Result<String, InputError> {
    let id = input.trim();
    if id.is_empty() {
        return Err(InputError::EmptyId);
    }
    Ok(id.to_string())
}

/// Rows accepted interactively are bounded by the cabin length.
pub fn parse_row(input: &str, last_row: u32) -> Result<u32, InputError> {
    match input.trim().parse::<u32>() {
        Ok(row) if (1..=last_row).contains(&row) => Ok(row),
        _ => Err(InputError::Row { last_row }),
    }
}

/// Only the first character counts, as in `b` or `Bravo`.
pub fn parse_column(input: &str) -> Result<SeatColumn, InputError> {
    input
        .trim()
        .chars()
        .next()
        .and_then(|c| c.to_string().parse().ok())
        .ok_or(InputError::Column)
}

pub fn parse_class(input: &str) -> Result<TravelClass, InputError> {
    input.parse().map_err(|_| InputError::Class)
}

/// Navigation inside a paged view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommand {
    Next,
    Prev,
    Exit,
    Jump(usize),
    Unknown,
}

impl PageCommand {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "0" => PageCommand::Exit,
            "n" | "N" => PageCommand::Next,
            "p" | "P" => PageCommand::Prev,
            other => other.parse().map(PageCommand::Jump).unwrap_or(PageCommand::Unknown),
        }
    }

    /// Page to show next, or `None` to leave the view. Out-of-range jumps and
    /// unknown input keep the current page.
    pub fn apply(self, current: usize, total_pages: usize) -> Option<usize> {
        match self {
            PageCommand::Exit => None,
            PageCommand::Next if current < total_pages => Some(current + 1),
            PageCommand::Prev if current > 1 => Some(current - 1),
            PageCommand::Jump(page) if (1..=total_pages).contains(&page) => Some(page),
            _ => Some(current),
        }
    }
}

/// Runs `f` and returns its result with the wall time it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

pub fn format_micros(elapsed: Duration) -> String {
    format!("{} microseconds", elapsed.as_micros())
}

pub fn format_millis(elapsed: Duration) -> String {
    format!("{} ms", elapsed.as_millis())
}
