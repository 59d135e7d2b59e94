//! Bulk load of `PassengerID,Name,SeatRow,SeatColumn,Class` CSV data.
//!
//! The first line is a header. Lines missing an id or row, or with a row or
//! class that does not parse, are skipped and counted. Everything else is
//! submitted through [`ReservationEngine::reserve`]; once the stream ends the
//! waitlist is offered any free seat in each entry's zone.

use serde::Serialize;
use skyseat_core::RejectReason;
use skyseat_shared::{PassengerRecord, SeatColumn, SeatPosition, TravelClass};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

use crate::engine::{ReservationEngine, ReservationOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub seated: usize,
    pub waitlisted: usize,
    pub rejected: usize,
    pub skipped: usize,
    pub promoted: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read passenger data: {0}")]
    Io(#[from] io::Error),
}

enum ParsedLine {
    Record(PassengerRecord),
    Skip(&'static str),
    Reject(RejectReason),
}

pub fn load_path(
    engine: &mut ReservationEngine,
    path: impl AsRef<Path>,
) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    info!("Loading passengers from {} into the {} backend", path.display(), engine.kind());
    let file = File::open(path)?;
    load_reader(engine, BufReader::new(file))
}

pub fn load_str(engine: &mut ReservationEngine, data: &str) -> Result<LoadReport, LoadError> {
    load_reader(engine, data.as_bytes())
}

pub fn load_reader<R: BufRead>(
    engine: &mut ReservationEngine,
    reader: R,
) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();

    for (index, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;

        let record = match parse_line(&line) {
            ParsedLine::Record(record) => record,
            ParsedLine::Skip(why) => {
                warn!("Skipping line {}: {}", line_no, why);
                report.skipped += 1;
                continue;
            }
            ParsedLine::Reject(reason) => {
                warn!("Rejected line {}: {}", line_no, reason);
                report.rejected += 1;
                continue;
            }
        };

        match engine.reserve(record) {
            Ok(ReservationOutcome::Seated) => report.seated += 1,
            Ok(ReservationOutcome::Waitlisted { .. }) => report.waitlisted += 1,
            Err(_) => report.rejected += 1,
        }
    }

    report.promoted = engine.promote_by_zone();
    info!(
        "Load finished on {}: {} seated, {} waitlisted, {} rejected, {} skipped, {} promoted",
        engine.kind(),
        report.seated,
        report.waitlisted,
        report.rejected,
        report.skipped,
        report.promoted
    );
    Ok(report)
}

fn field<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields
        .get(index)
        .map(|raw| raw.trim_end_matches('\r').trim())
        .unwrap_or("")
}

fn parse_line(line: &str) -> ParsedLine {
    let fields: Vec<&str> = line.split(',').collect();
    let id = field(&fields, 0);
    let name = field(&fields, 1);
    let row = field(&fields, 2);
    let column = field(&fields, 3);
    let class = field(&fields, 4);

    if id.is_empty() {
        return ParsedLine::Skip("missing passenger ID");
    }
    if row.is_empty() {
        return ParsedLine::Skip("missing seat row");
    }
    let Ok(row) = row.parse::<u32>() else {
        return ParsedLine::Skip("seat row is not a number");
    };
    let Ok(travel_class) = class.parse::<TravelClass>() else {
        return ParsedLine::Skip("unknown travel class");
    };

    let seat = match column
        .parse::<SeatColumn>()
        .and_then(|column| SeatPosition::new(row, column))
    {
        Ok(seat) => seat,
        Err(err) => return ParsedLine::Reject(RejectReason::from(err)),
    };

    ParsedLine::Record(PassengerRecord::new(id, name, seat, travel_class))
}
