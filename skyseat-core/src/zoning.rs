use std::ops::RangeInclusive;

use skyseat_shared::{SeatPosition, TravelClass};

use crate::RejectReason;

pub const FIRST_CLASS_ROWS: RangeInclusive<u32> = 1..=3;
pub const BUSINESS_CLASS_ROWS: RangeInclusive<u32> = 4..=10;
pub const ECONOMY_FIRST_ROW: u32 = 11;

/// Zone a row belongs to. Row 0 does not exist.
pub fn zone_for_row(row: u32) -> Option<TravelClass> {
    match row {
        0 => None,
        r if FIRST_CLASS_ROWS.contains(&r) => Some(TravelClass::First),
        r if BUSINESS_CLASS_ROWS.contains(&r) => Some(TravelClass::Business),
        _ => Some(TravelClass::Economy),
    }
}

pub fn validate_seat_class(row: u32, travel_class: TravelClass) -> bool {
    zone_for_row(row) == Some(travel_class)
}

/// Rows of a class zone. Economy is open-ended, so it is capped at `last_row`.
pub fn zone_rows(travel_class: TravelClass, last_row: u32) -> RangeInclusive<u32> {
    match travel_class {
        TravelClass::First => FIRST_CLASS_ROWS,
        TravelClass::Business => BUSINESS_CLASS_ROWS,
        TravelClass::Economy => ECONOMY_FIRST_ROW..=last_row,
    }
}

/// Gate run before any storage mutation.
pub fn check_zone(seat: SeatPosition, travel_class: TravelClass) -> Result<(), RejectReason> {
    match zone_for_row(seat.row()) {
        Some(zone) if zone == travel_class => Ok(()),
        Some(zone) => Err(RejectReason::InvalidZone {
            row: seat.row(),
            zone,
            requested: travel_class,
        }),
        None => Err(RejectReason::InvalidPosition(seat.to_string())),
    }
}
