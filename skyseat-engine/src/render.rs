//! Paged text views of a store: the seat map and the passenger manifest.

use skyseat_core::zoning::zone_for_row;
use skyseat_core::PassengerStore;
use skyseat_shared::{SeatColumn, SeatPosition};
use skyseat_store::app_config::DisplayConfig;
use skyseat_store::Waitlist;

const AISLE: &str = "    ";
const EMPTY_CELL: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatMapPage {
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPage {
    pub page: usize,
    pub total_pages: usize,
    pub total_passengers: usize,
    pub text: String,
}

/// Number of pages needed for `items`; never less than one.
pub fn page_count(items: usize, per_page: usize) -> usize {
    items.div_ceil(per_page.max(1)).max(1)
}

/// Clamp a 1-based page number into `1..=total_pages`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

fn truncate(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}

/// Renders one page of the cabin. Each cell is a separate occupancy lookup,
/// so the cost follows the backend's lookup cost.
pub fn render_seat_map<S>(store: &S, page: usize, display: &DisplayConfig) -> SeatMapPage
where
    S: PassengerStore + ?Sized,
{
    let total_rows = store.last_occupied_row().max(display.min_map_rows);
    let rows_per_page = display.rows_per_page.max(1);
    let total_pages = page_count(total_rows as usize, rows_per_page);
    let page = clamp_page(page, total_pages);

    let width = display.cell_width.max(3);
    let rule = "-".repeat(9 + width * 6 + AISLE.len());
    let mut text = String::new();

    text.push_str("         ");
    for column in SeatColumn::ALL {
        text.push_str(&format!("{:<width$}", format!("[{}]", column)));
        if column == SeatColumn::C {
            text.push_str(AISLE);
        }
    }
    text.push('\n');
    text.push_str(&rule);
    text.push('\n');

    let first_row = (page - 1) * rows_per_page + 1;
    let last_row = (page * rows_per_page).min(total_rows as usize);
    for row in first_row..=last_row {
        let row = row as u32;
        let band = zone_for_row(row).map(|class| class.band_label()).unwrap_or("");
        text.push_str(&format!("{} {:02} ", band, row));

        for column in SeatColumn::ALL {
            let occupant = SeatPosition::new(row, column)
                .ok()
                .and_then(|seat| store.occupant_name(seat))
                .map(|name| truncate(name, width - 2))
                .unwrap_or_else(|| EMPTY_CELL.to_string());
            text.push_str(&format!("{:<width$}", format!("[{}]", occupant)));
            if column == SeatColumn::C {
                text.push_str(AISLE);
            }
        }
        text.push('\n');
    }

    text.push_str(&rule);
    text.push('\n');
    text.push_str(&format!("PAGE {} OF {} | Total Rows: {}\n", page, total_pages, total_rows));

    SeatMapPage {
        page,
        total_pages,
        total_rows,
        text,
    }
}

/// Renders one page of the manifest in current store order. The waitlist is
/// appended to the last page.
pub fn render_manifest<S>(
    store: &S,
    waitlist: &Waitlist,
    page: usize,
    display: &DisplayConfig,
) -> ManifestPage
where
    S: PassengerStore + ?Sized,
{
    let per_page = display.manifest_per_page.max(1);
    let total_passengers = store.len();
    let total_pages = page_count(total_passengers, per_page);
    let page = clamp_page(page, total_pages);
    let rule = "-".repeat(62);
    let mut text = String::new();

    if store.is_empty() {
        text.push_str("[System Empty]\n");
    } else {
        text.push_str(&format!("{:<10}{:<25}{:<10}{:<15}\n", "ID", "Name", "Seat", "Class"));
        text.push_str(&rule);
        text.push('\n');

        for record in store.records().skip((page - 1) * per_page).take(per_page) {
            text.push_str(&format!(
                "{:<10}{:<25}{:<10}{:<15}\n",
                record.id,
                record.name,
                record.seat.to_string(),
                record.travel_class.as_str()
            ));
        }

        text.push_str(&rule);
        text.push('\n');
        text.push_str(&format!(
            "PAGE {} OF {} | Total Passengers: {}\n",
            page, total_pages, total_passengers
        ));
    }

    if page == total_pages {
        text.push_str(&format!("\nWAITLIST ({})\n", waitlist.len()));
        if waitlist.is_empty() {
            text.push_str("  (none)\n");
        }
        for (position, entry) in waitlist.iter().enumerate() {
            text.push_str(&format!(
                "  {:>3}. {:<10}{:<25}{:<10}{:<15}\n",
                position + 1,
                entry.id,
                entry.name,
                entry.requested_seat.to_string(),
                entry.travel_class.as_str()
            ));
        }
    }

    ManifestPage {
        page,
        total_pages,
        total_passengers,
        text,
    }
}
