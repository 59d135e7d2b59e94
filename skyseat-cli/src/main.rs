use anyhow::{Context, Result};
use clap::Parser;
use skyseat_cli::{
    format_micros, format_millis, parse_class, parse_column, parse_id, parse_row, timed,
    InputError, MenuChoice, PageCommand,
};
use skyseat_core::{PassengerStore, StoreKind};
use skyseat_engine::render::{render_manifest, render_seat_map};
use skyseat_engine::{loader, ReservationEngine, ReservationOutcome};
use skyseat_shared::{PassengerRecord, SeatPosition};
use skyseat_store::Config;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "skyseat")]
#[command(about = "Seat reservation and waitlist engine over grid and linked list backends")]
struct Cli {
    /// Passenger CSV loaded into both backends at startup
    #[arg(short, long, default_value = "passengers.csv")]
    data: PathBuf,

    /// Load, print the load reports and first pages, then exit
    #[arg(short, long)]
    batch: bool,

    /// Backend the menu starts on (grid or linked)
    #[arg(long, default_value = "grid")]
    backend: StoreKind,
}

struct Console<R> {
    input: R,
}

impl<R: BufRead> Console<R> {
    /// One trimmed line of input; `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{}", label);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Re-asks until `parse` accepts the input.
    fn prompt_valid<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(label)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => println!(">> [Error] {}", err),
            }
        }
    }
}

struct App<R> {
    console: Console<R>,
    config: Config,
    engines: Vec<ReservationEngine>,
    active: usize,
}

impl<R: BufRead> App<R> {
    fn engine(&mut self) -> &mut ReservationEngine {
        &mut self.engines[self.active]
    }

    fn run(&mut self) -> Result<()> {
        loop {
            let kind = self.engines[self.active].kind();
            println!("\n--- {} backend operations ---", kind);
            println!("1. Reserve seat");
            println!("2. Cancel reservation");
            println!("3. Search passenger");
            println!("4. Display seat map");
            println!("5. Display manifest");
            println!("6. Sort by name (bubble sort)");
            println!("7. Sort by ID (merge sort)");
            println!("8. Switch backend");
            println!("9. Export event journal");
            println!("0. Exit");

            let Some(line) = self.console.prompt("Select operation: ")? else {
                return Ok(());
            };
            match MenuChoice::parse(&line) {
                Some(MenuChoice::Reserve) => self.reserve()?,
                Some(MenuChoice::Cancel) => self.cancel()?,
                Some(MenuChoice::Search) => self.search()?,
                Some(MenuChoice::SeatMap) => self.seat_map()?,
                Some(MenuChoice::Manifest) => self.manifest()?,
                Some(MenuChoice::SortByName) => {
                    let (report, elapsed) = timed(|| self.engine().sort_by_name());
                    println!(
                        ">> Bubble sort: {} comparisons, {} swaps, {} passes",
                        report.comparisons, report.swaps, report.passes
                    );
                    println!(">> [Performance] Bubble Sort Time: {}", format_millis(elapsed));
                    self.manifest()?;
                }
                Some(MenuChoice::SortById) => {
                    let (report, elapsed) = timed(|| self.engine().sort_by_id());
                    println!(
                        ">> Merge sort: {} comparisons, {} levels",
                        report.comparisons, report.passes
                    );
                    println!(">> [Performance] Merge Sort Time: {}", format_millis(elapsed));
                    self.manifest()?;
                }
                Some(MenuChoice::SwitchBackend) => {
                    self.active = (self.active + 1) % self.engines.len();
                    tracing::info!("Switched to the {} backend", self.engines[self.active].kind());
                }
                Some(MenuChoice::ExportJournal) => self.export_journal()?,
                Some(MenuChoice::Exit) => return Ok(()),
                None => println!("Invalid option!"),
            }
        }
    }

    fn reserve(&mut self) -> Result<()> {
        let last_row = self.config.cabin.last_row;
        let Some(id) = self.console.prompt("Enter ID (blank to generate): ")? else {
            return Ok(());
        };
        let id = if id.is_empty() { self.engine().next_passenger_id() } else { id };
        let Some(name) = self.console.prompt("Enter Name: ")? else {
            return Ok(());
        };
        let Some(row) = self
            .console
            .prompt_valid(&format!("Enter Row (1-{}): ", last_row), |s| parse_row(s, last_row))?
        else {
            return Ok(());
        };
        let Some(column) = self.console.prompt_valid("Enter Col (A-F): ", parse_column)? else {
            return Ok(());
        };
        let Some(travel_class) = self
            .console
            .prompt_valid("Enter Class (First/Business/Economy): ", parse_class)?
        else {
            return Ok(());
        };

        let seat = SeatPosition::new(row, column).context("row was validated as non-zero")?;
        let record = PassengerRecord::new(id.clone(), name, seat, travel_class);

        let (result, elapsed) = timed(|| self.engine().reserve(record));
        match result {
            Ok(ReservationOutcome::Seated) => println!(">> {} seated at {}", id, seat),
            Ok(ReservationOutcome::Waitlisted { position }) => println!(
                ">> Seat {} is taken. {} added to the waitlist at position {}",
                seat, id, position
            ),
            Err(reason) => println!(">> Reservation rejected: {}", reason),
        }
        println!(">> [Performance] Insert Time: {}", format_micros(elapsed));
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        let Some(id) = self.console.prompt_valid("Enter Passenger ID to remove: ", parse_id)? else {
            return Ok(());
        };

        let (cancellation, elapsed) = timed(|| self.engine().cancel_detailed(&id));
        match cancellation {
            Some(cancellation) => {
                let released = &cancellation.released;
                println!(">> Removed {} from {}", released.id, released.seat);
                if let Some(promoted) = &cancellation.promoted {
                    println!(
                        ">> Waitlisted passenger {} promoted into {}",
                        promoted, released.seat
                    );
                }
            }
            None => println!(">> Passenger NOT found."),
        }
        println!(">> [Performance] Delete Time: {}", format_micros(elapsed));
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let Some(id) = self.console.prompt_valid("Enter Passenger ID to search: ", parse_id)? else {
            return Ok(());
        };

        let engine = &self.engines[self.active];
        let (found, elapsed) = timed(|| engine.find(&id).cloned());
        match found {
            Some(record) => println!(
                ">> Found: {} | Seat {} | {}",
                record.name,
                record.seat,
                record.travel_class.as_str()
            ),
            None => match engine.waitlist().position_of(&id) {
                Some(position) => println!(">> {} is waitlisted at position {}", id, position),
                None => println!(">> Not found."),
            },
        }
        println!(">> [Performance] Search Time: {}", format_micros(elapsed));
        Ok(())
    }

    fn seat_map(&mut self) -> Result<()> {
        let display = self.config.display.clone();
        let mut page = 1;
        loop {
            let engine = &self.engines[self.active];
            let (view, elapsed) = timed(|| render_seat_map(engine.store(), page, &display));
            println!("\nFLIGHT SEATING MAP ({} backend)", engine.kind());
            print!("{}", view.text);
            println!(">> [Performance] Map Rendering Time: {}", format_micros(elapsed));
            println!(
                "[N] Next Page   [P] Prev Page   [0] Exit Map   [1-{}] Jump to Page",
                view.total_pages
            );

            let Some(line) = self.console.prompt(">> Enter choice: ")? else {
                return Ok(());
            };
            match PageCommand::parse(&line).apply(view.page, view.total_pages) {
                Some(next) => page = next,
                None => return Ok(()),
            }
        }
    }

    fn manifest(&mut self) -> Result<()> {
        let display = self.config.display.clone();
        let mut page = 1;
        loop {
            let engine = &self.engines[self.active];
            let view = render_manifest(engine.store(), engine.waitlist(), page, &display);
            println!("\nPASSENGER MANIFEST ({} backend)", engine.kind());
            print!("{}", view.text);
            if engine.store().is_empty() {
                return Ok(());
            }
            println!(
                "[N] Next Page   [P] Prev Page   [0] Exit List   [1-{}] Jump to Page",
                view.total_pages
            );

            let Some(line) = self.console.prompt(">> Enter choice: ")? else {
                return Ok(());
            };
            match PageCommand::parse(&line).apply(view.page, view.total_pages) {
                Some(next) => page = next,
                None => return Ok(()),
            }
        }
    }

    fn export_journal(&mut self) -> Result<()> {
        let Some(path) = self.console.prompt("Export journal to (blank for journal.json): ")? else {
            return Ok(());
        };
        let path = if path.is_empty() { "journal.json".to_string() } else { path };

        let json = self.engines[self.active]
            .export_journal()
            .context("Failed to serialize the event journal")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write journal to {}", path))?;
        println!(">> Journal written to {}", path);
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "skyseat_cli=info,skyseat_engine=info,skyseat_store=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting SkySeat with data file {}", cli.data.display());

    let mut engines = Vec::with_capacity(StoreKind::ALL.len());
    for kind in StoreKind::ALL {
        let mut engine = ReservationEngine::new(kind, &config);
        let (loaded, elapsed) = timed(|| loader::load_path(&mut engine, &cli.data));
        match loaded {
            Ok(report) => {
                println!(
                    ">> Loaded {} passengers into the {} backend \
                     ({} waitlisted, {} promoted) in {}",
                    report.seated + report.promoted,
                    kind,
                    report.waitlisted,
                    report.promoted,
                    format_millis(elapsed)
                );
                if cli.batch {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
            Err(err) => tracing::warn!("Starting the {} backend empty: {}", kind, err),
        }
        engines.push(engine);
    }

    let active = StoreKind::ALL
        .iter()
        .position(|kind| *kind == cli.backend)
        .unwrap_or_default();

    if cli.batch {
        for engine in &engines {
            let map = render_seat_map(engine.store(), 1, &config.display);
            let manifest = render_manifest(engine.store(), engine.waitlist(), 1, &config.display);
            println!("\n=== {} backend ===", engine.kind());
            print!("{}", map.text);
            print!("{}", manifest.text);
        }
        return Ok(());
    }

    let mut app = App {
        console: Console {
            input: io::stdin().lock(),
        },
        config,
        engines,
        active,
    };
    app.run()
}
