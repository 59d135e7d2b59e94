use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub store: StoreConfig,
    pub cabin: CabinConfig,
    pub display: DisplayConfig,
    pub ids: IdConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StoreConfig {
    /// Rows allocated by the grid backend before any growth.
    pub initial_rows: usize,
    /// Slots allocated for the grid backend's flat passenger list.
    pub initial_passenger_capacity: usize,
    /// Hard ceiling on grid rows; seats past it are rejected as capacity exhaustion.
    pub row_limit: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CabinConfig {
    /// Last bookable row; bounds the Economy zone search and interactive input.
    pub last_row: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DisplayConfig {
    pub rows_per_page: usize,
    pub manifest_per_page: usize,
    pub min_map_rows: u32,
    pub cell_width: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct IdConfig {
    pub prefix: String,
    pub start: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_rows: 50,
            initial_passenger_capacity: 200,
            row_limit: 10_000,
        }
    }
}

impl Default for CabinConfig {
    fn default() -> Self {
        Self { last_row: 30 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 10,
            manifest_per_page: 20,
            min_map_rows: 20,
            cell_width: 12,
        }
    }
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            prefix: "P".to_string(),
            start: 1001,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            cabin: CabinConfig::default(),
            display: DisplayConfig::default(),
            ids: IdConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Layered load: built-in defaults, then `<dir>/default`, `<dir>/<RUN_MODE>`,
    /// `<dir>/local` (all optional), then `SKYSEAT__SECTION__KEY` variables.
    pub fn load_from(dir: &str) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let defaults = Config::default();

        let s = config::Config::builder()
            .set_default("store.initial_rows", defaults.store.initial_rows as u64)?
            .set_default(
                "store.initial_passenger_capacity",
                defaults.store.initial_passenger_capacity as u64,
            )?
            .set_default("store.row_limit", defaults.store.row_limit as u64)?
            .set_default("cabin.last_row", defaults.cabin.last_row as u64)?
            .set_default("display.rows_per_page", defaults.display.rows_per_page as u64)?
            .set_default("display.manifest_per_page", defaults.display.manifest_per_page as u64)?
            .set_default("display.min_map_rows", defaults.display.min_map_rows as u64)?
            .set_default("display.cell_width", defaults.display.cell_width as u64)?
            .set_default("ids.prefix", defaults.ids.prefix)?
            .set_default("ids.start", defaults.ids.start)?
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{run_mode}")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/local")).required(false))
            .add_source(config::Environment::with_prefix("SKYSEAT").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let config = Config::load_from("does/not/exist").unwrap();
        assert_eq!(config.store.initial_rows, 50);
        assert_eq!(config.store.initial_passenger_capacity, 200);
        assert_eq!(config.store.row_limit, 10_000);
        assert_eq!(config.cabin.last_row, 30);
        assert_eq!(config.display.rows_per_page, 10);
        assert_eq!(config.ids.prefix, "P");
    }
}
