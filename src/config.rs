use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::{DepartmentFilter, Selection, YearRange};

/// Department values that stand for "every department".
const ALL_DEPARTMENTS: [&str; 2] = ["todos", "all"];

/// Command-line configuration. Every option can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "inversion-dashboard",
    version,
    about = "Dashboard de Inversión Pública del Perú"
)]
pub struct Config {
    /// Investment records file (.csv, .parquet or .json).
    #[arg(long, env = "INVERSION_DATA", default_value = "data/inversiones.csv")]
    pub data: PathBuf,

    /// Initially selected sectors.
    #[arg(
        long = "sector",
        env = "INVERSION_SECTORS",
        value_delimiter = ',',
        default_value = "GOBIERNOS LOCALES"
    )]
    pub sectors: Vec<String>,

    /// Initially selected departments; `todos` selects all of them.
    #[arg(
        long = "department",
        env = "INVERSION_DEPARTMENTS",
        value_delimiter = ',',
        default_value = "TACNA"
    )]
    pub departments: Vec<String>,

    /// First registration year shown.
    #[arg(long, env = "INVERSION_FROM_YEAR", default_value_t = 2023)]
    pub from_year: i32,

    /// Last registration year shown.
    #[arg(long, env = "INVERSION_TO_YEAR", default_value_t = 2024)]
    pub to_year: i32,

    /// Write the chart data for the initial selection as JSON and exit.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Config {
    /// The selection the dashboard opens with.
    pub fn initial_selection(&self) -> Selection {
        let all = self
            .departments
            .iter()
            .any(|d| ALL_DEPARTMENTS.contains(&d.trim().to_lowercase().as_str()));
        Selection {
            sectors: self.sectors.iter().map(|s| s.trim().to_string()).collect(),
            departments: DepartmentFilter::from_selection(
                all,
                self.departments.iter().map(|d| d.trim().to_string()),
            ),
            years: YearRange::new(self.from_year, self.to_year),
        }
    }
}
