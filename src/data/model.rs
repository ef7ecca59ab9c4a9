use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

/// Header names of the seven projected columns in the source file.
pub mod columns {
    pub const DEPARTMENT: &str = "DEPARTAMENTO";
    pub const REGISTRATION_DATE: &str = "FECHA_REGISTRO";
    pub const VIABLE_AMOUNT: &str = "MONTO_VIABLE";
    pub const UPDATED_COST: &str = "COSTO_ACTUALIZADO";
    pub const SECTOR: &str = "SECTOR";
    pub const ENTITY: &str = "ENTIDAD";
    pub const PHYSICAL_PROGRESS: &str = "AVANCE_FISICO";

    /// All required columns, in projection order.
    pub const REQUIRED: [&str; 7] = [
        DEPARTMENT,
        REGISTRATION_DATE,
        VIABLE_AMOUNT,
        UPDATED_COST,
        SECTOR,
        ENTITY,
        PHYSICAL_PROGRESS,
    ];
}

// ---------------------------------------------------------------------------
// Metric – the two financial columns plotted over time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Metric {
    ViableAmount,
    UpdatedCost,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::ViableAmount, Metric::UpdatedCost];

    /// Source column name, also used as the legend label.
    pub fn column(self) -> &'static str {
        match self {
            Metric::ViableAmount => columns::VIABLE_AMOUNT,
            Metric::UpdatedCost => columns::UPDATED_COST,
        }
    }

    /// Value of this metric on a record, if present.
    pub fn value(self, record: &InvestmentRecord) -> Option<f64> {
        match self {
            Metric::ViableAmount => record.viable_amount,
            Metric::UpdatedCost => record.updated_cost,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// InvestmentRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single public-investment record (one row of the source file).
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentRecord {
    /// Never empty once loaded.
    pub department: String,
    pub registration_date: NaiveDate,
    pub viable_amount: Option<f64>,
    pub updated_cost: Option<f64>,
    pub sector: String,
    pub entity: String,
    /// Percentage, conventionally 0–100.
    pub physical_progress: Option<f64>,
}

impl InvestmentRecord {
    pub fn year(&self) -> i32 {
        self.registration_date.year()
    }
}

// ---------------------------------------------------------------------------
// InvestmentTable – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable in-memory table plus the option lists the filters offer.
#[derive(Debug, Clone, Default)]
pub struct InvestmentTable {
    records: Vec<InvestmentRecord>,
    sectors: BTreeSet<String>,
    departments: BTreeSet<String>,
    year_bounds: Option<(i32, i32)>,
}

impl InvestmentTable {
    /// Build the option indices from the loaded records. Order is preserved.
    pub fn from_records(records: Vec<InvestmentRecord>) -> Self {
        let mut sectors = BTreeSet::new();
        let mut departments = BTreeSet::new();
        let mut year_bounds: Option<(i32, i32)> = None;

        for rec in &records {
            sectors.insert(rec.sector.clone());
            departments.insert(rec.department.clone());
            let year = rec.year();
            year_bounds = Some(match year_bounds {
                Some((lo, hi)) => (lo.min(year), hi.max(year)),
                None => (year, year),
            });
        }

        InvestmentTable {
            records,
            sectors,
            departments,
            year_bounds,
        }
    }

    pub fn records(&self) -> &[InvestmentRecord] {
        &self.records
    }

    /// Distinct sector names, sorted.
    pub fn sectors(&self) -> &BTreeSet<String> {
        &self.sectors
    }

    /// Distinct department names, sorted.
    pub fn departments(&self) -> &BTreeSet<String> {
        &self.departments
    }

    /// Inclusive (min, max) registration year, `None` when empty.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.year_bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
