use std::collections::BTreeSet;

use super::model::{InvestmentRecord, InvestmentTable};

// ---------------------------------------------------------------------------
// Selection: the three user-supplied criteria
// ---------------------------------------------------------------------------

/// Department criterion. `All` disables department filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentFilter {
    All,
    Only(BTreeSet<String>),
}

impl DepartmentFilter {
    /// Combine the "all" toggle with an explicit list. The toggle wins.
    pub fn from_selection<I, S>(all: bool, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if all {
            DepartmentFilter::All
        } else {
            DepartmentFilter::Only(names.into_iter().map(Into::into).collect())
        }
    }

    pub fn matches(&self, department: &str) -> bool {
        match self {
            DepartmentFilter::All => true,
            DepartmentFilter::Only(set) => set.contains(department),
        }
    }
}

/// Inclusive registration-year interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        YearRange { min, max }
    }

    /// `min > max` contains nothing.
    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

/// Full filter state driving the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub sectors: BTreeSet<String>,
    pub departments: DepartmentFilter,
    pub years: YearRange,
}

impl Selection {
    /// A record passes when its sector is selected, its department passes the
    /// department criterion, and its registration year is in range.
    /// An empty sector or department set therefore matches nothing.
    pub fn matches(&self, record: &InvestmentRecord) -> bool {
        self.sectors.contains(&record.sector)
            && self.departments.matches(&record.department)
            && self.years.contains(record.year())
    }
}

/// Iterate over the records passing `selection`, in table order.
pub fn filtered<'a>(
    table: &'a InvestmentTable,
    selection: &'a Selection,
) -> impl Iterator<Item = &'a InvestmentRecord> + 'a {
    table.records().iter().filter(move |r| selection.matches(r))
}
