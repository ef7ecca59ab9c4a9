use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use eframe::egui::Color32;

use crate::color::generate_palette;
use crate::data::charts::{compute, ChartData};
use crate::data::filter::{DepartmentFilter, Selection, YearRange};
use crate::data::model::InvestmentTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table, shared read-only for the whole session.
    pub table: Arc<InvestmentTable>,

    pub selected_sectors: BTreeSet<String>,

    /// "Todos" toggle. When set, `selected_departments` is ignored.
    pub all_departments: bool,
    pub selected_departments: BTreeSet<String>,

    pub years: YearRange,

    /// Chart datasets for the current selection (cached).
    pub charts: ChartData,

    /// Line/bar colour per entity present in `charts`.
    entity_colors: BTreeMap<String, Color32>,

    /// Selection `charts` was computed from.
    computed_for: Option<Selection>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub show_welcome: bool,
}

impl AppState {
    /// Build the state for a freshly loaded table and compute the first charts.
    pub fn new(table: Arc<InvestmentTable>, initial: Selection) -> Self {
        let (all_departments, selected_departments) = match initial.departments {
            DepartmentFilter::All => (true, BTreeSet::new()),
            DepartmentFilter::Only(set) => (false, set),
        };
        let status_message = if table.is_empty() {
            Some("El archivo no contiene registros con departamento".to_string())
        } else {
            years_outside_data(&table, initial.years)
        };

        let mut state = AppState {
            table,
            selected_sectors: initial.sectors,
            all_departments,
            selected_departments,
            years: initial.years,
            charts: ChartData::default(),
            entity_colors: BTreeMap::new(),
            computed_for: None,
            status_message,
            show_welcome: true,
        };
        state.refresh();
        state
    }

    /// Current widget values as a pipeline selection.
    pub fn selection(&self) -> Selection {
        Selection {
            sectors: self.selected_sectors.clone(),
            departments: DepartmentFilter::from_selection(
                self.all_departments,
                self.selected_departments.iter().cloned(),
            ),
            years: self.years,
        }
    }

    /// Recompute the charts if the selection changed since the last call.
    pub fn refresh(&mut self) {
        let selection = self.selection();
        if self.computed_for.as_ref() == Some(&selection) {
            return;
        }

        self.charts = compute(&self.table, &selection);
        self.rebuild_entity_colors();
        log::debug!(
            "Recomputed charts: {} matching records, {} lines, {} sectors, {} bars",
            self.charts.matched,
            self.charts.series.len(),
            self.charts.hierarchy.len(),
            self.charts.bars.len()
        );
        self.computed_for = Some(selection);
    }

    fn rebuild_entity_colors(&mut self) {
        let mut entities: Vec<&str> = Vec::new();
        let names = self
            .charts
            .series
            .iter()
            .map(|l| l.entity.as_str())
            .chain(self.charts.bars.iter().map(|b| b.entity.as_str()));
        for name in names {
            if !entities.contains(&name) {
                entities.push(name);
            }
        }

        let palette = generate_palette(entities.len());
        self.entity_colors = entities
            .into_iter()
            .map(String::from)
            .zip(palette)
            .collect();
    }

    pub fn entity_color(&self, entity: &str) -> Color32 {
        self.entity_colors
            .get(entity)
            .copied()
            .unwrap_or(Color32::LIGHT_BLUE)
    }

    pub fn set_sector(&mut self, sector: &str, selected: bool) {
        if selected {
            self.selected_sectors.insert(sector.to_string());
        } else {
            self.selected_sectors.remove(sector);
        }
    }

    pub fn select_all_sectors(&mut self) {
        self.selected_sectors = self.table.sectors().clone();
    }

    pub fn select_no_sectors(&mut self) {
        self.selected_sectors.clear();
    }

    pub fn set_department(&mut self, department: &str, selected: bool) {
        if selected {
            self.selected_departments.insert(department.to_string());
        } else {
            self.selected_departments.remove(department);
        }
    }

    /// Set the year interval, keeping `min <= max`.
    pub fn set_years(&mut self, min: i32, max: i32) {
        self.years = YearRange::new(min.min(max), max.max(min));
    }
}

/// Notice for an initial year range reaching past the loaded years. The range
/// is kept as given.
fn years_outside_data(table: &InvestmentTable, years: YearRange) -> Option<String> {
    let (lo, hi) = table.year_bounds()?;
    if years.min >= lo && years.max <= hi {
        return None;
    }
    log::warn!(
        "Year range {}-{} extends beyond the data ({lo}-{hi})",
        years.min,
        years.max
    );
    Some(format!(
        "Rango de años {}–{} fuera de los datos ({lo}–{hi})",
        years.min, years.max
    ))
}
