use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::charts::{compute, ChartData};
use crate::data::filter::Selection;
use crate::data::model::InvestmentTable;

/// Compute the charts for `selection` and write them to `path` as pretty JSON.
pub fn export_json(table: &InvestmentTable, selection: &Selection, path: &Path) -> Result<ChartData> {
    let charts = compute(table, selection);
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &charts)
        .with_context(|| format!("writing {}", path.display()))?;
    writer.flush()?;
    log::info!(
        "Exported {} matching records to {}",
        charts.matched,
        path.display()
    );
    Ok(charts)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::filter::{DepartmentFilter, YearRange};
    use crate::data::model::InvestmentRecord;

    #[test]
    fn writes_chart_data_as_json() {
        let table = InvestmentTable::from_records(vec![InvestmentRecord {
            department: "TACNA".into(),
            registration_date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            viable_amount: Some(1000.0),
            updated_cost: Some(900.0),
            sector: "GOBIERNOS LOCALES".into(),
            entity: "MUNI-X".into(),
            physical_progress: Some(50.0),
        }]);
        let selection = Selection {
            sectors: ["GOBIERNOS LOCALES".to_string()].into(),
            departments: DepartmentFilter::All,
            years: YearRange::new(2023, 2024),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.json");
        let charts = export_json(&table, &selection, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["matched"], 1);
        assert_eq!(written["hierarchy"][0]["entities"][0]["total"], 1000.0);
        assert_eq!(charts.series.len(), 2);
    }
}
