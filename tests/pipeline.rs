use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use inversion_dashboard::data::charts::compute;
use inversion_dashboard::data::error::LoadError;
use inversion_dashboard::data::filter::{DepartmentFilter, Selection, YearRange};
use inversion_dashboard::data::loader::load_file;
use inversion_dashboard::data::model::Metric;

const CSV: &str = "\
CODIGO_UNICO,DEPARTAMENTO,FECHA_REGISTRO,MONTO_VIABLE,COSTO_ACTUALIZADO,SECTOR,ENTIDAD,AVANCE_FISICO
1,TACNA,2023-05-01,1000,900,GOBIERNOS LOCALES,MUNI-X,50
2,,2023-06-01,5000,5000,GOBIERNOS LOCALES,MUNI-SIN-DEPTO,10
3,PUNO,2024-02-10 00:00:00,300,350,GOBIERNOS LOCALES,MUNI-Y,80
4,TACNA,2019-11-20,700,,SALUD,HOSP-Z,
5,CUSCO,2023-12-31,250,260,GOBIERNOS LOCALES,MUNI-X,65
";

fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn selection(sectors: &[&str], departments: DepartmentFilter, years: (i32, i32)) -> Selection {
    Selection {
        sectors: sectors.iter().map(|s| s.to_string()).collect(),
        departments,
        years: YearRange::new(years.0, years.1),
    }
}

fn only(names: &[&str]) -> DepartmentFilter {
    DepartmentFilter::from_selection(false, names.iter().copied())
}

#[test]
fn loads_file_and_answers_the_tacna_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "inversiones.csv", CSV);
    let table = load_file(&path).unwrap();

    assert_eq!(table.len(), 4);
    assert!(table.records().iter().all(|r| !r.department.is_empty()));
    assert_eq!(table.year_bounds(), Some((2019, 2024)));

    let out = compute(
        &table,
        &selection(&["GOBIERNOS LOCALES"], only(&["TACNA"]), (2023, 2024)),
    );
    let date = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
    assert_eq!(out.series.len(), 2);
    assert_eq!(out.series[0].metric, Metric::ViableAmount);
    assert_eq!(out.series[0].points, vec![(date, 1000.0)]);
    assert_eq!(out.series[1].metric, Metric::UpdatedCost);
    assert_eq!(out.series[1].points, vec![(date, 900.0)]);
    assert_eq!(out.hierarchy.len(), 1);
    assert_eq!(out.hierarchy[0].entities[0].entity, "MUNI-X");
    assert_eq!(out.hierarchy[0].entities[0].total, 1000.0);
    assert_eq!(out.bars.len(), 1);
    assert_eq!(out.bars[0].progress, 50.0);
}

#[test]
fn out_of_range_or_unknown_sector_gives_empty_charts() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_file(&write_fixture(&dir, "inversiones.csv", CSV)).unwrap();

    let old_years = compute(
        &table,
        &selection(&["GOBIERNOS LOCALES"], only(&["TACNA"]), (2020, 2021)),
    );
    assert!(old_years.is_empty());
    assert!(old_years.series.is_empty() && old_years.hierarchy.is_empty() && old_years.bars.is_empty());

    let other_sector = compute(&table, &selection(&["TRANSPORTES"], DepartmentFilter::All, (2000, 2030)));
    assert!(other_sector.is_empty());
}

#[test]
fn all_departments_aggregates_across_the_country() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_file(&write_fixture(&dir, "inversiones.csv", CSV)).unwrap();
    let departments: Vec<&str> = table.departments().iter().map(String::as_str).collect();

    let all = compute(
        &table,
        &selection(&["GOBIERNOS LOCALES", "SALUD"], DepartmentFilter::All, (2019, 2024)),
    );
    let explicit = compute(
        &table,
        &selection(&["GOBIERNOS LOCALES", "SALUD"], only(&departments), (2019, 2024)),
    );
    assert_eq!(all, explicit);
    assert_eq!(all.matched, 4);

    // MUNI-X appears in TACNA and CUSCO; its leaf sums both.
    let locals = &all.hierarchy[0];
    let muni_x = locals.entities.iter().find(|e| e.entity == "MUNI-X").unwrap();
    assert_eq!(muni_x.total, 1250.0);
    // The record dropped for its missing department never shows up.
    assert!(all.bars.iter().all(|b| b.entity != "MUNI-SIN-DEPTO"));
}

#[test]
fn bad_date_aborts_loading() {
    let dir = tempfile::tempdir().unwrap();
    let broken = CSV.replace("2019-11-20", "20-XI-2019");
    let err = load_file(&write_fixture(&dir, "inversiones.csv", &broken)).unwrap_err();
    match err {
        LoadError::ParseDate { row, value, .. } => {
            assert_eq!(row, 4);
            assert_eq!(value, "20-XI-2019");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_aborts_loading() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_file(&dir.path().join("no-existe.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
