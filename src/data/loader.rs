use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, Float32Type, Float64Type, Int32Type, Int64Type, TimeUnit,
    TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType,
};
use chrono::{DateTime, NaiveDate, NaiveTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::{LoadError, LoadResult};
use super::model::{columns, InvestmentRecord, InvestmentTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the investment table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the seven record columns (primary format)
/// * `.parquet` – the same columns; dates as `Date32`, `Timestamp` or text
/// * `.json`    – `[{ "DEPARTAMENTO": ..., "FECHA_REGISTRO": ..., ... }, ...]`
///
/// Rows without a department are dropped after every row has been parsed, so
/// an unparseable date anywhere in the file still fails the load.
pub fn load_file(path: &Path) -> LoadResult<InvestmentTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => read_csv(open(path)?)?,
        "parquet" | "pq" => read_parquet(open(path)?)?,
        "json" => read_json(BufReader::new(open(path)?))?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let table = retain_with_department(rows);
    log::info!(
        "Loaded {} investment records from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Load CSV content from any reader.
pub fn load_csv<R: Read>(reader: R) -> LoadResult<InvestmentTable> {
    Ok(retain_with_department(read_csv(reader)?))
}

fn open(path: &Path) -> LoadResult<File> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn retain_with_department(rows: Vec<InvestmentRecord>) -> InvestmentTable {
    let total = rows.len();
    let kept: Vec<InvestmentRecord> = rows
        .into_iter()
        .filter(|r| !r.department.is_empty())
        .collect();
    if kept.len() < total {
        log::debug!("Dropped {} rows without department", total - kept.len());
    }
    InvestmentTable::from_records(kept)
}

// ---------------------------------------------------------------------------
// Column lookup shared by the CSV and Parquet readers
// ---------------------------------------------------------------------------

/// Positions of the required columns in the source header.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    department: usize,
    registration_date: usize,
    viable_amount: usize,
    updated_cost: usize,
    sector: usize,
    entity: usize,
    physical_progress: usize,
}

impl ColumnIndex {
    fn locate(position: impl Fn(&str) -> Option<usize>) -> LoadResult<Self> {
        let find = |name: &'static str| position(name).ok_or(LoadError::MissingColumn(name));
        Ok(ColumnIndex {
            department: find(columns::DEPARTMENT)?,
            registration_date: find(columns::REGISTRATION_DATE)?,
            viable_amount: find(columns::VIABLE_AMOUNT)?,
            updated_cost: find(columns::UPDATED_COST)?,
            sector: find(columns::SECTOR)?,
            entity: find(columns::ENTITY)?,
            physical_progress: find(columns::PHYSICAL_PROGRESS)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Tokens read as a missing value, mirroring the usual CSV NA markers.
const NULL_TOKENS: [&str; 8] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

fn is_null_token(s: &str) -> bool {
    NULL_TOKENS.contains(&s)
}

fn parse_text(raw: &str) -> String {
    let s = raw.trim();
    if is_null_token(s) {
        String::new()
    } else {
        s.to_string()
    }
}

fn parse_number(raw: &str, row: usize, column: &'static str) -> LoadResult<Option<f64>> {
    let s = raw.trim();
    if is_null_token(s) {
        return Ok(None);
    }
    let value = s.parse::<f64>().map_err(|_| LoadError::ParseNumber {
        row,
        column,
        value: raw.to_string(),
    })?;
    // Any spelling of NaN (`NAN`, `-nan`, ...) is a missing value.
    Ok(Some(value).filter(|v| !v.is_nan()))
}

/// Date layouts tried in order. Slash dates are month-first before day-first.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y"];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Timestamps carrying a UTC offset, e.g. `2023-05-01 00:00:00+00:00`.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Parse a registration date, discarding any time-of-day part.
///
/// Offset-aware timestamps keep their local calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date_naive());
    }

    let (date_part, time_part) = match s.split_once(['T', ' ']) {
        Some((d, t)) => (d, Some(t.trim())),
        None => (s, None),
    };

    if let Some(time) = time_part {
        let valid = TIME_FORMATS
            .iter()
            .any(|fmt| NaiveTime::parse_from_str(time, fmt).is_ok());
        if !valid {
            return None;
        }
    }

    if date_part.len() == 8 && date_part.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = date_part[0..4].parse().ok()?;
        let month: u32 = date_part[4..6].parse().ok()?;
        let day: u32 = date_part[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

fn parse_date_cell(raw: &str, row: usize) -> LoadResult<NaiveDate> {
    parse_date(raw).ok_or_else(|| LoadError::ParseDate {
        row,
        column: columns::REGISTRATION_DATE,
        value: raw.to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv<R: Read>(source: R) -> LoadResult<Vec<InvestmentRecord>> {
    // Short rows are allowed; their trailing cells read as missing.
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers = reader.headers()?.clone();
    let idx = ColumnIndex::locate(|name| headers.iter().position(|h| h.trim() == name))?;

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;
        let cell = |pos: usize| record.get(pos).unwrap_or("");

        rows.push(InvestmentRecord {
            department: parse_text(cell(idx.department)),
            registration_date: parse_date_cell(cell(idx.registration_date), row)?,
            viable_amount: parse_number(cell(idx.viable_amount), row, columns::VIABLE_AMOUNT)?,
            updated_cost: parse_number(cell(idx.updated_cost), row, columns::UPDATED_COST)?,
            sector: parse_text(cell(idx.sector)),
            entity: parse_text(cell(idx.entity)),
            physical_progress: parse_number(
                cell(idx.physical_progress),
                row,
                columns::PHYSICAL_PROGRESS,
            )?,
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
/// Dates may be strings or epoch milliseconds.
fn read_json<R: Read>(source: R) -> LoadResult<Vec<InvestmentRecord>> {
    let root: JsonValue = serde_json::from_reader(source)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::MalformedJson("expected top-level array".to_string()))?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let row = i + 1;
            let obj = rec
                .as_object()
                .ok_or_else(|| LoadError::MalformedJson(format!("row {row} is not an object")))?;
            json_record(obj, row)
        })
        .collect()
}

fn json_record(obj: &Map<String, JsonValue>, row: usize) -> LoadResult<InvestmentRecord> {
    let field = |name: &'static str| obj.get(name).ok_or(LoadError::MissingColumn(name));

    Ok(InvestmentRecord {
        department: json_text(field(columns::DEPARTMENT)?),
        registration_date: json_date(field(columns::REGISTRATION_DATE)?, row)?,
        viable_amount: json_number(field(columns::VIABLE_AMOUNT)?, row, columns::VIABLE_AMOUNT)?,
        updated_cost: json_number(field(columns::UPDATED_COST)?, row, columns::UPDATED_COST)?,
        sector: json_text(field(columns::SECTOR)?),
        entity: json_text(field(columns::ENTITY)?),
        physical_progress: json_number(
            field(columns::PHYSICAL_PROGRESS)?,
            row,
            columns::PHYSICAL_PROGRESS,
        )?,
    })
}

fn json_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => parse_text(s),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_number(val: &JsonValue, row: usize, column: &'static str) -> LoadResult<Option<f64>> {
    match val {
        JsonValue::Number(n) => Ok(n.as_f64()),
        JsonValue::Null => Ok(None),
        JsonValue::String(s) => parse_number(s, row, column),
        other => Err(LoadError::ParseNumber {
            row,
            column,
            value: other.to_string(),
        }),
    }
}

fn json_date(val: &JsonValue, row: usize) -> LoadResult<NaiveDate> {
    match val {
        JsonValue::String(s) => parse_date_cell(s, row),
        JsonValue::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| LoadError::ParseDate {
                row,
                column: columns::REGISTRATION_DATE,
                value: n.to_string(),
            }),
        other => Err(LoadError::ParseDate {
            row,
            column: columns::REGISTRATION_DATE,
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Works with files written by both Pandas (`df.to_parquet()`) and Polars.
fn read_parquet(file: File) -> LoadResult<Vec<InvestmentRecord>> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let idx = ColumnIndex::locate(|name| schema.index_of(name).ok())?;
        let col = |pos: usize| batch.column(pos);

        for i in 0..batch.num_rows() {
            let row = rows.len() + 1;
            rows.push(InvestmentRecord {
                department: arrow_text(col(idx.department), i, columns::DEPARTMENT)?,
                registration_date: arrow_date(col(idx.registration_date), i, row)?,
                viable_amount: arrow_number(col(idx.viable_amount), i, row, columns::VIABLE_AMOUNT)?,
                updated_cost: arrow_number(col(idx.updated_cost), i, row, columns::UPDATED_COST)?,
                sector: arrow_text(col(idx.sector), i, columns::SECTOR)?,
                entity: arrow_text(col(idx.entity), i, columns::ENTITY)?,
                physical_progress: arrow_number(
                    col(idx.physical_progress),
                    i,
                    row,
                    columns::PHYSICAL_PROGRESS,
                )?,
            });
        }
    }
    Ok(rows)
}

// -- Arrow helpers --

fn unsupported(col: &ArrayRef, column: &'static str) -> LoadError {
    LoadError::UnsupportedType {
        column,
        data_type: format!("{:?}", col.data_type()),
    }
}

fn arrow_text(col: &ArrayRef, i: usize, column: &'static str) -> LoadResult<String> {
    if col.is_null(i) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => Ok(parse_text(col.as_string::<i32>().value(i))),
        DataType::LargeUtf8 => Ok(parse_text(col.as_string::<i64>().value(i))),
        _ => Err(unsupported(col, column)),
    }
}

fn arrow_number(
    col: &ArrayRef,
    i: usize,
    row: usize,
    column: &'static str,
) -> LoadResult<Option<f64>> {
    if col.is_null(i) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(i),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(i) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(i) as f64,
        DataType::Int32 => col.as_primitive::<Int32Type>().value(i) as f64,
        DataType::Utf8 => return parse_number(col.as_string::<i32>().value(i), row, column),
        DataType::LargeUtf8 => return parse_number(col.as_string::<i64>().value(i), row, column),
        _ => return Err(unsupported(col, column)),
    };
    // Pandas stores missing floats as NaN rather than null.
    Ok(Some(value).filter(|v| !v.is_nan()))
}

fn arrow_date(col: &ArrayRef, i: usize, row: usize) -> LoadResult<NaiveDate> {
    let column = columns::REGISTRATION_DATE;
    let parsed = if col.is_null(i) {
        None
    } else {
        match col.data_type() {
            DataType::Utf8 => return parse_date_cell(col.as_string::<i32>().value(i), row),
            DataType::LargeUtf8 => return parse_date_cell(col.as_string::<i64>().value(i), row),
            DataType::Date32 => col.as_primitive::<Date32Type>().value_as_date(i),
            DataType::Date64 => col.as_primitive::<Date64Type>().value_as_date(i),
            DataType::Timestamp(unit, _) => match unit {
                TimeUnit::Second => col.as_primitive::<TimestampSecondType>().value_as_datetime(i),
                TimeUnit::Millisecond => col
                    .as_primitive::<TimestampMillisecondType>()
                    .value_as_datetime(i),
                TimeUnit::Microsecond => col
                    .as_primitive::<TimestampMicrosecondType>()
                    .value_as_datetime(i),
                TimeUnit::Nanosecond => col
                    .as_primitive::<TimestampNanosecondType>()
                    .value_as_datetime(i),
            }
            .map(|dt| dt.date()),
            _ => return Err(unsupported(col, column)),
        }
    };

    parsed.ok_or_else(|| LoadError::ParseDate {
        row,
        column,
        value: if col.is_null(i) {
            "<null>".to_string()
        } else {
            format!("{:?}", col.data_type())
        },
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Date32Array, Float64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str =
        "DEPARTAMENTO,FECHA_REGISTRO,MONTO_VIABLE,COSTO_ACTUALIZADO,SECTOR,ENTIDAD,AVANCE_FISICO";

    fn csv_table(rows: &[&str]) -> LoadResult<InvestmentTable> {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        load_csv(text.as_bytes())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_csv_rows_in_order() {
        let table = csv_table(&[
            "TACNA,2023-05-01,1000,900,GOBIERNOS LOCALES,MUNI-X,50",
            "PUNO,2021-01-15 10:30:00,2500.5,,SALUD,HOSPITAL-Y,",
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.department, "TACNA");
        assert_eq!(first.registration_date, date(2023, 5, 1));
        assert_eq!(first.viable_amount, Some(1000.0));
        assert_eq!(first.updated_cost, Some(900.0));
        assert_eq!(first.entity, "MUNI-X");
        assert_eq!(first.physical_progress, Some(50.0));

        let second = &table.records()[1];
        assert_eq!(second.registration_date, date(2021, 1, 15));
        assert_eq!(second.updated_cost, None);
        assert_eq!(second.physical_progress, None);
    }

    #[test]
    fn drops_rows_without_department() {
        let table = csv_table(&[
            ",2023-05-01,1,1,SALUD,A,1",
            "TACNA,2023-05-01,1,1,SALUD,B,1",
            "NaN,2023-05-01,1,1,SALUD,C,1",
            "  ,2023-05-01,1,1,SALUD,D,1",
        ])
        .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].entity, "B");
    }

    #[test]
    fn extra_columns_are_ignored_and_order_is_free() {
        let text = "ENTIDAD,ID,SECTOR,AVANCE_FISICO,DEPARTAMENTO,COSTO_ACTUALIZADO,MONTO_VIABLE,FECHA_REGISTRO\n\
                    MUNI-X,7,SALUD,12.5,CUSCO,10,20,2019/07/04\n";
        let table = load_csv(text.as_bytes()).unwrap();
        let rec = &table.records()[0];
        assert_eq!(rec.department, "CUSCO");
        assert_eq!(rec.viable_amount, Some(20.0));
        assert_eq!(rec.registration_date, date(2019, 7, 4));
    }

    #[test]
    fn missing_column_is_fatal() {
        let text = "DEPARTAMENTO,FECHA_REGISTRO,MONTO_VIABLE,SECTOR,ENTIDAD,AVANCE_FISICO\n";
        let err = load_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("COSTO_ACTUALIZADO")));
    }

    #[test]
    fn unparseable_date_is_fatal_even_without_department() {
        let err = csv_table(&[
            "TACNA,2023-05-01,1,1,SALUD,A,1",
            ",not-a-date,1,1,SALUD,B,1",
        ])
        .unwrap_err();
        match err {
            LoadError::ParseDate { row, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unparseable_number_is_fatal() {
        let err = csv_table(&["TACNA,2023-05-01,mucho,1,SALUD,A,1"]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::ParseNumber {
                row: 1,
                column: "MONTO_VIABLE",
                ..
            }
        ));
    }

    #[test]
    fn accepts_common_date_layouts() {
        assert_eq!(parse_date("2023-05-01"), Some(date(2023, 5, 1)));
        assert_eq!(parse_date("2023-05-01T08:15:00"), Some(date(2023, 5, 1)));
        assert_eq!(parse_date("2023-05-01 08:15:00.250"), Some(date(2023, 5, 1)));
        assert_eq!(parse_date("2023/05/01"), Some(date(2023, 5, 1)));
        assert_eq!(parse_date("20230501"), Some(date(2023, 5, 1)));
        // Month-first wins when both readings are valid.
        assert_eq!(parse_date("05/01/2023"), Some(date(2023, 5, 1)));
        assert_eq!(parse_date("25/12/2023"), Some(date(2023, 12, 25)));
    }

    #[test]
    fn accepts_day_first_dashes_and_offset_timestamps() {
        assert_eq!(parse_date("25-12-2023"), Some(date(2023, 12, 25)));
        assert_eq!(parse_date("2023-05-01 00:00:00+00:00"), Some(date(2023, 5, 1)));
        assert_eq!(parse_date("2023-05-01T23:30:00-05:00"), Some(date(2023, 5, 1)));
        assert_eq!(parse_date("2023-05-01T08:15:00Z"), Some(date(2023, 5, 1)));
        assert_eq!(parse_date("2023-05-01 08:15:00.5+0100"), Some(date(2023, 5, 1)));
    }

    #[test]
    fn rejects_invalid_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date("2023-05-01 late"), None);
        assert_eq!(parse_date("20231345"), None);
    }

    #[test]
    fn short_rows_read_trailing_cells_as_missing() {
        let table = csv_table(&[
            "TACNA,2023-05-01,1000,900,GOBIERNOS LOCALES,MUNI-X",
            "PUNO,2024-01-02,300,350,SALUD,HOSP-Y,80",
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        let short = &table.records()[0];
        assert_eq!(short.entity, "MUNI-X");
        assert_eq!(short.updated_cost, Some(900.0));
        assert_eq!(short.physical_progress, None);
        assert_eq!(table.records()[1].physical_progress, Some(80.0));
    }

    #[test]
    fn nan_spellings_are_missing_numbers() {
        let table = csv_table(&["TACNA,2023-05-01,NAN,-nan,SALUD,A,+NaN"]).unwrap();
        let rec = &table.records()[0];
        assert_eq!(rec.viable_amount, None);
        assert_eq!(rec.updated_cost, None);
        assert_eq!(rec.physical_progress, None);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("inversiones.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_file(Path::new("/nonexistent/inversiones.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/inversiones.csv"));
    }

    #[test]
    fn reads_json_records_with_epoch_dates() {
        let json = r#"[
            {"DEPARTAMENTO": "TACNA", "FECHA_REGISTRO": 1682899200000, "MONTO_VIABLE": 1000,
             "COSTO_ACTUALIZADO": null, "SECTOR": "SALUD", "ENTIDAD": "MUNI-X", "AVANCE_FISICO": 50.0},
            {"DEPARTAMENTO": null, "FECHA_REGISTRO": "2022-01-01", "MONTO_VIABLE": 1,
             "COSTO_ACTUALIZADO": 1, "SECTOR": "SALUD", "ENTIDAD": "MUNI-Y", "AVANCE_FISICO": 1}
        ]"#;
        let rows = read_json(json.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].registration_date, date(2023, 5, 1));
        assert_eq!(rows[0].updated_cost, None);
        assert_eq!(rows[1].department, "");

        let table = retain_with_department(rows);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn loads_json_file_from_disk() {
        let json = r#"[{"DEPARTAMENTO": "PUNO", "FECHA_REGISTRO": "2024-02-10T00:00:00.000",
            "MONTO_VIABLE": "300", "COSTO_ACTUALIZADO": 350, "SECTOR": "SALUD",
            "ENTIDAD": "HOSP-Y", "AVANCE_FISICO": null}]"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inversiones.json");
        std::fs::write(&path, json).unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 1);
        let rec = &table.records()[0];
        assert_eq!(rec.registration_date, date(2024, 2, 10));
        assert_eq!(rec.viable_amount, Some(300.0));
        assert_eq!(rec.physical_progress, None);
    }

    #[test]
    fn reads_parquet_with_date32_column() {
        let epoch = date(1970, 1, 1);
        let days = (date(2023, 5, 1) - epoch).num_days() as i32;

        let text = |name: &str| Field::new(name, DataType::Utf8, true);
        let number = |name: &str| Field::new(name, DataType::Float64, true);
        let schema = Arc::new(Schema::new(vec![
            text(columns::DEPARTMENT),
            Field::new(columns::REGISTRATION_DATE, DataType::Date32, false),
            number(columns::VIABLE_AMOUNT),
            number(columns::UPDATED_COST),
            text(columns::SECTOR),
            text(columns::ENTITY),
            number(columns::PHYSICAL_PROGRESS),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("TACNA"), None])),
                Arc::new(Date32Array::from(vec![days, days])),
                Arc::new(Float64Array::from(vec![Some(1000.0), Some(f64::NAN)])),
                Arc::new(Float64Array::from(vec![Some(900.0), None])),
                Arc::new(StringArray::from(vec!["SALUD", "SALUD"])),
                Arc::new(StringArray::from(vec!["MUNI-X", "MUNI-Y"])),
                Arc::new(Float64Array::from(vec![Some(50.0), None])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inversiones.parquet");
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 1);
        let rec = &table.records()[0];
        assert_eq!(rec.registration_date, date(2023, 5, 1));
        assert_eq!(rec.viable_amount, Some(1000.0));
        assert_eq!(rec.physical_progress, Some(50.0));
    }
}
