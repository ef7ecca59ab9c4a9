use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;

use inversion_dashboard::data::model::columns;

const DEPARTMENTS: [&str; 8] = [
    "TACNA", "PUNO", "CUSCO", "AREQUIPA", "LIMA", "PIURA", "LORETO", "JUNIN",
];

/// Sector → executing entities.
const SECTORS: [(&str, &[&str]); 4] = [
    (
        "GOBIERNOS LOCALES",
        &["MUNICIPALIDAD PROVINCIAL", "MUNICIPALIDAD DISTRITAL", "MANCOMUNIDAD MUNICIPAL"],
    ),
    ("GOBIERNOS REGIONALES", &["GOBIERNO REGIONAL", "PROYECTO ESPECIAL REGIONAL"]),
    ("SALUD", &["RED DE SALUD", "HOSPITAL REGIONAL"]),
    ("EDUCACION", &["UGEL", "PRONIED"]),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct SampleRow {
    department: Option<String>,
    date: NaiveDate,
    viable: f64,
    updated: Option<f64>,
    sector: String,
    entity: String,
    progress: Option<f64>,
}

fn generate(n: usize, rng: &mut SimpleRng) -> Vec<SampleRow> {
    let first = NaiveDate::from_ymd_opt(2001, 1, 1).expect("valid date");
    let span_days = (NaiveDate::from_ymd_opt(2024, 4, 30).expect("valid date") - first).num_days();

    (0..n)
        .map(|i| {
            let department = *rng.pick(&DEPARTMENTS);
            let (sector, entities) = *rng.pick(&SECTORS);
            let entity = format!("{} {}", rng.pick(entities), department);
            let date = first + chrono::Duration::days((rng.next_f64() * span_days as f64) as i64);
            let viable = (50_000.0 + rng.next_f64() * 5_000_000.0).round();
            let drift = 0.8 + rng.next_f64() * 0.6;

            SampleRow {
                // Every 25th row has no department and is dropped by the loader.
                department: (i % 25 != 24).then(|| department.to_string()),
                date,
                viable,
                updated: (rng.next_f64() > 0.1).then(|| (viable * drift).round()),
                sector: sector.to_string(),
                entity,
                progress: (rng.next_f64() > 0.05).then(|| (rng.next_f64() * 100.0).round()),
            }
        })
        .collect()
}

fn write_csv(rows: &[SampleRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(columns::REQUIRED)?;
    let num = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    for row in rows {
        writer.write_record([
            row.department.clone().unwrap_or_default(),
            row.date.format("%Y-%m-%d").to_string(),
            row.viable.to_string(),
            num(row.updated),
            row.sector.clone(),
            row.entity.clone(),
            num(row.progress),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &Path) -> Result<()> {
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

    // Date32 counts days since 1970-01-01.
    let epoch_offset = NaiveDate::from_ymd_opt(1970, 1, 1)
        .expect("valid date")
        .num_days_from_ce();

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.department.as_deref()).collect::<Vec<_>>(),
            )),
            Arc::new(Date32Array::from(
                rows.iter()
                    .map(|r| r.date.num_days_from_ce() - epoch_offset)
                    .collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| Some(r.viable)).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.updated).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.sector.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.entity.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.progress).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "data".to_string()));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let rows = generate(1_500, &mut rng);

    let csv_path = out_dir.join("inversiones.csv");
    write_csv(&rows, &csv_path)?;
    let parquet_path = out_dir.join("inversiones.parquet");
    write_parquet(&rows, &parquet_path)?;

    println!(
        "Wrote {} investment records to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
