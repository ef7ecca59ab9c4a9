use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::filter::{filtered, Selection};
use super::model::{InvestmentRecord, InvestmentTable, Metric};

// ---------------------------------------------------------------------------
// Chart datasets
// ---------------------------------------------------------------------------

/// One line of the financial evolution chart: an entity × metric pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesLine {
    pub entity: String,
    pub metric: Metric,
    /// Sorted by date; equal dates keep table order.
    pub points: Vec<(NaiveDate, f64)>,
}

/// Leaf of the treemap: summed viable amount of one entity within a sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityLeaf {
    pub entity: String,
    pub total: f64,
}

/// Top level of the treemap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorNode {
    pub sector: String,
    /// Sum of the leaf totals.
    pub total: f64,
    pub entities: Vec<EntityLeaf>,
}

/// One horizontal bar: the physical progress of a single record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressBar {
    pub entity: String,
    pub progress: f64,
}

/// Everything the three charts render for one selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    /// Number of records passing the selection.
    pub matched: usize,
    pub series: Vec<SeriesLine>,
    pub hierarchy: Vec<SectorNode>,
    pub bars: Vec<ProgressBar>,
}

impl ChartData {
    /// No record matched; every chart shows its placeholder.
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }

    /// Min and max leaf totals, the domain of the treemap colour scale.
    pub fn leaf_range(&self) -> Option<(f64, f64)> {
        self.hierarchy
            .iter()
            .flat_map(|s| s.entities.iter().map(|e| e.total))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Filter `table` by `selection` and build the three chart datasets.
///
/// Pure: the table is only read, and identical inputs give identical output.
pub fn compute(table: &InvestmentTable, selection: &Selection) -> ChartData {
    let rows: Vec<&InvestmentRecord> = filtered(table, selection).collect();
    if rows.is_empty() {
        return ChartData::default();
    }

    ChartData {
        matched: rows.len(),
        series: build_series(&rows),
        hierarchy: build_hierarchy(&rows),
        bars: build_bars(&rows),
    }
}

fn build_series(rows: &[&InvestmentRecord]) -> Vec<SeriesLine> {
    // Entities in order of first appearance.
    let mut entities: Vec<&str> = Vec::new();
    let mut by_entity: BTreeMap<&str, Vec<&InvestmentRecord>> = BTreeMap::new();
    for rec in rows {
        let bucket = by_entity.entry(rec.entity.as_str()).or_default();
        if bucket.is_empty() {
            entities.push(&rec.entity);
        }
        bucket.push(rec);
    }

    let mut lines = Vec::new();
    for entity in entities {
        let mut recs = by_entity.remove(entity).unwrap_or_default();
        recs.sort_by_key(|r| r.registration_date);

        for metric in Metric::ALL {
            let points: Vec<(NaiveDate, f64)> = recs
                .iter()
                .filter_map(|r| metric.value(r).map(|v| (r.registration_date, v)))
                .collect();
            if points.is_empty() {
                continue;
            }
            lines.push(SeriesLine {
                entity: entity.to_string(),
                metric,
                points,
            });
        }
    }
    lines
}

fn build_hierarchy(rows: &[&InvestmentRecord]) -> Vec<SectorNode> {
    let mut sums: BTreeMap<&str, BTreeMap<&str, f64>> = BTreeMap::new();
    for rec in rows {
        *sums
            .entry(rec.sector.as_str())
            .or_default()
            .entry(rec.entity.as_str())
            .or_default() += rec.viable_amount.unwrap_or(0.0);
    }

    sums.into_iter()
        .map(|(sector, leaves)| {
            let entities: Vec<EntityLeaf> = leaves
                .into_iter()
                .map(|(entity, total)| EntityLeaf {
                    entity: entity.to_string(),
                    total,
                })
                .collect();
            SectorNode {
                sector: sector.to_string(),
                total: entities.iter().map(|e| e.total).sum(),
                entities,
            }
        })
        .collect()
}

fn build_bars(rows: &[&InvestmentRecord]) -> Vec<ProgressBar> {
    rows.iter()
        .filter_map(|r| {
            r.physical_progress.map(|progress| ProgressBar {
                entity: r.entity.clone(),
                progress,
            })
        })
        .collect()
}
