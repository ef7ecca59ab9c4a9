/// Data layer: record types, loading, filtering and chart aggregation.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → InvestmentTable (rows with a department)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ InvestmentTable  │  Vec<InvestmentRecord>, option lists, year bounds
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  sector / department / year predicate
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  charts   │  series, sector → entity hierarchy, progress bars
///   └──────────┘
/// ```

pub mod charts;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
