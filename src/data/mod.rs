/// Data layer: static tables, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  loader   │ ◄─── │  cache    │  LRU keyed by path + file state
///   └──────────┘      └──────────┘
///        │  recode via codes, drop unmapped Host Sites
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, Host Site index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Host Site selection → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  ×5 dimensions → AggregateTable
///   └───────────┘
/// ```
/// `dashboard::compute` runs filter and aggregate in one pure call.

pub mod aggregate;
pub mod cache;
pub mod codes;
pub mod dashboard;
pub mod filter;
pub mod loader;
pub mod model;
