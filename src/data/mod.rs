/// Data layer: core types, loading, caching, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐     ┌───────┐
///   │  loader   │◄────│ cache │  memoized per source identity
///   └──────────┘     └───────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalesDataset  │  Vec<Record>, date bounds
///   └──────────────┘
///        │  DateRange
///        ▼
///   ┌──────────┐
///   │  filter   │  records inside [start, end]
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  totals, top cake, daily series → SalesSummary
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
