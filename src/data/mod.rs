/// Data layer: core types, loading, filtering and chart-ready reshaping.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file once at startup → LaunchTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable │  Vec<LaunchRecord>, sites, payload bounds
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site / payload predicates → subsequence
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  pie slices, scatter points
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub mod fixtures;
