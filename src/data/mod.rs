/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///      titanic.csv
///           │
///           ▼
///     ┌──────────┐
///     │  loader   │  parse file → PassengerTable (+ cached domains)
///     └──────────┘
///           │
///           ▼
///     ┌──────────┐
///     │  filter   │  apply FilterSelection → filtered rows
///     └──────────┘
///           │
///           ▼
///     ┌───────────┐
///     │ aggregate  │  survival rates, age buckets, heatmap, port counts
///     └───────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
