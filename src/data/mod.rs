/// Data layer: core types, loading, cleaning and splitting.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  drop / require columns, drop NA rows → PreparedData
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  split    │  seeded shuffle → TrainTestSplit
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod schema;
pub mod split;
