/// Data layer: locating, loading and holding the passenger table.
///
/// Architecture:
/// ```text
///   CandidatePaths
///        │
///        ▼
///   ┌──────────┐
///   │ locator  │  first existing path → PathBuf
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  .csv / .json / .parquet → PassengerTable
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ PassengerTable │  typed columns, read-only rows
///   └────────────────┘
/// ```

pub mod loader;
pub mod locator;
pub mod model;
