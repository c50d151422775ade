/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  citibikerides.csv / MNBuilidng.csv / MNstation.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (None on failure)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, header row
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  bucket / group / count → Vec<AggregateEntry>
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
