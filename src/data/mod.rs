/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (checks required columns)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  immutable columns of Value, shared via Arc
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSpec → DatasetView (ordered row subset)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  AggSpec → QueryResult (ordered key/value series)
///   └───────────┘
/// ```
///
/// `pipeline::run_pipeline` chains the last two; `presets` holds one query
/// per dashboard panel.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod presets;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{aggregate, AggSpec, Aggregation, KeyOrder, QueryResult};
pub use error::{LoadError, QueryError};
pub use filter::{apply, Choice, FilterSpec, Predicate};
pub use model::{Column, ColumnKind, Dataset, DatasetView, Value};
pub use pipeline::{run_pipeline, Query};
