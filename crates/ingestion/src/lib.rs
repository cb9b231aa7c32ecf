//! Snapshot ingestion pipeline: entry validation, per-file fetch and
//! grading, the 24-file consolidation pass, and the weather provider client.

pub mod consolidate;
pub mod fetch;
pub mod source;
pub mod validate;
pub mod weather;

pub use consolidate::Consolidator;
pub use source::{HttpSnapshotSource, SnapshotSource};
pub use weather::{OpenMeteoProvider, WeatherProvider};
