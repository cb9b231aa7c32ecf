//! Caching layer for consolidated balloon data and weather lookups.

pub mod cache;
pub mod store;

pub use cache::{BalloonCache, WeatherCache};
pub use store::DataStore;
