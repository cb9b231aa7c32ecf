//! Balloon tracker HTTP API.
//!
//! Serves consolidated balloon positions and on-demand weather lookups from
//! a short-lived in-memory cache.

pub mod config;
pub mod handlers;
pub mod state;
