//! Data layer module
//!
//! Handles all data persistence:
//! - SQLite database operations
//! - Entity models and viewer-annotated projections

mod database;
mod models;

pub use database::Database;
pub use models::*;
