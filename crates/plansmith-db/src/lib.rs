//! PostgreSQL persistence layer for plansmith.
//!
//! Holds the row models, connection pool helpers with embedded migrations,
//! and per-table query modules. All intelligence lives upstream in
//! `plansmith-core`; this crate only reads and writes rows.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
