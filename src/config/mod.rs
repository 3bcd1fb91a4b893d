//! Per-concern configuration, loaded from environment variables.
//!
//! - [`database`]: PostgreSQL pool initialization (`DATABASE_URL`)
//! - [`jwt`]: token secret and expiries
//! - [`cors`]: allowed origins
//! - [`pagination`]: fixed page size for list endpoints

pub mod cors;
pub mod database;
pub mod jwt;
pub mod pagination;
