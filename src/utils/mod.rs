//! Shared utilities.
//!
//! - [`errors`]: application error taxonomy and response mapping
//! - [`jwt`]: token verification (and tooling/test issuance)
//! - [`pagination`]: fixed-size 1-indexed pagination
//! - [`patch`]: absent-vs-null field handling for partial updates

pub mod errors;
pub mod jwt;
pub mod pagination;
pub mod patch;
