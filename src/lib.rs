//! Role-scoped school management API.
//!
//! Every request flows through the same spine: bearer authentication builds
//! a [`policy::Principal`], the route-to-role map gates the path, the policy
//! engine decides the operation and produces a row-visibility
//! [`policy::Predicate`], and the repository layer lowers that predicate to
//! SQL so the page and its total count always agree.

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod policy;
pub mod repo;
pub mod router;
pub mod state;
pub mod utils;
