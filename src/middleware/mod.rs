//! Request middleware.
//!
//! - [`auth`]: bearer-token verification and the per-request [`crate::policy::Principal`]
//! - [`route_access`]: static route-to-role map enforced ahead of handlers
//!
//! # Request flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`route_access::enforce_route_access`] verifies the token and checks
//!    the path prefix against the role map
//! 3. Handlers re-extract [`auth::AuthPrincipal`] and consult the policy
//!    engine for the operation and row scope

pub mod auth;
pub mod route_access;
