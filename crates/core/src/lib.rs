//! Domain types and rules for the rental marketplace rating service.
//!
//! Everything in this crate is pure: no database or HTTP access. The `db`
//! and `api` crates call into these modules for validation, score
//! derivation, and access-control decisions.

pub mod access;
pub mod booking;
pub mod error;
pub mod pagination;
pub mod rating;
pub mod roles;
pub mod types;
