//! Request handlers.
//!
//! Handlers delegate persistence to the repositories in `rentals_db`, keep
//! rule evaluation in `rentals_core`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod ratings;
