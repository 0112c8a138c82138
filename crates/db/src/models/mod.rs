//! Row models and input DTOs, one module per table.

pub mod booking;
pub mod rating;
pub mod vehicle;
