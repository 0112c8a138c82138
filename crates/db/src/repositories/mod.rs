//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod rating_repo;
pub mod vehicle_repo;

pub use booking_repo::BookingRepo;
pub use rating_repo::RatingRepo;
pub use vehicle_repo::VehicleRepo;
