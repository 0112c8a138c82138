//! Booking lifecycle status constants.
//!
//! These must match the CHECK constraint on `bookings.status`.

pub const BOOKING_STATUS_PENDING: &str = "pending";
pub const BOOKING_STATUS_CONFIRMED: &str = "confirmed";
pub const BOOKING_STATUS_ACTIVE: &str = "active";
pub const BOOKING_STATUS_COMPLETED: &str = "completed";
pub const BOOKING_STATUS_CANCELLED: &str = "cancelled";

/// Only completed bookings may be rated.
pub fn is_rateable(status: &str) -> bool {
    status == BOOKING_STATUS_COMPLETED
}
