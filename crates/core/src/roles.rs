//! Well-known role name constants.
//!
//! Role names arrive in the `role` claim of the access token.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLIENT: &str = "client";
pub const ROLE_DRIVER: &str = "driver";
pub const ROLE_CAR_OWNER: &str = "car_owner";
pub const ROLE_BUSINESS_OWNER: &str = "business_owner";
