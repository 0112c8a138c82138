//! Access-control decisions for ratings.
//!
//! Two concerns live here, both independent of persistence:
//!
//! - [`rating_visibility`] decides whether a requester may read one rating.
//! - [`RatingScope`] is the role-tagged base filter applied when listing.

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_CAR_OWNER, ROLE_CLIENT};
use crate::types::DbId;

/// The authenticated principal issuing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub user_id: DbId,
    pub role: String,
}

impl Requester {
    pub fn new(user_id: DbId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/* --------------------------------------------------------------------------
Single-rating visibility
-------------------------------------------------------------------------- */

/// Outcome of a visibility check on one rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// The requester may read the rating.
    Visible,
    /// Readable only if the requester owns the rated vehicle. The caller
    /// must load the vehicle and confirm with [`confirm_vehicle_owner`].
    VehicleOwnerOnly,
    /// The requester may not read the rating.
    Denied,
}

/// Decide whether `requester` may read a rating.
///
/// Rules, in order: admins see everything; authors see their own ratings;
/// public ratings are visible to any authenticated requester; a private
/// rating is otherwise visible only to the `car_owner` who owns the vehicle.
pub fn rating_visibility(requester: &Requester, author_id: DbId, is_public: bool) -> Visibility {
    if requester.is_admin() || requester.user_id == author_id || is_public {
        Visibility::Visible
    } else if requester.role == ROLE_CAR_OWNER {
        Visibility::VehicleOwnerOnly
    } else {
        Visibility::Denied
    }
}

/// Second step of [`Visibility::VehicleOwnerOnly`].
pub fn confirm_vehicle_owner(requester: &Requester, vehicle_owner_id: DbId) -> Result<(), CoreError> {
    if requester.user_id == vehicle_owner_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Not authorized to view this rating".to_string(),
        ))
    }
}

/* --------------------------------------------------------------------------
List scoping
-------------------------------------------------------------------------- */

/// Role-tagged base restriction for rating lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingScope {
    /// No restriction (admins, and roles without a dedicated scope).
    Unrestricted,
    /// Only ratings written by this user (`client`).
    AuthoredBy(DbId),
    /// Only ratings of vehicles owned by this user (`car_owner`). Resolved
    /// to [`RatingScope::Vehicles`] once the owned vehicle ids are known.
    OwnedVehiclesOf(DbId),
    /// Only ratings of these vehicles.
    Vehicles(Vec<DbId>),
}

impl RatingScope {
    /// Base scope for a requester's role.
    pub fn for_requester(requester: &Requester) -> Self {
        match requester.role.as_str() {
            ROLE_CLIENT => RatingScope::AuthoredBy(requester.user_id),
            ROLE_CAR_OWNER => RatingScope::OwnedVehiclesOf(requester.user_id),
            _ => RatingScope::Unrestricted,
        }
    }
}

/// Full filter for a rating list query. All present conditions are ANDed.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingListFilter {
    pub scope: RatingScope,
    pub vehicle_id: Option<DbId>,
    pub driver_id: Option<DbId>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    /// When set, only public ratings or ratings authored by this user match.
    pub public_or_author: Option<DbId>,
}

impl RatingListFilter {
    /// Build the filter for `requester`. Non-admins additionally see only
    /// public ratings and their own.
    pub fn for_requester(requester: &Requester) -> Self {
        let public_or_author = if requester.is_admin() {
            None
        } else {
            Some(requester.user_id)
        };
        Self {
            scope: RatingScope::for_requester(requester),
            vehicle_id: None,
            driver_id: None,
            min_score: None,
            max_score: None,
            public_or_author,
        }
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::roles::{ROLE_BUSINESS_OWNER, ROLE_DRIVER};

    const AUTHOR: DbId = 1;

    #[test]
    fn test_admin_sees_private_rating() {
        let admin = Requester::new(99, ROLE_ADMIN);
        assert_eq!(rating_visibility(&admin, AUTHOR, false), Visibility::Visible);
    }

    #[test]
    fn test_author_sees_own_private_rating() {
        let author = Requester::new(AUTHOR, ROLE_CLIENT);
        assert_eq!(rating_visibility(&author, AUTHOR, false), Visibility::Visible);
    }

    #[test]
    fn test_public_rating_visible_to_anyone() {
        let other = Requester::new(7, ROLE_DRIVER);
        assert_eq!(rating_visibility(&other, AUTHOR, true), Visibility::Visible);
    }

    #[test]
    fn test_private_rating_needs_vehicle_owner() {
        let owner = Requester::new(2, ROLE_CAR_OWNER);
        assert_eq!(
            rating_visibility(&owner, AUTHOR, false),
            Visibility::VehicleOwnerOnly
        );
        assert!(confirm_vehicle_owner(&owner, 2).is_ok());
        assert_matches!(confirm_vehicle_owner(&owner, 3), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn test_private_rating_denied_to_other_roles() {
        for role in [ROLE_CLIENT, ROLE_DRIVER, ROLE_BUSINESS_OWNER] {
            let other = Requester::new(3, role);
            assert_eq!(rating_visibility(&other, AUTHOR, false), Visibility::Denied);
        }
    }

    #[test]
    fn test_scope_per_role() {
        assert_eq!(
            RatingScope::for_requester(&Requester::new(5, ROLE_CLIENT)),
            RatingScope::AuthoredBy(5)
        );
        assert_eq!(
            RatingScope::for_requester(&Requester::new(5, ROLE_CAR_OWNER)),
            RatingScope::OwnedVehiclesOf(5)
        );
        assert_eq!(
            RatingScope::for_requester(&Requester::new(5, ROLE_ADMIN)),
            RatingScope::Unrestricted
        );
        assert_eq!(
            RatingScope::for_requester(&Requester::new(5, ROLE_DRIVER)),
            RatingScope::Unrestricted
        );
    }

    #[test]
    fn test_non_admin_filter_restricts_to_public_or_own() {
        let filter = RatingListFilter::for_requester(&Requester::new(8, ROLE_CAR_OWNER));
        assert_eq!(filter.public_or_author, Some(8));

        let filter = RatingListFilter::for_requester(&Requester::new(8, ROLE_ADMIN));
        assert_eq!(filter.public_or_author, None);
    }
}
