//! Ownership authorization and field rules for every mutable resource.
//!
//! Each validator runs the same ordered checks and stops at the first failure:
//! the resource must be present, its fields must pass their rules, its owning
//! restaurant must exist with a registered owner, and that owner must be the
//! caller. Only the last check produces [`DomainError::Forbidden`], so callers
//! can tell authorization failures apart from invalid input.

use crate::domain::error::DomainError;
use crate::domain::model::{Restaurant, UserId};

mod menu_item;
mod restaurant;
pub mod rules;
mod user_role;

pub use menu_item::MenuItemValidator;
pub use restaurant::RestaurantValidator;
pub use user_role::UserRoleValidator;

pub trait OwnershipValidator {
    type Resource;

    /// Resource name used in error messages.
    const RESOURCE: &'static str;

    fn check_fields(resource: &Self::Resource) -> Result<(), DomainError>;

    /// The restaurant whose owner controls `resource`. `parent` is the
    /// restaurant loaded by the caller for resources that reference one.
    fn owning_restaurant<'a>(
        resource: &'a Self::Resource,
        parent: Option<&'a Restaurant>,
    ) -> Option<&'a Restaurant>;

    fn validate(
        resource: Option<&Self::Resource>,
        parent: Option<&Restaurant>,
        caller: UserId,
    ) -> Result<(), DomainError> {
        let resource =
            resource.ok_or_else(|| DomainError::validation(Self::RESOURCE, "is required"))?;
        Self::check_fields(resource)?;

        let restaurant = Self::owning_restaurant(resource, parent).ok_or_else(|| {
            DomainError::validation("restaurant_id", "must reference an existing restaurant")
        })?;
        let owner = restaurant.owner_id.ok_or_else(DomainError::not_permitted)?;
        if owner != caller {
            tracing::debug!(
                resource = Self::RESOURCE,
                %owner,
                %caller,
                "ownership check rejected caller"
            );
            return Err(DomainError::not_permitted());
        }
        Ok(())
    }
}
