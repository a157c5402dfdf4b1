use super::{rules, OwnershipValidator};
use crate::domain::error::DomainError;
use crate::domain::model::{Restaurant, UserId, UserRole};

pub struct UserRoleValidator;

impl OwnershipValidator for UserRoleValidator {
    type Resource = UserRole;

    const RESOURCE: &'static str = "user_role";

    fn check_fields(role: &UserRole) -> Result<(), DomainError> {
        rules::name(&role.data().name)?;
        rules::description(&role.data().description)
    }

    fn owning_restaurant<'a>(
        role: &'a UserRole,
        parent: Option<&'a Restaurant>,
    ) -> Option<&'a Restaurant> {
        parent.filter(|r| r.id.is_some() && r.id == role.restaurant_id())
    }
}

impl UserRoleValidator {
    /// Checks for activate/deactivate. Locked owner roles are rejected before
    /// anything else, whoever the caller is.
    pub fn validate_toggle(
        role: &UserRole,
        parent: Option<&Restaurant>,
        caller: UserId,
    ) -> Result<(), DomainError> {
        role.ensure_editable()?;
        Self::validate(Some(role), parent, caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RoleData;
    use crate::domain::validation::fixtures::restaurant;

    fn owner_role(editable: bool) -> UserRole {
        UserRole::RestaurantOwner(RoleData {
            id: Some(9),
            name: "Dono".to_string(),
            description: String::new(),
            active: true,
            editable,
            restaurant_id: Some(2),
        })
    }

    #[test]
    fn locked_owner_role_rejects_even_the_owner() {
        let parent = restaurant(2, 1);
        let err = UserRoleValidator::validate_toggle(&owner_role(false), Some(&parent), UserId(1))
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[test]
    fn editable_owner_role_toggles_for_owner_only() {
        let parent = restaurant(2, 1);
        assert!(UserRoleValidator::validate_toggle(&owner_role(true), Some(&parent), UserId(1)).is_ok());
        let err = UserRoleValidator::validate_toggle(&owner_role(true), Some(&parent), UserId(3))
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[test]
    fn role_without_restaurant_is_invalid() {
        let role = UserRole::Generic(RoleData {
            id: None,
            name: "Garçom".to_string(),
            description: String::new(),
            active: true,
            editable: true,
            restaurant_id: None,
        });
        let err = UserRoleValidator::validate(Some(&role), None, UserId(1)).unwrap_err();
        assert!(err.is_validation());
    }
}
