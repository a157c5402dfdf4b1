use super::{rules, OwnershipValidator};
use crate::domain::error::DomainError;
use crate::domain::model::Restaurant;

/// A restaurant is its own owning restaurant.
pub struct RestaurantValidator;

impl OwnershipValidator for RestaurantValidator {
    type Resource = Restaurant;

    const RESOURCE: &'static str = "restaurant";

    fn check_fields(restaurant: &Restaurant) -> Result<(), DomainError> {
        rules::name(&restaurant.name)?;
        rules::address(&restaurant.address)?;
        rules::opening_hours(&restaurant.opening_hours)
    }

    fn owning_restaurant<'a>(
        restaurant: &'a Restaurant,
        _parent: Option<&'a Restaurant>,
    ) -> Option<&'a Restaurant> {
        Some(restaurant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::UserId;
    use crate::domain::validation::fixtures::restaurant;

    #[test]
    fn owner_passes() {
        let r = restaurant(1, 1);
        assert!(RestaurantValidator::validate(Some(&r), None, UserId(1)).is_ok());
    }

    #[test]
    fn other_caller_is_forbidden_not_invalid() {
        let r = restaurant(1, 1);
        let err = RestaurantValidator::validate(Some(&r), None, UserId(2)).unwrap_err();
        assert!(err.is_forbidden());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), crate::domain::error::NOT_PERMITTED);
    }

    #[test]
    fn field_rules_run_before_ownership() {
        let mut r = restaurant(1, 1);
        r.name = "ab".to_string();
        let err = RestaurantValidator::validate(Some(&r), None, UserId(2)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn missing_resource_is_reported_first() {
        let err = RestaurantValidator::validate(None, None, UserId(1)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn restaurant_without_owner_is_forbidden() {
        let mut r = restaurant(1, 1);
        r.owner_id = None;
        let err = RestaurantValidator::validate(Some(&r), None, UserId(1)).unwrap_err();
        assert!(err.is_forbidden());
    }
}
