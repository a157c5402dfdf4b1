use super::{rules, OwnershipValidator};
use crate::domain::error::DomainError;
use crate::domain::model::{MenuItem, Restaurant};

pub struct MenuItemValidator;

impl OwnershipValidator for MenuItemValidator {
    type Resource = MenuItem;

    const RESOURCE: &'static str = "menu_item";

    fn check_fields(item: &MenuItem) -> Result<(), DomainError> {
        rules::name(&item.name)?;
        rules::description(&item.description)?;
        rules::price(item.price)
    }

    fn owning_restaurant<'a>(
        item: &'a MenuItem,
        parent: Option<&'a Restaurant>,
    ) -> Option<&'a Restaurant> {
        parent.filter(|r| r.id.is_some() && r.id == item.restaurant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{NewMenuItem, UserId};
    use crate::domain::validation::fixtures::restaurant;

    fn item(restaurant_id: i64, price: f64) -> MenuItem {
        MenuItem::new(NewMenuItem {
            restaurant_id,
            name: "Lasanha".to_string(),
            description: "Massa fresca".to_string(),
            price,
            dine_in_only: false,
            photo_path: None,
        })
    }

    #[test]
    fn owner_of_parent_restaurant_passes() {
        let parent = restaurant(4, 1);
        assert!(MenuItemValidator::validate(Some(&item(4, 32.5)), Some(&parent), UserId(1)).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let parent = restaurant(4, 1);
        let err = MenuItemValidator::validate(Some(&item(4, 32.5)), Some(&parent), UserId(2))
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[test]
    fn non_positive_price_is_invalid() {
        let parent = restaurant(4, 1);
        let err = MenuItemValidator::validate(Some(&item(4, 0.0)), Some(&parent), UserId(1))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn mismatched_or_missing_parent_is_invalid() {
        let other = restaurant(5, 1);
        let err = MenuItemValidator::validate(Some(&item(4, 10.0)), Some(&other), UserId(1))
            .unwrap_err();
        assert!(err.is_validation());
        let err = MenuItemValidator::validate(Some(&item(4, 10.0)), None, UserId(1)).unwrap_err();
        assert!(err.is_validation());
    }
}
