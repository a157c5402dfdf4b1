//! User roles and their two variants.
//!
//! A role is either a plain [`UserRole::Generic`] role or a
//! [`UserRole::RestaurantOwner`] role. Persistence stores the variant as a
//! single `is_owner` flag next to the shared [`RoleData`].

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

/// State shared by both role variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RoleData {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub active: bool,
    /// Whether the role may be toggled after creation.
    pub editable: bool,
    pub restaurant_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRole {
    Generic(RoleData),
    RestaurantOwner(RoleData),
}

impl UserRole {
    /// Rebuilds the variant recorded by the stored `is_owner` flag.
    pub fn from_persisted(is_owner: bool, data: RoleData) -> Self {
        if is_owner {
            UserRole::RestaurantOwner(data)
        } else {
            UserRole::Generic(data)
        }
    }

    /// Inverse of [`UserRole::from_persisted`].
    pub fn to_persisted(&self) -> (RoleData, bool) {
        (self.data().clone(), self.is_owner())
    }

    /// A role built from a creation request. `active` and `editable` default to `true`.
    pub fn create(input: NewUserRole) -> Self {
        let data = RoleData {
            id: None,
            name: input.name,
            description: input.description,
            active: input.active.unwrap_or(true),
            editable: input.editable.unwrap_or(true),
            restaurant_id: input.restaurant_id,
        };
        UserRole::from_persisted(input.is_owner, data)
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, UserRole::RestaurantOwner(_))
    }

    pub fn data(&self) -> &RoleData {
        match self {
            UserRole::Generic(data) | UserRole::RestaurantOwner(data) => data,
        }
    }

    fn data_mut(&mut self) -> &mut RoleData {
        match self {
            UserRole::Generic(data) | UserRole::RestaurantOwner(data) => data,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.data().id
    }

    pub fn restaurant_id(&self) -> Option<i64> {
        self.data().restaurant_id
    }

    pub fn apply(&mut self, update: UserRoleUpdate) {
        let data = self.data_mut();
        data.name = update.name;
        data.description = update.description;
    }

    /// Owner roles can only be toggled or edited while `editable` is set.
    /// Generic roles are always toggleable.
    pub fn ensure_editable(&self) -> Result<(), DomainError> {
        match self {
            UserRole::RestaurantOwner(data) if !data.editable => Err(DomainError::Forbidden(
                format!("role {} is not editable", data.id.unwrap_or_default()),
            )),
            UserRole::RestaurantOwner(_) | UserRole::Generic(_) => Ok(()),
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.data_mut().active = active;
    }
}

impl Serialize for UserRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct View<'a> {
            #[serde(flatten)]
            data: &'a RoleData,
            is_owner: bool,
        }

        View {
            data: self.data(),
            is_owner: self.is_owner(),
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewUserRole {
    #[serde(default)]
    pub restaurant_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub editable: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserRoleUpdate {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(editable: bool) -> RoleData {
        RoleData {
            id: Some(7),
            name: "Garçom".to_string(),
            description: "Atende as mesas".to_string(),
            active: true,
            editable,
            restaurant_id: Some(1),
        }
    }

    #[test]
    fn persisted_round_trip_keeps_variant_and_fields() {
        for role in [
            UserRole::Generic(data(true)),
            UserRole::RestaurantOwner(data(false)),
        ] {
            let (stored, is_owner) = role.to_persisted();
            assert_eq!(UserRole::from_persisted(is_owner, stored), role);
        }
    }

    #[test]
    fn owner_flag_selects_the_variant() {
        assert!(UserRole::from_persisted(true, data(true)).is_owner());
        assert!(!UserRole::from_persisted(false, data(true)).is_owner());
    }

    #[test]
    fn creation_defaults_active_and_editable() {
        let role = UserRole::create(NewUserRole {
            restaurant_id: Some(3),
            name: "Cozinheiro".to_string(),
            description: String::new(),
            is_owner: true,
            active: None,
            editable: None,
        });
        assert!(role.is_owner());
        assert!(role.data().active);
        assert!(role.data().editable);

        let inactive = UserRole::create(NewUserRole {
            restaurant_id: None,
            name: "Cozinheiro".to_string(),
            description: String::new(),
            is_owner: false,
            active: Some(false),
            editable: None,
        });
        assert!(!inactive.data().active);
    }

    #[test]
    fn only_non_editable_owner_roles_are_locked() {
        assert!(UserRole::Generic(data(false)).ensure_editable().is_ok());
        assert!(UserRole::RestaurantOwner(data(true)).ensure_editable().is_ok());
        let err = UserRole::RestaurantOwner(data(false))
            .ensure_editable()
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[test]
    fn serializes_flat_with_owner_flag() {
        let json = serde_json::to_value(UserRole::RestaurantOwner(data(true))).unwrap();
        assert_eq!(json["name"], "Garçom");
        assert_eq!(json["is_owner"], true);
        assert_eq!(json["restaurant_id"], 1);
    }
}
