use crate::domain::model::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Restaurant {
    pub id: Option<i64>,
    pub name: String,
    pub address: String,
    pub cuisine_type_id: Option<i64>,
    /// Daily opening window, `HH:MM-HH:MM`.
    pub opening_hours: String,
    /// Registered owner. Set from the caller on creation, never changed by updates.
    pub owner_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Restaurant {
    /// A restaurant owned by `owner`, not yet persisted.
    pub fn new(owner: UserId, input: RestaurantInput) -> Self {
        let mut restaurant = Restaurant {
            id: None,
            name: String::new(),
            address: String::new(),
            cuisine_type_id: None,
            opening_hours: String::new(),
            owner_id: Some(owner),
            created_at: Utc::now(),
        };
        restaurant.apply(input);
        restaurant
    }

    /// Replaces the mutable fields. Identity, owner and creation time are kept.
    pub fn apply(&mut self, input: RestaurantInput) {
        self.name = input.name;
        self.address = input.address;
        self.cuisine_type_id = input.cuisine_type_id;
        self.opening_hours = input.opening_hours;
    }
}

/// Body of create and update requests. There is deliberately no owner field.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RestaurantInput {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub cuisine_type_id: Option<i64>,
    pub opening_hours: String,
}
