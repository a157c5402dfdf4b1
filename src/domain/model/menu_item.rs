use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MenuItem {
    pub id: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Only served on the premises.
    pub dine_in_only: bool,
    pub photo_path: Option<String>,
}

impl MenuItem {
    pub fn new(item: NewMenuItem) -> Self {
        MenuItem {
            id: None,
            restaurant_id: Some(item.restaurant_id),
            name: item.name,
            description: item.description,
            price: item.price,
            dine_in_only: item.dine_in_only,
            photo_path: item.photo_path,
        }
    }

    /// Replaces the mutable fields; the owning restaurant never changes.
    pub fn apply(&mut self, update: MenuItemUpdate) {
        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.dine_in_only = update.dine_in_only;
        self.photo_path = update.photo_path;
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewMenuItem {
    pub restaurant_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub dine_in_only: bool,
    #[serde(default)]
    pub photo_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MenuItemUpdate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub dine_in_only: bool,
    #[serde(default)]
    pub photo_path: Option<String>,
}
