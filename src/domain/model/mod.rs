//! Domain objects and their write-side inputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub mod cuisine_type;
pub mod menu_item;
pub mod restaurant;
pub mod role;
pub mod user;

pub use cuisine_type::{CuisineType, NewCuisineType};
pub use menu_item::{MenuItem, MenuItemUpdate, NewMenuItem};
pub use restaurant::{Restaurant, RestaurantInput};
pub use role::{NewUserRole, RoleData, UserRole, UserRoleUpdate};
pub use user::{NewUser, User};

/// Authenticated identity of a user, as resolved by the authentication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId(id)
    }
}
