//! Persisted row types, their filterable field maps and their domain mappers.

mod cuisine_type;
mod menu_item;
mod restaurant;
mod user;
mod user_role;

pub use cuisine_type::{CuisineTypeMapper, CuisineTypeRecord};
pub use menu_item::{MenuItemMapper, MenuItemRecord};
pub use restaurant::{RestaurantMapper, RestaurantRecord};
pub use user::{UserMapper, UserRecord};
pub use user_role::{UserRoleMapper, UserRoleRecord};
