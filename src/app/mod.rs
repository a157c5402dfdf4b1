//! Use cases. Reads go straight through the pagination engine; every write
//! runs inside one transaction covering the row-locked load, validation and
//! save.

use crate::domain::error::DomainError;
use crate::domain::model::Restaurant;
use crate::domain::query::DomainMapper;
use crate::storage::records::{RestaurantMapper, RestaurantRecord};
use crate::storage::{AnyStorage, Storage, Transaction};
use std::sync::Arc;

pub mod cuisine_types;
pub mod menu_items;
pub mod restaurants;
pub mod user_roles;
pub mod users;

pub use cuisine_types::CuisineTypeService;
pub use menu_items::MenuItemService;
pub use restaurants::RestaurantService;
pub use user_roles::UserRoleService;
pub use users::UserService;

/// Every service over one shared storage handle.
pub struct Services<S> {
    pub cuisine_types: CuisineTypeService<S>,
    pub users: UserService<S>,
    pub restaurants: RestaurantService<S>,
    pub menu_items: MenuItemService<S>,
    pub user_roles: UserRoleService<S>,
}

pub type AppServices = Services<AnyStorage>;

impl<S: Storage> Services<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            cuisine_types: CuisineTypeService::new(Arc::clone(&storage)),
            users: UserService::new(Arc::clone(&storage)),
            restaurants: RestaurantService::new(Arc::clone(&storage)),
            menu_items: MenuItemService::new(Arc::clone(&storage)),
            user_roles: UserRoleService::new(storage),
        }
    }
}

/// Loads and row-locks the restaurant a child resource points at.
pub(crate) async fn lock_restaurant<T: Transaction>(
    tx: &mut T,
    id: Option<i64>,
) -> Result<Option<Restaurant>, DomainError> {
    let Some(id) = id else {
        return Ok(None);
    };
    let record = tx.find_for_update::<RestaurantRecord>(id).await?;
    Ok(record.map(|r| RestaurantMapper.to_domain(r)))
}
