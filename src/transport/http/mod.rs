pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod cuisine_types;
    pub mod health;
    pub mod menu_items;
    pub mod restaurants;
    pub mod user_roles;
    pub mod users;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
