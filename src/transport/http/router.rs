use crate::domain::model::{
    CuisineType, MenuItem, MenuItemUpdate, NewCuisineType, NewMenuItem, NewUser, NewUserRole,
    Restaurant, RestaurantInput, RoleData, User, UserId, UserRoleUpdate,
};
use crate::transport::http::handlers::{cuisine_types, health, menu_items, restaurants, user_roles, users};
use crate::transport::http::types::{ApiResponse, AppState, FilterSpec, SearchRequest, SortSpec};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        cuisine_types::search_cuisine_types_handler,
        cuisine_types::create_cuisine_type_handler,
        users::search_users_handler,
        users::create_user_handler,
        users::get_user_handler,
        restaurants::search_restaurants_handler,
        restaurants::create_restaurant_handler,
        restaurants::get_restaurant_handler,
        restaurants::update_restaurant_handler,
        menu_items::search_menu_items_handler,
        menu_items::create_menu_item_handler,
        menu_items::get_menu_item_handler,
        menu_items::update_menu_item_handler,
        user_roles::search_user_roles_handler,
        user_roles::create_user_role_handler,
        user_roles::get_user_role_handler,
        user_roles::update_user_role_handler,
        user_roles::activate_user_role_handler,
        user_roles::deactivate_user_role_handler
    ),
    components(schemas(
        ApiResponse,
        SearchRequest,
        FilterSpec,
        SortSpec,
        UserId,
        CuisineType,
        NewCuisineType,
        User,
        NewUser,
        Restaurant,
        RestaurantInput,
        MenuItem,
        NewMenuItem,
        MenuItemUpdate,
        RoleData,
        NewUserRole,
        UserRoleUpdate
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/cuisine-types",
            post(cuisine_types::create_cuisine_type_handler),
        )
        .route(
            "/api/cuisine-types/search",
            post(cuisine_types::search_cuisine_types_handler),
        )
        .route("/api/users", post(users::create_user_handler))
        .route("/api/users/search", post(users::search_users_handler))
        .route("/api/users/:id", get(users::get_user_handler))
        .route("/api/restaurants", post(restaurants::create_restaurant_handler))
        .route(
            "/api/restaurants/search",
            post(restaurants::search_restaurants_handler),
        )
        .route(
            "/api/restaurants/:id",
            get(restaurants::get_restaurant_handler).put(restaurants::update_restaurant_handler),
        )
        .route("/api/menu-items", post(menu_items::create_menu_item_handler))
        .route(
            "/api/menu-items/search",
            post(menu_items::search_menu_items_handler),
        )
        .route(
            "/api/menu-items/:id",
            get(menu_items::get_menu_item_handler).put(menu_items::update_menu_item_handler),
        )
        .route("/api/user-roles", post(user_roles::create_user_role_handler))
        .route(
            "/api/user-roles/search",
            post(user_roles::search_user_roles_handler),
        )
        .route(
            "/api/user-roles/:id",
            get(user_roles::get_user_role_handler).put(user_roles::update_user_role_handler),
        )
        .route(
            "/api/user-roles/:id/activate",
            post(user_roles::activate_user_role_handler),
        )
        .route(
            "/api/user-roles/:id/deactivate",
            post(user_roles::deactivate_user_role_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
