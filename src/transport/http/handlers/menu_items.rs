use crate::domain::model::{MenuItemUpdate, NewMenuItem};
use crate::transport::http::handlers::common::{page_response, parse_body, parse_search, respond, Caller};
use crate::transport::http::types::{ApiResponse, AppState, SearchRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

const NEW_ITEM_SHAPE: &str =
    r#"{"restaurant_id", "name", "description"?, "price", "dine_in_only"?, "photo_path"?}"#;
const ITEM_UPDATE_SHAPE: &str = r#"{"name", "description"?, "price", "dine_in_only"?, "photo_path"?}"#;

#[utoipa::path(
    post,
    path = "/api/menu-items/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "One page of menu items", body = ApiResponse),
        (status = 400, description = "Invalid filter, sort or page", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn search_menu_items_handler(
    State(state): State<AppState>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> impl IntoResponse {
    let (request, filters, sorts) = match parse_search(request) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    page_response(
        state
            .services
            .menu_items
            .list_page(request.page, request.size, filters, sorts)
            .await,
    )
}

#[utoipa::path(
    post,
    path = "/api/menu-items",
    params(("x-user-id" = i64, Header, description = "Authenticated caller; must own the restaurant")),
    request_body = NewMenuItem,
    responses(
        (status = 201, description = "Menu item created", body = ApiResponse),
        (status = 400, description = "Invalid field", body = ApiResponse),
        (status = 401, description = "Missing caller identity", body = ApiResponse),
        (status = 403, description = "Caller does not own the restaurant", body = ApiResponse)
    )
)]
pub async fn create_menu_item_handler(
    State(state): State<AppState>,
    Caller(caller): Caller,
    request: Result<Json<NewMenuItem>, JsonRejection>,
) -> impl IntoResponse {
    let input = match parse_body(request, NEW_ITEM_SHAPE) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::CREATED,
        state.services.menu_items.create(caller, input).await,
    )
}

#[utoipa::path(
    get,
    path = "/api/menu-items/{id}",
    params(("id" = i64, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Menu item", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse)
    )
)]
pub async fn get_menu_item_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    respond(StatusCode::OK, state.services.menu_items.get(id).await)
}

#[utoipa::path(
    put,
    path = "/api/menu-items/{id}",
    params(
        ("id" = i64, Path, description = "Menu item id"),
        ("x-user-id" = i64, Header, description = "Authenticated caller; must own the restaurant")
    ),
    request_body = MenuItemUpdate,
    responses(
        (status = 200, description = "Menu item updated", body = ApiResponse),
        (status = 400, description = "Invalid field", body = ApiResponse),
        (status = 403, description = "Caller does not own the restaurant", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse)
    )
)]
pub async fn update_menu_item_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Caller(caller): Caller,
    request: Result<Json<MenuItemUpdate>, JsonRejection>,
) -> impl IntoResponse {
    let update = match parse_body(request, ITEM_UPDATE_SHAPE) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::OK,
        state.services.menu_items.update(caller, id, update).await,
    )
}
