use crate::domain::model::RestaurantInput;
use crate::transport::http::handlers::common::{page_response, parse_body, parse_search, respond, Caller};
use crate::transport::http::types::{ApiResponse, AppState, SearchRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

const RESTAURANT_SHAPE: &str =
    r#"{"name", "address", "cuisine_type_id"?, "opening_hours": "HH:MM-HH:MM"}"#;

#[utoipa::path(
    post,
    path = "/api/restaurants/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "One page of restaurants", body = ApiResponse),
        (status = 400, description = "Invalid filter, sort or page", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn search_restaurants_handler(
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
            .restaurants
            .list_page(request.page, request.size, filters, sorts)
            .await,
    )
}

#[utoipa::path(
    post,
    path = "/api/restaurants",
    params(("x-user-id" = i64, Header, description = "Authenticated caller; becomes the owner")),
    request_body = RestaurantInput,
    responses(
        (status = 201, description = "Restaurant created", body = ApiResponse),
        (status = 400, description = "Invalid field", body = ApiResponse),
        (status = 401, description = "Missing caller identity", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_restaurant_handler(
    State(state): State<AppState>,
    Caller(caller): Caller,
    request: Result<Json<RestaurantInput>, JsonRejection>,
) -> impl IntoResponse {
    let input = match parse_body(request, RESTAURANT_SHAPE) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::CREATED,
        state.services.restaurants.create(caller, input).await,
    )
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}",
    params(("id" = i64, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse)
    )
)]
pub async fn get_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    respond(StatusCode::OK, state.services.restaurants.get(id).await)
}

#[utoipa::path(
    put,
    path = "/api/restaurants/{id}",
    params(
        ("id" = i64, Path, description = "Restaurant id"),
        ("x-user-id" = i64, Header, description = "Authenticated caller; must be the owner")
    ),
    request_body = RestaurantInput,
    responses(
        (status = 200, description = "Restaurant updated", body = ApiResponse),
        (status = 400, description = "Invalid field", body = ApiResponse),
        (status = 401, description = "Missing caller identity", body = ApiResponse),
        (status = 403, description = "Caller does not own the restaurant", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse)
    )
)]
pub async fn update_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Caller(caller): Caller,
    request: Result<Json<RestaurantInput>, JsonRejection>,
) -> impl IntoResponse {
    let input = match parse_body(request, RESTAURANT_SHAPE) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::OK,
        state.services.restaurants.update(caller, id, input).await,
    )
}
