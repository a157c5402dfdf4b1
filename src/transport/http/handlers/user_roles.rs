use crate::domain::model::{NewUserRole, UserRoleUpdate};
use crate::transport::http::handlers::common::{page_response, parse_body, parse_search, respond, Caller};
use crate::transport::http::types::{ApiResponse, AppState, SearchRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

const NEW_ROLE_SHAPE: &str =
    r#"{"restaurant_id", "name", "description"?, "is_owner"?, "active"?, "editable"?}"#;
const ROLE_UPDATE_SHAPE: &str = r#"{"name", "description"?}"#;

#[utoipa::path(
    post,
    path = "/api/user-roles/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "One page of user roles", body = ApiResponse),
        (status = 400, description = "Invalid filter, sort or page", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn search_user_roles_handler(
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
            .user_roles
            .list_page(request.page, request.size, filters, sorts)
            .await,
    )
}

#[utoipa::path(
    post,
    path = "/api/user-roles",
    params(("x-user-id" = i64, Header, description = "Authenticated caller; must own the restaurant")),
    request_body = NewUserRole,
    responses(
        (status = 201, description = "Role created", body = ApiResponse),
        (status = 400, description = "Invalid field", body = ApiResponse),
        (status = 403, description = "Caller does not own the restaurant", body = ApiResponse)
    )
)]
pub async fn create_user_role_handler(
    State(state): State<AppState>,
    Caller(caller): Caller,
    request: Result<Json<NewUserRole>, JsonRejection>,
) -> impl IntoResponse {
    let input = match parse_body(request, NEW_ROLE_SHAPE) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::CREATED,
        state.services.user_roles.create(caller, input).await,
    )
}

#[utoipa::path(
    get,
    path = "/api/user-roles/{id}",
    params(("id" = i64, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse)
    )
)]
pub async fn get_user_role_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    respond(StatusCode::OK, state.services.user_roles.get(id).await)
}

#[utoipa::path(
    put,
    path = "/api/user-roles/{id}",
    params(
        ("id" = i64, Path, description = "Role id"),
        ("x-user-id" = i64, Header, description = "Authenticated caller; must own the restaurant")
    ),
    request_body = UserRoleUpdate,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse),
        (status = 400, description = "Invalid field", body = ApiResponse),
        (status = 403, description = "Not the owner, or the role is locked", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse)
    )
)]
pub async fn update_user_role_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Caller(caller): Caller,
    request: Result<Json<UserRoleUpdate>, JsonRejection>,
) -> impl IntoResponse {
    let update = match parse_body(request, ROLE_UPDATE_SHAPE) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::OK,
        state.services.user_roles.update(caller, id, update).await,
    )
}

#[utoipa::path(
    post,
    path = "/api/user-roles/{id}/activate",
    params(
        ("id" = i64, Path, description = "Role id"),
        ("x-user-id" = i64, Header, description = "Authenticated caller; must own the restaurant")
    ),
    responses(
        (status = 200, description = "Role activated", body = ApiResponse),
        (status = 403, description = "Not the owner, or the role is locked", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse)
    )
)]
pub async fn activate_user_role_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Caller(caller): Caller,
) -> impl IntoResponse {
    respond(
        StatusCode::OK,
        state.services.user_roles.activate(caller, id).await,
    )
}

#[utoipa::path(
    post,
    path = "/api/user-roles/{id}/deactivate",
    params(
        ("id" = i64, Path, description = "Role id"),
        ("x-user-id" = i64, Header, description = "Authenticated caller; must own the restaurant")
    ),
    responses(
        (status = 200, description = "Role deactivated", body = ApiResponse),
        (status = 403, description = "Not the owner, or the role is locked", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse)
    )
)]
pub async fn deactivate_user_role_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Caller(caller): Caller,
) -> impl IntoResponse {
    respond(
        StatusCode::OK,
        state.services.user_roles.deactivate(caller, id).await,
    )
}
