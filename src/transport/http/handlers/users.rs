use crate::domain::model::NewUser;
use crate::transport::http::handlers::common::{page_response, parse_body, parse_search, respond};
use crate::transport::http::types::{ApiResponse, AppState, SearchRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/users/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "One page of users", body = ApiResponse),
        (status = 400, description = "Invalid filter, sort or page", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn search_users_handler(
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
            .users
            .list_page(request.page, request.size, filters, sorts)
            .await,
    )
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = ApiResponse),
        (status = 400, description = "Invalid field", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_user_handler(
    State(state): State<AppState>,
    request: Result<Json<NewUser>, JsonRejection>,
) -> impl IntoResponse {
    let input = match parse_body(request, r#"{"name", "email", "login", "role_id"?}"#) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    respond(StatusCode::CREATED, state.services.users.create(input).await)
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse)
    )
)]
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    respond(StatusCode::OK, state.services.users.get(id).await)
}
