use crate::domain::model::NewCuisineType;
use crate::transport::http::handlers::common::{page_response, parse_body, parse_search, respond};
use crate::transport::http::types::{ApiResponse, AppState, SearchRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/cuisine-types/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "One page of cuisine types", body = ApiResponse),
        (status = 400, description = "Invalid filter, sort or page", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn search_cuisine_types_handler(
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
            .cuisine_types
            .list_page(request.page, request.size, filters, sorts)
            .await,
    )
}

#[utoipa::path(
    post,
    path = "/api/cuisine-types",
    request_body = NewCuisineType,
    responses(
        (status = 201, description = "Cuisine type created", body = ApiResponse),
        (status = 400, description = "Invalid field", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_cuisine_type_handler(
    State(state): State<AppState>,
    request: Result<Json<NewCuisineType>, JsonRejection>,
) -> impl IntoResponse {
    let input = match parse_body(request, r#"{"name", "description"?}"#) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::CREATED,
        state.services.cuisine_types.create(input).await,
    )
}
