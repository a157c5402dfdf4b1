use crate::domain::error::DomainError;
use crate::domain::model::UserId;
use crate::domain::query::{FilterDescriptor, PageResult, SortDescriptor};
use crate::transport::http::types::{json_422, ApiResponse, SearchRequest, SEARCH_SHAPE};
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Header carrying the authenticated user id, set by the authentication layer in front of us.
pub const CALLER_HEADER: &str = "x-user-id";

/// Identity of the user making the request.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub UserId);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = (StatusCode, Json<ApiResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let unauthorized = |message: String| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse {
                    success: false,
                    data: None,
                    error: Some(message),
                }),
            )
        };
        let raw = parts
            .headers
            .get(CALLER_HEADER)
            .ok_or_else(|| unauthorized(format!("Missing {} header", CALLER_HEADER)))?;
        raw.to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(|id| Caller(UserId(id)))
            .ok_or_else(|| unauthorized(format!("Invalid {} header", CALLER_HEADER)))
    }
}

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::InvalidQuery(_) | DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(err: DomainError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(error = ?err, "request failed");
    } else {
        tracing::debug!(%status, error = %err, "request rejected");
    }
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(err.to_string()),
        }),
    )
        .into_response()
}

pub fn data_response<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_value(value) {
        Ok(data) => (
            status,
            Json(ApiResponse {
                success: true,
                data: Some(data),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => error_response(DomainError::Storage(anyhow::anyhow!(
            "failed to encode response: {}",
            e
        ))),
    }
}

pub fn respond<T: Serialize>(status: StatusCode, result: Result<T, DomainError>) -> Response {
    match result {
        Ok(value) => data_response(status, &value),
        Err(e) => error_response(e),
    }
}

#[derive(Serialize)]
struct PageBody<'a, T> {
    content: &'a [T],
    page_number: i64,
    page_size: i64,
    total_elements: i64,
    total_pages: i64,
}

pub fn page_response<T: Serialize>(result: Result<PageResult<T>, DomainError>) -> Response {
    match result {
        Ok(page) => data_response(
            StatusCode::OK,
            &PageBody {
                content: &page.content,
                page_number: page.page_number,
                page_size: page.page_size,
                total_elements: page.total_elements,
                total_pages: page.total_pages(),
            },
        ),
        Err(e) => error_response(e),
    }
}

/// Unwraps a search body into its descriptors, or the response to send instead.
pub fn parse_search(
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<(SearchRequest, Vec<FilterDescriptor>, Vec<SortDescriptor>), Response> {
    let Json(request) = request.map_err(|e| json_422(e, SEARCH_SHAPE).into_response())?;
    let (filters, sorts) = request
        .descriptors()
        .map_err(|e| error_response(DomainError::from(e)))?;
    Ok((request, filters, sorts))
}

/// Unwraps a JSON body, answering 422 with the expected shape on failure.
pub fn parse_body<T>(request: Result<Json<T>, JsonRejection>, expected: &str) -> Result<T, Response> {
    request
        .map(|Json(body)| body)
        .map_err(|e| json_422(e, expected).into_response())
}
