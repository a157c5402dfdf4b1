use crate::app::AppServices;
use crate::domain::query::{FilterDescriptor, QueryError, SortDescriptor, SortDirection};
use crate::storage::AnyStorage;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<AppServices>,
    pub storage: Arc<AnyStorage>,
}

impl AppState {
    pub fn new(storage: AnyStorage) -> Self {
        let storage = Arc::new(storage);
        Self {
            services: Arc::new(AppServices::new(Arc::clone(&storage))),
            storage,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub const DEFAULT_PAGE_SIZE: i64 = 10;

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Body of every `/search` endpoint.
#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
pub struct SearchRequest {
    /// Zero-based page number.
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
    /// ANDed together. An empty list matches every row.
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    /// Applied left to right; later keys only break ties.
    #[serde(default)]
    pub sorts: Vec<SortSpec>,
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct FilterSpec {
    pub field: String,
    /// Scalar carried as text; numbers and booleans are accepted and stringified.
    /// `BETWEEN` takes `"lower,upper"`.
    #[schema(value_type = String)]
    pub value: JsonValue,
    /// One of `EQUALS`, `NOT_EQUALS`, `LIKE`, `GREATER_THAN`, `LESS_THAN`,
    /// `GREATER_EQUAL`, `LESS_EQUAL`, `BETWEEN`.
    pub operator: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct SortSpec {
    pub field: String,
    /// `ASC` (default) or `DESC`.
    #[serde(default)]
    pub direction: Option<String>,
}

impl FilterSpec {
    fn to_descriptor(&self) -> Result<FilterDescriptor, QueryError> {
        let value = match &self.value {
            JsonValue::String(s) => s.clone(),
            JsonValue::Number(n) => n.to_string(),
            JsonValue::Bool(b) => b.to_string(),
            other => {
                return Err(QueryError::InvalidValue {
                    field: self.field.clone(),
                    kind: "scalar",
                    value: other.to_string(),
                })
            }
        };
        FilterDescriptor::parse(self.field.as_str(), value, &self.operator)
    }
}

impl SortSpec {
    fn to_descriptor(&self) -> Result<SortDescriptor, QueryError> {
        let direction = match self.direction.as_deref() {
            Some(raw) => raw.parse::<SortDirection>()?,
            None => SortDirection::default(),
        };
        SortDescriptor::new(self.field.as_str(), direction)
    }
}

impl SearchRequest {
    pub fn descriptors(&self) -> Result<(Vec<FilterDescriptor>, Vec<SortDescriptor>), QueryError> {
        let filters = self
            .filters
            .iter()
            .map(FilterSpec::to_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        let sorts = self
            .sorts
            .iter()
            .map(SortSpec::to_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((filters, sorts))
    }
}

pub const SEARCH_SHAPE: &str =
    r#"{"page": 0, "size": 10, "filters": [{"field", "value", "operator"}], "sorts": [{"field", "direction"}]}"#;

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::Operator;
    use serde_json::json;

    #[test]
    fn search_body_defaults() {
        let req: SearchRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, DEFAULT_PAGE_SIZE);
        let (filters, sorts) = req.descriptors().unwrap();
        assert!(filters.is_empty() && sorts.is_empty());
    }

    #[test]
    fn scalar_values_are_stringified() {
        let req: SearchRequest = serde_json::from_value(json!({
            "filters": [
                {"field": "price", "value": 12.5, "operator": "greater_than"},
                {"field": "dine_in_only", "value": true, "operator": "EQUALS"}
            ],
            "sorts": [{"field": "name", "direction": "desc"}]
        }))
        .unwrap();
        let (filters, sorts) = req.descriptors().unwrap();
        assert_eq!(filters[0].value(), "12.5");
        assert_eq!(filters[0].operator(), Operator::GreaterThan);
        assert_eq!(filters[1].value(), "true");
        assert_eq!(sorts[0].direction(), SortDirection::Desc);
    }

    #[test]
    fn bad_operator_and_between_are_rejected() {
        let req: SearchRequest = serde_json::from_value(json!({
            "filters": [{"field": "price", "value": "1", "operator": "CONTAINS"}]
        }))
        .unwrap();
        assert_eq!(
            req.descriptors().unwrap_err(),
            QueryError::UnsupportedOperator("CONTAINS".to_string())
        );

        let req: SearchRequest = serde_json::from_value(json!({
            "filters": [{"field": "price", "value": "10", "operator": "BETWEEN"}]
        }))
        .unwrap();
        assert!(matches!(
            req.descriptors().unwrap_err(),
            QueryError::InvalidBetween(_)
        ));
    }

    #[test]
    fn null_filter_value_is_rejected() {
        let req: SearchRequest = serde_json::from_value(json!({
            "filters": [{"field": "name", "value": null, "operator": "EQUALS"}]
        }))
        .unwrap();
        assert!(matches!(
            req.descriptors().unwrap_err(),
            QueryError::InvalidValue { .. }
        ));
    }
}
