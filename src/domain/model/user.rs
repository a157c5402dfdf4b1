use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub login: String,
    /// Role assigned to the user, if any.
    pub role_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub login: String,
    #[serde(default)]
    pub role_id: Option<i64>,
}
