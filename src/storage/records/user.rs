use crate::domain::model::User;
use crate::domain::query::{DomainMapper, FieldKind, FieldMap};
use crate::storage::Record;
use chrono::{DateTime, Utc};
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub login: String,
    pub role_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

static FIELDS: LazyLock<FieldMap<UserRecord>> = LazyLock::new(|| {
    FieldMap::new("id", |r: &UserRecord| r.id.into())
        .field("name", FieldKind::Text, |r| r.name.as_str().into())
        .field("email", FieldKind::Text, |r| r.email.as_str().into())
        .field("login", FieldKind::Text, |r| r.login.as_str().into())
        .field("role_id", FieldKind::Integer, |r| r.role_id.into())
        .field("created_at", FieldKind::Timestamp, |r| r.created_at.into())
});

impl Record for UserRecord {
    const TABLE: &'static str = "users";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn fields() -> &'static FieldMap<Self> {
        &FIELDS
    }
}

pub struct UserMapper;

impl DomainMapper<UserRecord, User> for UserMapper {
    fn to_domain(&self, r: UserRecord) -> User {
        User {
            id: r.id,
            name: r.name,
            email: r.email,
            login: r.login,
            role_id: r.role_id,
            created_at: r.created_at,
        }
    }

    fn to_storage(&self, u: &User) -> UserRecord {
        UserRecord {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            login: u.login.clone(),
            role_id: u.role_id,
            created_at: u.created_at,
        }
    }
}
