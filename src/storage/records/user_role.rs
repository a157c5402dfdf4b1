use crate::domain::model::{RoleData, UserRole};
use crate::domain::query::{DomainMapper, FieldKind, FieldMap};
use crate::storage::Record;
use std::sync::LazyLock;

/// Flat row for both role variants; `is_owner` carries the variant.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct UserRoleRecord {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub editable: bool,
    pub is_owner: bool,
    pub restaurant_id: Option<i64>,
}

static FIELDS: LazyLock<FieldMap<UserRoleRecord>> = LazyLock::new(|| {
    FieldMap::new("id", |r: &UserRoleRecord| r.id.into())
        .field("name", FieldKind::Text, |r| r.name.as_str().into())
        .field("description", FieldKind::Text, |r| r.description.as_str().into())
        .field("active", FieldKind::Boolean, |r| r.active.into())
        .field("editable", FieldKind::Boolean, |r| r.editable.into())
        .field("is_owner", FieldKind::Boolean, |r| r.is_owner.into())
        .field("restaurant_id", FieldKind::Integer, |r| r.restaurant_id.into())
});

impl Record for UserRoleRecord {
    const TABLE: &'static str = "user_roles";

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

pub struct UserRoleMapper;

impl DomainMapper<UserRoleRecord, UserRole> for UserRoleMapper {
    fn to_domain(&self, r: UserRoleRecord) -> UserRole {
        let data = RoleData {
            id: r.id,
            name: r.name,
            description: r.description,
            active: r.active,
            editable: r.editable,
            restaurant_id: r.restaurant_id,
        };
        UserRole::from_persisted(r.is_owner, data)
    }

    fn to_storage(&self, role: &UserRole) -> UserRoleRecord {
        let (data, is_owner) = role.to_persisted();
        UserRoleRecord {
            id: data.id,
            name: data.name,
            description: data.description,
            active: data.active,
            editable: data.editable,
            is_owner,
            restaurant_id: data.restaurant_id,
        }
    }
}
