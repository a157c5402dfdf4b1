use crate::domain::model::CuisineType;
use crate::domain::query::{DomainMapper, FieldKind, FieldMap};
use crate::storage::Record;
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CuisineTypeRecord {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
}

static FIELDS: LazyLock<FieldMap<CuisineTypeRecord>> = LazyLock::new(|| {
    FieldMap::new("id", |r: &CuisineTypeRecord| r.id.into())
        .field("name", FieldKind::Text, |r| r.name.as_str().into())
        .field("description", FieldKind::Text, |r| r.description.clone().into())
});

impl Record for CuisineTypeRecord {
    const TABLE: &'static str = "cuisine_types";

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

pub struct CuisineTypeMapper;

impl DomainMapper<CuisineTypeRecord, CuisineType> for CuisineTypeMapper {
    fn to_domain(&self, r: CuisineTypeRecord) -> CuisineType {
        CuisineType {
            id: r.id,
            name: r.name,
            description: r.description,
        }
    }

    fn to_storage(&self, c: &CuisineType) -> CuisineTypeRecord {
        CuisineTypeRecord {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
        }
    }
}
