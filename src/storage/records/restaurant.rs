use crate::domain::model::{Restaurant, UserId};
use crate::domain::query::{DomainMapper, FieldKind, FieldMap};
use crate::storage::Record;
use chrono::{DateTime, Utc};
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RestaurantRecord {
    pub id: Option<i64>,
    pub name: String,
    pub address: String,
    pub cuisine_type_id: Option<i64>,
    pub opening_hours: String,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

static FIELDS: LazyLock<FieldMap<RestaurantRecord>> = LazyLock::new(|| {
    FieldMap::new("id", |r: &RestaurantRecord| r.id.into())
        .field("name", FieldKind::Text, |r| r.name.as_str().into())
        .field("address", FieldKind::Text, |r| r.address.as_str().into())
        .field("cuisine_type_id", FieldKind::Integer, |r| r.cuisine_type_id.into())
        .field("opening_hours", FieldKind::Text, |r| r.opening_hours.as_str().into())
        .field("owner_id", FieldKind::Integer, |r| r.owner_id.into())
        .field("created_at", FieldKind::Timestamp, |r| r.created_at.into())
});

impl Record for RestaurantRecord {
    const TABLE: &'static str = "restaurants";

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

pub struct RestaurantMapper;

impl DomainMapper<RestaurantRecord, Restaurant> for RestaurantMapper {
    fn to_domain(&self, r: RestaurantRecord) -> Restaurant {
        Restaurant {
            id: r.id,
            name: r.name,
            address: r.address,
            cuisine_type_id: r.cuisine_type_id,
            opening_hours: r.opening_hours,
            owner_id: r.owner_id.map(UserId),
            created_at: r.created_at,
        }
    }

    fn to_storage(&self, r: &Restaurant) -> RestaurantRecord {
        RestaurantRecord {
            id: r.id,
            name: r.name.clone(),
            address: r.address.clone(),
            cuisine_type_id: r.cuisine_type_id,
            opening_hours: r.opening_hours.clone(),
            owner_id: r.owner_id.map(UserId::get),
            created_at: r.created_at,
        }
    }
}
