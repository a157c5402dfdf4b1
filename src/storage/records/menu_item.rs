use crate::domain::model::MenuItem;
use crate::domain::query::{DomainMapper, FieldKind, FieldMap};
use crate::storage::Record;
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MenuItemRecord {
    pub id: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub dine_in_only: bool,
    pub photo_path: Option<String>,
}

static FIELDS: LazyLock<FieldMap<MenuItemRecord>> = LazyLock::new(|| {
    FieldMap::new("id", |r: &MenuItemRecord| r.id.into())
        .field("restaurant_id", FieldKind::Integer, |r| r.restaurant_id.into())
        .field("name", FieldKind::Text, |r| r.name.as_str().into())
        .field("description", FieldKind::Text, |r| r.description.as_str().into())
        .field("price", FieldKind::Decimal, |r| r.price.into())
        .field("dine_in_only", FieldKind::Boolean, |r| r.dine_in_only.into())
        .field("photo_path", FieldKind::Text, |r| r.photo_path.clone().into())
});

impl Record for MenuItemRecord {
    const TABLE: &'static str = "menu_items";

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

pub struct MenuItemMapper;

impl DomainMapper<MenuItemRecord, MenuItem> for MenuItemMapper {
    fn to_domain(&self, r: MenuItemRecord) -> MenuItem {
        MenuItem {
            id: r.id,
            restaurant_id: r.restaurant_id,
            name: r.name,
            description: r.description,
            price: r.price,
            dine_in_only: r.dine_in_only,
            photo_path: r.photo_path,
        }
    }

    fn to_storage(&self, m: &MenuItem) -> MenuItemRecord {
        MenuItemRecord {
            id: m.id,
            restaurant_id: m.restaurant_id,
            name: m.name.clone(),
            description: m.description.clone(),
            price: m.price,
            dine_in_only: m.dine_in_only,
            photo_path: m.photo_path.clone(),
        }
    }
}
