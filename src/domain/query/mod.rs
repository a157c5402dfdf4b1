//! Dynamic filter / sort / pagination engine.

pub mod descriptor;
pub mod error;
pub mod field;
pub mod pagination;
pub mod predicate;
pub mod translator;

pub use descriptor::{
    FilterDescriptor, Operator, PageRequest, PageResult, SortDescriptor, SortDirection,
};
pub use error::QueryError;
pub use field::{FieldKind, FieldMap, FieldValue};
pub use pagination::{list_page, DomainMapper};
pub use predicate::{OrderKey, Predicate};
pub use translator::{translate, translate_sort};
