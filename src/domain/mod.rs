pub mod error;
pub mod model;
pub mod query;
pub mod validation;

pub use error::DomainError;
