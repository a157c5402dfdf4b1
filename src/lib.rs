pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{AppServices, Services};
pub use domain::error::DomainError;
pub use domain::model::UserId;
pub use infra::config::Config;
pub use storage::{AnyStorage, MemoryStorage, PgStorage};
