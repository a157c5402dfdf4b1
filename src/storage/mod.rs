pub mod any;
pub mod memory;
pub mod port;
pub mod postgres;
pub mod records;
pub mod schema;

pub use any::{AnyStorage, AnyTransaction};
pub use memory::{MemoryStorage, MemoryTransaction};
pub use port::{with_transaction, Record, Storage, Transaction};
pub use postgres::{PgStorage, PgTransaction};
