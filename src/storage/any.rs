//! Runtime backend selection behind one concrete type.

use crate::domain::query::predicate::{OrderKey, Predicate};
use crate::storage::memory::{MemoryStorage, MemoryTransaction};
use crate::storage::postgres::{PgStorage, PgTransaction};
use crate::storage::{Record, Storage, Transaction};
use async_trait::async_trait;

#[derive(Clone)]
pub enum AnyStorage {
    Memory(MemoryStorage),
    Postgres(PgStorage),
}

impl AnyStorage {
    pub fn backend(&self) -> &'static str {
        match self {
            AnyStorage::Memory(_) => "memory",
            AnyStorage::Postgres(_) => "postgres",
        }
    }
}

impl From<MemoryStorage> for AnyStorage {
    fn from(storage: MemoryStorage) -> Self {
        AnyStorage::Memory(storage)
    }
}

impl From<PgStorage> for AnyStorage {
    fn from(storage: PgStorage) -> Self {
        AnyStorage::Postgres(storage)
    }
}

pub enum AnyTransaction {
    Memory(MemoryTransaction),
    Postgres(PgTransaction),
}

#[async_trait]
impl Storage for AnyStorage {
    type Tx = AnyTransaction;

    async fn find_page<R: Record>(
        &self,
        predicate: &Predicate<R>,
        ordering: &[OrderKey<R>],
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<R>> {
        match self {
            AnyStorage::Memory(s) => s.find_page(predicate, ordering, offset, limit).await,
            AnyStorage::Postgres(s) => s.find_page(predicate, ordering, offset, limit).await,
        }
    }

    async fn count<R: Record>(&self, predicate: &Predicate<R>) -> anyhow::Result<i64> {
        match self {
            AnyStorage::Memory(s) => s.count(predicate).await,
            AnyStorage::Postgres(s) => s.count(predicate).await,
        }
    }

    async fn find_by_id<R: Record>(&self, id: i64) -> anyhow::Result<Option<R>> {
        match self {
            AnyStorage::Memory(s) => s.find_by_id(id).await,
            AnyStorage::Postgres(s) => s.find_by_id(id).await,
        }
    }

    async fn begin(&self) -> anyhow::Result<AnyTransaction> {
        Ok(match self {
            AnyStorage::Memory(s) => AnyTransaction::Memory(s.begin().await?),
            AnyStorage::Postgres(s) => AnyTransaction::Postgres(s.begin().await?),
        })
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self {
            AnyStorage::Memory(s) => s.ping().await,
            AnyStorage::Postgres(s) => s.ping().await,
        }
    }
}

#[async_trait]
impl Transaction for AnyTransaction {
    async fn find_by_id<R: Record>(&mut self, id: i64) -> anyhow::Result<Option<R>> {
        match self {
            AnyTransaction::Memory(tx) => tx.find_by_id(id).await,
            AnyTransaction::Postgres(tx) => tx.find_by_id(id).await,
        }
    }

    async fn find_for_update<R: Record>(&mut self, id: i64) -> anyhow::Result<Option<R>> {
        match self {
            AnyTransaction::Memory(tx) => tx.find_for_update(id).await,
            AnyTransaction::Postgres(tx) => tx.find_for_update(id).await,
        }
    }

    async fn count<R: Record>(&mut self, predicate: &Predicate<R>) -> anyhow::Result<i64> {
        match self {
            AnyTransaction::Memory(tx) => tx.count(predicate).await,
            AnyTransaction::Postgres(tx) => tx.count(predicate).await,
        }
    }

    async fn save<R: Record>(&mut self, record: R) -> anyhow::Result<R> {
        match self {
            AnyTransaction::Memory(tx) => tx.save(record).await,
            AnyTransaction::Postgres(tx) => tx.save(record).await,
        }
    }

    async fn commit(self) -> anyhow::Result<()> {
        match self {
            AnyTransaction::Memory(tx) => tx.commit().await,
            AnyTransaction::Postgres(tx) => tx.commit().await,
        }
    }

    async fn rollback(self) -> anyhow::Result<()> {
        match self {
            AnyTransaction::Memory(tx) => tx.rollback().await,
            AnyTransaction::Postgres(tx) => tx.rollback().await,
        }
    }
}
