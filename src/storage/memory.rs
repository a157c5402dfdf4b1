//! In-process storage used by tests and by `STORAGE_BACKEND=memory`.
//!
//! Every table lives behind one `tokio` mutex. A transaction owns that lock
//! for its whole lifetime, so writers are fully serialized and plain reads wait
//! for open transactions to finish. Writes are staged on copies of the touched
//! tables and only swapped in on commit.

use crate::domain::query::predicate::{compare_by, OrderKey, Predicate};
use crate::domain::query::SortDirection;
use crate::storage::{Record, Storage, Transaction};
use anyhow::anyhow;
use async_trait::async_trait;
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type Rows<R> = BTreeMap<i64, R>;
type Table = Box<dyn Any + Send + Sync>;

#[derive(Default)]
struct Tables {
    rows: HashMap<&'static str, Table>,
    sequences: HashMap<&'static str, i64>,
}

impl Tables {
    fn rows<R: Record>(&self) -> anyhow::Result<Option<&Rows<R>>> {
        match self.rows.get(R::TABLE) {
            None => Ok(None),
            Some(table) => table
                .downcast_ref::<Rows<R>>()
                .map(Some)
                .ok_or_else(|| anyhow!("table '{}' holds a different record type", R::TABLE)),
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStorage {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn window<R: Record>(
    rows: Option<&Rows<R>>,
    predicate: &Predicate<R>,
    ordering: &[OrderKey<R>],
    offset: i64,
    limit: i64,
) -> Vec<R> {
    let Some(rows) = rows else {
        return Vec::new();
    };
    let mut matched: Vec<&R> = rows.values().filter(|r| predicate.matches(r)).collect();

    let pk = R::fields().primary_key();
    let mut keys = ordering.to_vec();
    keys.push(OrderKey {
        column: pk.column,
        get: pk.get,
        direction: SortDirection::Asc,
    });
    matched.sort_by(|a, b| compare_by(&keys, a, b));

    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    matched
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect()
}

#[async_trait]
impl Storage for MemoryStorage {
    type Tx = MemoryTransaction;

    async fn find_page<R: Record>(
        &self,
        predicate: &Predicate<R>,
        ordering: &[OrderKey<R>],
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<R>> {
        let tables = self.tables.lock().await;
        Ok(window(tables.rows::<R>()?, predicate, ordering, offset, limit))
    }

    async fn count<R: Record>(&self, predicate: &Predicate<R>) -> anyhow::Result<i64> {
        let tables = self.tables.lock().await;
        let count = match tables.rows::<R>()? {
            Some(rows) => rows.values().filter(|r| predicate.matches(r)).count(),
            None => 0,
        };
        Ok(i64::try_from(count)?)
    }

    async fn find_by_id<R: Record>(&self, id: i64) -> anyhow::Result<Option<R>> {
        let tables = self.tables.lock().await;
        Ok(tables.rows::<R>()?.and_then(|rows| rows.get(&id)).cloned())
    }

    async fn begin(&self) -> anyhow::Result<MemoryTransaction> {
        Ok(MemoryTransaction {
            guard: Arc::clone(&self.tables).lock_owned().await,
            staged: HashMap::new(),
            sequences: HashMap::new(),
        })
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Exclusive write scope over the whole store.
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    staged: HashMap<&'static str, Table>,
    sequences: HashMap<&'static str, i64>,
}

impl MemoryTransaction {
    fn visible_rows<R: Record>(&self) -> anyhow::Result<Option<&Rows<R>>> {
        match self.staged.get(R::TABLE) {
            Some(table) => table
                .downcast_ref::<Rows<R>>()
                .map(Some)
                .ok_or_else(|| anyhow!("table '{}' holds a different record type", R::TABLE)),
            None => self.guard.rows::<R>(),
        }
    }

    fn lookup<R: Record>(&self, id: i64) -> anyhow::Result<Option<R>> {
        Ok(self.visible_rows::<R>()?.and_then(|rows| rows.get(&id)).cloned())
    }

    fn staged_rows<R: Record>(&mut self) -> anyhow::Result<&mut Rows<R>> {
        if !self.staged.contains_key(R::TABLE) {
            let copy: Rows<R> = self.guard.rows::<R>()?.cloned().unwrap_or_default();
            self.staged.insert(R::TABLE, Box::new(copy));
        }
        self.staged
            .get_mut(R::TABLE)
            .and_then(|table| table.downcast_mut::<Rows<R>>())
            .ok_or_else(|| anyhow!("table '{}' holds a different record type", R::TABLE))
    }

    fn next_id(&mut self, table: &'static str) -> i64 {
        let current = self
            .sequences
            .get(table)
            .or_else(|| self.guard.sequences.get(table))
            .copied()
            .unwrap_or(0);
        self.sequences.insert(table, current + 1);
        current + 1
    }
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn find_by_id<R: Record>(&mut self, id: i64) -> anyhow::Result<Option<R>> {
        self.lookup(id)
    }

    async fn find_for_update<R: Record>(&mut self, id: i64) -> anyhow::Result<Option<R>> {
        // The transaction already holds the store lock.
        self.lookup(id)
    }

    async fn count<R: Record>(&mut self, predicate: &Predicate<R>) -> anyhow::Result<i64> {
        let count = match self.visible_rows::<R>()? {
            Some(rows) => rows.values().filter(|r| predicate.matches(r)).count(),
            None => 0,
        };
        Ok(i64::try_from(count)?)
    }

    async fn save<R: Record>(&mut self, mut record: R) -> anyhow::Result<R> {
        let id = match record.id() {
            Some(id) => {
                if self.lookup::<R>(id)?.is_none() {
                    return Err(anyhow!("{} row {} does not exist", R::TABLE, id));
                }
                id
            }
            None => {
                let id = self.next_id(R::TABLE);
                record.assign_id(id);
                id
            }
        };
        self.staged_rows::<R>()?.insert(id, record.clone());
        Ok(record)
    }

    async fn commit(self) -> anyhow::Result<()> {
        let MemoryTransaction {
            mut guard,
            staged,
            sequences,
        } = self;
        guard.rows.extend(staged);
        guard.sequences.extend(sequences);
        Ok(())
    }

    async fn rollback(self) -> anyhow::Result<()> {
        Ok(())
    }
}
