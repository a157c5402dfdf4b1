//! Storage port consumed by the pagination engine and the services.
//!
//! Adapters decide how a [`Predicate`] and an ordering reach the backend; the
//! port only fixes their logical meaning. Errors are plain `anyhow` errors and
//! are propagated unmodified.

use crate::domain::error::DomainError;
use crate::domain::query::field::FieldMap;
use crate::domain::query::predicate::{OrderKey, Predicate};
use async_trait::async_trait;
use futures::future::BoxFuture;
use sqlx::postgres::PgRow;

/// A persisted row type.
///
/// The field map lists every column, primary key first; adapters derive
/// insert/update column lists from it.
pub trait Record:
    Clone + Send + Sync + Unpin + for<'r> sqlx::FromRow<'r, PgRow> + 'static
{
    const TABLE: &'static str;

    fn id(&self) -> Option<i64>;

    fn assign_id(&mut self, id: i64);

    fn fields() -> &'static FieldMap<Self>;
}

/// Read side of the storage port plus the transaction entry point.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    type Tx: Transaction;

    /// Rows matching `predicate`, ordered by `ordering` then by primary key,
    /// skipping `offset` and returning at most `limit`.
    async fn find_page<R: Record>(
        &self,
        predicate: &Predicate<R>,
        ordering: &[OrderKey<R>],
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<R>>;

    /// Number of rows matching `predicate`, ignoring any window.
    async fn count<R: Record>(&self, predicate: &Predicate<R>) -> anyhow::Result<i64>;

    async fn find_by_id<R: Record>(&self, id: i64) -> anyhow::Result<Option<R>>;

    async fn begin(&self) -> anyhow::Result<Self::Tx>;

    /// Cheap connectivity check.
    async fn ping(&self) -> anyhow::Result<()>;
}

/// A write scope. Dropping it without `commit` discards every write.
#[async_trait]
pub trait Transaction: Send + Sized + 'static {
    async fn find_by_id<R: Record>(&mut self, id: i64) -> anyhow::Result<Option<R>>;

    /// Loads a row and holds it against concurrent writers until the scope ends.
    async fn find_for_update<R: Record>(&mut self, id: i64) -> anyhow::Result<Option<R>>;

    /// Rows matching `predicate` as seen from inside this scope, own writes included.
    async fn count<R: Record>(&mut self, predicate: &Predicate<R>) -> anyhow::Result<i64>;

    /// Inserts when the record has no id yet, otherwise updates in place.
    async fn save<R: Record>(&mut self, record: R) -> anyhow::Result<R>;

    async fn commit(self) -> anyhow::Result<()>;

    async fn rollback(self) -> anyhow::Result<()>;
}

/// Runs `work` inside one transaction: commits on `Ok`, rolls back on `Err`.
///
/// The transaction is released on every exit path; a failed rollback is logged
/// and the original error is returned.
pub async fn with_transaction<S, T, F>(storage: &S, work: F) -> Result<T, DomainError>
where
    S: Storage,
    T: Send,
    F: for<'t> FnOnce(&'t mut S::Tx) -> BoxFuture<'t, Result<T, DomainError>> + Send,
{
    let mut tx = storage.begin().await.map_err(DomainError::Storage)?;
    match work(&mut tx).await {
        Ok(value) => {
            tx.commit().await.map_err(DomainError::Storage)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
