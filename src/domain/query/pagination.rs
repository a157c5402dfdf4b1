//! Generic filter + sort + page-window listing shared by every list endpoint.

use crate::domain::error::DomainError;
use crate::domain::query::descriptor::{FilterDescriptor, PageRequest, PageResult, SortDescriptor};
use crate::domain::query::translator::{translate, translate_sort};
use crate::storage::{Record, Storage};

/// Two-way mapping between a persisted record and its domain object.
pub trait DomainMapper<R, D>: Send + Sync {
    fn to_domain(&self, record: R) -> D;

    fn to_storage(&self, domain: &D) -> R;
}

/// Lists one page of `D`.
///
/// Issues one windowed read and one count with the same predicate. The two
/// reads are independent, so under concurrent writes `total_elements` and
/// `content` may reflect slightly different snapshots. Nothing is cached.
/// Storage errors are returned as-is inside [`DomainError::Storage`].
pub async fn list_page<S, R, D, M>(
    storage: &S,
    page: PageRequest,
    filters: &[FilterDescriptor],
    sorts: &[SortDescriptor],
    mapper: &M,
) -> Result<PageResult<D>, DomainError>
where
    S: Storage,
    R: Record,
    M: DomainMapper<R, D>,
{
    let fields = R::fields();
    let predicate = translate(fields, filters)?;
    let ordering = translate_sort(fields, sorts)?;

    let records = storage
        .find_page(&predicate, &ordering, page.offset(), page.limit())
        .await?;
    let total_elements = storage.count(&predicate).await?;

    tracing::debug!(
        table = R::TABLE,
        conditions = predicate.len(),
        sort_keys = ordering.len(),
        returned = records.len(),
        total_elements,
        "listed page"
    );

    Ok(PageResult {
        content: records.into_iter().map(|r| mapper.to_domain(r)).collect(),
        page_number: page.page_number(),
        page_size: page.page_size(),
        total_elements,
    })
}
