use crate::domain::error::DomainError;
use crate::domain::model::{CuisineType, NewCuisineType};
use crate::domain::query::{list_page, DomainMapper, FilterDescriptor, PageRequest, PageResult, SortDescriptor};
use crate::domain::validation::rules;
use crate::storage::records::{CuisineTypeMapper, CuisineTypeRecord};
use crate::storage::{with_transaction, Storage, Transaction};
use std::sync::Arc;

/// Reference data; no ownership applies.
pub struct CuisineTypeService<S> {
    storage: Arc<S>,
}

impl<S: Storage> CuisineTypeService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    #[tracing::instrument(skip(self, filters, sorts))]
    pub async fn list_page(
        &self,
        page_number: i64,
        page_size: i64,
        filters: Vec<FilterDescriptor>,
        sorts: Vec<SortDescriptor>,
    ) -> Result<PageResult<CuisineType>, DomainError> {
        let page = PageRequest::new(page_number, page_size)?;
        list_page(&*self.storage, page, &filters, &sorts, &CuisineTypeMapper).await
    }

    pub async fn get(&self, id: i64) -> Result<CuisineType, DomainError> {
        self.storage
            .find_by_id::<CuisineTypeRecord>(id)
            .await?
            .map(|r| CuisineTypeMapper.to_domain(r))
            .ok_or_else(|| DomainError::not_found("cuisine_type", id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, input: NewCuisineType) -> Result<CuisineType, DomainError> {
        rules::name(&input.name)?;
        if let Some(description) = &input.description {
            rules::description(description)?;
        }
        let cuisine_type = CuisineType {
            id: None,
            name: input.name,
            description: input.description,
        };
        with_transaction(&*self.storage, move |tx| {
            Box::pin(async move {
                let saved = tx.save(CuisineTypeMapper.to_storage(&cuisine_type)).await?;
                Ok::<_, DomainError>(CuisineTypeMapper.to_domain(saved))
            })
        })
        .await
    }
}
