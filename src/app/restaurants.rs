use crate::domain::error::DomainError;
use crate::domain::model::{Restaurant, RestaurantInput, UserId};
use crate::domain::query::{list_page, DomainMapper, FilterDescriptor, PageRequest, PageResult, SortDescriptor};
use crate::domain::validation::{OwnershipValidator, RestaurantValidator};
use crate::storage::records::{CuisineTypeRecord, RestaurantMapper, RestaurantRecord};
use crate::storage::{with_transaction, Storage, Transaction};
use std::sync::Arc;

pub struct RestaurantService<S> {
    storage: Arc<S>,
}

async fn ensure_cuisine_type<T: Transaction>(tx: &mut T, id: Option<i64>) -> Result<(), DomainError> {
    if let Some(id) = id {
        if tx.find_by_id::<CuisineTypeRecord>(id).await?.is_none() {
            return Err(DomainError::validation(
                "cuisine_type_id",
                format!("cuisine type {id} does not exist"),
            ));
        }
    }
    Ok(())
}

impl<S: Storage> RestaurantService<S> {
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
    ) -> Result<PageResult<Restaurant>, DomainError> {
        let page = PageRequest::new(page_number, page_size)?;
        list_page(&*self.storage, page, &filters, &sorts, &RestaurantMapper).await
    }

    pub async fn get(&self, id: i64) -> Result<Restaurant, DomainError> {
        self.storage
            .find_by_id::<RestaurantRecord>(id)
            .await?
            .map(|r| RestaurantMapper.to_domain(r))
            .ok_or_else(|| DomainError::not_found("restaurant", id))
    }

    /// Registers a restaurant owned by `caller`.
    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, caller: UserId, input: RestaurantInput) -> Result<Restaurant, DomainError> {
        let restaurant = Restaurant::new(caller, input);
        RestaurantValidator::validate(Some(&restaurant), None, caller)?;

        let created = with_transaction(&*self.storage, move |tx| {
            Box::pin(async move {
                ensure_cuisine_type(tx, restaurant.cuisine_type_id).await?;
                let saved = tx.save(RestaurantMapper.to_storage(&restaurant)).await?;
                Ok::<_, DomainError>(RestaurantMapper.to_domain(saved))
            })
        })
        .await?;
        tracing::info!(id = ?created.id, owner = %caller, "restaurant created");
        Ok(created)
    }

    /// Replaces the mutable fields of a restaurant. Only its owner may do this;
    /// the owner itself never changes.
    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        caller: UserId,
        id: i64,
        input: RestaurantInput,
    ) -> Result<Restaurant, DomainError> {
        with_transaction(&*self.storage, move |tx| {
            Box::pin(async move {
                let mut restaurant = tx
                    .find_for_update::<RestaurantRecord>(id)
                    .await?
                    .map(|r| RestaurantMapper.to_domain(r))
                    .ok_or_else(|| DomainError::not_found("restaurant", id))?;
                RestaurantValidator::validate(Some(&restaurant), None, caller)?;

                restaurant.apply(input);
                RestaurantValidator::validate(Some(&restaurant), None, caller)?;
                ensure_cuisine_type(tx, restaurant.cuisine_type_id).await?;

                let saved = tx.save(RestaurantMapper.to_storage(&restaurant)).await?;
                Ok::<_, DomainError>(RestaurantMapper.to_domain(saved))
            })
        })
        .await
    }
}
