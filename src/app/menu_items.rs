use crate::app::lock_restaurant;
use crate::domain::error::DomainError;
use crate::domain::model::{MenuItem, MenuItemUpdate, NewMenuItem, UserId};
use crate::domain::query::{list_page, DomainMapper, FilterDescriptor, PageRequest, PageResult, SortDescriptor};
use crate::domain::validation::{MenuItemValidator, OwnershipValidator};
use crate::storage::records::{MenuItemMapper, MenuItemRecord};
use crate::storage::{with_transaction, Storage, Transaction};
use std::sync::Arc;

pub struct MenuItemService<S> {
    storage: Arc<S>,
}

impl<S: Storage> MenuItemService<S> {
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
    ) -> Result<PageResult<MenuItem>, DomainError> {
        let page = PageRequest::new(page_number, page_size)?;
        list_page(&*self.storage, page, &filters, &sorts, &MenuItemMapper).await
    }

    pub async fn get(&self, id: i64) -> Result<MenuItem, DomainError> {
        self.storage
            .find_by_id::<MenuItemRecord>(id)
            .await?
            .map(|r| MenuItemMapper.to_domain(r))
            .ok_or_else(|| DomainError::not_found("menu_item", id))
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, caller: UserId, input: NewMenuItem) -> Result<MenuItem, DomainError> {
        let item = MenuItem::new(input);
        with_transaction(&*self.storage, move |tx| {
            Box::pin(async move {
                let restaurant = lock_restaurant(tx, item.restaurant_id).await?;
                MenuItemValidator::validate(Some(&item), restaurant.as_ref(), caller)?;

                let saved = tx.save(MenuItemMapper.to_storage(&item)).await?;
                Ok::<_, DomainError>(MenuItemMapper.to_domain(saved))
            })
        })
        .await
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update(
        &self,
        caller: UserId,
        id: i64,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, DomainError> {
        with_transaction(&*self.storage, move |tx| {
            Box::pin(async move {
                let mut item = tx
                    .find_for_update::<MenuItemRecord>(id)
                    .await?
                    .map(|r| MenuItemMapper.to_domain(r))
                    .ok_or_else(|| DomainError::not_found("menu_item", id))?;
                let restaurant = lock_restaurant(tx, item.restaurant_id).await?;
                MenuItemValidator::validate(Some(&item), restaurant.as_ref(), caller)?;

                item.apply(update);
                MenuItemValidator::validate(Some(&item), restaurant.as_ref(), caller)?;

                let saved = tx.save(MenuItemMapper.to_storage(&item)).await?;
                Ok::<_, DomainError>(MenuItemMapper.to_domain(saved))
            })
        })
        .await
    }
}
