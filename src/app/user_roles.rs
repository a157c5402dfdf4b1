use crate::app::lock_restaurant;
use crate::domain::error::DomainError;
use crate::domain::model::{NewUserRole, UserId, UserRole, UserRoleUpdate};
use crate::domain::query::{list_page, DomainMapper, FilterDescriptor, PageRequest, PageResult, SortDescriptor};
use crate::domain::validation::{OwnershipValidator, UserRoleValidator};
use crate::storage::records::{UserRoleMapper, UserRoleRecord};
use crate::storage::{with_transaction, Storage, Transaction};
use std::sync::Arc;

pub struct UserRoleService<S> {
    storage: Arc<S>,
}

async fn lock_role<T: Transaction>(tx: &mut T, id: i64) -> Result<UserRole, DomainError> {
    tx.find_for_update::<UserRoleRecord>(id)
        .await?
        .map(|r| UserRoleMapper.to_domain(r))
        .ok_or_else(|| DomainError::not_found("user_role", id))
}

impl<S: Storage> UserRoleService<S> {
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
    ) -> Result<PageResult<UserRole>, DomainError> {
        let page = PageRequest::new(page_number, page_size)?;
        list_page(&*self.storage, page, &filters, &sorts, &UserRoleMapper).await
    }

    pub async fn get(&self, id: i64) -> Result<UserRole, DomainError> {
        self.storage
            .find_by_id::<UserRoleRecord>(id)
            .await?
            .map(|r| UserRoleMapper.to_domain(r))
            .ok_or_else(|| DomainError::not_found("user_role", id))
    }

    /// Creates a role scoped to one of the caller's restaurants. The variant
    /// follows `is_owner`; `active` defaults to `true`.
    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, caller: UserId, input: NewUserRole) -> Result<UserRole, DomainError> {
        let role = UserRole::create(input);
        with_transaction(&*self.storage, move |tx| {
            Box::pin(async move {
                let restaurant = lock_restaurant(tx, role.restaurant_id()).await?;
                UserRoleValidator::validate(Some(&role), restaurant.as_ref(), caller)?;

                let saved = tx.save(UserRoleMapper.to_storage(&role)).await?;
                Ok::<_, DomainError>(UserRoleMapper.to_domain(saved))
            })
        })
        .await
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update(
        &self,
        caller: UserId,
        id: i64,
        update: UserRoleUpdate,
    ) -> Result<UserRole, DomainError> {
        with_transaction(&*self.storage, move |tx| {
            Box::pin(async move {
                let mut role = lock_role(tx, id).await?;
                role.ensure_editable()?;
                let restaurant = lock_restaurant(tx, role.restaurant_id()).await?;
                UserRoleValidator::validate(Some(&role), restaurant.as_ref(), caller)?;

                role.apply(update);
                UserRoleValidator::validate(Some(&role), restaurant.as_ref(), caller)?;

                let saved = tx.save(UserRoleMapper.to_storage(&role)).await?;
                Ok::<_, DomainError>(UserRoleMapper.to_domain(saved))
            })
        })
        .await
    }

    pub async fn activate(&self, caller: UserId, id: i64) -> Result<UserRole, DomainError> {
        self.set_active(caller, id, true).await
    }

    pub async fn deactivate(&self, caller: UserId, id: i64) -> Result<UserRole, DomainError> {
        self.set_active(caller, id, false).await
    }

    #[tracing::instrument(skip(self))]
    async fn set_active(&self, caller: UserId, id: i64, active: bool) -> Result<UserRole, DomainError> {
        with_transaction(&*self.storage, move |tx| {
            Box::pin(async move {
                let mut role = lock_role(tx, id).await?;
                let restaurant = lock_restaurant(tx, role.restaurant_id()).await?;
                UserRoleValidator::validate_toggle(&role, restaurant.as_ref(), caller)?;

                role.set_active(active);
                let saved = tx.save(UserRoleMapper.to_storage(&role)).await?;
                Ok::<_, DomainError>(UserRoleMapper.to_domain(saved))
            })
        })
        .await
    }
}
