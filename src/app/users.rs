use crate::domain::error::DomainError;
use crate::domain::model::{NewUser, User};
use crate::domain::query::{
    list_page, translate, DomainMapper, FilterDescriptor, Operator, PageRequest, PageResult,
    SortDescriptor,
};
use crate::domain::validation::rules;
use crate::storage::records::{UserMapper, UserRecord, UserRoleRecord};
use crate::storage::{with_transaction, Record, Storage, Transaction};
use chrono::Utc;
use std::sync::Arc;

pub struct UserService<S> {
    storage: Arc<S>,
}

impl<S: Storage> UserService<S> {
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
    ) -> Result<PageResult<User>, DomainError> {
        let page = PageRequest::new(page_number, page_size)?;
        list_page(&*self.storage, page, &filters, &sorts, &UserMapper).await
    }

    pub async fn get(&self, id: i64) -> Result<User, DomainError> {
        self.storage
            .find_by_id::<UserRecord>(id)
            .await?
            .map(|r| UserMapper.to_domain(r))
            .ok_or_else(|| DomainError::not_found("user", id))
    }

    #[tracing::instrument(skip(self, input), fields(login = %input.login))]
    pub async fn create(&self, input: NewUser) -> Result<User, DomainError> {
        rules::name(&input.name)?;
        rules::email(&input.email)?;
        rules::login(&input.login)?;
        let user = User {
            id: None,
            name: input.name,
            email: input.email.trim().to_string(),
            login: input.login,
            role_id: input.role_id,
            created_at: Utc::now(),
        };
        with_transaction(&*self.storage, move |tx| {
            Box::pin(async move {
                if let Some(role_id) = user.role_id {
                    if tx.find_by_id::<UserRoleRecord>(role_id).await?.is_none() {
                        return Err(DomainError::validation(
                            "role_id",
                            format!("user role {role_id} does not exist"),
                        ));
                    }
                }
                for (field, value) in [("login", &user.login), ("email", &user.email)] {
                    ensure_unused(&mut *tx, field, value).await?;
                }
                let saved = tx.save(UserMapper.to_storage(&user)).await?;
                Ok(UserMapper.to_domain(saved))
            })
        })
        .await
    }
}

/// Login and email are unique across users.
async fn ensure_unused<T: Transaction>(
    tx: &mut T,
    field: &'static str,
    value: &str,
) -> Result<(), DomainError> {
    let filter = FilterDescriptor::new(field, value, Operator::Equals)?;
    let predicate = translate(UserRecord::fields(), &[filter])?;
    if tx.count(&predicate).await? > 0 {
        return Err(DomainError::validation(field, format!("'{value}' is already taken")));
    }
    Ok(())
}
