use std::fmt::Debug;

use async_trait::async_trait;
use frit_common::{
    params::{NewUser, PaginationParams, UserChanges},
    views::UserStatus,
};
use thiserror::Error;

use crate::models::DbUser;

pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No user with id {0}")]
    NotFound(u64),

    #[error("Email {0:?} is already in use")]
    EmailTaken(String),

    #[error("Store lock poisoned: {0}")]
    Poisoned(String),

    #[error(transparent)]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[async_trait]
pub trait Storage: UserStore + Debug + Send + Sync + 'static {
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Narrows a listing. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Exact match against the status' wire value, so an unknown value
    /// matches nothing.
    pub status: Option<String>,

    /// Case-insensitive substring of name or email.
    pub search: Option<String>,
}

/// One page of a listing plus the size of the whole filtered set.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
}

#[async_trait]
pub trait UserStore {
    async fn list(
        &self,
        filter: UserFilter,
        pagination: PaginationParams,
    ) -> Result<Page<DbUser>, StoreError>;

    async fn get(&self, id: u64) -> Result<Option<DbUser>, StoreError>;

    /// Fails with [`StoreError::EmailTaken`] when any user already has the
    /// email.
    async fn create(&self, new_user: NewUser) -> Result<DbUser, StoreError>;

    /// Fails with [`StoreError::EmailTaken`] when a different user already
    /// has the new email.
    async fn update(&self, id: u64, changes: UserChanges) -> Result<DbUser, StoreError>;

    /// Returns the removed record.
    async fn delete(&self, id: u64) -> Result<DbUser, StoreError>;

    async fn set_status(&self, id: u64, status: UserStatus) -> Result<DbUser, StoreError>;
}
