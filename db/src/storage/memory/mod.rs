use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use frit_common::{
    params::{NewUser, PaginationParams, UserChanges},
    views::UserStatus,
};

use crate::{
    fixed_data::seed_users,
    models::DbUser,
    storage::{Page, Storage, StoreError, UserFilter, UserStore},
};


#[derive(Debug)]
struct State {
    /// Insertion order is listing order.
    users: Vec<DbUser>,

    /// High-water mark, so ids of deleted users are never handed out again.
    next_id: u64,
}

/// Keeps users in process memory. Every operation takes the lock once and
/// holds it for its whole check-and-mutate body.
#[derive(Debug)]
pub struct MemoryStorage(RwLock<State>);

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// A store holding the fixed seed records.
    pub fn seeded() -> Self {
        Self::with_users(seed_users())
    }

    pub fn with_users(users: Vec<DbUser>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().map_or(1, |max| max + 1);

        Self(RwLock::new(State { users, next_id }))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.0
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.0
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    fn position(&self, id: u64) -> Result<usize, StoreError> {
        self.users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn email_taken(&self, email: &str, except: Option<u64>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}

#[async_trait]
impl UserStore for MemoryStorage {
    async fn list(
        &self,
        filter: UserFilter,
        pagination: PaginationParams,
    ) -> Result<Page<DbUser>, StoreError> {
        let state = self.read()?;
        let needle = filter.search.as_deref().map(str::to_lowercase);

        let matching: Vec<&DbUser> = state
            .users
            .iter()
            .filter(|u| filter.status.as_deref().is_none_or(|s| u.status.as_str() == s))
            .filter(|u| needle.as_deref().is_none_or(|n| u.matches_search(n)))
            .collect();

        let skip = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(pagination.limit).unwrap_or(usize::MAX);

        Ok(Page {
            total_items: matching.len() as u64,
            items: matching.into_iter().skip(skip).take(take).cloned().collect(),
        })
    }

    async fn get(&self, id: u64) -> Result<Option<DbUser>, StoreError> {
        Ok(self.read()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<DbUser, StoreError> {
        let mut state = self.write()?;

        if state.email_taken(&new_user.email, None) {
            return Err(StoreError::EmailTaken(new_user.email));
        }

        let user = DbUser::create(state.next_id, new_user);
        state.next_id += 1;
        state.users.push(user.clone());

        tracing::debug!(%user, "inserted user");

        Ok(user)
    }

    async fn update(&self, id: u64, changes: UserChanges) -> Result<DbUser, StoreError> {
        let mut state = self.write()?;
        let idx = state.position(id)?;

        if let Some(email) = &changes.email {
            if state.email_taken(email, Some(id)) {
                return Err(StoreError::EmailTaken(email.clone()));
            }
        }

        let user = &mut state.users[idx];
        user.apply(changes);

        Ok(user.clone())
    }

    async fn delete(&self, id: u64) -> Result<DbUser, StoreError> {
        let mut state = self.write()?;
        let idx = state.position(id)?;

        Ok(state.users.remove(idx))
    }

    async fn set_status(&self, id: u64, status: UserStatus) -> Result<DbUser, StoreError> {
        let mut state = self.write()?;
        let idx = state.position(id)?;

        let user = &mut state.users[idx];
        user.status = status;
        user.touch();

        Ok(user.clone())
    }
}
