use std::fmt::Display;

use chrono::{DateTime, Utc};
use frit_common::{
    params::{NewUser, UserChanges},
    views::{User, UserStatus},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Display for DbUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DbUser {{ id: {}, name: {}, email: {}, status: {} }}",
            self.id, self.name, self.email, self.status
        )
    }
}

impl DbUser {
    /// Build a fresh, active record stamped with the current time.
    pub fn create(id: u64, new_user: NewUser) -> Self {
        let now = Utc::now();

        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            phone: new_user.phone,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields present in `changes` and refresh `updated_at`.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }

        self.touch();
    }

    /// Refresh `updated_at`, never letting it fall behind `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }

    /// Case-insensitive substring match against name or email. `needle`
    /// must already be lowercase.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

impl From<DbUser> for User {
    fn from(value: DbUser) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
