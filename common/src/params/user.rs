use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{params::ParamsError, views::UserStatus};

/// Body of `POST /api/users`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserParams {
    /// Required. Must not be blank.
    pub name: Option<String>,

    /// Required. Must not be blank or already in use.
    pub email: Option<String>,

    pub phone: Option<String>,
}

/// A validated user ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl CreateUserParams {
    pub fn validate(self) -> Result<NewUser, ParamsError> {
        let (Some(name), Some(email)) = (filled(self.name), filled(self.email)) else {
            return Err(ParamsError::MissingRequired);
        };

        Ok(NewUser {
            name,
            email,
            // An empty phone on creation means "no phone".
            phone: self.phone.filter(|p| !p.is_empty()),
        })
    }
}

/// Body of `PUT /api/users/{id}`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserParams {
    pub name: Option<String>,

    pub email: Option<String>,

    /// Absent leaves the phone untouched, `null` clears it and any string
    /// (including `""`) replaces it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,

    pub status: Option<String>,
}

/// The subset of a user's fields an update will overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub status: Option<UserStatus>,
}

impl UpdateUserParams {
    /// Blank `name`, `email` and `status` count as not supplied. Other values
    /// are kept as sent. A status that is supplied must be one of the known
    /// values.
    pub fn validate(self) -> Result<UserChanges, ParamsError> {
        let status = match self.status.filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                raw.parse::<UserStatus>()
                    .map_err(|_| ParamsError::InvalidStatus)?,
            ),
            None => None,
        };

        Ok(UserChanges {
            name: non_blank(self.name),
            email: non_blank(self.email),
            phone: self.phone,
            status,
        })
    }
}

/// Body of `PATCH /api/users/{id}/status`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserStatusParams {
    /// One of `active` or `inactive`.
    pub status: Option<String>,
}

impl UpdateUserStatusParams {
    pub fn validate(&self) -> Result<UserStatus, ParamsError> {
        self.status
            .as_deref()
            .ok_or(ParamsError::InvalidStatus)?
            .parse::<UserStatus>()
            .map_err(|_| ParamsError::InvalidStatus)
    }
}

fn filled(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
