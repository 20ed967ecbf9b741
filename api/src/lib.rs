//! Frit API service.
//!
//! Serves CRUD endpoints for a users resource under `/api/users`, backed by
//! any [`frit_db::storage::Storage`]. Every response uses the envelope
//! defined in [`frit_common::views`].
//!
//! # Configuration
//!
//! See [`config::FritApiConfig`]; every option can also be set through a
//! `FRIT_API_*` environment variable.

pub mod config;
pub mod server;

pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod handlers;
