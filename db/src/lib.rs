//! Storage for the Frit users API.
//!
//! [`storage::Storage`] is the seam the HTTP layer talks to. The only
//! implementation is [`storage::memory::MemoryStorage`], which keeps every
//! record in process memory and starts from [`fixed_data::seed_users`].

pub mod fixed_data;
pub mod models;
pub mod storage;
