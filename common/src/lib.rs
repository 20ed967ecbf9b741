//! Shared wire types for the Frit users API.
//!
//! [`params`] holds everything a client sends us, [`views`] everything we
//! send back. Both are plain serde types so the storage layer and the HTTP
//! layer can agree on them without depending on each other.

pub mod params;
pub mod views;
