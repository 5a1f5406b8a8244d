//! Domain building blocks shared by the database and HTTP layers.
//!
//! Nothing in this crate touches the network or the database: it holds the
//! common ID/timestamp types, the domain error enum, env-config helpers, and
//! the request-body validator with its rule sets.

pub mod config;
pub mod email;
pub mod error;
pub mod types;
pub mod validation;
