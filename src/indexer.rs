//! Loads translation dictionaries from a workspace into a [`crate::catalog::Catalog`].

pub mod types;
pub mod workspace;
