//! Translation inputs loaded from disk.

pub mod translation;
