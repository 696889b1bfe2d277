//! Shared utilities.

pub mod date;
pub mod mime;
