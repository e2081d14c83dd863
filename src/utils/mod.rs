//! Shared utilities for the quota engine

pub mod error;

pub use error::{QuotaError, Result};
