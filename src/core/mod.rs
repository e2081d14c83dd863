//! Core computation modules
//!
//! Pure, synchronous arithmetic over already-fetched usage data. No
//! module here performs I/O or retains state between calls.

pub mod analytics;
pub mod quota;
