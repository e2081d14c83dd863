//! Type definitions for the pricing service

use crate::core::quota::BillingType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Price entry for one model, matching the backend price-sync JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPrice {
    /// Model identifier
    pub model: String,
    /// Billing mode ("tokens" or "times")
    #[serde(rename = "type")]
    pub price_type: BillingType,
    /// Upstream channel type code
    pub channel_type: i64,
    /// Input ratio (per-thousand-token multiplier, or flat weight for
    /// per-call prices)
    pub input: Decimal,
    /// Output ratio
    pub output: Decimal,
    /// Per-category multipliers for extra token categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_ratios: Option<HashMap<String, Decimal>>,
    /// Locked entries are preserved across synchronization
    pub locked: bool,
}

/// How a bulk price synchronization applies the incoming list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceUpdateMode {
    /// Automatic sync from the system default source; replaces the table
    System,
    /// Only add models that do not exist yet
    Add,
    /// Replace the whole table with the incoming list
    Overwrite,
    /// Only update models that already exist
    Update,
}
