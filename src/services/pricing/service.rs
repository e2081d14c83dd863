//! Main pricing service implementation

use super::types::{ModelPrice, PriceUpdateMode};
use crate::utils::error::{QuotaError, Result};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{info, warn};

/// In-memory price table with bulk synchronization
#[derive(Debug, Default)]
pub struct PricingService {
    prices: RwLock<HashMap<String, ModelPrice>>,
}

impl PricingService {
    /// Create an empty pricing service
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bulk price payload fetched from an update source.
    ///
    /// Accepts either a top-level JSON array or the `{"data": [...]}`
    /// envelope some sources wrap it in. Anything else is rejected.
    pub fn parse_price_payload(payload: Value) -> Result<Vec<ModelPrice>> {
        let list = match payload {
            Value::Array(items) => Value::Array(items),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => Value::Array(items),
                _ => {
                    return Err(QuotaError::invalid_payload(
                        "expected a JSON array of prices",
                    ))
                }
            },
            _ => {
                return Err(QuotaError::invalid_payload(
                    "expected a JSON array of prices",
                ))
            }
        };

        let prices: Vec<ModelPrice> = serde_json::from_value(list)?;
        Ok(prices)
    }

    /// Look up the price entry for a model
    pub fn price_of(&self, model: &str) -> Option<ModelPrice> {
        self.prices.read().get(model).cloned()
    }

    /// Number of models in the table
    pub fn len(&self) -> usize {
        self.prices.read().len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.prices.read().is_empty()
    }

    /// Apply a bulk price synchronization and return how many entries
    /// changed. Locked entries survive full replacement.
    pub fn sync_prices(
        &self,
        incoming: Vec<ModelPrice>,
        mode: PriceUpdateMode,
    ) -> Result<usize> {
        if incoming.is_empty() {
            return Err(QuotaError::validation("price list is empty"));
        }

        let mut table = self.prices.write();
        let changed = match mode {
            PriceUpdateMode::Overwrite | PriceUpdateMode::System => {
                let locked: HashMap<String, ModelPrice> = table
                    .iter()
                    .filter(|(_, price)| price.locked)
                    .map(|(model, price)| (model.clone(), price.clone()))
                    .collect();

                table.clear();
                table.extend(locked);
                let mut replaced = 0;
                for price in incoming {
                    if let Some(existing) = table.get(&price.model) {
                        if existing.locked {
                            warn!("Skipping locked price entry: {}", price.model);
                            continue;
                        }
                    }
                    table.insert(price.model.clone(), price);
                    replaced += 1;
                }
                replaced
            }
            PriceUpdateMode::Add => {
                let mut added = 0;
                for price in incoming {
                    if !table.contains_key(&price.model) {
                        table.insert(price.model.clone(), price);
                        added += 1;
                    }
                }
                added
            }
            PriceUpdateMode::Update => {
                let mut updated = 0;
                for price in incoming {
                    if let Some(existing) = table.get_mut(&price.model) {
                        if existing.locked {
                            warn!("Skipping locked price entry: {}", price.model);
                            continue;
                        }
                        *existing = price;
                        updated += 1;
                    }
                }
                updated
            }
        };

        info!(
            "Price sync ({:?}) applied, {} entries changed, table now holds {} models",
            mode,
            changed,
            table.len()
        );
        Ok(changed)
    }
}
