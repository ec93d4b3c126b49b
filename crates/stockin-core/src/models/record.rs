//! Normalized stock record handed to the persistence layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single normalized inventory line from a supplier feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Supplier-local identifier.
    pub external_id: String,

    /// Manufacturer part number.
    pub mpn: String,

    /// Producer (brand) name.
    pub producer_name: String,

    /// European Article Number, if the supplier provides one.
    pub ean: Option<String>,

    /// Unit price, always carrying two fraction digits.
    pub price: Decimal,

    /// Units in stock, capped per supplier for open-ended values like ">30".
    pub quantity: u32,
}

impl StockRecord {
    /// Price formatted with a dot separator and two fraction digits.
    pub fn price_string(&self) -> String {
        format!("{:.2}", self.price)
    }

    /// EAN or an empty string when absent.
    pub fn ean_or_empty(&self) -> &str {
        self.ean.as_deref().unwrap_or("")
    }
}
