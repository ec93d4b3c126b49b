//! Configuration structures for the import pipeline.

use serde::{Deserialize, Serialize};

use crate::error::StockinError;

/// Fewest columns any feed needs to map a complete record.
pub const MIN_MAPPABLE_FIELDS: usize = 6;

/// Main configuration for stockin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StockinConfig {
    /// Lorotom feed settings.
    pub lorotom: LorotomConfig,

    /// Trah feed settings.
    pub trah: TrahConfig,
}

/// Lorotom feed (tab or multi-space separated, with header).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LorotomConfig {
    /// Discard the first line of the file.
    pub skip_header: bool,

    /// Fields required before a buffered record is emitted.
    pub min_fields: usize,

    /// Fields kept from a row; extras are dropped.
    pub max_fields: usize,

    /// Quantity reported for open-ended values such as ">30".
    pub quantity_cap: u32,
}

impl Default for LorotomConfig {
    fn default() -> Self {
        Self {
            skip_header: true,
            min_fields: 6,
            max_fields: 7,
            quantity_cap: 31,
        }
    }
}

/// Trah feed (semicolon separated, no header).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrahConfig {
    /// Rows with fewer fields are skipped.
    pub min_fields: usize,

    /// Quantity reported for open-ended values such as ">10".
    pub quantity_cap: u32,

    /// Producer names (compared upper-cased) whose rows are skipped.
    pub excluded_producers: Vec<String>,
}

impl Default for TrahConfig {
    fn default() -> Self {
        Self {
            min_fields: 6,
            quantity_cap: 11,
            excluded_producers: vec!["NARZEDZIA WARSZTAT".to_string()],
        }
    }
}

impl TrahConfig {
    /// Check whether a producer name falls in the excluded set.
    pub fn is_excluded(&self, producer_name: &str) -> bool {
        let upper = producer_name.to_uppercase();
        self.excluded_producers
            .iter()
            .any(|excluded| excluded.trim().to_uppercase() == upper)
    }
}

impl StockinConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check column thresholds against what the readers can map.
    pub fn validate(&self) -> Result<(), StockinError> {
        if self.lorotom.min_fields < MIN_MAPPABLE_FIELDS {
            return Err(StockinError::Config(format!(
                "lorotom.min_fields must be at least {}, got {}",
                MIN_MAPPABLE_FIELDS, self.lorotom.min_fields
            )));
        }
        if self.lorotom.max_fields < self.lorotom.min_fields {
            return Err(StockinError::Config(format!(
                "lorotom.max_fields ({}) is below lorotom.min_fields ({})",
                self.lorotom.max_fields, self.lorotom.min_fields
            )));
        }
        if self.trah.min_fields < MIN_MAPPABLE_FIELDS {
            return Err(StockinError::Config(format!(
                "trah.min_fields must be at least {}, got {}",
                MIN_MAPPABLE_FIELDS, self.trah.min_fields
            )));
        }
        Ok(())
    }
}
