//! Supplier feed parsing: delimiter sniffing, value normalization and
//! per-supplier record readers.

mod lorotom;
pub mod normalize;
pub mod patterns;
mod splitter;
mod trah;

pub use lorotom::LorotomReader;
pub use normalize::{clean_scalar, normalize_nullable, normalize_price, normalize_quantity};
pub use splitter::{Delimiter, split_fields};
pub use trah::TrahReader;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::models::config::StockinConfig;
use crate::models::record::StockRecord;

/// Known supplier feed formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Supplier {
    /// Tab or multi-space separated, header line, wrapped records.
    Lorotom,
    /// Semicolon separated, no header.
    Trah,
}

impl Supplier {
    /// Lower-case name as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Supplier::Lorotom => "lorotom",
            Supplier::Trah => "trah",
        }
    }

    /// Build a fresh reader for this supplier's feed format.
    pub fn reader(&self, config: &StockinConfig) -> Box<dyn SupplierReader> {
        match self {
            Supplier::Lorotom => Box::new(LorotomReader::new(config.lorotom.clone())),
            Supplier::Trah => Box::new(TrahReader::new(config.trah.clone())),
        }
    }
}

impl FromStr for Supplier {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lorotom" => Ok(Supplier::Lorotom),
            "trah" => Ok(Supplier::Trah),
            _ => Err(InputError::UnknownSupplier(s.to_string())),
        }
    }
}

impl fmt::Display for Supplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a physical line produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty or whitespace-only line.
    Blank,
    /// Row split into fewer columns than the format needs.
    TooFewFields { found: usize, required: usize },
    /// Row belongs to an excluded producer category.
    ExcludedProducer(String),
    /// Input ended while a wrapped record was still incomplete.
    Incomplete { buffered: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Blank => write!(f, "blank line"),
            SkipReason::TooFewFields { found, required } => {
                write!(f, "too few fields ({} of {})", found, required)
            }
            SkipReason::ExcludedProducer(name) => write!(f, "excluded producer {:?}", name),
            SkipReason::Incomplete { buffered } => {
                write!(f, "incomplete record at end of input: {:?}", buffered)
            }
        }
    }
}

/// Result of feeding one physical line into a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// A complete record was mapped and normalized.
    Record(StockRecord),
    /// The line was consumed as the file header.
    Header,
    /// The line was buffered; the record continues on a later line.
    Pending,
    /// The line was dropped.
    Skipped(SkipReason),
}

/// Trait for supplier-specific feed readers.
///
/// A reader owns any cross-line state (header tracking, reassembly buffer)
/// for exactly one pass over one file.
pub trait SupplierReader {
    /// Supplier this reader understands.
    fn supplier(&self) -> Supplier;

    /// Consume one physical line.
    fn feed_line(&mut self, line: &str) -> LineOutcome;

    /// Signal end of input. Returns a skip reason if buffered data was dropped.
    fn finish(&mut self) -> Option<SkipReason>;

    /// Whether the reader has seen its header line (always true for
    /// headerless formats).
    fn header_seen(&self) -> bool {
        true
    }
}

/// Strip the line terminator and report whether anything but whitespace is left.
pub(crate) fn strip_terminator(line: &str) -> Option<&str> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        None
    } else {
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_supplier_from_str() {
        assert_eq!("lorotom".parse::<Supplier>().unwrap(), Supplier::Lorotom);
        assert_eq!("LOROTOM".parse::<Supplier>().unwrap(), Supplier::Lorotom);
        assert_eq!(" Trah ".parse::<Supplier>().unwrap(), Supplier::Trah);
    }

    #[test]
    fn test_unknown_supplier() {
        let err = "acme".parse::<Supplier>().unwrap_err();
        assert!(matches!(err, InputError::UnknownSupplier(ref name) if name == "acme"));
        assert_eq!(err.to_string(), "unknown supplier: acme");
    }

    #[test]
    fn test_reader_matches_supplier() {
        let config = StockinConfig::default();
        assert_eq!(Supplier::Lorotom.reader(&config).supplier(), Supplier::Lorotom);
        assert_eq!(Supplier::Trah.reader(&config).supplier(), Supplier::Trah);
    }

    #[test]
    fn test_strip_terminator() {
        assert_eq!(strip_terminator("abc\r\n"), Some("abc"));
        assert_eq!(strip_terminator("  \t\r\n"), None);
        assert_eq!(strip_terminator(""), None);
    }
}
