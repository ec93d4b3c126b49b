//! Trah feed reader.
//!
//! Semicolon separated, no header.
//! Columns: external_id, quantity, price, mpn, ean, producer_name.

use crate::models::config::TrahConfig;
use crate::models::record::StockRecord;

use super::normalize::{clean_scalar, normalize_nullable, normalize_price, normalize_quantity};
use super::splitter::split_fields;
use super::{LineOutcome, SkipReason, Supplier, SupplierReader, strip_terminator};

/// Reader for the Trah stock list.
pub struct TrahReader {
    config: TrahConfig,
}

impl TrahReader {
    pub fn new(config: TrahConfig) -> Self {
        Self { config }
    }
}

impl SupplierReader for TrahReader {
    fn supplier(&self) -> Supplier {
        Supplier::Trah
    }

    fn feed_line(&mut self, line: &str) -> LineOutcome {
        let Some(line) = strip_terminator(line) else {
            return LineOutcome::Skipped(SkipReason::Blank);
        };

        let row = split_fields(line);
        if row.len() < self.config.min_fields {
            return LineOutcome::Skipped(SkipReason::TooFewFields {
                found: row.len(),
                required: self.config.min_fields,
            });
        }

        let field = |i: usize| row.get(i).map(String::as_str);

        let producer_name = clean_scalar(field(5));
        if self.config.is_excluded(&producer_name) {
            return LineOutcome::Skipped(SkipReason::ExcludedProducer(producer_name));
        }

        LineOutcome::Record(StockRecord {
            external_id: clean_scalar(field(0)),
            quantity: normalize_quantity(field(1), self.config.quantity_cap),
            price: normalize_price(field(2).unwrap_or_default()),
            mpn: clean_scalar(field(3)),
            ean: normalize_nullable(field(4)),
            producer_name,
        })
    }

    fn finish(&mut self) -> Option<SkipReason> {
        None
    }
}
