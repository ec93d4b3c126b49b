//! Lorotom feed reader.
//!
//! Columns: our_code, producer_code, name, producer, quantity, price, ean.
//! Separated by tabs or runs of spaces, preceded by a header line. Upstream
//! exports occasionally wrap a record across several physical lines, so
//! lines are joined until the row has enough columns.

use tracing::debug;

use crate::models::config::LorotomConfig;
use crate::models::record::StockRecord;

use super::normalize::{clean_scalar, normalize_nullable, normalize_price, normalize_quantity};
use super::splitter::split_fields;
use super::{LineOutcome, SkipReason, Supplier, SupplierReader, strip_terminator};

const COL_OUR_CODE: usize = 0;
const COL_PRODUCER_CODE: usize = 1;
const COL_PRODUCER: usize = 3;
const COL_QUANTITY: usize = 4;
const COL_PRICE: usize = 5;
const COL_EAN: usize = 6;

/// Reader for the Lorotom stock list.
pub struct LorotomReader {
    config: LorotomConfig,
    header_seen: bool,
    buffer: String,
}

impl LorotomReader {
    /// Create a reader for one pass over one file.
    pub fn new(config: LorotomConfig) -> Self {
        let header_seen = !config.skip_header;
        Self {
            config,
            header_seen,
            buffer: String::new(),
        }
    }

    fn map_row(&self, mut row: Vec<String>) -> StockRecord {
        row.truncate(self.config.max_fields);
        let field = |idx: usize| clean_scalar(row.get(idx).map(String::as_str));
        let quantity = field(COL_QUANTITY);

        StockRecord {
            external_id: field(COL_OUR_CODE),
            mpn: field(COL_PRODUCER_CODE),
            producer_name: field(COL_PRODUCER),
            quantity: normalize_quantity(Some(quantity.as_str()), self.config.quantity_cap),
            price: normalize_price(&field(COL_PRICE)),
            // Absent when the row stopped at six columns
            ean: normalize_nullable(row.get(COL_EAN).map(String::as_str)),
        }
    }
}

impl SupplierReader for LorotomReader {
    fn supplier(&self) -> Supplier {
        Supplier::Lorotom
    }

    fn feed_line(&mut self, line: &str) -> LineOutcome {
        if !self.header_seen {
            self.header_seen = true;
            debug!(header = ?split_fields(line), "skipping header");
            return LineOutcome::Header;
        }

        let Some(line) = strip_terminator(line) else {
            return LineOutcome::Skipped(SkipReason::Blank);
        };

        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
        self.buffer.push_str(line);

        let row = split_fields(&self.buffer);
        if row.len() < self.config.min_fields {
            return LineOutcome::Pending;
        }

        self.buffer.clear();
        LineOutcome::Record(self.map_row(row))
    }

    fn finish(&mut self) -> Option<SkipReason> {
        if self.buffer.is_empty() {
            return None;
        }
        let buffered = std::mem::take(&mut self.buffer);
        Some(SkipReason::Incomplete { buffered })
    }

    fn header_seen(&self) -> bool {
        self.header_seen
    }
}
