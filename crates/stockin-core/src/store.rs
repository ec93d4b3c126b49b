//! Persistence collaborators receiving normalized records.
//!
//! The import pipeline only knows the [`StockStore`] contract: `save` once
//! per record and `commit` once at the end of a successful batch. Durable
//! storage lives behind this trait; the implementations here cover
//! in-memory collection and writer-backed CSV / JSON-lines output.

use std::io::Write;

use crate::error::PersistenceError;
use crate::models::record::StockRecord;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Trait for stores that accept normalized stock records.
pub trait StockStore {
    /// Store one record.
    fn save(&mut self, record: StockRecord) -> Result<()>;

    /// Finish the batch.
    fn commit(&mut self) -> Result<()>;
}

/// Store that keeps records in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<StockRecord>,
    committed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records saved so far, in input order.
    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    /// Whether `commit` has been called.
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn into_records(self) -> Vec<StockRecord> {
        self.records
    }
}

impl StockStore for MemoryStore {
    fn save(&mut self, record: StockRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.committed = true;
        Ok(())
    }
}

const CSV_HEADER: [&str; 6] = ["external_id", "mpn", "producer_name", "ean", "price", "quantity"];

/// Store writing one CSV row per record, with a header row.
pub struct CsvStore<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvStore<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            header_written: false,
        }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| PersistenceError::Commit(e.to_string()))
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            self.writer
                .write_record(CSV_HEADER)
                .map_err(|e| PersistenceError::Commit(e.to_string()))?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl<W: Write> StockStore for CsvStore<W> {
    fn save(&mut self, record: StockRecord) -> Result<()> {
        self.write_header()?;
        self.writer
            .write_record([
                record.external_id.as_str(),
                record.mpn.as_str(),
                record.producer_name.as_str(),
                record.ean_or_empty(),
                &record.price_string(),
                &record.quantity.to_string(),
            ])
            .map_err(|e| PersistenceError::Write {
                external_id: record.external_id.clone(),
                reason: e.to_string(),
            })
    }

    fn commit(&mut self) -> Result<()> {
        // An empty import still produces a header-only file
        self.write_header()?;
        self.writer
            .flush()
            .map_err(|e| PersistenceError::Commit(e.to_string()))
    }
}

/// Store writing one JSON object per line.
pub struct JsonLinesStore<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesStore<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StockStore for JsonLinesStore<W> {
    fn save(&mut self, record: StockRecord) -> Result<()> {
        let write_err = |reason: String| PersistenceError::Write {
            external_id: record.external_id.clone(),
            reason,
        };

        serde_json::to_writer(&mut self.writer, &record).map_err(|e| write_err(e.to_string()))?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| write_err(e.to_string()))
    }

    fn commit(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| PersistenceError::Commit(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn record(id: &str, ean: Option<&str>) -> StockRecord {
        StockRecord {
            external_id: id.to_string(),
            mpn: "M-1".to_string(),
            producer_name: "Bosch".to_string(),
            ean: ean.map(str::to_string),
            price: Decimal::new(1250, 2),
            quantity: 3,
        }
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.save(record("A", None)).unwrap();
        store.save(record("B", Some("590"))).unwrap();
        assert!(!store.is_committed());
        store.commit().unwrap();

        assert!(store.is_committed());
        let ids: Vec<_> = store.records().iter().map(|r| r.external_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_csv_store() {
        let mut store = CsvStore::new(Vec::new());
        store.save(record("A", None)).unwrap();
        store.save(record("B", Some("590"))).unwrap();
        store.commit().unwrap();

        let out = String::from_utf8(store.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "external_id,mpn,producer_name,ean,price,quantity\n\
             A,M-1,Bosch,,12.50,3\n\
             B,M-1,Bosch,590,12.50,3\n"
        );
    }

    #[test]
    fn test_csv_store_empty_batch_has_header() {
        let mut store = CsvStore::new(Vec::new());
        store.commit().unwrap();
        let out = String::from_utf8(store.into_inner().unwrap()).unwrap();
        assert_eq!(out, "external_id,mpn,producer_name,ean,price,quantity\n");
    }

    #[test]
    fn test_json_lines_store() {
        let mut store = JsonLinesStore::new(Vec::new());
        store.save(record("A", None)).unwrap();
        store.commit().unwrap();

        let out = String::from_utf8(store.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["external_id"], "A");
        assert_eq!(value["price"], "12.50");
        assert!(out.ends_with('\n'));
    }
}
