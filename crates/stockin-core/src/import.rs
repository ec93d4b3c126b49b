//! Import sessions: stream a supplier file through its reader into a store.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::error::{InputError, Result};
use crate::models::config::StockinConfig;
use crate::parse::{LineOutcome, SkipReason, Supplier};
use crate::store::StockStore;

/// Outcome of a completed import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Supplier whose format was used.
    pub supplier: Supplier,
    /// Records forwarded to the store.
    pub records_imported: usize,
    /// Physical lines read, header included.
    pub lines_read: usize,
    /// Non-blank rows dropped (too few fields, excluded, incomplete).
    pub rows_skipped: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Imported {} records from {}",
            self.records_imported, self.supplier
        )
    }
}

/// A single import of one supplier file.
pub struct ImportSession {
    supplier: Supplier,
    config: StockinConfig,
}

impl ImportSession {
    /// Create a session for a supplier with default settings.
    pub fn new(supplier: Supplier) -> Self {
        Self {
            supplier,
            config: StockinConfig::default(),
        }
    }

    /// Create a session from a supplier name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self> {
        let supplier: Supplier = name.parse()?;
        Ok(Self::new(supplier))
    }

    /// Use a custom configuration.
    pub fn with_config(mut self, config: StockinConfig) -> Self {
        self.config = config;
        self
    }

    pub fn supplier(&self) -> Supplier {
        self.supplier
    }

    /// Import a file from disk. The file is closed before this returns.
    pub fn import_file<S>(&self, path: &Path, store: &mut S) -> Result<ImportSummary>
    where
        S: StockStore + ?Sized,
    {
        if !path.is_file() {
            return Err(InputError::NotFound(path.to_path_buf()).into());
        }

        let file = File::open(path).map_err(|source| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Importing {} as {}", path.display(), self.supplier);
        self.import_reader(BufReader::new(file), store)
    }

    /// Import from any buffered source, line by line.
    pub fn import_reader<R, S>(&self, mut source: R, store: &mut S) -> Result<ImportSummary>
    where
        R: BufRead,
        S: StockStore + ?Sized,
    {
        self.config.validate()?;

        let mut reader = self.supplier.reader(&self.config);
        let mut summary = ImportSummary {
            supplier: self.supplier,
            records_imported: 0,
            lines_read: 0,
            rows_skipped: 0,
        };

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if source.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            summary.lines_read += 1;
            let line_no = summary.lines_read;
            let line = String::from_utf8_lossy(&buf);

            match reader.feed_line(&line) {
                LineOutcome::Record(record) => {
                    trace!(line = line_no, external_id = %record.external_id, "record");
                    store.save(record)?;
                    summary.records_imported += 1;
                }
                LineOutcome::Header => debug!(line = line_no, "header skipped"),
                LineOutcome::Pending => trace!(line = line_no, "record continues on next line"),
                LineOutcome::Skipped(SkipReason::Blank) => {}
                LineOutcome::Skipped(reason) => {
                    debug!(line = line_no, %reason, "row skipped");
                    summary.rows_skipped += 1;
                }
            }
        }

        if let Some(reason) = reader.finish() {
            warn!(%reason, "dropping trailing data");
            summary.rows_skipped += 1;
        }

        if !reader.header_seen() {
            warn!("Empty file or header missing");
        }

        store.commit()?;
        info!(
            records = summary.records_imported,
            skipped = summary.rows_skipped,
            "{}",
            summary
        );

        Ok(summary)
    }
}
