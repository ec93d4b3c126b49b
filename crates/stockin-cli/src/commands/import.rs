//! Import command - normalize one supplier stock-list file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::debug;

use stockin_core::error::PersistenceError;
use stockin_core::{
    CsvStore, ImportSession, InputError, JsonLinesStore, MemoryStore, StockRecord, StockStore,
};

use super::config::load_config;

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Supplier stock-list file
    #[arg(required = true)]
    file: PathBuf,

    /// Supplier name (lorotom/trah)
    #[arg(required = true)]
    supplier: String,

    /// Output format for imported records
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parse and count records without writing them
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    Json,
    /// CSV with header row
    Csv,
    /// Aligned plain text table
    Text,
}

pub fn run(args: ImportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Reject bad input before touching the output file
    let session = ImportSession::from_name(&args.supplier)?.with_config(config);
    if !args.file.is_file() {
        return Err(InputError::NotFound(args.file.clone()).into());
    }

    let to_stdout = args.output.is_none() && !args.dry_run;
    let mut store: Box<dyn StockStore> = if args.dry_run {
        Box::new(MemoryStore::new())
    } else {
        let writer: Box<dyn Write> = match &args.output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(io::stdout()),
        };
        match args.format {
            OutputFormat::Json => Box::new(JsonLinesStore::new(writer)),
            OutputFormat::Csv => Box::new(CsvStore::new(writer)),
            OutputFormat::Text => Box::new(TextTableStore::new(writer)),
        }
    };

    let summary = session.import_file(&args.file, store.as_mut())?;
    drop(store);

    let message = format!("{} {}", style("✓").green(), summary);
    // Records own stdout when no output file is given
    if to_stdout {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
        if let Some(path) = &args.output {
            println!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
    }

    if summary.rows_skipped > 0 {
        eprintln!(
            "{} {} rows skipped (run with -vv for details)",
            style("ℹ").blue(),
            summary.rows_skipped
        );
    }

    debug!("Total import time: {:?}", start.elapsed());

    Ok(())
}

/// Store printing records as an aligned text table.
struct TextTableStore<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> TextTableStore<W> {
    fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    fn write_row(&mut self, cells: [&str; 6]) -> io::Result<()> {
        writeln!(
            self.writer,
            "{:<16} {:<20} {:<24} {:<14} {:>10} {:>8}",
            cells[0], cells[1], cells[2], cells[3], cells[4], cells[5]
        )
    }
}

impl<W: Write> StockStore for TextTableStore<W> {
    fn save(&mut self, record: StockRecord) -> Result<(), PersistenceError> {
        let write_err = |e: io::Error| PersistenceError::Write {
            external_id: record.external_id.clone(),
            reason: e.to_string(),
        };

        if !self.header_written {
            self.write_row(["EXTERNAL ID", "MPN", "PRODUCER", "EAN", "PRICE", "QTY"])
                .map_err(write_err)?;
            self.header_written = true;
        }

        let price = record.price_string();
        let quantity = record.quantity.to_string();
        self.write_row([
            &record.external_id,
            &record.mpn,
            &record.producer_name,
            record.ean.as_deref().unwrap_or("-"),
            &price,
            &quantity,
        ])
        .map_err(write_err)
    }

    fn commit(&mut self) -> Result<(), PersistenceError> {
        self.writer
            .flush()
            .map_err(|e| PersistenceError::Commit(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_text_table_store() {
        let mut store = TextTableStore::new(Vec::new());
        store
            .save(StockRecord {
                external_id: "A001".to_string(),
                mpn: "MPN123".to_string(),
                producer_name: "Bosch".to_string(),
                ean: None,
                price: Decimal::new(1000, 2),
                quantity: 5,
            })
            .unwrap();
        store.commit().unwrap();

        let out = String::from_utf8(store.writer).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("EXTERNAL ID"));
        assert!(lines[1].starts_with("A001"));
        assert!(lines[1].contains(" - "));
        assert!(lines[1].ends_with("10.00        5"));
    }
}
