//! Core library for supplier stock-list ingestion.
//!
//! This crate provides:
//! - Delimiter sniffing and field splitting for loosely structured text lines
//! - Normalization of free-text price, quantity and optional fields
//! - Per-supplier feed readers (Lorotom, Trah) with record reassembly
//! - Import sessions that stream records into a pluggable store

pub mod error;
pub mod import;
pub mod models;
pub mod parse;
pub mod store;

pub use error::{InputError, PersistenceError, Result, StockinError};
pub use import::{ImportSession, ImportSummary};
pub use models::config::StockinConfig;
pub use models::record::StockRecord;
pub use parse::{Delimiter, LineOutcome, SkipReason, Supplier, SupplierReader, split_fields};
pub use store::{CsvStore, JsonLinesStore, MemoryStore, StockStore};
