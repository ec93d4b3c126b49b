//! Data models for stock ingestion.

pub mod config;
pub mod record;
