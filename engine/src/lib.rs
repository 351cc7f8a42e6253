// Fleet ingestion engine library root.
// Takes uploaded workbook bytes and produces a canonical, typed fleet
// dataset; several such datasets merge into one deduplicated fleet view.

pub mod config;
pub mod data;
pub mod error;
pub mod services;

pub use config::ParserSettings;
pub use error::EngineError;
pub use services::FleetIngestor;
