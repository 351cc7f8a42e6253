// Service layer: the ingestion operations exposed to the surrounding system.
pub mod ingest_service;

pub use ingest_service::FleetIngestor;
