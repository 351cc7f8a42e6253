// Shared data models for the fleet ingestion engine and its consumers
// (reporting/dashboard collaborators consume ParsedFleetData as JSON).

pub mod models;
pub mod utils;
