// Fleet ingestion service: one pure parse per uploaded workbook, plus the
// ordered multi-upload merge. No state survives a call; independent uploads
// can be parsed in parallel without coordination.

use std::path::Path;

use calamine::Data;
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use fleet_shared::models::ParsedFleetData;

use crate::config::ParserSettings;
use crate::data::columns::{locate_header, ColumnMap};
use crate::data::workbook;
use crate::error::EngineError;

pub mod merge_fleet_data;
mod scan_rows;

pub struct FleetIngestor {
    settings: ParserSettings,
}

impl FleetIngestor {
    pub fn new(settings: ParserSettings) -> Self {
        FleetIngestor { settings }
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Reads one workbook file and parses it. The byte read is the only
    /// suspending operation; everything after it is synchronous.
    pub async fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParsedFleetData, EngineError> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        self.parse_bytes(&bytes)
    }

    /// Parses one uploaded workbook buffer into a fleet dataset. Fails only
    /// when the buffer cannot be decoded as a workbook; header and cell
    /// degradations are absorbed.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedFleetData, EngineError> {
        let rows = workbook::read_first_sheet(bytes)?;
        Ok(self.parse_rows(&rows, Utc::now().date_naive()))
    }

    /// Pure scan core with an injectable "today" for the MOT-due window.
    pub fn parse_rows(&self, rows: &[Vec<Data>], today: NaiveDate) -> ParsedFleetData {
        let (first_data_row, columns) = match locate_header(rows, &self.settings) {
            Some(header) => {
                let columns = ColumnMap::resolve(&header.cells);
                if columns.is_empty() {
                    warn!(
                        header_row = header.index,
                        "header row found but no columns recognized"
                    );
                }
                (header.index + 1, columns)
            }
            None => {
                // Known degradation: the scan proceeds with no resolved
                // columns and every row gets dropped for lack of an
                // identifier, yielding an empty dataset.
                warn!("no header row recognized; parse degrades to an empty dataset");
                (0, ColumnMap::default())
            }
        };

        let data = scan_rows::scan_rows(rows, first_data_row, &columns, &self.settings, today);
        info!(
            rows = rows.len(),
            vehicles = data.vehicles.len(),
            statuses = data.status_counts.len(),
            mot_due_soon = data.mot_due_in_30_days,
            "workbook scan complete"
        );
        data
    }

    /// Merges independently parsed datasets, in upload order, into one
    /// deduplicated fleet view.
    pub fn merge(&self, datasets: &[ParsedFleetData]) -> ParsedFleetData {
        merge_fleet_data::merge_fleet_data(datasets)
    }
}

impl Default for FleetIngestor {
    fn default() -> Self {
        FleetIngestor::new(ParserSettings::default())
    }
}
