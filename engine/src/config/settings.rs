// Parser settings, tunable per deployment since real-world fleet sheets vary.
// The defaults are the values the dashboard has always used.
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ParserSettings {
    /// How many leading rows are scanned for a header row.
    pub header_scan_rows: usize,
    /// Lower-cased substrings that mark a row as the header row.
    pub header_signatures: Vec<String>,
    /// Fallback: a row qualifies as the header if it has strictly more
    /// non-empty cells than this.
    pub header_fallback_min_cells: usize,
    /// Lower-cased substrings that mark a data row as a summary/subtotal row
    /// injected by the spreadsheet author. Checked against the first cell.
    pub summary_row_markers: Vec<String>,
    /// Width of the inclusive "MOT due soon" window, in days from today.
    pub mot_due_window_days: i64,
}

impl Default for ParserSettings {
    fn default() -> Self {
        ParserSettings {
            header_scan_rows: 20,
            header_signatures: vec![
                "status".to_string(),
                "van number".to_string(),
                "reg no".to_string(),
                "vehicle type".to_string(),
            ],
            header_fallback_min_cells: 3,
            summary_row_markers: vec![
                "subtotal".to_string(),
                "total".to_string(),
                "count".to_string(),
                "sum".to_string(),
            ],
            mot_due_window_days: 30,
        }
    }
}
