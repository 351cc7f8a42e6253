use thiserror::Error;

/// File-level failures surfaced to the caller. Cell-level degradations
/// (unparseable currency or date values) are absorbed as `0` / `None` inside
/// the coercion layer and never reach this type.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unreadable workbook: {source}")]
    UnreadableFile {
        #[from]
        source: calamine::Error,
    },

    #[error("workbook contains no worksheets")]
    NoWorksheet,

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
