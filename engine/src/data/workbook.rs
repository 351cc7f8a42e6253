// Workbook decoding boundary: raw uploaded bytes in, first worksheet's cell
// rows out. Only the first worksheet is read; later sheets are ignored.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::EngineError;

/// Decodes a workbook byte buffer and returns the first worksheet as rows of
/// cells. Fails with [`EngineError::UnreadableFile`] when the buffer is not
/// a workbook at all; that is the only failure the engine surfaces.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Vec<Data>>, EngineError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(EngineError::NoWorksheet)??;
    Ok(range.rows().map(|row| row.to_vec()).collect())
}
