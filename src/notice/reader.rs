//! Index spreadsheet reader
//!
//! Loads the first worksheet of a cached index snapshot with calamine and
//! hands the cell text, in absolute sheet coordinates, to [`NoticeTable`].

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use std::path::Path;
use tracing::debug;

use crate::notice::{NoticeError, NoticeTable};

/// Parse a cached index spreadsheet into a [`NoticeTable`]
pub fn read_notice_table(path: &Path) -> Result<NoticeTable, NoticeError> {
    let workbook_error = |source| NoticeError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| NoticeError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_error)?;

    let rows = sheet_rows(&range);
    debug!("Read {} rows from {}", rows.len(), path.display());

    NoticeTable::from_rows(rows)
}

/// Cell text for every row from the top of the sheet.
///
/// calamine ranges start at the first used cell, so leading blank rows and
/// columns are filled back in to keep row positions absolute.
fn sheet_rows(range: &Range<Data>) -> Vec<Vec<Option<String>>> {
    let Some((last_row, last_col)) = range.end() else {
        return Vec::new();
    };

    (0..=last_row)
        .map(|row| {
            (0..=last_col)
                .map(|col| range.get_value((row, col)).and_then(cell_text))
                .collect()
        })
        .collect()
}

/// Text of a single cell, `None` when the cell is blank
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Some((*f as i64).to_string())
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(_) => cell.as_date().map(|d| d.format("%Y-%m-%d").to_string()),
        _ => None,
    }
}
