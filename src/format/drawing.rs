//! Plain-text drawing format.
//!
//! A drawing is `height` lines of exactly `width` ASCII digits, one digit per
//! cell in row-major order, each line terminated by `\n`. There is no header.
//! A trailing `\r` on a line is tolerated so files edited on Windows still
//! load.

use std::path::{Path, PathBuf};

use ndarray::Array2;

use crate::constants::DRAWING_EXTENSION;
use crate::format::error::FormatError;
use crate::model::{GridSize, Label};

/// Parse a drawing from raw file contents.
pub fn parse_drawing(data: &[u8], size: GridSize) -> Result<Array2<Label>, FormatError> {
    let mut rows: Vec<&[u8]> = data.split(|&b| b == b'\n').collect();
    // A final terminator leaves an empty tail that is not a row.
    if data.ends_with(b"\n") || data.is_empty() {
        rows.pop();
    }

    if rows.len() != size.height {
        return Err(FormatError::RowCount {
            expected: size.height,
            found: rows.len(),
        });
    }

    let mut labels = Array2::from_elem((size.height, size.width), Label::UNKNOWN);
    for (y, row) in rows.into_iter().enumerate() {
        let row = row.strip_suffix(b"\r").unwrap_or(row);

        if let Some(column) = row.iter().position(|b| !b.is_ascii_digit()) {
            return Err(FormatError::InvalidCharacter {
                row: y,
                column,
                byte: row[column],
            });
        }

        if row.len() != size.width {
            return Err(FormatError::RowLength {
                row: y,
                expected: size.width,
                found: row.len(),
            });
        }

        for (x, &b) in row.iter().enumerate() {
            labels[[y, x]] = Label(b - b'0');
        }
    }

    Ok(labels)
}

/// Serialize a label grid.
///
/// Fails if any label is above `9`, since every cell must be a single digit.
pub fn serialize_drawing(labels: &Array2<Label>) -> Result<String, FormatError> {
    let (height, width) = labels.dim();
    let mut out = String::with_capacity(height * (width + 1));

    for (y, row) in labels.rows().into_iter().enumerate() {
        for (x, label) in row.iter().enumerate() {
            let digit = char::from_digit(u32::from(label.value()), 10).ok_or(
                FormatError::UnrepresentableLabel {
                    x,
                    y,
                    label: label.value(),
                },
            )?;
            out.push(digit);
        }
        out.push('\n');
    }

    Ok(out)
}

/// Read a drawing file.
pub fn read_drawing(path: &Path, size: GridSize) -> Result<Array2<Label>, FormatError> {
    let data = std::fs::read(path)?;
    parse_drawing(&data, size)
}

/// Write a drawing file, replacing any existing file.
pub fn write_drawing(path: &Path, labels: &Array2<Label>) -> Result<(), FormatError> {
    let text = serialize_drawing(labels)?;
    std::fs::write(path, text)?;
    Ok(())
}

/// `path` with the drawing extension appended when it has none.
pub fn with_drawing_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DRAWING_EXTENSION)
    }
}
