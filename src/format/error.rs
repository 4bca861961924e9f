//! Error types for the drawing file format.

use thiserror::Error;

/// Errors that can occur while reading or writing a drawing.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file has the wrong number of rows
    #[error("Expected {expected} rows, found {found}")]
    RowCount {
        /// Rows required by the grid
        expected: usize,
        /// Rows present in the file
        found: usize,
    },

    /// A row has the wrong number of cells
    #[error("Row {row}: expected {expected} cells, found {found}")]
    RowLength {
        /// Zero-based row index
        row: usize,
        /// Cells required by the grid
        expected: usize,
        /// Cells present in the row
        found: usize,
    },

    /// A cell is not an ASCII digit
    #[error("Row {row}, column {column}: invalid cell {byte:#04x}")]
    InvalidCharacter {
        /// Zero-based row index
        row: usize,
        /// Zero-based column index
        column: usize,
        /// The offending byte
        byte: u8,
    },

    /// A label cannot be written as a single digit
    #[error("Label {label} at ({x}, {y}) cannot be stored as a single digit")]
    UnrepresentableLabel {
        /// Cell column
        x: usize,
        /// Cell row
        y: usize,
        /// The stored label value
        label: u8,
    },
}
