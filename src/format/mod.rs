//! Drawing persistence.
//!
//! Drawings are stored as plain text, one digit per grid cell. See
//! [`drawing`] for the exact layout.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use poprev::format::{read_drawing, write_drawing};
//! use poprev::model::GridSize;
//!
//! let labels = read_drawing(path, GridSize::default())?;
//! write_drawing(other_path, &labels)?;
//! ```

pub mod drawing;
mod error;

pub use drawing::{
    parse_drawing, read_drawing, serialize_drawing, with_drawing_extension, write_drawing,
};
pub use error::FormatError;
