//! poprev - Pixel Grid Annotation Engine
//!
//! Steps through the cells of a fixed-size grid, assigning each cell a label,
//! while mapping every cell onto the matching region of a reference image of
//! any resolution.
//!
//! - [`geometry`]: sector maths between the grid and a raster
//! - [`store`]: the label grid, its rendering and the save lifecycle
//! - [`format`]: the plain-text drawing format
//! - [`data`]: image codecs for references and exports

pub mod config;
pub mod constants;
pub mod cursor;
pub mod data;
pub mod format;
pub mod geometry;
pub mod model;
pub mod store;

pub use cursor::{Cursor, Direction, Step};
pub use model::{GridSize, Label, Palette, Raster};
pub use store::{AnnotationStore, StoreError};
