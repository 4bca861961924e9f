//! Annotation state for one drawing.
//!
//! [`AnnotationStore`] owns the label grid, its rendered colour mirror, the
//! optional reference raster and the save state. Every mutation of a label
//! updates the matching rendered pixel in the same call, so the two grids
//! never diverge.
//!
//! The store holds no cursor. Callers pass the focus cell to each operation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ndarray::{Array2, ArrayView2};
use thiserror::Error;

use crate::constants::HIGHLIGHT_LINE_RADIUS;
use crate::data::{CodecError, ImageCodec, StandardImageCodec};
use crate::format::{self, FormatError};
use crate::geometry;
use crate::model::raster;
use crate::model::{GridSize, Label, Palette, Raster, RasterView};

/// Errors returned by [`AnnotationStore`] operations.
///
/// A failed operation never leaves the store partially modified.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A grid coordinate outside the drawing
    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Malformed or unwritable drawing file
    #[error("Drawing format error: {0}")]
    Format(FormatError),

    /// Underlying file failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode or encode failure
    #[error("Image codec error: {0}")]
    Codec(#[from] CodecError),

    /// A reference operation was requested before any reference was loaded
    #[error("No reference image loaded")]
    NoReference,

    /// `save` was called on a drawing that has never been saved or loaded
    #[error("Drawing has no save name")]
    NoSaveName,

    /// The requested region of the reference contains no pixels
    #[error("Reference region for cell ({x}, {y}) is empty")]
    EmptyRegion { x: usize, y: usize },

    /// A neighbourhood radius too large to address
    #[error("Context level {level} is too large")]
    LevelTooLarge { level: usize },
}

impl From<FormatError> for StoreError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::Io(e) => Self::Io(e),
            other => Self::Format(other),
        }
    }
}

/// Owner of a drawing and its reference image.
pub struct AnnotationStore {
    size: GridSize,
    palette: Palette,
    labels: Array2<Label>,
    rendered: Raster,
    reference: Option<Raster>,
    save_name: Option<PathBuf>,
    dirty: bool,
    codec: Box<dyn ImageCodec>,
}

impl AnnotationStore {
    /// Create a blank drawing of the default size and palette.
    pub fn new() -> Self {
        Self::with_size(GridSize::default(), Palette::default())
    }

    /// Create a blank drawing with the given grid size and palette.
    pub fn with_size(size: GridSize, palette: Palette) -> Self {
        Self::with_codec(size, palette, Box::new(StandardImageCodec))
    }

    /// Create a blank drawing that uses `codec` for image I/O.
    pub fn with_codec(size: GridSize, palette: Palette, codec: Box<dyn ImageCodec>) -> Self {
        let rendered = raster::filled(size.width, size.height, palette.fallback_colour());
        Self {
            size,
            labels: Array2::from_elem((size.height, size.width), Label::UNKNOWN),
            rendered,
            palette,
            reference: None,
            save_name: None,
            dirty: false,
            codec,
        }
    }

    // ========================================================================
    // Drawing lifecycle
    // ========================================================================

    /// Discard the current drawing and start a blank one.
    ///
    /// The reference image is kept.
    pub fn new_drawing(&mut self) {
        self.labels.fill(Label::UNKNOWN);
        self.rendered = raster::filled(
            self.size.width,
            self.size.height,
            self.palette.fallback_colour(),
        );
        self.save_name = None;
        self.dirty = false;
        log::debug!("Started new {}x{} drawing", self.size.width, self.size.height);
    }

    /// Assign `label` to cell `(x, y)`.
    ///
    /// Any label value is accepted; values without a palette entry render
    /// with the fallback colour.
    pub fn edit(&mut self, x: usize, y: usize, label: Label) -> Result<(), StoreError> {
        self.check_bounds(x, y)?;
        self.set_cell(x, y, label);
        self.dirty = true;
        log::trace!("Edited ({}, {}) -> {}", x, y, label);
        Ok(())
    }

    /// Label stored at `(x, y)`.
    pub fn selection_at(&self, x: usize, y: usize) -> Result<Label, StoreError> {
        self.check_bounds(x, y)?;
        Ok(self.labels[[y, x]])
    }

    /// Copy of the rendered grid with `(x, y)` painted in the highlight colour.
    pub fn preview(&self, x: usize, y: usize) -> Result<Raster, StoreError> {
        self.check_bounds(x, y)?;
        let mut preview = self.rendered.clone();
        let highlight = self.palette.highlight();
        for (c, &v) in highlight.iter().enumerate() {
            preview[[y, x, c]] = v;
        }
        Ok(preview)
    }

    // ========================================================================
    // Reference image
    // ========================================================================

    /// Replace the reference image with the one decoded from `path`.
    ///
    /// On failure the previous reference is kept.
    pub fn load_reference(&mut self, path: &Path) -> Result<(), StoreError> {
        let reference = self.codec.decode(path)?;
        log::info!(
            "Loaded {}x{} reference from {:?}",
            raster::width(&reference.view()),
            raster::height(&reference.view()),
            path
        );
        self.reference = Some(reference);
        Ok(())
    }

    /// Install an already decoded reference raster.
    pub fn set_reference(&mut self, reference: Raster) {
        self.reference = Some(reference);
    }

    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// The loaded reference, if any.
    pub fn reference(&self) -> Option<RasterView<'_>> {
        self.reference.as_ref().map(|r| r.view())
    }

    /// Region of the reference that corresponds to grid cell `(x, y)`.
    pub fn reference_sector(&self, x: usize, y: usize) -> Result<RasterView<'_>, StoreError> {
        self.check_bounds(x, y)?;
        let reference = self.reference.as_ref().ok_or(StoreError::NoReference)?;
        Ok(geometry::sector_rect(
            reference.view(),
            x,
            y,
            self.size.width,
            self.size.height,
        ))
    }

    /// Neighbourhood of `(x, y)` in the reference, scaled to `out_w`×`out_h`
    /// with the focus sector outlined.
    ///
    /// `level` is the neighbourhood radius in cells. The neighbourhood is
    /// shifted, not shrunk, at the grid edges.
    pub fn reference_context(
        &self,
        x: usize,
        y: usize,
        out_w: usize,
        out_h: usize,
        level: usize,
    ) -> Result<Raster, StoreError> {
        self.check_bounds(x, y)?;
        let reference = self.reference.as_ref().ok_or(StoreError::NoReference)?;

        // The window spans 2 * level + 1 sectors, which must stay addressable.
        let radius = isize::try_from(level)
            .ok()
            .filter(|r| r.checked_mul(2).and_then(|d| d.checked_add(1)).is_some())
            .ok_or(StoreError::LevelTooLarge { level })?;
        let (xl, xu) = geometry::clamped_window(
            x as isize,
            0,
            self.size.width as isize - 1,
            radius,
        );
        let (yl, yu) = geometry::clamped_window(
            y as isize,
            0,
            self.size.height as isize - 1,
            radius,
        );
        log::debug!(
            "Reference context for ({}, {}): sectors x {}..={}, y {}..={}",
            x,
            y,
            xl,
            xu,
            yl,
            yu
        );

        let extract = geometry::sector_extract(
            reference.view(),
            (xl, xu),
            (yl, yu),
            self.size.width,
            self.size.height,
        );
        let mut context = geometry::resize_nearest(extract, out_w, out_h)
            .ok_or(StoreError::EmptyRegion { x, y })?;

        let span = 2 * level + 1;
        geometry::draw_border(
            &mut context,
            x as isize - xl,
            y as isize - yl,
            span,
            span,
            HIGHLIGHT_LINE_RADIUS,
            self.palette.highlight(),
        );

        Ok(context)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Write the rendered grid as an image, one pixel per cell.
    ///
    /// The destination extension must be one the codec handles.
    pub fn export(&self, path: &Path) -> Result<(), StoreError> {
        if !self.codec.supports(path) {
            return Err(CodecError::new(format!("Unsupported export format {:?}", path))
                .with_codec(self.codec.id())
                .into());
        }
        self.codec.encode(self.rendered.view(), path)?;
        log::info!("Exported drawing to {:?}", path);
        Ok(())
    }

    /// Save the drawing to `path` and remember it as the save name.
    pub fn save_as(&mut self, path: &Path) -> Result<(), StoreError> {
        format::write_drawing(path, &self.labels)?;
        self.save_name = Some(path.to_path_buf());
        self.dirty = false;
        log::info!("Saved drawing to {:?}", path);
        Ok(())
    }

    /// Save the drawing to its current save name.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let path = self.save_name.clone().ok_or(StoreError::NoSaveName)?;
        self.save_as(&path)
    }

    /// Replace the drawing with the one stored at `path`.
    ///
    /// On failure the current drawing and save state are left untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), StoreError> {
        let labels = format::read_drawing(path, self.size)?;

        let mut rendered = raster::filled(
            self.size.width,
            self.size.height,
            self.palette.fallback_colour(),
        );
        let mut unknown_values = 0usize;
        for ((y, x), &label) in labels.indexed_iter() {
            let colour = self.palette.colour_of(label);
            for (c, &v) in colour.iter().enumerate() {
                rendered[[y, x, c]] = v;
            }
            if !label.is_known() && !label.is_unknown() {
                unknown_values += 1;
            }
        }
        if unknown_values > 0 {
            log::warn!(
                "{:?}: {} cells carry labels outside 0..={}, rendering with fallback colour",
                path,
                unknown_values,
                Label::KNOWN_COUNT - 1
            );
        }

        self.labels = labels;
        self.rendered = rendered;
        self.save_name = Some(path.to_path_buf());
        self.dirty = false;
        log::info!("Loaded drawing from {:?}", path);
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn save_name(&self) -> Option<&Path> {
        self.save_name.as_deref()
    }

    /// Whether there are edits since the last new/save/load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Label grid, indexed `[y, x]`.
    pub fn labels(&self) -> ArrayView2<'_, Label> {
        self.labels.view()
    }

    /// Rendered colour grid, shape `(height, width, 3)`.
    pub fn rendered(&self) -> RasterView<'_> {
        self.rendered.view()
    }

    /// Number of cells carrying each distinct label.
    pub fn label_counts(&self) -> BTreeMap<Label, usize> {
        let mut counts = BTreeMap::new();
        for &label in self.labels.iter() {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    /// Number of cells still blank.
    pub fn unknown_remaining(&self) -> usize {
        self.labels.iter().filter(|l| l.is_unknown()).count()
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), StoreError> {
        if self.size.contains(x, y) {
            Ok(())
        } else {
            Err(StoreError::OutOfBounds {
                x,
                y,
                width: self.size.width,
                height: self.size.height,
            })
        }
    }

    fn set_cell(&mut self, x: usize, y: usize, label: Label) {
        self.labels[[y, x]] = label;
        let colour = self.palette.colour_of(label);
        for (c, &v) in colour.iter().enumerate() {
            self.rendered[[y, x, c]] = v;
        }
    }
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}
