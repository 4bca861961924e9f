//! Grid-to-raster geometry.
//!
//! A raster is conceptually divided into a `grid_w`×`grid_h` grid of
//! "sectors". Sector boundaries are computed independently per axis as
//! `floor(index * raster_len / grid_len)`, so neighbouring sectors may differ
//! in size by one pixel when the scale factor is not an integer.
//!
//! All functions here are stateless and operate on `ndarray` rasters of shape
//! `(height, width, 3)`.

use ndarray::{Array3, ArrayView1, Axis, Slice};

use crate::model::raster::{self, CHANNELS};
use crate::model::{Raster, RasterView, Rgb};

/// Inclusive window of width `2 * radius` around `point`, shifted to stay
/// inside `[lower, upper]`.
///
/// The low-end correction is checked first and, when it applies, the high end
/// is not re-checked. A domain narrower than `2 * radius` therefore yields a
/// window that extends past `upper` (or, when only the high end overflows,
/// below `lower`).
pub fn clamped_window(point: isize, lower: isize, upper: isize, radius: isize) -> (isize, isize) {
    let low = point - radius;
    let high = point + radius;

    if low < lower {
        log::trace!("clamped_window: shifting {}..={} up to {}", low, high, lower);
        (lower, lower + 2 * radius)
    } else if high > upper {
        log::trace!("clamped_window: shifting {}..={} down to {}", low, high, upper);
        (upper - 2 * radius, upper)
    } else {
        (low, high)
    }
}

/// Half-open pixel rectangle `[x0, x1) × [y0, y1)` inside a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: usize,
    pub x1: usize,
    pub y0: usize,
    pub y1: usize,
}

impl PixelRect {
    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Pixel coordinate of sector boundary `index` on an axis of `len` pixels
/// split into `cells` sectors, clamped into `0..=len`.
fn boundary(index: isize, len: usize, cells: usize) -> usize {
    if cells == 0 {
        return 0;
    }
    let scale = len as f64 / cells as f64;
    (index as f64 * scale).floor().clamp(0.0, len as f64) as usize
}

/// Pixel rectangle covering sectors `xs.0..=xs.1` by `ys.0..=ys.1`.
///
/// Sector indices may lie outside the grid; the result is clamped into the
/// raster and may be empty.
pub fn sector_bounds(
    width: usize,
    height: usize,
    grid_w: usize,
    grid_h: usize,
    xs: (isize, isize),
    ys: (isize, isize),
) -> PixelRect {
    let x0 = boundary(xs.0, width, grid_w);
    let x1 = boundary(xs.1 + 1, width, grid_w).max(x0);
    let y0 = boundary(ys.0, height, grid_h);
    let y1 = boundary(ys.1 + 1, height, grid_h).max(y0);
    PixelRect { x0, x1, y0, y1 }
}

/// View of sector `(x, y)` when `raster` is divided into `grid_w`×`grid_h`.
pub fn sector_rect<'a>(
    raster: RasterView<'a>,
    x: usize,
    y: usize,
    grid_w: usize,
    grid_h: usize,
) -> RasterView<'a> {
    let (x, y) = (x as isize, y as isize);
    sector_extract(raster, (x, x), (y, y), grid_w, grid_h)
}

/// View of every sector in `x_range.0..=x_range.1` × `y_range.0..=y_range.1`.
pub fn sector_extract<'a>(
    raster: RasterView<'a>,
    x_range: (isize, isize),
    y_range: (isize, isize),
    grid_w: usize,
    grid_h: usize,
) -> RasterView<'a> {
    let rect = sector_bounds(
        raster::width(&raster),
        raster::height(&raster),
        grid_w,
        grid_h,
        x_range,
        y_range,
    );
    let mut view = raster;
    view.slice_axis_inplace(Axis(0), Slice::from(rect.y0..rect.y1));
    view.slice_axis_inplace(Axis(1), Slice::from(rect.x0..rect.x1));
    view
}

/// Paint the half-open rectangle `[x1, x2) × [y1, y2)` with `colour`,
/// clipped to the raster.
pub fn fill_rect(raster: &mut Raster, x1: isize, x2: isize, y1: isize, y2: isize, colour: Rgb) {
    let (h, w) = (raster.shape()[0] as isize, raster.shape()[1] as isize);
    let (x1, x2) = (x1.clamp(0, w), x2.clamp(0, w));
    let (y1, y2) = (y1.clamp(0, h), y2.clamp(0, h));
    if x1 >= x2 || y1 >= y2 {
        return;
    }

    let colour = ArrayView1::from(&colour);
    let mut region = raster.view_mut();
    region.slice_axis_inplace(Axis(0), Slice::from(y1..y2));
    region.slice_axis_inplace(Axis(1), Slice::from(x1..x2));
    for mut px in region.lanes_mut(Axis(2)) {
        px.assign(&colour);
    }
}

/// Outline sector `(sector_x, sector_y)` of a raster divided into
/// `grid_w`×`grid_h` sectors.
///
/// Each edge is a band `2 * line_radius + 1` pixels wide centred on the
/// sector boundary.
pub fn draw_border(
    raster: &mut Raster,
    sector_x: isize,
    sector_y: isize,
    grid_w: usize,
    grid_h: usize,
    line_radius: usize,
    colour: Rgb,
) {
    if grid_w == 0 || grid_h == 0 {
        return;
    }
    let (h, w) = (raster.shape()[0], raster.shape()[1]);
    let xscale = w as f64 / grid_w as f64;
    let yscale = h as f64 / grid_h as f64;

    let x1 = (xscale * sector_x as f64).floor() as isize;
    let x2 = (xscale * (sector_x + 1) as f64).floor() as isize;
    let y1 = (yscale * sector_y as f64).floor() as isize;
    let y2 = (yscale * (sector_y + 1) as f64).floor() as isize;
    let r = line_radius as isize;

    // top, bottom
    fill_rect(raster, x1, x2, y1 - r, y1 + r + 1, colour);
    fill_rect(raster, x1, x2, y2 - r, y2 + r + 1, colour);
    // left, right
    fill_rect(raster, x1 - r, x1 + r + 1, y1, y2, colour);
    fill_rect(raster, x2 - r, x2 + r + 1, y1, y2, colour);
}

/// Nearest-neighbour resize to exactly `out_w`×`out_h`.
///
/// Returns `None` when either the source or the target has no pixels.
pub fn resize_nearest(src: RasterView<'_>, out_w: usize, out_h: usize) -> Option<Raster> {
    let (src_h, src_w) = (raster::height(&src), raster::width(&src));
    if src_w == 0 || src_h == 0 || out_w == 0 || out_h == 0 {
        return None;
    }

    let cols: Vec<usize> = (0..out_w).map(|x| (x * src_w / out_w).min(src_w - 1)).collect();
    let rows: Vec<usize> = (0..out_h).map(|y| (y * src_h / out_h).min(src_h - 1)).collect();

    Some(Array3::from_shape_fn((out_h, out_w, CHANNELS), |(y, x, c)| {
        src[[rows[y], cols[x], c]]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::raster::{filled, pixel};

    /// Raster where each pixel encodes its own coordinates.
    fn coordinate_raster(width: usize, height: usize) -> Raster {
        Array3::from_shape_fn((height, width, CHANNELS), |(y, x, c)| match c {
            0 => x as u8,
            1 => y as u8,
            _ => 0,
        })
    }

    #[test]
    fn test_clamped_window_examples() {
        assert_eq!(clamped_window(0, 0, 4, 1), (0, 2));
        assert_eq!(clamped_window(4, 0, 4, 1), (2, 4));
        assert_eq!(clamped_window(2, 0, 4, 1), (1, 3));
    }

    #[test]
    fn test_clamped_window_width_and_containment() {
        for lower in -3..3 {
            for span in 0..12 {
                let upper = lower + span;
                for radius in 0..=(span / 2) {
                    for point in lower..=upper {
                        let (lo, hi) = clamped_window(point, lower, upper, radius);
                        assert_eq!(hi - lo, 2 * radius);
                        assert!(lo <= point && point <= hi);
                        assert!(lo >= lower && hi <= upper);
                    }
                }
            }
        }
    }

    #[test]
    fn test_clamped_window_low_correction_not_rechecked() {
        // Domain of 3 cells with a radius-2 window: shifting up overflows
        // the upper bound and is left that way.
        assert_eq!(clamped_window(0, 0, 2, 2), (0, 4));
    }

    #[test]
    fn test_clamped_window_high_correction_can_undershoot() {
        assert_eq!(clamped_window(3, 0, 4, 3), (-2, 4));
        assert_eq!(clamped_window(4, 1, 4, 2), (0, 4));
    }

    #[test]
    fn test_sector_rect_example() {
        let raster = coordinate_raster(100, 100);
        let sector = sector_rect(raster.view(), 3, 4, 10, 10);
        assert_eq!(sector.shape(), &[10, 10, 3]);
        // Top-left pixel is column 30, row 40
        assert_eq!(pixel(&sector, 0, 0), [30, 40, 0]);
        assert_eq!(pixel(&sector, 9, 9), [39, 49, 0]);
    }

    #[test]
    fn test_sector_rect_non_integer_scale() {
        // 10 pixels over 4 sectors: boundaries at 0, 2, 5, 7, 10
        let raster = coordinate_raster(10, 10);
        let widths: Vec<usize> = (0..4)
            .map(|x| raster::width(&sector_rect(raster.view(), x, 0, 4, 4)))
            .collect();
        assert_eq!(widths, vec![2, 3, 2, 3]);
    }

    #[test]
    fn test_sector_extract_inclusive_range() {
        let raster = coordinate_raster(100, 50);
        let extract = sector_extract(raster.view(), (2, 4), (1, 2), 10, 5);
        // columns 20..50, rows 10..30
        assert_eq!(extract.shape(), &[20, 30, 3]);
        assert_eq!(pixel(&extract, 0, 0), [20, 10, 0]);
        assert_eq!(pixel(&extract, 29, 19), [49, 29, 0]);
    }

    #[test]
    fn test_sector_extract_clamps_out_of_range_sectors() {
        let raster = coordinate_raster(20, 20);
        let extract = sector_extract(raster.view(), (-1, 1), (3, 5), 4, 4);
        // columns 0..10, rows 15..20
        assert_eq!(extract.shape(), &[5, 10, 3]);
        assert_eq!(pixel(&extract, 0, 0), [0, 15, 0]);
    }

    #[test]
    fn test_fill_rect_clips_to_bounds() {
        let mut raster = filled(5, 5, [0, 0, 0]);
        fill_rect(&mut raster, -2, 2, 3, 10, [9, 9, 9]);

        for y in 0..5 {
            for x in 0..5 {
                let expected = if x < 2 && y >= 3 { [9, 9, 9] } else { [0, 0, 0] };
                assert_eq!(pixel(&raster.view(), x, y), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_sector_extract_borrows_raster() {
        let raster = coordinate_raster(100, 50);
        let extract = sector_extract(raster.view(), (2, 4), (1, 2), 10, 5);
        assert!(std::ptr::eq(extract.as_ptr(), &raster[[10, 20, 0]]));
        assert_eq!(extract.strides(), raster.strides());
    }

    #[test]
    fn test_fill_rect_interior() {
        let mut raster = coordinate_raster(6, 4);
        fill_rect(&mut raster, 1, 4, 1, 3, [200, 100, 50]);
        for y in 0..4 {
            for x in 0..6 {
                let inside = (1..4).contains(&x) && (1..3).contains(&y);
                let expected = if inside { [200, 100, 50] } else { [x as u8, y as u8, 0] };
                assert_eq!(pixel(&raster.view(), x, y), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_fill_rect_empty_is_noop() {
        let mut raster = filled(3, 3, [1, 1, 1]);
        fill_rect(&mut raster, 2, 2, 0, 3, [7, 7, 7]);
        fill_rect(&mut raster, 5, 9, 0, 3, [7, 7, 7]);
        assert!(raster.iter().all(|&v| v == 1));
    }

    #[test]
    fn test_draw_border_outlines_sector() {
        // 9x9 raster split 3x3; centre sector spans 3..6 on both axes.
        let mut raster = filled(9, 9, [0, 0, 0]);
        draw_border(&mut raster, 1, 1, 3, 3, 0, [255, 0, 0]);
        let view = raster.view();

        assert_eq!(pixel(&view, 3, 3), [255, 0, 0]);
        assert_eq!(pixel(&view, 5, 3), [255, 0, 0]);
        assert_eq!(pixel(&view, 3, 5), [255, 0, 0]);
        assert_eq!(pixel(&view, 6, 4), [255, 0, 0]);
        assert_eq!(pixel(&view, 4, 6), [255, 0, 0]);
        // interior and far outside untouched
        assert_eq!(pixel(&view, 4, 4), [0, 0, 0]);
        assert_eq!(pixel(&view, 0, 0), [0, 0, 0]);
        assert_eq!(pixel(&view, 8, 8), [0, 0, 0]);
    }

    #[test]
    fn test_draw_border_line_radius_widens_band() {
        let mut raster = filled(30, 30, [0, 0, 0]);
        draw_border(&mut raster, 1, 1, 3, 3, 1, [0, 255, 0]);
        let view = raster.view();

        // top edge at row 10, radius 1 covers rows 9..=11
        for y in 9..=11 {
            assert_eq!(pixel(&view, 15, y), [0, 255, 0]);
        }
        assert_eq!(pixel(&view, 15, 8), [0, 0, 0]);
        assert_eq!(pixel(&view, 15, 12), [0, 0, 0]);
    }

    #[test]
    fn test_draw_border_at_raster_edge_is_clipped() {
        let mut raster = filled(4, 4, [0, 0, 0]);
        draw_border(&mut raster, 0, 0, 1, 1, 1, [1, 2, 3]);
        let view = raster.view();
        assert_eq!(pixel(&view, 0, 0), [1, 2, 3]);
        assert_eq!(pixel(&view, 3, 3), [1, 2, 3]);
        assert_eq!(pixel(&view, 2, 2), [0, 0, 0]);
    }

    #[test]
    fn test_resize_nearest_upscale_keeps_hard_edges() {
        let mut src = filled(2, 1, [0, 0, 0]);
        src[[0, 1, 0]] = 255;
        let out = resize_nearest(src.view(), 6, 2).unwrap();
        assert_eq!(out.shape(), &[2, 6, 3]);
        let view = out.view();
        for x in 0..3 {
            assert_eq!(pixel(&view, x, 1), [0, 0, 0]);
        }
        for x in 3..6 {
            assert_eq!(pixel(&view, x, 0), [255, 0, 0]);
        }
    }

    #[test]
    fn test_resize_nearest_downscale() {
        let src = coordinate_raster(8, 8);
        let out = resize_nearest(src.view(), 4, 2).unwrap();
        assert_eq!(out.shape(), &[2, 4, 3]);
        assert_eq!(pixel(&out.view(), 1, 1), [2, 4, 0]);
    }

    #[test]
    fn test_resize_nearest_empty() {
        let src = filled(0, 3, [0, 0, 0]);
        assert!(resize_nearest(src.view(), 4, 4).is_none());
        let src = filled(3, 3, [0, 0, 0]);
        assert!(resize_nearest(src.view(), 0, 4).is_none());
    }
}
