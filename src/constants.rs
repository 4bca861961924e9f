//! Global constants for poprev

/// Default number of grid cells per row
pub const DRAW_WIDTH: usize = 64;

/// Default number of grid rows
pub const DRAW_HEIGHT: usize = 64;

/// Default width of the reference context view in pixels
pub const REF_CANVAS_WIDTH: usize = 480;

/// Default height of the reference context view in pixels
pub const REF_CANVAS_HEIGHT: usize = 480;

/// Default neighbourhood radius (in cells) around the focus cell
pub const CONTEXT_LEVEL: usize = 1;

/// Half-width of the border drawn around the focus sector
pub const HIGHLIGHT_LINE_RADIUS: usize = 1;

/// Upscale factor used when a drawing is shown at more than one pixel per cell
pub const PREVIEW_SCALE: usize = 4;

/// Colour used for the focus cell and the focus sector border
pub const HIGHLIGHT_COLOUR: [u8; 3] = [255, 0, 0];

/// Display colours for the known labels 0..=3
pub const LABEL_COLOURS: [[u8; 3]; 4] = [
    [0x00, 0x00, 0x00],
    [0x55, 0x55, 0x55],
    [0xaa, 0xaa, 0xaa],
    [0xff, 0xff, 0xff],
];

/// Palette index used for any label outside the known range
pub const FALLBACK_COLOUR_INDEX: usize = 3;

/// File extension of saved drawings
pub const DRAWING_EXTENSION: &str = "poprev";
