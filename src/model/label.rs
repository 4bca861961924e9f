//! Cell labels and the palette that renders them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{FALLBACK_COLOUR_INDEX, HIGHLIGHT_COLOUR, LABEL_COLOURS};
use crate::model::Rgb;

/// A classification value assigned to one grid cell.
///
/// Any `u8` can be stored. Only `0..=3` have their own display colour;
/// everything else (including [`Label::UNKNOWN`]) renders with the
/// palette's fallback colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub u8);

impl Label {
    /// Number of labels with a dedicated colour.
    pub const KNOWN_COUNT: usize = 4;

    /// Blank value written into every cell of a new drawing.
    pub const UNKNOWN: Label = Label(9);

    /// The raw stored value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this label has its own palette entry.
    pub fn is_known(self) -> bool {
        usize::from(self.0) < Self::KNOWN_COUNT
    }

    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }

    /// Palette slot for known labels, `None` otherwise.
    pub fn known_index(self) -> Option<usize> {
        self.is_known().then_some(usize::from(self.0))
    }

    /// Iterate over the known labels in order.
    pub fn known() -> impl Iterator<Item = Label> {
        (0..Self::KNOWN_COUNT as u8).map(Label)
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl From<u8> for Label {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Colour policy for labels.
///
/// Known labels map onto `colours[label]`; every other value maps onto
/// `colours[fallback]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colours: [Rgb; Label::KNOWN_COUNT],
    fallback: usize,
    highlight: Rgb,
}

impl Palette {
    /// Create a palette. `fallback` is clamped into the colour table.
    pub fn new(colours: [Rgb; Label::KNOWN_COUNT], fallback: usize, highlight: Rgb) -> Self {
        Self {
            colours,
            fallback: fallback.min(Label::KNOWN_COUNT - 1),
            highlight,
        }
    }

    /// Colour used to render `label`.
    pub fn colour_of(&self, label: Label) -> Rgb {
        match label.known_index() {
            Some(index) => self.colours[index],
            None => self.colours[self.fallback],
        }
    }

    /// Colour of blank and out-of-range cells.
    pub fn fallback_colour(&self) -> Rgb {
        self.colours[self.fallback]
    }

    /// Colour used to mark the focus cell.
    pub fn highlight(&self) -> Rgb {
        self.highlight
    }

    pub fn colours(&self) -> &[Rgb; Label::KNOWN_COUNT] {
        &self.colours
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(LABEL_COLOURS, FALLBACK_COLOUR_INDEX, HIGHLIGHT_COLOUR)
    }
}
