//! Focus-cell navigation.
//!
//! The annotation store itself is cursor-free; a front end keeps a [`Cursor`]
//! and passes its position into store operations.

use std::fmt;
use std::str::FromStr;

use crate::model::{GridSize, Label};

/// Single-step movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognised direction names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown direction '{0}'")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" | "n" | "up" => Ok(Direction::North),
            "east" | "e" | "right" => Ok(Direction::East),
            "south" | "s" | "down" => Ok(Direction::South),
            "west" | "w" | "left" => Ok(Direction::West),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// One instruction in a labelling session: label the focus cell, or move it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Label(Label),
    Move(Direction),
}

/// Error for steps that are neither a single digit nor a direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid step '{0}': expected a single digit 0-9 or a direction")]
pub struct ParseStepError(String);

impl FromStr for Step {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Only one digit fits in a drawing cell.
        if let [b @ b'0'..=b'9'] = s.as_bytes() {
            return Ok(Step::Label(Label(b - b'0')));
        }
        s.parse()
            .map(Step::Move)
            .map_err(|_| ParseStepError(s.to_string()))
    }
}

/// Parse every step before any of them is applied.
pub fn parse_steps<S: AsRef<str>>(steps: &[S]) -> Result<Vec<Step>, ParseStepError> {
    steps.iter().map(|s| s.as_ref().parse()).collect()
}

/// A jump target outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Position ({x}, {y}) is outside the {width}x{height} grid")]
pub struct JumpError {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Current focus cell on a grid of fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    x: usize,
    y: usize,
    size: GridSize,
}

impl Cursor {
    /// Cursor at `(0, 0)`.
    pub fn new(size: GridSize) -> Self {
        Self { x: 0, y: 0, size }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Position as shown to users, counting from 1.
    pub fn one_based(&self) -> (usize, usize) {
        (self.x + 1, self.y + 1)
    }

    /// Move one cell, wrapping around on the moved axis only.
    pub fn step(&mut self, direction: Direction) {
        let (w, h) = (self.size.width, self.size.height);
        if w == 0 || h == 0 {
            return;
        }
        match direction {
            Direction::North => self.y = (self.y + h - 1) % h,
            Direction::East => self.x = (self.x + 1) % w,
            Direction::South => self.y = (self.y + 1) % h,
            Direction::West => self.x = (self.x + w - 1) % w,
        }
    }

    /// Move to the next cell in row-major order, wrapping to `(0, 0)` after
    /// the last cell.
    pub fn advance(&mut self) {
        let (w, h) = (self.size.width, self.size.height);
        if w == 0 || h == 0 {
            return;
        }
        self.x = (self.x + 1) % w;
        if self.x == 0 {
            self.y = (self.y + 1) % h;
        }
    }

    /// Jump to a zero-based position.
    pub fn jump_to(&mut self, x: usize, y: usize) -> Result<(), JumpError> {
        if !self.size.contains(x, y) {
            return Err(JumpError {
                x,
                y,
                width: self.size.width,
                height: self.size.height,
            });
        }
        self.x = x;
        self.y = y;
        Ok(())
    }

    /// Jump to a position given in one-based user coordinates.
    pub fn jump_to_one_based(&mut self, x: usize, y: usize) -> Result<(), JumpError> {
        match (x.checked_sub(1), y.checked_sub(1)) {
            (Some(zx), Some(zy)) if self.size.contains(zx, zy) => self.jump_to(zx, zy),
            _ => Err(JumpError {
                x,
                y,
                width: self.size.width,
                height: self.size.height,
            }),
        }
    }
}
