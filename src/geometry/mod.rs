//! Pure geometry for the encoder: arcs swept by progress, radii on the braille
//! pixel grid and the sub-areas reserved for text.
//!
//! Braille cells address a 2x4 pixel matrix, so a pixel is twice as tall in
//! cell units as it is wide. Terminal cells are roughly twice as tall as they
//! are wide, which makes braille pixels close to square. Every radius and
//! mid-point below is computed in pixels; conversions back to cells go through
//! [`PIXEL_COLS_PER_CELL`] and [`PIXEL_ROWS_PER_CELL`].

pub mod angles;
pub mod area;

pub use angles::{start_end_angles, Direction, Sweep, FULL_CIRCLE};
pub use area::{
    available_cells, center_radius, mid_and_radius, split_for_label, LABEL_ROWS, MIN_SIZE,
};

/// Braille pixel columns per character cell.
pub const PIXEL_COLS_PER_CELL: u16 = 2;
/// Braille pixel rows per character cell.
pub const PIXEL_ROWS_PER_CELL: u16 = 4;

/// A point on the braille pixel grid, or in cell units where stated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}
