use super::{Point, PIXEL_COLS_PER_CELL, PIXEL_ROWS_PER_CELL};
use crate::error::DrawError;
use ratatui::layout::Rect;

/// The smallest area, in cells (columns, rows), that still shows a circle.
pub const MIN_SIZE: (u16, u16) = (3, 3);

/// Rows reserved under the encoder for its label: one for the text and one
/// for the gap between the circle and the text.
pub const LABEL_ROWS: u16 = 2;

/// The smallest radius that still reads as a circle rather than a dot.
const MIN_CENTER_RADIUS: i32 = 2;

/// Radius of the cleared centre for an encoder of radius `outer`. Zero means
/// no centre should be drawn.
pub fn center_radius(outer: i32, center_percent: i32) -> i32 {
    let r = (outer as f64 / 100.0 * center_percent as f64).round() as i32;
    if r < MIN_CENTER_RADIUS {
        return 0;
    }
    r
}

/// Returns the pixel mid-point and the largest radius that fits a pixel grid
/// of the given size.
///
/// The mid-point is snapped to an even column and to the second pixel row of
/// a cell, so the middle text row of the canvas sits across the centre.
pub fn mid_and_radius(pixel_width: i32, pixel_height: i32) -> (Point, i32) {
    let cols = PIXEL_COLS_PER_CELL as i32;
    let rows = PIXEL_ROWS_PER_CELL as i32;

    let mut mid = Point::new(pixel_width / 2, pixel_height / 2);
    mid.x -= mid.x % cols;
    mid.y = match mid.y % rows {
        0 => mid.y + 1,
        1 => mid.y,
        r => mid.y - (r - 1),
    };

    let r = mid
        .x
        .min(mid.y)
        .min(pixel_width - 1 - mid.x)
        .min(pixel_height - 1 - mid.y)
        .max(0);
    (mid, r)
}

/// Splits `area` into the encoder's area and the label strip below it.
pub fn split_for_label(area: Rect) -> Result<(Rect, Rect), DrawError> {
    if area.height < LABEL_ROWS + MIN_SIZE.1 || area.width < MIN_SIZE.0 {
        return Err(DrawError::ResizeNeeded {
            width: area.width,
            height: area.height,
        });
    }
    let main_height = area.height - LABEL_ROWS;
    let main = Rect {
        height: main_height,
        ..area
    };
    let label = Rect {
        y: area.y + main_height,
        height: LABEL_ROWS,
        ..area
    };
    Ok((main, label))
}

/// Counts whole cells on the text row through `mid` that fall inside a
/// circle of `radius` pixels, and returns the first of them in cell
/// coordinates relative to the pixel grid's origin.
///
/// Circles smaller than three pixels offer no room.
pub fn available_cells(mid: Point, radius: i32) -> (usize, Point) {
    if radius < 3 {
        return (0, Point::default());
    }
    let cols = PIXEL_COLS_PER_CELL as i32;
    let rows = PIXEL_ROWS_PER_CELL as i32;

    // The text row spans pixel rows mid.y-1 ..= mid.y+2, the chord at the
    // farthest of them bounds what stays inside the circle.
    let dy = rows / 2;
    let half = ((radius * radius - dy * dy).max(0) as f64).sqrt() as i32;
    let left = mid.x - half;
    let right = mid.x + half;

    let first = (left + cols - 1).div_euclid(cols);
    let last = (right - (cols - 1)).div_euclid(cols);
    if last < first {
        return (0, Point::default());
    }
    let cells = (last - first + 1) as usize;
    (cells, Point::new(first, mid.y / rows))
}
