use crate::geometry::{mid_and_radius, Point, Sweep, PIXEL_COLS_PER_CELL, PIXEL_ROWS_PER_CELL};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Context, Painter, Shape},
        Widget,
    },
};

/// A filled ring on the braille pixel grid of a cell area: every pixel within
/// `radius` of `mid`, outside the `hole` and on the `sweep`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    pub mid: Point,
    pub radius: i32,
    /// Radius of the unpainted centre. Zero paints a plain disc.
    pub hole: i32,
    /// `None` paints the whole circle.
    pub sweep: Option<Sweep>,
    width: i32,
    height: i32,
}

impl Ring {
    /// The largest circle that fits `area`, centred on a text row.
    pub fn fit(area: Rect) -> Self {
        let width = area.width as i32 * PIXEL_COLS_PER_CELL as i32;
        let height = area.height as i32 * PIXEL_ROWS_PER_CELL as i32;
        let (mid, radius) = mid_and_radius(width, height);
        Ring {
            mid,
            radius,
            hole: 0,
            sweep: None,
            width,
            height,
        }
    }

    pub fn with_sweep(self, sweep: Sweep) -> Self {
        Ring {
            sweep: Some(sweep),
            ..self
        }
    }

    pub fn with_hole(self, hole: i32) -> Self {
        Ring { hole, ..self }
    }

    /// Braille pixels (columns, rows) covered by the cell area.
    pub fn pixel_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn covers(&self, p: Point) -> bool {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height || self.radius <= 0 {
            return false;
        }
        let dx = p.x - self.mid.x;
        let dy = self.mid.y - p.y;
        let dist = dx * dx + dy * dy;
        if dist > self.radius * self.radius + self.radius {
            return false;
        }
        if self.hole > 0 && dist <= self.hole * self.hole + self.hole {
            return false;
        }
        match self.sweep {
            Some(sweep) => sweep.contains((dy as f64).atan2(dx as f64).to_degrees()),
            None => true,
        }
    }

    /// Draws the ring into `area` of `buf` with `style`. Cells without a
    /// painted pixel keep what the buffer already holds, and nothing lands
    /// outside the buffer.
    pub fn render(&self, area: Rect, buf: &mut Buffer, style: Style) {
        if area.is_empty() || self.sweep.is_some_and(|s| s.is_empty()) {
            return;
        }
        let mut layer = Buffer::empty(area);
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, self.width as f64])
            .y_bounds([0.0, self.height as f64])
            .paint(|ctx: &mut Context<'_>| ctx.draw(self))
            .render(area, &mut layer);

        let clip = area.intersection(buf.area);
        for y in clip.top()..clip.bottom() {
            for x in clip.left()..clip.right() {
                let symbol = layer.get(x, y).symbol();
                if symbol != " " {
                    buf.get_mut(x, y).set_symbol(symbol).set_style(style);
                }
            }
        }
    }
}

impl Shape for Ring {
    fn draw(&self, painter: &mut Painter) {
        let r = self.radius;
        let rows = (self.mid.y - r).max(0)..=(self.mid.y + r).min(self.height - 1);
        for y in rows {
            for x in (self.mid.x - r).max(0)..=(self.mid.x + r).min(self.width - 1) {
                if self.covers(Point::new(x, y)) {
                    painter.paint(x as usize, y as usize, Color::Reset);
                }
            }
        }
    }
}
