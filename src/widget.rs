//! The contract between a control widget and the host UI that places it.

use crate::error::{DrawError, InputError};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{buffer::Buffer, layout::Rect};

/// Sizing and input requirements reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetOptions {
    /// Preferred columns:rows ratio of the widget's area.
    pub ratio: (u16, u16),
    /// Smallest (columns, rows) the widget can draw on.
    pub minimum_size: (u16, u16),
    /// Whether the host should forward key presses.
    pub want_keyboard: bool,
    /// Whether the host should forward pointer events over the widget's area.
    pub want_mouse: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DrawMeta;

#[derive(Debug, Clone, Copy, Default)]
pub struct EventMeta {
    pub focused: bool,
}

pub trait ControlWidget {
    /// Draws the widget into `area` of `buf`.
    fn draw(&self, area: Rect, buf: &mut Buffer, meta: &DrawMeta) -> Result<(), DrawError>;

    fn handle_mouse(&self, event: &MouseEvent, meta: &EventMeta) -> Result<(), InputError>;

    fn handle_keyboard(&self, event: &KeyEvent, meta: &EventMeta) -> Result<(), InputError>;

    fn options(&self) -> WidgetOptions;
}

/// Shrinks `area` to the largest centred rectangle with the widget's ratio.
pub fn fit_ratio(area: Rect, ratio: (u16, u16)) -> Rect {
    let (rx, ry) = (ratio.0.max(1) as u32, ratio.1.max(1) as u32);
    let (w, h) = (area.width as u32, area.height as u32);
    let (width, height) = if w * ry > h * rx {
        (h * rx / ry, h)
    } else {
        (w, w * ry / rx)
    };
    let (width, height) = (width as u16, height as u16);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
