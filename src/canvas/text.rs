use ratatui::{buffer::Buffer, layout::Alignment, layout::Rect, style::Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// What to do with text that is wider than the room it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overrun {
    Trim,
    ThreeDot,
}

/// Cuts `text` to at most `max_width` display columns.
pub fn fit_text(text: &str, max_width: usize, overrun: Overrun) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let budget = match overrun {
        Overrun::Trim => max_width,
        Overrun::ThreeDot if max_width == 0 => return String::new(),
        Overrun::ThreeDot => max_width - 1,
    };

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if overrun == Overrun::ThreeDot {
        out.push(ELLIPSIS);
    }
    out
}

/// Column at which text of `width` starts inside `area` for `align`.
pub fn align_x(area: Rect, width: usize, align: Alignment) -> u16 {
    let width = width.min(area.width as usize) as u16;
    match align {
        Alignment::Left => area.x,
        Alignment::Center => area.x + (area.width - width) / 2,
        Alignment::Right => area.x + area.width - width,
    }
}

/// Draws `text` starting at (`x`, `y`) without writing at or past `max_x`.
/// Nothing is drawn outside the buffer.
pub fn draw_text(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    text: &str,
    max_x: u16,
    overrun: Overrun,
    style: Style,
) {
    let bounds = buf.area;
    if y < bounds.top() || y >= bounds.bottom() || x < bounds.left() {
        return;
    }
    let max_x = max_x.min(bounds.right());
    if x >= max_x {
        return;
    }
    let room = (max_x - x) as usize;
    let fitted = fit_text(text, room, overrun);
    buf.set_stringn(x, y, fitted, room, style);
}
