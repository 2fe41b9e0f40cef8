use super::options::EncoderOptions;
use super::state::EncoderState;
use crate::canvas::{align_x, draw_text, Overrun, Ring};
use crate::error::DrawError;
use crate::geometry::{
    available_cells, center_radius, split_for_label, start_end_angles, Point, MIN_SIZE,
};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::UnicodeWidthStr;

const RESIZE_SYMBOL: &str = "⇄";

/// Paints the encoder for `state` into `area`.
pub(crate) fn render(
    state: &EncoderState,
    opts: &EncoderOptions,
    area: Rect,
    buf: &mut Buffer,
) -> Result<(), DrawError> {
    let sweep = start_end_angles(state.current, state.total, state.angle, opts.direction);

    let (encoder_area, label_area) = if opts.label.is_empty() {
        (area, None)
    } else {
        let (main, label) = split_for_label(area)?;
        (main, Some(label))
    };

    if encoder_area.width < MIN_SIZE.0 || encoder_area.height < MIN_SIZE.1 {
        return Err(DrawError::ResizeNeeded {
            width: area.width,
            height: area.height,
        });
    }

    let ring = Ring::fit(encoder_area).with_sweep(sweep);
    let center = center_radius(ring.radius, opts.center_percent);
    let ring = ring.with_hole(center);
    ring.render(encoder_area, buf, opts.cell_style);

    if !opts.hide_text_progress {
        draw_progress_text(buf, encoder_area, ring.mid, center, &state.progress_text(), opts.text_style);
    }

    if let Some(label_area) = label_area {
        draw_label(buf, label_area, opts);
    }
    Ok(())
}

/// Draws the progress text in the centre, but only when the cleared centre
/// is wide enough to hold all of it.
fn draw_progress_text(buf: &mut Buffer, area: Rect, mid: Point, center: i32, text: &str, style: Style) {
    let (cells, first) = available_cells(mid, center);
    let need = text.width();
    if cells < need {
        return;
    }
    let x = area.x + first.x as u16 + ((cells - need) / 2) as u16;
    let y = area.y + first.y as u16;
    draw_text(buf, x, y, text, x + need as u16, Overrun::Trim, style);
}

fn draw_label(buf: &mut Buffer, area: Rect, opts: &EncoderOptions) {
    let x = align_x(area, opts.label.width(), opts.label_align);
    let y = area.bottom() - 1;
    draw_text(buf, x, y, &opts.label, area.right(), Overrun::ThreeDot, opts.label_style);
}

/// Marks an area that is too small for its widget.
pub(crate) fn render_resize_needed(area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    draw_text(buf, area.x, area.y, RESIZE_SYMBOL, area.right(), Overrun::Trim, Style::default());
}
