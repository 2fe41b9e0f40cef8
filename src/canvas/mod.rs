//! Drawing primitives used by the encoder: a braille ring painted through
//! ratatui's canvas, and width-aware text placement.

pub mod ring;
pub mod text;

pub use ring::Ring;
pub use text::{align_x, draw_text, fit_text, Overrun};
