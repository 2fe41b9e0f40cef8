//! A widget that displays progress as a partial or full ring and reports
//! wheel input over OSC.

pub mod options;
mod render;
pub mod state;

pub use options::{EncoderOptions, DEFAULT_CENTER_PERCENT, DEFAULT_LABEL_ALIGN, DEFAULT_START_ANGLE};
pub use state::{EncoderState, ProgressMode, DEFAULT_TOTAL};

use crate::error::{DrawError, EncoderError, InputError};
use crate::geometry::{MIN_SIZE, PIXEL_COLS_PER_CELL, PIXEL_ROWS_PER_CELL};
use crate::osc::MessageSender;
use crate::widget::{ControlWidget, DrawMeta, EventMeta, WidgetOptions};
use crossterm::event::{KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

struct Inner {
    state: EncoderState,
    opts: EncoderOptions,
}

/// Displays the progress of an operation by filling a ring, and sends a
/// signed step to its OSC route whenever the mouse wheel turns it.
///
/// Safe to share between the drawing thread and update tasks; every read and
/// update goes through one lock.
pub struct Encoder {
    inner: Mutex<Inner>,
    sender: Arc<dyn MessageSender>,
}

impl Encoder {
    pub fn new(opts: EncoderOptions, sender: Arc<dyn MessageSender>) -> Result<Self, EncoderError> {
        opts.validate()?;
        Ok(Self {
            inner: Mutex::new(Inner {
                state: EncoderState::new(opts.start_angle),
                opts,
            }),
            sender,
        })
    }

    // Every critical section leaves the state valid, so a poisoned lock is
    // still safe to use.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the progress in percent, `0 <= p <= 100`.
    pub fn set_percent(&self, p: i32) -> Result<(), EncoderError> {
        self.set_percent_with(p, |_| {})
    }

    /// Like [`Encoder::set_percent`], also applying `overrides` to the
    /// options. Nothing changes unless both the value and the resulting
    /// options are valid.
    pub fn set_percent_with<F>(&self, p: i32, overrides: F) -> Result<(), EncoderError>
    where
        F: FnOnce(&mut EncoderOptions),
    {
        EncoderState::check_percent(p)?;
        self.update(overrides, |state| {
            state.current = p;
            state.total = DEFAULT_TOTAL;
            state.mode = ProgressMode::Percent;
        })
    }

    /// Sets the progress as `value` out of `total`, displayed as "value/total".
    pub fn set_absolute(&self, value: i32, total: i32) -> Result<(), EncoderError> {
        self.set_absolute_with(value, total, |_| {})
    }

    pub fn set_absolute_with<F>(&self, value: i32, total: i32, overrides: F) -> Result<(), EncoderError>
    where
        F: FnOnce(&mut EncoderOptions),
    {
        EncoderState::check_absolute(value, total)?;
        self.update(overrides, |state| {
            state.current = value;
            state.total = total;
            state.mode = ProgressMode::Absolute;
        })
    }

    /// Replaces all options at once.
    pub fn set_options(&self, opts: EncoderOptions) -> Result<(), EncoderError> {
        self.update(|current| *current = opts, |_| {})
    }

    fn update<F, S>(&self, overrides: F, apply: S) -> Result<(), EncoderError>
    where
        F: FnOnce(&mut EncoderOptions),
        S: FnOnce(&mut EncoderState),
    {
        let mut inner = self.lock();
        let mut opts = inner.opts.clone();
        overrides(&mut opts);
        opts.validate()?;

        if opts.start_angle != inner.opts.start_angle {
            inner.state.angle = opts.start_angle;
        }
        inner.opts = opts;
        apply(&mut inner.state);
        Ok(())
    }

    pub fn state(&self) -> EncoderState {
        self.lock().state
    }

    pub fn encoder_options(&self) -> EncoderOptions {
        self.lock().opts.clone()
    }

    fn snapshot(&self) -> (EncoderState, EncoderOptions) {
        let inner = self.lock();
        (inner.state, inner.opts.clone())
    }
}

impl ControlWidget for Encoder {
    fn draw(&self, area: Rect, buf: &mut Buffer, _meta: &DrawMeta) -> Result<(), DrawError> {
        let (state, opts) = self.snapshot();
        render::render(&state, &opts, area, buf)
    }

    /// Scrolling down moves the encoder forward by one, scrolling up moves it
    /// back, both wrapping around `total`. The step is sent once the lock is
    /// released.
    fn handle_mouse(&self, event: &MouseEvent, _meta: &EventMeta) -> Result<(), InputError> {
        let delta = match event.kind {
            MouseEventKind::ScrollDown => 1,
            MouseEventKind::ScrollUp => -1,
            _ => return Ok(()),
        };

        let (target, current) = {
            let mut inner = self.lock();
            inner.state.step(delta);
            (inner.opts.target.clone(), inner.state.current)
        };
        debug!(route = %target.route, current, delta, "encoder turned");
        self.sender.send(&target, delta);
        Ok(())
    }

    fn handle_keyboard(&self, _event: &KeyEvent, _meta: &EventMeta) -> Result<(), InputError> {
        Err(InputError::Unsupported("Encoder"))
    }

    fn options(&self) -> WidgetOptions {
        WidgetOptions {
            // A circle needs equal pixel extents, which braille cells give
            // at PIXEL_ROWS_PER_CELL columns per PIXEL_COLS_PER_CELL rows.
            ratio: (PIXEL_ROWS_PER_CELL, PIXEL_COLS_PER_CELL),
            minimum_size: MIN_SIZE,
            want_keyboard: false,
            want_mouse: true,
        }
    }
}

impl Widget for &Encoder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Err(DrawError::ResizeNeeded { .. }) = self.draw(area, buf, &DrawMeta::default()) {
            render::render_resize_needed(area, buf);
        }
    }
}
