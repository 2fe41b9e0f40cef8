use crate::error::EncoderError;

pub const DEFAULT_TOTAL: i32 = 100;

/// How the progress text is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressMode {
    /// "50%"
    #[default]
    Percent,
    /// "5/10"
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderState {
    pub current: i32,
    pub total: i32,
    pub angle: i32,
    pub mode: ProgressMode,
}

impl EncoderState {
    pub fn new(angle: i32) -> Self {
        EncoderState {
            current: 0,
            total: DEFAULT_TOTAL,
            angle,
            mode: ProgressMode::Percent,
        }
    }

    pub fn check_percent(p: i32) -> Result<(), EncoderError> {
        if !(0..=100).contains(&p) {
            return Err(EncoderError::InvalidPercent(p));
        }
        Ok(())
    }

    pub fn check_absolute(value: i32, total: i32) -> Result<(), EncoderError> {
        if total <= 0 || !(0..=total).contains(&value) {
            return Err(EncoderError::InvalidAbsolute { value, total });
        }
        Ok(())
    }

    /// Moves one step and returns the signed delta.
    ///
    /// Wraps with a true modulo, so stepping back from zero lands on
    /// `total - 1`.
    pub fn step(&mut self, delta: i32) -> i32 {
        self.current = (self.current + delta).rem_euclid(self.total);
        delta
    }

    pub fn progress_text(&self) -> String {
        match self.mode {
            ProgressMode::Percent => format!("{}%", self.current),
            ProgressMode::Absolute => format!("{}/{}", self.current, self.total),
        }
    }
}
