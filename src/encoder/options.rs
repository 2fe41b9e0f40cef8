use crate::error::EncoderError;
use crate::geometry::{Direction, FULL_CIRCLE};
use crate::osc::OscTarget;
use ratatui::{layout::Alignment, style::Style};

pub const DEFAULT_CENTER_PERCENT: i32 = 15;
pub const DEFAULT_START_ANGLE: i32 = 90;
pub const DEFAULT_LABEL_ALIGN: Alignment = Alignment::Center;

/// How an encoder looks and where it reports.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderOptions {
    /// Size of the cleared centre as a percentage of the encoder's radius.
    /// Zero draws a plain disc.
    pub center_percent: i32,
    pub hide_text_progress: bool,
    pub cell_style: Style,
    pub text_style: Style,
    pub label: String,
    pub label_style: Style,
    pub label_align: Alignment,
    /// Degrees from the X axis, counter-clockwise, that represent both 0% and
    /// 100% of the progress.
    pub start_angle: i32,
    pub direction: Direction,
    pub target: OscTarget,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            center_percent: DEFAULT_CENTER_PERCENT,
            hide_text_progress: false,
            cell_style: Style::default(),
            text_style: Style::default(),
            label: String::new(),
            label_style: Style::default(),
            label_align: DEFAULT_LABEL_ALIGN,
            start_angle: DEFAULT_START_ANGLE,
            direction: Direction::Clockwise,
            target: OscTarget::default(),
        }
    }
}

impl EncoderOptions {
    pub fn validate(&self) -> Result<(), EncoderError> {
        if !(0..=100).contains(&self.center_percent) {
            return Err(EncoderError::InvalidCenterPercent(self.center_percent));
        }
        if !(0..FULL_CIRCLE).contains(&self.start_angle) {
            return Err(EncoderError::InvalidStartAngle(self.start_angle));
        }
        if self.target.route.is_empty() {
            return Err(EncoderError::EmptyRoute);
        }
        if !self.target.route.starts_with('/') {
            return Err(EncoderError::InvalidRoute(self.target.route.clone()));
        }
        if self.target.port == 0 {
            return Err(EncoderError::InvalidPort);
        }
        Ok(())
    }
}
