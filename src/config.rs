//! Dashboard configuration: which encoders and keys exist, how they look and
//! where they report. The defaults describe the stock three-encoder surface.

use crate::driver::{DrivePlan, PlayMode};
use crate::encoder::{EncoderOptions, DEFAULT_CENTER_PERCENT, DEFAULT_START_ANGLE};
use crate::error::ConfigError;
use crate::geometry::Direction;
use crate::keys::KeyToggle;
use crate::osc::{OscTarget, DEFAULT_HOST, DEFAULT_PORT};
use ratatui::{
    layout::Alignment,
    style::{Color, Style},
};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

const STOCK_CONTROLS: u32 = 3;
const PROGRESS_MAX: i32 = 100;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub osc: OscSettings,
    pub encoders: Vec<EncoderSpec>,
    pub keys: Vec<KeySpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OscSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EncoderSpec {
    pub label: String,
    pub route: String,
    pub color: String,
    pub center_percent: i32,
    pub start_angle: i32,
    pub direction: Direction,
    pub label_align: LabelAlign,
    pub hide_text: bool,
    pub start: i32,
    pub step: i32,
    pub delay_ms: u64,
    pub mode: PlayMode,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeySpec {
    pub label: String,
    pub key: String,
    pub route: String,
}

impl Default for OscSettings {
    fn default() -> Self {
        OscSettings {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for EncoderSpec {
    fn default() -> Self {
        let plan = DrivePlan::default();
        EncoderSpec {
            label: String::new(),
            route: String::new(),
            color: "green".to_string(),
            center_percent: DEFAULT_CENTER_PERCENT,
            start_angle: DEFAULT_START_ANGLE,
            direction: Direction::Clockwise,
            label_align: LabelAlign::Center,
            hide_text: false,
            start: plan.start,
            step: plan.step,
            delay_ms: plan.delay.as_millis() as u64,
            mode: plan.mode,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let encoders = (1..=STOCK_CONTROLS)
            .map(|n| EncoderSpec {
                label: format!("E{n}"),
                route: format!("/remote/enc/{n}"),
                ..EncoderSpec::default()
            })
            .collect();
        let keys = (1..=STOCK_CONTROLS)
            .map(|n| KeySpec {
                label: format!("K{n}"),
                key: n.to_string(),
                route: format!("/remote/key/{n}"),
            })
            .collect();
        DashboardConfig {
            osc: OscSettings::default(),
            encoders,
            keys,
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses a config. Driver settings are checked here so a bad `start`
    /// or `step` stops the program before the dashboard opens.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(text)?;
        for spec in &config.encoders {
            spec.check_plan()?;
        }
        Ok(config)
    }

    /// Overrides the endpoint with values given on the command line.
    pub fn with_endpoint(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.osc.host = host;
        }
        if let Some(port) = port {
            self.osc.port = port;
        }
        self
    }

    fn target(&self, route: &str) -> OscTarget {
        OscTarget::new(route, self.osc.host.clone(), self.osc.port)
    }

    /// Builds validated options for every encoder, in order.
    pub fn encoder_options(&self) -> Result<Vec<EncoderOptions>, ConfigError> {
        self.encoders
            .iter()
            .map(|spec| spec.options(self.target(&spec.route)))
            .collect()
    }

    pub fn key_toggles(&self) -> Result<Vec<KeyToggle>, ConfigError> {
        self.keys
            .iter()
            .map(|spec| {
                let key = single_char(&spec.key)?;
                Ok(KeyToggle::new(spec.label.clone(), key, self.target(&spec.route)))
            })
            .collect()
    }
}

impl EncoderSpec {
    pub fn options(&self, target: OscTarget) -> Result<EncoderOptions, ConfigError> {
        let color = parse_color(&self.color)?;
        let opts = EncoderOptions {
            center_percent: self.center_percent,
            hide_text_progress: self.hide_text,
            cell_style: Style::default().fg(color),
            label_style: Style::default().fg(color),
            label: self.label.clone(),
            label_align: self.label_align.into(),
            start_angle: self.start_angle,
            direction: self.direction,
            target,
            ..EncoderOptions::default()
        };
        opts.validate().map_err(|source| ConfigError::Encoder {
            label: self.label.clone(),
            source,
        })?;
        Ok(opts)
    }

    fn check_plan(&self) -> Result<(), ConfigError> {
        let checks = [("start", self.start, 0), ("step", self.step, 1)];
        for (field, value, min) in checks {
            if !(min..=PROGRESS_MAX).contains(&value) {
                return Err(ConfigError::InvalidPlan {
                    label: self.label.clone(),
                    field,
                    value,
                    min,
                    max: PROGRESS_MAX,
                });
            }
        }
        Ok(())
    }

    pub fn plan(&self) -> DrivePlan {
        DrivePlan {
            start: self.start,
            step: self.step,
            // tokio intervals reject a zero period
            delay: Duration::from_millis(self.delay_ms.max(1)),
            mode: self.mode,
        }
    }
}

impl From<LabelAlign> for Alignment {
    fn from(align: LabelAlign) -> Self {
        match align {
            LabelAlign::Left => Alignment::Left,
            LabelAlign::Center => Alignment::Center,
            LabelAlign::Right => Alignment::Right,
        }
    }
}

fn parse_color(name: &str) -> Result<Color, ConfigError> {
    Color::from_str(name).map_err(|_| ConfigError::InvalidColor(name.to_string()))
}

fn single_char(key: &str) -> Result<char, ConfigError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidKey(key.to_string())),
    }
}
