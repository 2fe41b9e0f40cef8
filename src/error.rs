use std::path::PathBuf;
use thiserror::Error;

/// Rejected progress values and option sets. State is never touched when one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncoderError {
    #[error("invalid percentage, p({0}) must be 0 <= p <= 100")]
    InvalidPercent(i32),

    #[error("invalid absolute progress {value}/{total}, must be 0 <= value <= total and total > 0")]
    InvalidAbsolute { value: i32, total: i32 },

    #[error("invalid center percent {0}, must be in range 0 <= p <= 100")]
    InvalidCenterPercent(i32),

    #[error("invalid start angle {0}, must be in range 0 <= angle < 360")]
    InvalidStartAngle(i32),

    #[error("osc route must not be empty")]
    EmptyRoute,

    #[error("invalid osc route {0:?}, must start with '/'")]
    InvalidRoute(String),

    #[error("osc port must not be zero")]
    InvalidPort,
}

/// Raised by `draw` when the surface cannot hold the widget. Hosts react by
/// laying out again; it is not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("area {width}x{height} is too small, resize needed")]
    ResizeNeeded { width: u16, height: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("the {0} widget doesn't support keyboard events")]
    Unsupported(&'static str),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("cannot resolve {host}:{port}")]
    Resolve { host: String, port: u16 },

    #[error("osc encoding failed: {0}")]
    Encode(#[from] rosc::OscError),

    #[error("udp send failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown color {0:?}")]
    InvalidColor(String),

    #[error("key binding {0:?} must be a single character")]
    InvalidKey(String),

    #[error("encoder {label:?}: driver {field} {value} must be in range {min}..={max}")]
    InvalidPlan {
        label: String,
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("encoder {label:?}: {source}")]
    Encoder {
        label: String,
        source: EncoderError,
    },
}
