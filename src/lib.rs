pub mod canvas;
pub mod config;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod geometry;
pub mod keys;
pub mod logging;
pub mod osc;
pub mod ui;
pub mod widget;

pub use config::DashboardConfig;
pub use driver::{drive, next_progress, DrivePlan, PlayMode};
pub use encoder::{Encoder, EncoderOptions, EncoderState, ProgressMode};
pub use error::{ConfigError, DrawError, EncoderError, InputError, TransportError};
pub use geometry::{start_end_angles, Direction, Sweep};
pub use keys::KeyToggle;
pub use osc::{MessageSender, NullSender, OscTarget, OutboundMessage, UdpSender};
pub use ui::Dashboard;
pub use widget::{ControlWidget, DrawMeta, EventMeta, WidgetOptions};
