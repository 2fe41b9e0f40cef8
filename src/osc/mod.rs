pub mod messages;
pub mod sender;

pub use messages::{OscTarget, OutboundMessage, DEFAULT_HOST, DEFAULT_PORT};
pub use sender::{MessageSender, NullSender, UdpSender};
