use rosc::{encoder, OscMessage, OscPacket, OscType};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 10111;

/// Where an encoder's messages go: an OSC address pattern on a UDP endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OscTarget {
    pub route: String,
    pub host: String,
    pub port: u16,
}

impl OscTarget {
    pub fn new(route: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        OscTarget {
            route: route.into(),
            host: host.into(),
            port,
        }
    }

    pub fn message(&self, argument: i32) -> OutboundMessage {
        OutboundMessage {
            route: self.route.clone(),
            argument,
        }
    }
}

impl Default for OscTarget {
    fn default() -> Self {
        OscTarget::new("", DEFAULT_HOST, DEFAULT_PORT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub route: String,
    pub argument: i32,
}

impl OutboundMessage {
    pub fn encode(&self) -> Result<Vec<u8>, rosc::OscError> {
        let packet = OscPacket::Message(OscMessage {
            addr: self.route.clone(),
            args: vec![OscType::Int(self.argument)],
        });
        encoder::encode(&packet)
    }
}
