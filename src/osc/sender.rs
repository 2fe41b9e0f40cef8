use super::messages::{OscTarget, OutboundMessage};
use crate::error::TransportError;
use std::collections::HashMap;
use std::io;
use std::net::{Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// Delivers single-argument messages to a remote endpoint.
///
/// Sending is fire-and-forget: implementations log failures and never block
/// the caller on the network.
pub trait MessageSender: Send + Sync {
    fn send(&self, target: &OscTarget, argument: i32);
}

/// Sends each message as one UDP datagram from an unconnected, non-blocking
/// socket of the destination's address family.
///
/// A target's host is resolved on its first message and remembered, so only
/// that first send can wait on a name lookup.
pub struct UdpSender {
    v4: Option<UdpSocket>,
    v6: Option<UdpSocket>,
    resolved: Mutex<HashMap<(String, u16), SocketAddr>>,
}

impl UdpSender {
    /// Binds an ephemeral IPv4 socket, plus an IPv6 one when the host
    /// supports it.
    pub fn new() -> io::Result<Self> {
        let v4 = open(SocketAddr::from(([0, 0, 0, 0], 0)))?;
        let v6 = match open(SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))) {
            Ok(socket) => Some(socket),
            Err(err) => {
                debug!("ipv6 unavailable, sending over ipv4 only: {err}");
                None
            }
        };
        Ok(Self::with_sockets(Some(v4), v6))
    }

    /// Binds a single socket to `local`. Only targets of the same address
    /// family are reachable.
    pub fn bind(local: SocketAddr) -> io::Result<Self> {
        let socket = open(local)?;
        Ok(if local.is_ipv4() {
            Self::with_sockets(Some(socket), None)
        } else {
            Self::with_sockets(None, Some(socket))
        })
    }

    fn with_sockets(v4: Option<UdpSocket>, v6: Option<UdpSocket>) -> Self {
        UdpSender {
            v4,
            v6,
            resolved: Mutex::new(HashMap::new()),
        }
    }

    fn socket_for(&self, addr: &SocketAddr) -> Option<&UdpSocket> {
        match addr {
            SocketAddr::V4(_) => self.v4.as_ref(),
            SocketAddr::V6(_) => self.v6.as_ref(),
        }
    }

    /// The first address of `target` that one of the sockets can reach.
    pub fn resolve(&self, target: &OscTarget) -> Result<SocketAddr, TransportError> {
        let key = (target.host.clone(), target.port);
        let mut resolved = self.resolved.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(addr) = resolved.get(&key) {
            return Ok(*addr);
        }
        let addr = (target.host.as_str(), target.port)
            .to_socket_addrs()?
            .find(|addr| self.socket_for(addr).is_some())
            .ok_or_else(|| TransportError::Resolve {
                host: target.host.clone(),
                port: target.port,
            })?;
        resolved.insert(key, addr);
        Ok(addr)
    }

    pub fn try_send(&self, target: &OscTarget, message: &OutboundMessage) -> Result<usize, TransportError> {
        let addr = self.resolve(target)?;
        let socket = self.socket_for(&addr).ok_or_else(|| TransportError::Resolve {
            host: target.host.clone(),
            port: target.port,
        })?;
        let bytes = message.encode()?;
        Ok(socket.send_to(&bytes, addr)?)
    }
}

fn open(local: SocketAddr) -> io::Result<UdpSocket> {
    let socket = UdpSocket::bind(local)?;
    socket.set_nonblocking(true)?;
    Ok(socket)
}

impl MessageSender for UdpSender {
    fn send(&self, target: &OscTarget, argument: i32) {
        let message = target.message(argument);
        match self.try_send(target, &message) {
            Ok(len) => debug!(
                route = %message.route,
                argument,
                len,
                "sent osc message to {}:{}",
                target.host,
                target.port
            ),
            Err(err) => warn!(
                route = %message.route,
                argument,
                "error sending osc message to {}:{}: {err}",
                target.host,
                target.port
            ),
        }
    }
}

/// Drops every message. Used when no remote device is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSender;

impl MessageSender for NullSender {
    fn send(&self, target: &OscTarget, argument: i32) {
        debug!(route = %target.route, argument, "dropping osc message");
    }
}
