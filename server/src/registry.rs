//! Connection registry and delivery primitives for the chat server
//!
//! This module tracks every open connection, maps each to a display name
//! (empty until registration completes), and owns the fan-out paths used
//! by the router and the games:
//! - best-effort single delivery (`send_to_one`)
//! - broadcast to all registered connections with an optional exclusion
//! - formatted private messages with an audit log line
//!
//! Writes are fire-and-forget: each connection has an unbounded outbox
//! drained by its writer task, so a dead peer surfaces as a disconnect
//! on its next read instead of blocking the event loop.

use crate::bridge::BridgeLink;
use log::info;
use shared::SERVER_NAME;
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::sync::mpsc;

/// Server-assigned handle for a connection. Sessions and game state are
/// keyed by this id, never by socket identity.
pub type ConnId = u32;

/// A tracked connection and its outbox.
#[derive(Debug)]
pub struct Connection {
    pub id: ConnId,
    /// Peer address, reported in the accept broadcast.
    pub addr: SocketAddr,
    /// Display name; empty until registration completes.
    pub name: String,
    outbox: mpsc::UnboundedSender<String>,
}

impl Connection {
    pub fn is_registered(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Tracks all open connections and attached bridges.
///
/// Owned exclusively by the event loop; every mutation happens on that
/// single task, so no locking is needed.
pub struct Registry {
    conns: HashMap<ConnId, Connection>,
    bridges: Vec<BridgeLink>,
    next_id: ConnId,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            conns: HashMap::new(),
            bridges: Vec::new(),
            next_id: 1,
        }
    }

    /// Inserts a freshly accepted, still unregistered connection and
    /// returns its id.
    pub fn add(&mut self, addr: SocketAddr, outbox: mpsc::UnboundedSender<String>) -> ConnId {
        let id = self.next_id;
        self.next_id += 1;
        info!("Connection {} accepted from {}", id, addr);
        self.conns.insert(
            id,
            Connection {
                id,
                addr,
                name: String::new(),
                outbox,
            },
        );
        id
    }

    /// Removes a connection, returning its entry so the caller can
    /// decide whether the disconnect is announced.
    pub fn remove(&mut self, id: ConnId) -> Option<Connection> {
        self.conns.remove(&id)
    }

    pub fn get(&self, id: ConnId) -> Option<&Connection> {
        self.conns.get(&id)
    }

    /// True if `name` can still be claimed. The reserved name is never
    /// available; callers trim before asking.
    pub fn name_available(&self, name: &str) -> bool {
        name != SERVER_NAME && !self.conns.values().any(|conn| conn.name == name)
    }

    /// Completes registration for `id`, returning the peer address for
    /// the accept broadcast. Callers check [`Self::name_available`]
    /// first.
    pub fn set_name(&mut self, id: ConnId, name: &str) -> Option<SocketAddr> {
        let conn = self.conns.get_mut(&id)?;
        conn.name = name.to_string();
        Some(conn.addr)
    }

    /// Linear scan for a registered name. Names are unique, so there is
    /// at most one match.
    pub fn lookup_by_name(&self, name: &str) -> Option<ConnId> {
        self.conns
            .values()
            .find(|conn| conn.is_registered() && conn.name == name)
            .map(|conn| conn.id)
    }

    /// Display names of all registered connections.
    pub fn participants(&self) -> Vec<String> {
        self.conns
            .values()
            .filter(|conn| conn.is_registered())
            .map(|conn| conn.name.clone())
            .collect()
    }

    /// Best-effort write to one connection. A failed send is ignored;
    /// the reader task reports the dead peer on its next read.
    pub fn send_to_one(&self, id: ConnId, text: &str) {
        if let Some(conn) = self.conns.get(&id) {
            let _ = conn.outbox.send(text.to_string());
        }
    }

    /// Fans `text` out to every registered connection except `except`,
    /// appending the trailing newline once, and forwards it to every
    /// attached bridge except the one it originated from.
    pub fn broadcast(&self, text: &str, except: Option<ConnId>, from_bridge: Option<&str>) {
        info!("{}", text);
        let line = format!("{}\n", text);
        for conn in self.conns.values() {
            if conn.is_registered() && Some(conn.id) != except {
                let _ = conn.outbox.send(line.clone());
            }
        }
        for bridge in &self.bridges {
            if from_bridge != Some(bridge.name.as_str()) {
                let _ = bridge.outbox.send(text.to_string());
            }
        }
    }

    /// Formats and delivers `"[from] -> [to] text"` to `to` only,
    /// logging the routed line.
    pub fn private_message(&self, from: &str, to: ConnId, text: &str) {
        let Some(conn) = self.conns.get(&to) else {
            return;
        };
        let msg = format!("[{}] -> [{}] {}", from, conn.name, text);
        info!("{}", msg);
        let _ = conn.outbox.send(msg);
    }

    pub fn attach_bridge(&mut self, link: BridgeLink) {
        self.bridges.push(link);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
