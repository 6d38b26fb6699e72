//! Listener setup and the single-threaded event loop.
//!
//! One reader task per connection turns socket bytes into [`ServerEvent`]s
//! posted over an unbounded channel; the quiz deadline posts its expiry
//! through the same channel. The loop in [`ChatServer::run`] is the only
//! task that ever touches the registry or the game stores, so all chat
//! and game state is mutated from exactly one place and needs no locks.

use crate::bridge::{self, BridgeHandle};
use crate::games::quiz::QuizRound;
use crate::games::SoloGame;
use crate::registry::{ConnId, Registry};
use crate::router;
use log::{debug, error, info};
use shared::{BUFFER_SIZE, GREETING, LISTEN_BACKLOG, SERVER_NAME};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::sync::mpsc;

/// Events serialized into the main loop.
#[derive(Debug)]
pub enum ServerEvent {
    /// One trimmed, non-empty line read from a connection.
    Line { id: ConnId, text: String },
    /// Zero-length read or transport error on a connection.
    Disconnected { id: ConnId },
    /// The quiz deadline for `round` fired.
    QuizExpired { round: u64 },
    /// Text injected by an external bridge adapter.
    BridgeInbound { from: String, text: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// How long a quiz round stays open for answers.
    pub quiz_deadline: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            quiz_deadline: Duration::from_secs(30),
        }
    }
}

/// All mutable chat state, owned by the event loop and handed by
/// reference into the router and command dispatch.
pub struct ServerState {
    pub registry: Registry,
    pub solo_games: HashMap<ConnId, SoloGame>,
    pub quiz: Option<QuizRound>,
    pub quiz_round: u64,
    pub config: ServerConfig,
    pub(crate) event_tx: mpsc::UnboundedSender<ServerEvent>,
}

impl ServerState {
    pub fn new(config: ServerConfig, event_tx: mpsc::UnboundedSender<ServerEvent>) -> Self {
        Self {
            registry: Registry::new(),
            solo_games: HashMap::new(),
            quiz: None,
            quiz_round: 0,
            config,
            event_tx,
        }
    }

    /// Private reply sent on behalf of the reserved server name.
    pub fn reply_from_server(&self, id: ConnId, text: &str) {
        self.registry.private_message(SERVER_NAME, id, text);
    }

    /// Schedules the one-shot expiry for quiz `round`. The timer task
    /// never touches session state; it only posts the event.
    pub fn arm_quiz_deadline(&self, round: u64) {
        let event_tx = self.event_tx.clone();
        let delay = self.config.quiz_deadline;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = event_tx.send(ServerEvent::QuizExpired { round });
        });
    }

    /// Tears down the quiz if `round` is still the live one, returning
    /// the server to normal chat routing.
    pub fn finish_quiz(&mut self, round: u64) {
        match &self.quiz {
            Some(quiz) if quiz.round == round => {}
            _ => {
                debug!("Ignoring stale quiz deadline for round {}", round);
                return;
            }
        }
        if let Some(quiz) = self.quiz.take() {
            self.registry.broadcast(&quiz.summary(), None, None);
        }
    }

    pub fn attach_bridge(&mut self, name: &str) -> BridgeHandle {
        let (link, handle) = bridge::create(name, self.event_tx.clone());
        self.registry.attach_bridge(link);
        handle
    }

    pub(crate) fn handle_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Line { id, text } => {
                let registered = self
                    .registry
                    .get(id)
                    .map_or(false, |conn| conn.is_registered());
                if registered {
                    router::route(self, id, &text);
                } else {
                    self.handle_registration(id, &text);
                }
            }
            ServerEvent::Disconnected { id } => self.handle_disconnect(id),
            ServerEvent::QuizExpired { round } => self.finish_quiz(round),
            ServerEvent::BridgeInbound { from, text } => {
                // A bridge is a non-socket participant; its text goes
                // straight out as public chat, back to every other bridge
                // but never to itself.
                self.registry.broadcast(&text, None, Some(&from));
            }
        }
    }

    fn handle_registration(&mut self, id: ConnId, name: &str) {
        if !self.registry.name_available(name) {
            self.registry.send_to_one(
                id,
                &format!(
                    "Name '{}' is not available, please try another one.\nWhat is your name?",
                    name
                ),
            );
            return;
        }
        let Some(addr) = self.registry.set_name(id, name) else {
            return;
        };
        self.registry.broadcast(
            &format!(
                "Accepted new connection from {}:{}, username: {}",
                addr.ip(),
                addr.port(),
                name
            ),
            Some(id),
            None,
        );
        self.registry
            .send_to_one(id, &format!("Hi, {}! Welcome to chat room!", name));
    }

    fn handle_disconnect(&mut self, id: ConnId) {
        // An in-flight solo game is simply discarded with its connection.
        self.solo_games.remove(&id);
        match self.registry.remove(id) {
            Some(conn) if conn.is_registered() => {
                self.registry
                    .broadcast(&format!("User '{}' was disconnected", conn.name), None, None);
            }
            Some(_) => info!("Unknown user was disconnected"),
            None => {}
        }
    }
}

/// The chat server: listening socket plus the state the loop owns.
pub struct ChatServer {
    listener: TcpListener,
    state: ServerState,
    event_rx: mpsc::UnboundedReceiver<ServerEvent>,
}

impl ChatServer {
    /// Binds the listening socket. Failures here are fatal at startup
    /// and propagate to the caller.
    pub async fn bind(
        addr: &str,
        config: ServerConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let addr: SocketAddr = addr.parse()?;
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        // Without SO_REUSEADDR the port lingers for a while after a kill,
        // which breaks quick restarts and the test suite.
        socket.set_reuseaddr(true)?;
        socket.bind(addr)?;
        let listener = socket.listen(LISTEN_BACKLOG)?;
        info!("Server listening on {}", listener.local_addr()?);

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            listener,
            state: ServerState::new(config, event_tx),
            event_rx,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Registers an external bridge under `name` before the loop starts.
    pub fn attach_bridge(&mut self, name: &str) -> BridgeHandle {
        self.state.attach_bridge(name)
    }

    /// Runs the multiplexing loop: accept new connections, drain events.
    /// Blocks until the process is stopped.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Server started successfully");
        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => self.handle_accept(stream, addr),
                    Err(e) => error!("Failed to accept connection: {}", e),
                },
                event = self.event_rx.recv() => match event {
                    Some(event) => self.state.handle_event(event),
                    // Unreachable while the state holds a sender.
                    None => break,
                },
            }
        }
        Ok(())
    }

    /// Splits the stream into a writer task draining the outbox and a
    /// reader task posting line/disconnect events, then greets the peer.
    fn handle_accept(&mut self, stream: TcpStream, addr: SocketAddr) {
        let (mut read_half, mut write_half) = stream.into_split();
        let (outbox_tx, mut outbox_rx) = mpsc::unbounded_channel::<String>();
        let id = self.state.registry.add(addr, outbox_tx);

        tokio::spawn(async move {
            while let Some(text) = outbox_rx.recv().await {
                if write_half.write_all(text.as_bytes()).await.is_err() {
                    // Fire-and-forget: the reader task reports the dead
                    // peer on its next read.
                    break;
                }
            }
        });

        let event_tx = self.state.event_tx.clone();
        tokio::spawn(async move {
            let mut buffer = [0u8; BUFFER_SIZE];
            loop {
                match read_half.read(&mut buffer).await {
                    Ok(0) => break,
                    Ok(n) => {
                        let chunk = String::from_utf8_lossy(&buffer[..n]);
                        for line in chunk.split('\n') {
                            let line = line.trim();
                            if line.is_empty() {
                                continue;
                            }
                            let event = ServerEvent::Line {
                                id,
                                text: line.to_string(),
                            };
                            if event_tx.send(event).is_err() {
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        debug!("Read error on connection {}: {}", id, e);
                        break;
                    }
                }
            }
            let _ = event_tx.send(ServerEvent::Disconnected { id });
        });

        self.state.registry.send_to_one(id, GREETING);
    }
}
