//! Connected viewer management for the session server
//!
//! This module handles the server-side management of connected viewers, including:
//! - Viewer connection lifecycle (connect, disconnect, timeout)
//! - Liveness tracking from heartbeats and commands
//! - Viewer capacity management and address tracking
//!
//! A viewer is a transport endpoint, not a player. Dropping a viewer never
//! touches the session's player records; a returning client resumes by
//! presenting the player token it was given at registration.

use log::info;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Represents a connected viewer
#[derive(Debug)]
pub struct Client {
    /// Unique viewer identifier assigned by the server
    pub id: u32,
    /// Network address for sending snapshots and replies
    pub addr: SocketAddr,
    /// Last time we received any packet from this viewer
    pub last_seen: Instant,
}

impl Client {
    /// Creates a new viewer with the given ID and network address, marked
    /// as recently active.
    pub fn new(id: u32, addr: SocketAddr) -> Self {
        Self {
            id,
            addr,
            last_seen: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    /// Checks if the viewer has exceeded the connection timeout
    ///
    /// Returns true if no packets have been received from this viewer
    /// within the specified timeout duration, indicating a likely disconnect.
    pub fn is_timed_out(&self, timeout: Duration) -> bool {
        self.last_seen.elapsed() > timeout
    }
}

/// Manages all connected viewers
///
/// The ClientManager enforces server capacity limits and knows where to
/// deliver broadcasts. It holds no game state.
pub struct ClientManager {
    /// Connected viewers indexed by their unique ID
    clients: HashMap<u32, Client>,
    /// Next available viewer ID for new connections
    next_client_id: u32,
    /// Maximum number of concurrent viewers allowed
    max_clients: usize,
    /// Silence after which a viewer is dropped
    timeout: Duration,
}

impl ClientManager {
    /// Creates a new client manager with the specified capacity limit and
    /// liveness timeout. Viewer IDs start from 1 and increment for each new
    /// connection.
    pub fn new(max_clients: usize, timeout: Duration) -> Self {
        Self {
            clients: HashMap::new(),
            next_client_id: 1,
            max_clients,
            timeout,
        }
    }

    /// Attempts to add a new viewer connection
    ///
    /// Returns Some(client_id) if successful, None if server is at capacity.
    pub fn add_client(&mut self, addr: SocketAddr) -> Option<u32> {
        if self.clients.len() >= self.max_clients {
            return None;
        }

        let client_id = self.next_client_id;
        self.next_client_id += 1;

        let client = Client::new(client_id, addr);
        info!("Viewer {} connected from {}", client_id, addr);
        self.clients.insert(client_id, client);

        Some(client_id)
    }

    /// Removes a viewer from the server
    ///
    /// Returns true if the viewer was found and removed, false if they were
    /// already gone.
    pub fn remove_client(&mut self, client_id: &u32) -> bool {
        if let Some(client) = self.clients.remove(client_id) {
            info!("Viewer {} disconnected", client.id);
            true
        } else {
            false
        }
    }

    /// Finds a viewer ID by their network address
    pub fn find_client_by_addr(&self, addr: SocketAddr) -> Option<u32> {
        self.clients
            .iter()
            .find(|(_, client)| client.addr == addr)
            .map(|(id, _)| *id)
    }

    /// Refreshes the liveness of the viewer at `addr`
    ///
    /// Returns false if no viewer is connected from that address.
    pub fn touch(&mut self, addr: SocketAddr) -> bool {
        match self.clients.values_mut().find(|client| client.addr == addr) {
            Some(client) => {
                client.touch();
                true
            }
            None => false,
        }
    }

    /// Checks for and removes timed-out viewers
    ///
    /// Returns the list of removed viewer IDs.
    pub fn check_timeouts(&mut self) -> Vec<u32> {
        let timeout = self.timeout;
        let timed_out: Vec<u32> = self
            .clients
            .iter()
            .filter(|(_, client)| client.is_timed_out(timeout))
            .map(|(id, _)| *id)
            .collect();

        for client_id in &timed_out {
            self.remove_client(client_id);
        }

        timed_out
    }

    /// Gets all viewer IDs and their network addresses for broadcasting
    pub fn get_client_addrs(&self) -> Vec<(u32, SocketAddr)> {
        self.clients
            .iter()
            .map(|(id, client)| (*id, client.addr))
            .collect()
    }

    /// Returns the number of currently connected viewers
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns true if no viewers are currently connected
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
