use crate::input::{parse_line, Action, HELP};
use crate::rendering::{render_claim, render_snapshot};
use bincode::{deserialize, serialize};
use log::{error, info, warn};
use shared::{Packet, PlayerId, SessionSnapshot, MAX_DATAGRAM};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UdpSocket;
use tokio::time::interval;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

pub struct Client {
    socket: UdpSocket,
    server_addr: SocketAddr,
    connected: bool,

    player_id: Option<PlayerId>,
    last_snapshot: Option<SessionSnapshot>,
}

impl Client {
    pub async fn new(
        server_addr: &str,
        player_id: Option<PlayerId>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        let server_addr = server_addr.parse()?;

        Ok(Client {
            socket,
            server_addr,
            connected: false,
            player_id,
            last_snapshot: None,
        })
    }

    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    async fn connect(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Connecting to server...");

        let packet = Packet::Connect { client_version: 1 };
        self.send_packet(&packet).await?;

        Ok(())
    }

    async fn send_packet(&self, packet: &Packet) -> Result<(), Box<dyn std::error::Error>> {
        let data = serialize(packet)?;
        self.socket.send_to(&data, self.server_addr).await?;
        Ok(())
    }

    fn print_snapshot(&self) {
        match &self.last_snapshot {
            Some(snapshot) => println!("{}", render_snapshot(snapshot, self.player_id())),
            None => println!("No snapshot received yet."),
        }
    }

    fn handle_packet(&mut self, packet: Packet) {
        match packet {
            Packet::Connected { client_id } => {
                info!("Connected! Viewer ID: {}", client_id);
                self.connected = true;
            }

            Packet::Snapshot { snapshot } => {
                self.last_snapshot = Some(snapshot);
                self.print_snapshot();
            }

            Packet::PlayerCreated { player_id } => {
                println!(
                    "Registered as {} (pass --player-id {} to resume)",
                    player_id, player_id
                );
                self.player_id = Some(player_id);
            }

            Packet::Rejected { reason } => {
                println!("Rejected: {}", reason);
            }

            Packet::DrawResult { fear_id } => match fear_id {
                Some(fear_id) => println!("Drew fear #{}", fear_id),
                None => println!("The deck is exhausted."),
            },

            Packet::ClaimResult { outcome } => {
                println!("{}", render_claim(&outcome));
            }

            Packet::Disconnected { reason } => {
                warn!("Disconnected: {}", reason);
                self.connected = false;
            }

            _ => {
                warn!("Unexpected packet type");
            }
        }
    }

    /// Handles one prompt line; returns false when the user quits
    async fn handle_line(&mut self, line: &str) -> Result<bool, Box<dyn std::error::Error>> {
        let action = match parse_line(line) {
            Ok(Some(action)) => action,
            Ok(None) => return Ok(true),
            Err(message) => {
                println!("{}", message);
                return Ok(true);
            }
        };

        match action {
            Action::Quit => return Ok(false),
            Action::Show => self.print_snapshot(),
            Action::Help => println!("{}", HELP),
            action => match action.to_packet(self.player_id()) {
                Ok(Some(packet)) => self.send_packet(&packet).await?,
                Ok(None) => {}
                Err(message) => println!("{}", message),
            },
        }

        Ok(true)
    }

    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.connect().await?;
        println!("{}", HELP);

        let mut heartbeat_interval = interval(HEARTBEAT_INTERVAL);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut buffer = vec![0u8; MAX_DATAGRAM];

        loop {
            tokio::select! {
                result = self.socket.recv_from(&mut buffer) => {
                    match result {
                        Ok((len, _)) => {
                            match deserialize::<Packet>(&buffer[0..len]) {
                                Ok(packet) => self.handle_packet(packet),
                                Err(e) => warn!("Failed to deserialize packet: {}", e),
                            }
                        },
                        Err(e) => error!("Error receiving packet: {}", e),
                    }
                },

                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if !self.handle_line(&line).await? {
                                break;
                            }
                        }
                        None => break,
                    }
                },

                _ = heartbeat_interval.tick() => {
                    if self.connected {
                        if let Err(e) = self.send_packet(&Packet::Heartbeat).await {
                            error!("Error sending heartbeat: {}", e);
                        }
                    }
                },
            }
        }

        if let Err(e) = self.send_packet(&Packet::Disconnect).await {
            error!("Error sending disconnect: {}", e);
        }
        info!("Client disconnected");

        Ok(())
    }
}
