use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub mod catalog;

pub const TICKET_SIZE: usize = 15;
pub const MIN_BET: u32 = 1;
pub const MAX_BET: u32 = 50;
pub const MAX_CLAIM_ATTEMPTS: u32 = 3;

/// Largest UDP payload; every packet, including a full snapshot, must fit
pub const MAX_DATAGRAM: usize = 65507;

// Session bounds. Together they keep the largest possible snapshot inside
// one datagram.
pub const MAX_PLAYERS: usize = 64;
/// In bytes, after trimming
pub const MAX_NAME_LEN: usize = 32;
pub const MAX_CATALOG_SIZE: usize = 100;
/// In bytes
pub const MAX_FEAR_DESCRIPTION_LEN: usize = 96;

pub type FearId = u32;
pub type PlayerId = String;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Packet {
    Connect {
        client_version: u32,
    },
    Heartbeat,
    Disconnect,
    Register {
        name: String,
        bet: u32,
    },
    SealTicket {
        player_id: PlayerId,
        fear_ids: Vec<FearId>,
    },
    BeginSelection {
        player_id: PlayerId,
    },
    BeginPlaying {
        player_id: PlayerId,
    },
    DrawNext {
        player_id: PlayerId,
    },
    ToggleMark {
        player_id: PlayerId,
        fear_id: FearId,
    },
    Claim {
        player_id: PlayerId,
    },
    Reset {
        player_id: PlayerId,
        catalog: Vec<Fear>,
    },

    Connected {
        client_id: u32,
    },
    PlayerCreated {
        player_id: PlayerId,
    },
    Rejected {
        reason: String,
    },
    DrawResult {
        fear_id: Option<FearId>,
    },
    ClaimResult {
        outcome: ClaimOutcome,
    },
    Snapshot {
        snapshot: SessionSnapshot,
    },
    Disconnected {
        reason: String,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Betting,
    Selection,
    Playing,
    Finished,
}

impl Phase {
    /// The forward successor, `None` once finished. Only `reset` leaves `Finished`.
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Betting => Some(Phase::Selection),
            Phase::Selection => Some(Phase::Playing),
            Phase::Playing => Some(Phase::Finished),
            Phase::Finished => None,
        }
    }

    pub fn is_joinable(&self) -> bool {
        matches!(self, Phase::Betting | Phase::Selection)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Betting => "betting",
            Phase::Selection => "selection",
            Phase::Playing => "playing",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Fear {
    pub id: FearId,
    pub description: String,
    pub is_revealed: bool,
}

impl Fear {
    pub fn new(id: FearId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            is_revealed: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub bet: u32,
    pub ticket: Vec<FearId>,
    pub marked_ids: BTreeSet<FearId>,
    pub claim_attempts: u32,
    pub is_disqualified: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: String, bet: u32) -> Self {
        Self {
            id,
            name,
            bet,
            ticket: Vec::new(),
            marked_ids: BTreeSet::new(),
            claim_attempts: 0,
            is_disqualified: false,
        }
    }

    pub fn has_sealed_ticket(&self) -> bool {
        self.ticket.len() == TICKET_SIZE
    }

    pub fn marked_count(&self) -> usize {
        self.marked_ids.len()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WarningLevel {
    Soft,
    Final,
    Disqualified,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    Win,
    Warning {
        level: WarningLevel,
        attempts: u32,
        message: String,
    },
}

/// Full state of the session as broadcast to every viewer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub players: Vec<Player>,
    pub fears: Vec<Fear>,
    pub revealed_log: Vec<FearId>,
    pub total_prize: u32,
    pub winner: Option<PlayerId>,
    pub admin_id: Option<PlayerId>,
}

impl SessionSnapshot {
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn fear(&self, fear_id: FearId) -> Option<&Fear> {
        self.fears.iter().find(|f| f.id == fear_id)
    }

    pub fn last_revealed(&self) -> Option<&Fear> {
        self.revealed_log.last().and_then(|id| self.fear(*id))
    }

    pub fn winner_player(&self) -> Option<&Player> {
        self.winner.as_deref().and_then(|id| self.player(id))
    }

    pub fn winner_profit(&self) -> Option<u32> {
        self.winner_player()
            .map(|winner| self.total_prize.saturating_sub(winner.bet))
    }

    /// Players ordered by descending mark count, disqualified players always last.
    /// Ties keep registration order.
    pub fn standings(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by_key(|p| (p.is_disqualified, std::cmp::Reverse(p.marked_count())));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with_marks(id: &str, marks: &[FearId], disqualified: bool) -> Player {
        let mut player = Player::new(id.to_string(), id.to_string(), 5);
        player.marked_ids = marks.iter().copied().collect();
        player.is_disqualified = disqualified;
        player
    }

    fn snapshot_with(players: Vec<Player>) -> SessionSnapshot {
        SessionSnapshot {
            phase: Phase::Playing,
            total_prize: players.iter().map(|p| p.bet).sum(),
            players,
            fears: catalog::default_catalog(),
            revealed_log: Vec::new(),
            winner: None,
            admin_id: None,
        }
    }

    #[test]
    fn test_phase_order() {
        assert_eq!(Phase::Betting.next(), Some(Phase::Selection));
        assert_eq!(Phase::Selection.next(), Some(Phase::Playing));
        assert_eq!(Phase::Playing.next(), Some(Phase::Finished));
        assert_eq!(Phase::Finished.next(), None);
    }

    #[test]
    fn test_phase_joinable() {
        assert!(Phase::Betting.is_joinable());
        assert!(Phase::Selection.is_joinable());
        assert!(!Phase::Playing.is_joinable());
        assert!(!Phase::Finished.is_joinable());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Selection.to_string(), "selection");
        assert_eq!(Phase::Finished.to_string(), "finished");
    }

    #[test]
    fn test_player_creation() {
        let player = Player::new("player-1".to_string(), "Alice".to_string(), 10);
        assert_eq!(player.bet, 10);
        assert!(player.ticket.is_empty());
        assert!(player.marked_ids.is_empty());
        assert_eq!(player.claim_attempts, 0);
        assert!(!player.is_disqualified);
        assert!(!player.has_sealed_ticket());
    }

    #[test]
    fn test_player_sealed_ticket() {
        let mut player = Player::new("player-1".to_string(), "Alice".to_string(), 10);
        player.ticket = (1..=TICKET_SIZE as FearId).collect();
        assert!(player.has_sealed_ticket());
    }

    #[test]
    fn test_standings_order() {
        let snapshot = snapshot_with(vec![
            player_with_marks("a", &[1], false),
            player_with_marks("b", &[1, 2, 3, 4], true),
            player_with_marks("c", &[1, 2, 3], false),
            player_with_marks("d", &[2], false),
        ]);

        let order: Vec<&str> = snapshot
            .standings()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(order, vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_winner_profit() {
        let mut snapshot = snapshot_with(vec![
            player_with_marks("a", &[], false),
            player_with_marks("b", &[], false),
        ]);
        snapshot.players[1].bet = 20;
        snapshot.total_prize = 25;
        assert_eq!(snapshot.winner_profit(), None);

        snapshot.winner = Some("b".to_string());
        assert_eq!(snapshot.winner_player().map(|p| p.bet), Some(20));
        assert_eq!(snapshot.winner_profit(), Some(5));
    }

    #[test]
    fn test_last_revealed() {
        let mut snapshot = snapshot_with(Vec::new());
        assert!(snapshot.last_revealed().is_none());

        snapshot.revealed_log = vec![4, 9];
        assert_eq!(snapshot.last_revealed().map(|f| f.id), Some(9));
    }

    #[test]
    fn test_packet_serialization_register() {
        let packet = Packet::Register {
            name: "Alice".to_string(),
            bet: 10,
        };
        let serialized = bincode::serialize(&packet).unwrap();
        let deserialized: Packet = bincode::deserialize(&serialized).unwrap();

        match deserialized {
            Packet::Register { name, bet } => {
                assert_eq!(name, "Alice");
                assert_eq!(bet, 10);
            }
            _ => panic!("Wrong packet type after deserialization"),
        }
    }

    #[test]
    fn test_packet_serialization_snapshot() {
        let mut snapshot = snapshot_with(vec![player_with_marks("a", &[3, 7], false)]);
        snapshot.revealed_log = vec![3, 7];
        snapshot.admin_id = Some("a".to_string());

        let packet = Packet::Snapshot {
            snapshot: snapshot.clone(),
        };
        let serialized = bincode::serialize(&packet).unwrap();
        let deserialized: Packet = bincode::deserialize(&serialized).unwrap();

        match deserialized {
            Packet::Snapshot { snapshot: received } => assert_eq!(received, snapshot),
            _ => panic!("Wrong packet type after deserialization"),
        }
    }

    #[test]
    fn test_packet_serialization_claim_result() {
        let packet = Packet::ClaimResult {
            outcome: ClaimOutcome::Warning {
                level: WarningLevel::Final,
                attempts: 2,
                message: "last chance".to_string(),
            },
        };
        let serialized = bincode::serialize(&packet).unwrap();
        let deserialized: Packet = bincode::deserialize(&serialized).unwrap();

        match deserialized {
            Packet::ClaimResult {
                outcome: ClaimOutcome::Warning { level, attempts, .. },
            } => {
                assert_eq!(level, WarningLevel::Final);
                assert_eq!(attempts, 2);
            }
            _ => panic!("Wrong packet type after deserialization"),
        }
    }
}
