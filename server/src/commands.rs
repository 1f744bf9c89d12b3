//! Typed command dispatch, independent of any transport
//!
//! Inbound packets are turned into a closed set of [`Command`]s and applied
//! to the session one at a time. Each application yields a [`Dispatched`]:
//! an optional private reply for the sender and whether the session changed,
//! in which case the caller must broadcast a fresh snapshot to everyone.
//!
//! Failures never escape this module. Errors the requester must hear about
//! (bad bet, bad name, closed or full registration) become a `Rejected` reply; the
//! rest are logged and otherwise dropped.

use crate::deck::DrawOutcome;
use crate::error::CommandError;
use crate::session::SessionStore;
use log::{debug, info, warn};
use rand::Rng;
use shared::{ClaimOutcome, Fear, FearId, Packet, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register { name: String, bet: u32 },
    SealTicket { player_id: PlayerId, fear_ids: Vec<FearId> },
    BeginSelection { caller: PlayerId },
    BeginPlaying { caller: PlayerId },
    DrawNext { caller: PlayerId },
    ToggleMark { player_id: PlayerId, fear_id: FearId },
    Claim { player_id: PlayerId },
    Reset { caller: PlayerId, catalog: Vec<Fear> },
}

impl Command {
    /// Extracts the session command carried by a packet, if any
    ///
    /// Connection management and server-to-client packets yield `None`.
    pub fn from_packet(packet: Packet) -> Option<Command> {
        let command = match packet {
            Packet::Register { name, bet } => Command::Register { name, bet },
            Packet::SealTicket {
                player_id,
                fear_ids,
            } => Command::SealTicket {
                player_id,
                fear_ids,
            },
            Packet::BeginSelection { player_id } => Command::BeginSelection { caller: player_id },
            Packet::BeginPlaying { player_id } => Command::BeginPlaying { caller: player_id },
            Packet::DrawNext { player_id } => Command::DrawNext { caller: player_id },
            Packet::ToggleMark { player_id, fear_id } => Command::ToggleMark { player_id, fear_id },
            Packet::Claim { player_id } => Command::Claim { player_id },
            Packet::Reset { player_id, catalog } => Command::Reset {
                caller: player_id,
                catalog,
            },
            _ => return None,
        };
        Some(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Register { .. } => "register",
            Command::SealTicket { .. } => "seal ticket",
            Command::BeginSelection { .. } => "begin selection",
            Command::BeginPlaying { .. } => "begin playing",
            Command::DrawNext { .. } => "draw",
            Command::ToggleMark { .. } => "toggle mark",
            Command::Claim { .. } => "claim",
            Command::Reset { .. } => "reset",
        }
    }
}

/// Private answer for the viewer that sent the command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    PlayerCreated(PlayerId),
    Rejected(String),
    DrawResult(Option<FearId>),
    ClaimResult(ClaimOutcome),
}

impl Reply {
    pub fn into_packet(self) -> Packet {
        match self {
            Reply::PlayerCreated(player_id) => Packet::PlayerCreated { player_id },
            Reply::Rejected(reason) => Packet::Rejected { reason },
            Reply::DrawResult(fear_id) => Packet::DrawResult { fear_id },
            Reply::ClaimResult(outcome) => Packet::ClaimResult { outcome },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dispatched {
    pub reply: Option<Reply>,
    /// Session state changed and must be broadcast
    pub changed: bool,
}

impl Dispatched {
    fn mutated(reply: Option<Reply>) -> Self {
        Self {
            reply,
            changed: true,
        }
    }

    fn quiet(reply: Option<Reply>) -> Self {
        Self {
            reply,
            changed: false,
        }
    }
}

/// Applies one command to the session
pub fn dispatch<R: Rng>(session: &mut SessionStore<R>, command: Command) -> Dispatched {
    let command_name = command.name();

    let result = match command {
        Command::Register { name, bet } => session
            .register(&name, bet)
            .map(|id| Dispatched::mutated(Some(Reply::PlayerCreated(id)))),
        Command::SealTicket {
            player_id,
            fear_ids,
        } => session
            .seal_ticket(&player_id, &fear_ids)
            .map(|_| Dispatched::mutated(None)),
        Command::BeginSelection { caller } => session
            .begin_selection(&caller)
            .map(|_| Dispatched::mutated(None)),
        Command::BeginPlaying { caller } => session
            .begin_playing(&caller)
            .map(|_| Dispatched::mutated(None)),
        Command::DrawNext { caller } => session.draw_next(&caller).map(|outcome| match outcome {
            DrawOutcome::Revealed(id) => Dispatched::mutated(Some(Reply::DrawResult(Some(id)))),
            DrawOutcome::Exhausted => {
                info!("Deck exhausted");
                Dispatched::quiet(Some(Reply::DrawResult(None)))
            }
        }),
        Command::ToggleMark { player_id, fear_id } => session
            .toggle_mark(&player_id, fear_id)
            .map(|_| Dispatched::mutated(None)),
        Command::Claim { player_id } => session
            .claim(&player_id)
            .map(|outcome| Dispatched::mutated(Some(Reply::ClaimResult(outcome)))),
        Command::Reset { caller, catalog } => session
            .reset(&caller, catalog)
            .map(|_| Dispatched::mutated(None)),
    };

    result.unwrap_or_else(|err| reject(command_name, err))
}

fn reject(command: &str, err: CommandError) -> Dispatched {
    if err.is_reported() {
        info!("Rejected {}: {}", command, err);
        return Dispatched::quiet(Some(Reply::Rejected(err.to_string())));
    }

    match err {
        CommandError::UnauthorizedCommand { .. }
        | CommandError::MalformedTicket { .. }
        | CommandError::InvalidCatalog(_) => warn!("Ignored {}: {}", command, err),
        _ => debug!("Ignored {}: {}", command, err),
    }
    Dispatched::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared::{Phase, TICKET_SIZE};

    fn register(session: &mut SessionStore, name: &str, bet: u32) -> PlayerId {
        let dispatched = dispatch(
            session,
            Command::Register {
                name: name.to_string(),
                bet,
            },
        );
        match dispatched.reply {
            Some(Reply::PlayerCreated(id)) => id,
            other => panic!("Unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_command_from_packet() {
        let packet = Packet::ToggleMark {
            player_id: "player-1".to_string(),
            fear_id: 4,
        };
        assert_eq!(
            Command::from_packet(packet),
            Some(Command::ToggleMark {
                player_id: "player-1".to_string(),
                fear_id: 4
            })
        );

        assert_eq!(Command::from_packet(Packet::Heartbeat), None);
        assert_eq!(Command::from_packet(Packet::Connect { client_version: 1 }), None);
    }

    #[test]
    fn test_admin_packets_carry_caller() {
        let packet = Packet::DrawNext {
            player_id: "player-1".to_string(),
        };
        assert_eq!(
            Command::from_packet(packet),
            Some(Command::DrawNext {
                caller: "player-1".to_string()
            })
        );
    }

    #[test]
    fn test_register_replies_privately_and_broadcasts() {
        let mut session = SessionStore::seeded(3);
        let dispatched = dispatch(
            &mut session,
            Command::Register {
                name: "Alice".to_string(),
                bet: 10,
            },
        );
        assert!(dispatched.changed);
        assert!(matches!(dispatched.reply, Some(Reply::PlayerCreated(_))));
    }

    #[test]
    fn test_invalid_bet_is_reported() {
        let mut session = SessionStore::seeded(3);
        let dispatched = dispatch(
            &mut session,
            Command::Register {
                name: "Alice".to_string(),
                bet: 500,
            },
        );
        assert!(!dispatched.changed);
        assert!(matches!(dispatched.reply, Some(Reply::Rejected(_))));
    }

    #[test]
    fn test_unauthorized_command_is_silent() {
        let mut session = SessionStore::seeded(3);
        let _alice = register(&mut session, "Alice", 10);
        let bob = register(&mut session, "Bob", 10);

        let dispatched = dispatch(&mut session, Command::BeginSelection { caller: bob });
        assert_eq!(dispatched, Dispatched::default());
        assert_eq!(session.phase(), Phase::Betting);
    }

    #[test]
    fn test_malformed_ticket_is_silent() {
        let mut session = SessionStore::seeded(3);
        let alice = register(&mut session, "Alice", 10);
        dispatch(
            &mut session,
            Command::BeginSelection {
                caller: alice.clone(),
            },
        );

        let dispatched = dispatch(
            &mut session,
            Command::SealTicket {
                player_id: alice,
                fear_ids: vec![1, 2, 3],
            },
        );
        assert_eq!(dispatched, Dispatched::default());
    }

    #[test]
    fn test_exhausted_draw_does_not_broadcast() {
        let catalog: Vec<Fear> = (1..=TICKET_SIZE as FearId)
            .map(|id| Fear::new(id, format!("fear {}", id)))
            .collect();
        let mut session = SessionStore::with_catalog(catalog, StdRng::seed_from_u64(3));
        let alice = register(&mut session, "Alice", 10);
        dispatch(&mut session, Command::BeginSelection { caller: alice.clone() });
        dispatch(
            &mut session,
            Command::SealTicket {
                player_id: alice.clone(),
                fear_ids: (1..=TICKET_SIZE as FearId).collect(),
            },
        );
        dispatch(&mut session, Command::BeginPlaying { caller: alice.clone() });

        for _ in 0..TICKET_SIZE {
            let dispatched = dispatch(&mut session, Command::DrawNext { caller: alice.clone() });
            assert!(dispatched.changed);
        }

        let dispatched = dispatch(&mut session, Command::DrawNext { caller: alice });
        assert!(!dispatched.changed);
        assert_eq!(dispatched.reply, Some(Reply::DrawResult(None)));
    }

    #[test]
    fn test_reply_into_packet() {
        match Reply::DrawResult(Some(9)).into_packet() {
            Packet::DrawResult { fear_id } => assert_eq!(fear_id, Some(9)),
            _ => panic!("Wrong packet type"),
        }
        match Reply::Rejected("no".to_string()).into_packet() {
            Packet::Rejected { reason } => assert_eq!(reason, "no"),
            _ => panic!("Wrong packet type"),
        }
    }
}
