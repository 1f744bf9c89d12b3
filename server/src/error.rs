//! Reasons a session command can fail to change state.

use shared::{
    FearId, Phase, PlayerId, MAX_BET, MAX_CATALOG_SIZE, MAX_FEAR_DESCRIPTION_LEN, MIN_BET,
    MAX_NAME_LEN, MAX_PLAYERS, TICKET_SIZE,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("bet {bet} is outside the allowed range {}-{}", MIN_BET, MAX_BET)]
    InvalidBet { bet: u32 },

    #[error("player name must be 1-{} bytes long", MAX_NAME_LEN)]
    InvalidName,

    #[error("the session is not accepting players during the {phase} phase")]
    SessionNotJoinable { phase: Phase },

    #[error("the session is full ({} players)", MAX_PLAYERS)]
    SessionFull,

    #[error("a ticket needs exactly {} distinct catalog fears, got {distinct}", TICKET_SIZE)]
    MalformedTicket { distinct: usize },

    #[error("only the admin may {action}")]
    UnauthorizedCommand { action: &'static str },

    #[error("cannot {action} during the {phase} phase")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("fear {0} is not in the catalog")]
    UnknownFear(FearId),

    #[error("player {0} is disqualified")]
    Disqualified(PlayerId),

    #[error("not every player has sealed a ticket")]
    PlayersNotReady,

    #[error(
        "a catalog needs {}-{} distinct fears with descriptions of at most {} bytes, got {0} fears",
        TICKET_SIZE,
        MAX_CATALOG_SIZE,
        MAX_FEAR_DESCRIPTION_LEN
    )]
    InvalidCatalog(usize),
}

impl CommandError {
    /// Whether the requester is told about the failure. Everything else is
    /// dropped after logging.
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            CommandError::InvalidBet { .. }
                | CommandError::InvalidName
                | CommandError::SessionNotJoinable { .. }
                | CommandError::SessionFull
        )
    }
}
