//! Claim validation and the three-strike policy.
//!
//! A claim wins only when every ticket fear is marked and every mark has
//! actually been revealed. Failed claims escalate from a soft
//! warning to a final warning to disqualification.

use log::warn;
use shared::{ClaimOutcome, FearId, Player, WarningLevel, MAX_CLAIM_ATTEMPTS};
use std::collections::HashSet;

const SOFT_WARNING: &str = "That is not a bingo yet. Check your card against the revealed fears.";
const FINAL_WARNING: &str = "Second false claim. One more and you are out of the game.";
const DISQUALIFIED: &str = "Third false claim. You are disqualified and your card is frozen.";

/// Breakdown of a player's card against the reveal log
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClaimReview {
    /// Revealed ticket fears the player has not marked
    pub missed: Vec<FearId>,
    /// Marked fears that have not been revealed
    pub unrevealed_marks: Vec<FearId>,
    /// Ticket fears still unmarked, revealed or not
    pub open: Vec<FearId>,
    pub sealed: bool,
}

impl ClaimReview {
    pub fn is_win(&self) -> bool {
        self.sealed
            && self.missed.is_empty()
            && self.unrevealed_marks.is_empty()
            && self.open.is_empty()
    }
}

/// Evaluates a player's card without touching it
pub fn review_claim(player: &Player, revealed_log: &[FearId]) -> ClaimReview {
    let revealed: HashSet<FearId> = revealed_log.iter().copied().collect();

    let missed = player
        .ticket
        .iter()
        .copied()
        .filter(|id| revealed.contains(id) && !player.marked_ids.contains(id))
        .collect();

    let unrevealed_marks = player
        .marked_ids
        .iter()
        .copied()
        .filter(|id| !revealed.contains(id))
        .collect();

    let open = player
        .ticket
        .iter()
        .copied()
        .filter(|id| !player.marked_ids.contains(id))
        .collect();

    ClaimReview {
        missed,
        unrevealed_marks,
        open,
        sealed: player.has_sealed_ticket(),
    }
}

pub fn warning_level(attempts: u32) -> WarningLevel {
    match attempts {
        0 | 1 => WarningLevel::Soft,
        n if n < MAX_CLAIM_ATTEMPTS => WarningLevel::Final,
        _ => WarningLevel::Disqualified,
    }
}

/// Charges a failed claim to the player and returns the leveled response.
///
/// Reaching `MAX_CLAIM_ATTEMPTS` disqualifies the player for the rest of the
/// session.
pub fn record_strike(player: &mut Player) -> ClaimOutcome {
    player.claim_attempts += 1;
    let level = warning_level(player.claim_attempts);

    let message = match level {
        WarningLevel::Soft => SOFT_WARNING,
        WarningLevel::Final => FINAL_WARNING,
        WarningLevel::Disqualified => {
            player.is_disqualified = true;
            warn!("{} is disqualified after {} false claims", player.name, player.claim_attempts);
            DISQUALIFIED
        }
    };

    ClaimOutcome::Warning {
        level,
        attempts: player.claim_attempts,
        message: message.to_string(),
    }
}
