//! Plain-text rendering of session snapshots

use shared::{ClaimOutcome, Phase, SessionSnapshot, WarningLevel, TICKET_SIZE};
use std::fmt::Write;

/// Renders a snapshot as seen by `local_player`
///
/// Lists the phase, prize pool, the latest reveal, the local ticket with
/// marks and the current standings.
pub fn render_snapshot(snapshot: &SessionSnapshot, local_player: Option<&str>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "=== Phase: {} | Prize pool: {} | Players: {} ===",
        snapshot.phase,
        snapshot.total_prize,
        snapshot.players.len()
    );

    if let Some(fear) = snapshot.last_revealed() {
        let _ = writeln!(
            out,
            "Last revealed: #{} {} ({}/{} revealed)",
            fear.id,
            fear.description,
            snapshot.revealed_log.len(),
            snapshot.fears.len()
        );
    }

    match snapshot.phase {
        Phase::Betting => {
            let _ = writeln!(out, "Waiting for players to register.");
        }
        Phase::Selection => render_catalog(&mut out, snapshot),
        Phase::Playing | Phase::Finished => {}
    }

    if let Some(me) = local_player.and_then(|id| snapshot.player(id)) {
        let is_admin = snapshot.admin_id.as_deref() == Some(me.id.as_str());
        let _ = writeln!(
            out,
            "You: {} (bet {}){}{}",
            me.name,
            me.bet,
            if is_admin { " [admin]" } else { "" },
            if me.is_disqualified {
                " [disqualified]"
            } else {
                ""
            }
        );

        if me.has_sealed_ticket() {
            let _ = writeln!(
                out,
                "Your ticket ({}/{} marked):",
                me.marked_count(),
                TICKET_SIZE
            );
            for fear_id in &me.ticket {
                let marked = if me.marked_ids.contains(fear_id) {
                    "x"
                } else {
                    " "
                };
                let revealed = snapshot.fear(*fear_id).map_or(false, |f| f.is_revealed);
                let description = snapshot
                    .fear(*fear_id)
                    .map_or("?", |f| f.description.as_str());
                let _ = writeln!(
                    out,
                    "  [{}] #{:<3} {}{}",
                    marked,
                    fear_id,
                    description,
                    if revealed { " *" } else { "" }
                );
            }
        } else if snapshot.phase == Phase::Selection {
            let _ = writeln!(out, "Seal {} fear ids with 'seal'.", TICKET_SIZE);
        }
    }

    if !snapshot.players.is_empty() {
        let _ = writeln!(out, "Standings:");
        for (rank, player) in snapshot.standings().iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {} - {} marked, {} strikes{}",
                rank + 1,
                player.name,
                player.marked_count(),
                player.claim_attempts,
                if player.is_disqualified { " (out)" } else { "" }
            );
        }
    }

    if let (Some(winner), Some(profit)) = (snapshot.winner_player(), snapshot.winner_profit()) {
        let _ = writeln!(
            out,
            "BINGO! {} wins {} (profit {})",
            winner.name, snapshot.total_prize, profit
        );
    }

    out
}

fn render_catalog(out: &mut String, snapshot: &SessionSnapshot) {
    let _ = writeln!(out, "Fears to choose from:");
    for fear in &snapshot.fears {
        let _ = writeln!(out, "  #{:<3} {}", fear.id, fear.description);
    }
}

pub fn render_claim(outcome: &ClaimOutcome) -> String {
    match outcome {
        ClaimOutcome::Win => "Bingo confirmed, you win!".to_string(),
        ClaimOutcome::Warning {
            level,
            attempts,
            message,
        } => {
            let label = match level {
                WarningLevel::Soft => "Warning",
                WarningLevel::Final => "Final warning",
                WarningLevel::Disqualified => "Disqualified",
            };
            format!("{} (strike {}): {}", label, attempts, message)
        }
    }
}
