//! Session phase state machine.
//!
//! The phase only moves one step forward at a time
//! (`betting → selection → playing → finished`) or jumps back to `betting`
//! on reset.

use crate::error::CommandError;
use log::info;
use shared::Phase;

#[derive(Debug, Clone)]
pub struct PhaseController {
    phase: Phase,
}

impl PhaseController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Betting,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Fails with `WrongPhase` unless the session is in one of `allowed`
    pub fn require(&self, action: &'static str, allowed: &[Phase]) -> Result<(), CommandError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(CommandError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    /// Checks that `target` is the immediate successor of the current phase
    pub fn can_advance_to(&self, action: &'static str, target: Phase) -> Result<(), CommandError> {
        if self.phase.next() == Some(target) {
            Ok(())
        } else {
            Err(CommandError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    /// Moves to `target` if it is the immediate successor
    pub fn advance_to(&mut self, action: &'static str, target: Phase) -> Result<(), CommandError> {
        self.can_advance_to(action, target)?;
        info!("Phase {} -> {}", self.phase, target);
        self.phase = target;
        Ok(())
    }

    pub fn reset(&mut self) {
        info!("Phase {} -> {} (reset)", self.phase, Phase::Betting);
        self.phase = Phase::Betting;
    }
}

/// Admin gate shared by every admin-only transition
pub fn authorize_admin(
    admin_id: Option<&str>,
    caller: &str,
    action: &'static str,
) -> Result<(), CommandError> {
    if admin_id == Some(caller) {
        Ok(())
    } else {
        Err(CommandError::UnauthorizedCommand { action })
    }
}
