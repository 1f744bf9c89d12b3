//! The session aggregate: single source of truth for one game.
//!
//! Every command is a method taking `&mut self`, so whoever owns the store
//! applies commands one at a time and each method runs to completion before
//! the next starts. Deciding and committing the winner, or picking and
//! revealing a fear, therefore happen in one step with nothing in between.

use crate::deck::{DrawOutcome, FearDeck};
use crate::error::CommandError;
use crate::phase::{authorize_admin, PhaseController};
use crate::registry::PlayerRegistry;
use crate::validator::{record_strike, review_claim};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::catalog::default_catalog;
use shared::{ClaimOutcome, Fear, FearId, Phase, PlayerId, SessionSnapshot};

pub struct SessionStore<R = StdRng> {
    phases: PhaseController,
    registry: PlayerRegistry,
    deck: FearDeck,
    winner: Option<PlayerId>,
    rng: R,
}

impl SessionStore<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible session: draws, shuffles and tokens follow the seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SessionStore<R> {
    /// Fresh session in `betting` over the built-in catalog
    pub fn new(rng: R) -> Self {
        Self::with_catalog(default_catalog(), rng)
    }

    pub fn with_catalog(catalog: Vec<Fear>, rng: R) -> Self {
        Self {
            phases: PhaseController::new(),
            registry: PlayerRegistry::new(),
            deck: FearDeck::new(catalog),
            winner: None,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phases.phase()
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn deck(&self) -> &FearDeck {
        &self.deck
    }

    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }

    pub fn register(&mut self, name: &str, bet: u32) -> Result<PlayerId, CommandError> {
        let phase = self.phases.phase();
        if !phase.is_joinable() {
            return Err(CommandError::SessionNotJoinable { phase });
        }
        self.registry.register(name, bet, &mut self.rng)
    }

    pub fn seal_ticket(&mut self, player_id: &str, fear_ids: &[FearId]) -> Result<(), CommandError> {
        self.phases.require("seal a ticket", &[Phase::Selection])?;
        self.registry.seal_ticket(player_id, fear_ids, &self.deck)
    }

    pub fn begin_selection(&mut self, caller: &str) -> Result<(), CommandError> {
        self.authorize(caller, "begin selection")?;
        self.phases.advance_to("begin selection", Phase::Selection)
    }

    /// Starts the draw once every player has sealed a ticket, shuffling each
    /// ticket's display order on the way.
    pub fn begin_playing(&mut self, caller: &str) -> Result<(), CommandError> {
        self.authorize(caller, "begin playing")?;
        self.phases.can_advance_to("begin playing", Phase::Playing)?;
        if !self.registry.all_sealed() {
            return Err(CommandError::PlayersNotReady);
        }

        self.registry.shuffle_tickets(&mut self.rng);
        self.phases.advance_to("begin playing", Phase::Playing)
    }

    pub fn draw_next(&mut self, caller: &str) -> Result<DrawOutcome, CommandError> {
        self.authorize(caller, "draw")?;
        self.phases.require("draw", &[Phase::Playing])?;
        Ok(self.deck.draw_next(&mut self.rng))
    }

    /// Marks may name any catalog fear, revealed or not; the claim is where
    /// marks are checked against the reveal log.
    pub fn toggle_mark(&mut self, player_id: &str, fear_id: FearId) -> Result<bool, CommandError> {
        self.phases.require("mark", &[Phase::Playing])?;
        if !self.deck.contains(fear_id) {
            return Err(CommandError::UnknownFear(fear_id));
        }
        self.registry.toggle_mark(player_id, fear_id)
    }

    /// Validates a claim and applies either the win or a strike.
    ///
    /// The first valid claim records the winner and finishes the session in
    /// the same call that checked no winner existed yet.
    pub fn claim(&mut self, player_id: &str) -> Result<ClaimOutcome, CommandError> {
        self.phases.require("claim", &[Phase::Playing])?;
        if self.winner.is_some() {
            return Err(CommandError::WrongPhase {
                action: "claim",
                phase: Phase::Finished,
            });
        }

        let prize = self.registry.total_prize();
        let player = self.registry.get_mut(player_id)?;
        if player.is_disqualified {
            return Err(CommandError::Disqualified(player.id.clone()));
        }

        let review = review_claim(player, self.deck.revealed_log());
        if !review.is_win() {
            info!(
                "{} claimed early: {} missed, {} unrevealed marks, {} open",
                player.name,
                review.missed.len(),
                review.unrevealed_marks.len(),
                review.open.len()
            );
            return Ok(record_strike(player));
        }

        info!("{} wins the prize pool of {}", player.name, prize);
        self.winner = Some(player.id.clone());
        self.phases.advance_to("finish", Phase::Finished)?;
        Ok(ClaimOutcome::Win)
    }

    /// Discards every player, the prize and the winner and starts over in
    /// `betting`. An empty seed restores the built-in catalog.
    pub fn reset(&mut self, caller: &str, catalog: Vec<Fear>) -> Result<(), CommandError> {
        self.authorize(caller, "reset the session")?;
        let deck = if catalog.is_empty() {
            FearDeck::new(default_catalog())
        } else {
            FearDeck::from_seed(catalog)?
        };

        self.phases.reset();
        self.registry = PlayerRegistry::new();
        self.deck = deck;
        self.winner = None;
        info!("Session reset with {} fears", self.deck.fears().len());
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phases.phase(),
            players: self.registry.players().to_vec(),
            fears: self.deck.fears().to_vec(),
            revealed_log: self.deck.revealed_log().to_vec(),
            total_prize: self.registry.total_prize(),
            winner: self.winner.clone(),
            admin_id: self.registry.admin_id().cloned(),
        }
    }

    fn authorize(&self, caller: &str, action: &'static str) -> Result<(), CommandError> {
        authorize_admin(self.registry.admin_id().map(String::as_str), caller, action)
    }
}
