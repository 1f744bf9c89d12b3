//! The fear catalog and its reveal log.
//!
//! A fear is revealed at most once per session: `draw_next` only ever picks
//! among unrevealed entries and appends the chosen id to the log, so the log
//! never holds a duplicate and never outgrows the catalog.

use crate::error::CommandError;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use shared::{Fear, FearId, MAX_CATALOG_SIZE, MAX_FEAR_DESCRIPTION_LEN, TICKET_SIZE};
use std::collections::HashSet;

/// Result of asking the deck for the next fear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Revealed(FearId),
    Exhausted,
}

impl DrawOutcome {
    pub fn fear_id(&self) -> Option<FearId> {
        match self {
            DrawOutcome::Revealed(id) => Some(*id),
            DrawOutcome::Exhausted => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FearDeck {
    fears: Vec<Fear>,
    revealed_log: Vec<FearId>,
}

impl FearDeck {
    /// Builds a deck with every fear unrevealed
    pub fn new(catalog: Vec<Fear>) -> Self {
        let fears = catalog
            .into_iter()
            .map(|fear| Fear {
                is_revealed: false,
                ..fear
            })
            .collect();

        Self {
            fears,
            revealed_log: Vec::new(),
        }
    }

    /// Builds a deck from a client-supplied seed.
    ///
    /// Duplicate ids keep their first entry. A seed too small to fill a
    /// ticket, larger than `MAX_CATALOG_SIZE` or with an over-long
    /// description is rejected.
    pub fn from_seed(seed: Vec<Fear>) -> Result<Self, CommandError> {
        let mut seen = HashSet::new();
        let catalog: Vec<Fear> = seed.into_iter().filter(|f| seen.insert(f.id)).collect();

        let oversized = catalog
            .iter()
            .any(|f| f.description.len() > MAX_FEAR_DESCRIPTION_LEN);
        if !(TICKET_SIZE..=MAX_CATALOG_SIZE).contains(&catalog.len()) || oversized {
            return Err(CommandError::InvalidCatalog(catalog.len()));
        }

        Ok(Self::new(catalog))
    }

    pub fn fears(&self) -> &[Fear] {
        &self.fears
    }

    pub fn revealed_log(&self) -> &[FearId] {
        &self.revealed_log
    }

    pub fn contains(&self, fear_id: FearId) -> bool {
        self.fears.iter().any(|f| f.id == fear_id)
    }

    pub fn remaining(&self) -> usize {
        self.fears.iter().filter(|f| !f.is_revealed).count()
    }

    /// Reveals one unrevealed fear chosen uniformly at random.
    ///
    /// Leaves the deck untouched when everything is already revealed.
    pub fn draw_next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DrawOutcome {
        let undrawn: Vec<usize> = self
            .fears
            .iter()
            .enumerate()
            .filter(|(_, fear)| !fear.is_revealed)
            .map(|(index, _)| index)
            .collect();

        let Some(&index) = undrawn.choose(rng) else {
            return DrawOutcome::Exhausted;
        };

        let fear = &mut self.fears[index];
        fear.is_revealed = true;
        let fear_id = fear.id;
        self.revealed_log.push(fear_id);

        info!(
            "Revealed fear {} ({} of {})",
            fear_id,
            self.revealed_log.len(),
            self.fears.len()
        );
        DrawOutcome::Revealed(fear_id)
    }
}
