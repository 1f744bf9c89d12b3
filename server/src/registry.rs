//! Registered participants, their wagers and their cards
//!
//! This module owns the player side of the session:
//! - Registration with bet validation and admin assignment
//! - Ticket sealing with deduplication against the catalog
//! - Speculative marking, frozen once a player is disqualified
//! - The running prize pool
//!
//! Phase gating is not done here. The session store decides whether a
//! command is legal right now and only then calls into the registry.

use crate::deck::FearDeck;
use crate::error::CommandError;
use log::{info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use shared::{FearId, Player, PlayerId, MAX_BET, MAX_NAME_LEN, MAX_PLAYERS, MIN_BET, TICKET_SIZE};
use std::collections::HashSet;

/// Ordered roster of the session's players
///
/// Players are kept in registration order, which is also the tie-break
/// order for standings. Records are never removed while the session lives;
/// a viewer dropping its connection leaves its player untouched.
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    /// Players in registration order
    players: Vec<Player>,
    /// Sequence number embedded in the next player token
    next_player_seq: u32,
    /// Sum of every registered bet
    total_prize: u32,
    /// First player ever registered in this session
    admin_id: Option<PlayerId>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            next_player_seq: 1,
            total_prize: 0,
            admin_id: None,
        }
    }

    /// Registers a new player and returns their private token
    ///
    /// Fails once `MAX_PLAYERS` are seated. The name is trimmed and must hold
    /// 1 to `MAX_NAME_LEN` bytes; the bet must lie within `MIN_BET..=MAX_BET`.
    /// The first successful registration of the session becomes the admin. The token mixes a sequence number with random bits
    /// from the session's random source so tokens stay unique and hard to
    /// guess while remaining reproducible under a fixed seed.
    pub fn register<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        bet: u32,
        rng: &mut R,
    ) -> Result<PlayerId, CommandError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(CommandError::SessionFull);
        }

        if !(MIN_BET..=MAX_BET).contains(&bet) {
            return Err(CommandError::InvalidBet { bet });
        }

        let name = name.trim();
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(CommandError::InvalidName);
        }

        let player_id = format!("player-{}-{:016x}", self.next_player_seq, rng.gen::<u64>());
        self.next_player_seq += 1;

        self.players
            .push(Player::new(player_id.clone(), name.to_string(), bet));
        self.total_prize += bet;

        if self.admin_id.is_none() {
            info!("Player {} ({}) is the session admin", name, player_id);
            self.admin_id = Some(player_id.clone());
        }

        info!(
            "Registered {} with bet {} (prize pool now {})",
            name, bet, self.total_prize
        );
        Ok(player_id)
    }

    /// Replaces a player's ticket with the deduplicated selection
    ///
    /// Duplicates are dropped keeping first-seen order. The result must hold
    /// exactly `TICKET_SIZE` ids, all present in the catalog; otherwise the
    /// existing ticket is left as it was.
    pub fn seal_ticket(
        &mut self,
        player_id: &str,
        fear_ids: &[FearId],
        deck: &FearDeck,
    ) -> Result<(), CommandError> {
        let mut seen = HashSet::new();
        let ticket: Vec<FearId> = fear_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        if ticket.len() != TICKET_SIZE || !ticket.iter().all(|id| deck.contains(*id)) {
            return Err(CommandError::MalformedTicket {
                distinct: ticket.len(),
            });
        }

        let player = self.get_mut(player_id)?;
        player.ticket = ticket;
        info!("{} sealed a ticket", player.name);
        Ok(())
    }

    /// Flips a fear in or out of the player's marks
    ///
    /// Marks are deliberately unchecked against the reveal log; that check
    /// happens when the player claims. Returns whether the fear is marked
    /// after the toggle.
    pub fn toggle_mark(&mut self, player_id: &str, fear_id: FearId) -> Result<bool, CommandError> {
        let player = self.get_mut(player_id)?;
        if player.is_disqualified {
            return Err(CommandError::Disqualified(player.id.clone()));
        }

        if player.marked_ids.remove(&fear_id) {
            Ok(false)
        } else {
            player.marked_ids.insert(fear_id);
            Ok(true)
        }
    }

    /// Applies an independent uniform shuffle to every sealed ticket
    ///
    /// Only the display order changes; ticket membership is preserved.
    pub fn shuffle_tickets<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for player in &mut self.players {
            player.ticket.shuffle(rng);
        }
    }

    /// Returns true once every registered player holds a sealed ticket
    pub fn all_sealed(&self) -> bool {
        self.players.iter().all(|p| p.has_sealed_ticket())
    }

    pub fn is_admin(&self, player_id: &str) -> bool {
        self.admin_id.as_deref() == Some(player_id)
    }

    pub fn get(&self, player_id: &str) -> Result<&Player, CommandError> {
        self.players
            .iter()
            .find(|p| p.id == player_id)
            .ok_or_else(|| CommandError::UnknownPlayer(player_id.to_string()))
    }

    pub fn get_mut(&mut self, player_id: &str) -> Result<&mut Player, CommandError> {
        self.players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| {
                warn!("Command for unknown player {}", player_id);
                CommandError::UnknownPlayer(player_id.to_string())
            })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn total_prize(&self) -> u32 {
        self.total_prize
    }

    pub fn admin_id(&self) -> Option<&PlayerId> {
        self.admin_id.as_ref()
    }

    /// Returns the number of registered players
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared::catalog::default_catalog;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn deck() -> FearDeck {
        FearDeck::new(default_catalog())
    }

    fn ticket() -> Vec<FearId> {
        (1..=TICKET_SIZE as FearId).collect()
    }

    #[test]
    fn test_registry_creation() {
        let registry = PlayerRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.total_prize(), 0);
        assert!(registry.admin_id().is_none());
    }

    #[test]
    fn test_register_first_player_becomes_admin() {
        let mut registry = PlayerRegistry::new();
        let mut rng = rng();

        let alice = registry.register("Alice", 10, &mut rng).unwrap();
        let bob = registry.register("Bob", 20, &mut rng).unwrap();

        assert_ne!(alice, bob);
        assert!(registry.is_admin(&alice));
        assert!(!registry.is_admin(&bob));
        assert_eq!(registry.total_prize(), 30);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_token_format() {
        let mut registry = PlayerRegistry::new();
        let id = registry.register("Alice", 10, &mut rng()).unwrap();
        assert!(id.starts_with("player-1-"));
        assert_eq!(id.len(), "player-1-".len() + 16);
    }

    #[test]
    fn test_register_trims_name() {
        let mut registry = PlayerRegistry::new();
        let id = registry.register("  Alice \n", 10, &mut rng()).unwrap();
        assert_eq!(registry.get(&id).unwrap().name, "Alice");
    }

    #[test]
    fn test_register_rejects_bad_bets() {
        let mut registry = PlayerRegistry::new();
        let mut rng = rng();

        assert_eq!(
            registry.register("Alice", 0, &mut rng),
            Err(CommandError::InvalidBet { bet: 0 })
        );
        assert_eq!(
            registry.register("Alice", MAX_BET + 1, &mut rng),
            Err(CommandError::InvalidBet { bet: MAX_BET + 1 })
        );
        assert!(registry.register("Alice", MIN_BET, &mut rng).is_ok());
        assert!(registry.register("Bob", MAX_BET, &mut rng).is_ok());
        assert_eq!(registry.total_prize(), MIN_BET + MAX_BET);
    }

    #[test]
    fn test_register_rejects_blank_name() {
        let mut registry = PlayerRegistry::new();
        assert_eq!(
            registry.register("   ", 10, &mut rng()),
            Err(CommandError::InvalidName)
        );
        assert!(registry.is_empty());
        assert!(registry.admin_id().is_none());
    }

    #[test]
    fn test_register_name_length_limit() {
        let mut registry = PlayerRegistry::new();
        let mut rng = rng();

        assert_eq!(
            registry.register(&"x".repeat(MAX_NAME_LEN + 1), 10, &mut rng),
            Err(CommandError::InvalidName)
        );
        assert_eq!(
            registry.register(&"x".repeat(65_000), 10, &mut rng),
            Err(CommandError::InvalidName)
        );
        assert!(registry.is_empty());

        // Surrounding whitespace does not count
        let padded = format!("  {}  ", "x".repeat(MAX_NAME_LEN));
        assert!(registry.register(&padded, 10, &mut rng).is_ok());
    }

    #[test]
    fn test_register_stops_at_capacity() {
        let mut registry = PlayerRegistry::new();
        let mut rng = rng();
        for i in 0..MAX_PLAYERS {
            registry.register(&format!("p{}", i), 5, &mut rng).unwrap();
        }

        assert_eq!(
            registry.register("Late", 5, &mut rng),
            Err(CommandError::SessionFull)
        );
        assert_eq!(registry.len(), MAX_PLAYERS);
        assert_eq!(registry.total_prize(), 5 * MAX_PLAYERS as u32);
    }

    #[test]
    fn test_seal_ticket() {
        let mut registry = PlayerRegistry::new();
        let id = registry.register("Alice", 10, &mut rng()).unwrap();

        registry.seal_ticket(&id, &ticket(), &deck()).unwrap();
        assert_eq!(registry.get(&id).unwrap().ticket, ticket());
        assert!(registry.all_sealed());
    }

    #[test]
    fn test_seal_ticket_dedupes_before_counting() {
        let mut registry = PlayerRegistry::new();
        let id = registry.register("Alice", 10, &mut rng()).unwrap();

        let mut with_duplicate = ticket();
        with_duplicate.insert(3, 1);
        registry.seal_ticket(&id, &with_duplicate, &deck()).unwrap();
        assert_eq!(registry.get(&id).unwrap().ticket, ticket());
    }

    #[test]
    fn test_seal_ticket_rejects_wrong_size() {
        let mut registry = PlayerRegistry::new();
        let id = registry.register("Alice", 10, &mut rng()).unwrap();

        let mut short = ticket();
        short.pop();
        short.push(1);
        assert_eq!(
            registry.seal_ticket(&id, &short, &deck()),
            Err(CommandError::MalformedTicket { distinct: 14 })
        );
        assert!(registry.get(&id).unwrap().ticket.is_empty());
        assert!(!registry.all_sealed());
    }

    #[test]
    fn test_seal_ticket_rejects_unknown_fear() {
        let mut registry = PlayerRegistry::new();
        let id = registry.register("Alice", 10, &mut rng()).unwrap();
        registry.seal_ticket(&id, &ticket(), &deck()).unwrap();

        let mut foreign = ticket();
        foreign[0] = 10_000;
        assert!(registry.seal_ticket(&id, &foreign, &deck()).is_err());
        assert_eq!(registry.get(&id).unwrap().ticket, ticket());
    }

    #[test]
    fn test_seal_ticket_unknown_player() {
        let mut registry = PlayerRegistry::new();
        assert_eq!(
            registry.seal_ticket("ghost", &ticket(), &deck()),
            Err(CommandError::UnknownPlayer("ghost".to_string()))
        );
    }

    #[test]
    fn test_toggle_mark() {
        let mut registry = PlayerRegistry::new();
        let id = registry.register("Alice", 10, &mut rng()).unwrap();

        assert_eq!(registry.toggle_mark(&id, 7), Ok(true));
        assert_eq!(registry.toggle_mark(&id, 9), Ok(true));
        assert_eq!(registry.toggle_mark(&id, 7), Ok(false));
        assert_eq!(
            registry.get(&id).unwrap().marked_ids.iter().copied().collect::<Vec<_>>(),
            vec![9]
        );
    }

    #[test]
    fn test_toggle_mark_frozen_when_disqualified() {
        let mut registry = PlayerRegistry::new();
        let id = registry.register("Alice", 10, &mut rng()).unwrap();
        registry.toggle_mark(&id, 7).unwrap();
        registry.get_mut(&id).unwrap().is_disqualified = true;

        assert!(matches!(
            registry.toggle_mark(&id, 7),
            Err(CommandError::Disqualified(_))
        ));
        assert!(registry.get(&id).unwrap().marked_ids.contains(&7));
    }

    #[test]
    fn test_shuffle_keeps_membership() {
        let mut registry = PlayerRegistry::new();
        let mut rng = rng();
        let id = registry.register("Alice", 10, &mut rng).unwrap();
        registry.seal_ticket(&id, &ticket(), &deck()).unwrap();

        registry.shuffle_tickets(&mut rng);

        let mut shuffled = registry.get(&id).unwrap().ticket.clone();
        shuffled.sort_unstable();
        assert_eq!(shuffled, ticket());
    }

    fn shuffled_ticket(seed: u64) -> Vec<FearId> {
        let mut registry = PlayerRegistry::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let id = registry.register("Alice", 10, &mut rng).unwrap();
        registry.seal_ticket(&id, &ticket(), &deck()).unwrap();
        registry.shuffle_tickets(&mut rng);
        registry.get(&id).unwrap().ticket.clone()
    }

    #[test]
    fn test_shuffle_reorders_ticket() {
        assert_ne!(shuffled_ticket(42), ticket());
    }

    #[test]
    fn test_shuffle_is_reproducible() {
        assert_eq!(shuffled_ticket(42), shuffled_ticket(42));
        assert_ne!(shuffled_ticket(42), shuffled_ticket(43));
    }
}
