//! Player state: location, health, inventory, and the monotone inventory
//! history. Exclusively owned by the session for its duration; persisted in
//! full after every mutation.
//!
//! Loading is fail-open per field: a corrupt record falls back to a
//! known-good default with a logged warning instead of refusing to start.

use std::collections::BTreeSet;

use chrono::Utc;
use log::warn;

use crate::engine::errors::GameError;
use crate::engine::store::{keys, SaveStore};
use crate::engine::types::Location;

/// The mutable per-session player record.
///
/// `location` is `None` for a fresh slot (no game started yet, or just
/// reset); the menu routes that through the prologue into the tutorial
/// entry. The inventory is an ordered sequence; the history is the set of
/// everything ever collected and never shrinks, so `inventory` is always a
/// subset of `history` plus whatever `use` has since consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub location: Option<Location>,
    pub health: u32,
    pub inventory: Vec<String>,
    pub history: BTreeSet<String>,
}

impl PlayerState {
    /// A freshly reset player: empty slot, default health.
    pub fn fresh(default_health: u32) -> Self {
        Self {
            location: None,
            health: default_health,
            inventory: Vec::new(),
            history: BTreeSet::new(),
        }
    }

    /// Load the save slot. Every record degrades independently: a corrupt
    /// location means a fresh start, a corrupt health record means default
    /// health, unreadable lists load as empty.
    pub fn load(store: &dyn SaveStore, default_health: u32) -> Self {
        let mut player = Self::fresh(default_health);

        match store.read(keys::LOCATION) {
            Ok(Some(raw)) if !raw.trim().is_empty() => match Location::parse(&raw) {
                Some(location) => player.location = Some(location),
                None => {
                    warn!("location record {raw:?} matches no recognized shape; starting fresh");
                }
            },
            Ok(_) => {}
            Err(e) => warn!("could not read location record: {e}"),
        }

        match store.read(keys::HEALTH) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(health) => player.health = health,
                Err(_) => {
                    warn!("health record {raw:?} is not a number; using default {default_health}");
                }
            },
            Ok(None) => {}
            Err(e) => warn!("could not read health record: {e}"),
        }

        match store.read(keys::INVENTORY) {
            Ok(Some(raw)) => player.inventory = parse_lines(&raw),
            Ok(None) => {}
            Err(e) => warn!("could not read inventory record: {e}"),
        }

        match store.read(keys::INVENTORY_HISTORY) {
            Ok(Some(raw)) => player.history = parse_lines(&raw).into_iter().collect(),
            Ok(None) => {}
            Err(e) => warn!("could not read inventory history record: {e}"),
        }

        player
    }

    /// Write the full state to the store. Callers treat a failure as
    /// best-effort: the in-memory state stays authoritative for the session.
    pub fn persist(&self, store: &dyn SaveStore) -> Result<(), GameError> {
        match &self.location {
            Some(location) => store.write(keys::LOCATION, &location.encode())?,
            None => store.remove(keys::LOCATION)?,
        }
        store.write(keys::HEALTH, &self.health.to_string())?;
        store.write(keys::INVENTORY, &self.inventory.join("\n"))?;
        let history: Vec<&str> = self.history.iter().map(String::as_str).collect();
        store.write(keys::INVENTORY_HISTORY, &history.join("\n"))?;
        store.write(keys::SAVED_AT, &Utc::now().to_rfc3339())?;
        Ok(())
    }

    /// Clear everything back to initial values.
    pub fn reset(&mut self, default_health: u32) {
        *self = Self::fresh(default_health);
    }

    /// Record newly discovered room items: everything not already in the
    /// history is appended to both the inventory and the history. Returns
    /// the newly found items in room order.
    pub fn discover(&mut self, room_items: &[String]) -> Vec<String> {
        let mut found = Vec::new();
        for item in room_items {
            if self.history.contains(item) {
                continue;
            }
            self.inventory.push(item.clone());
            self.history.insert(item.clone());
            found.push(item.clone());
        }
        found
    }

    /// Add a produced item (from a recipe) to inventory and history.
    pub fn acquire(&mut self, item: &str) {
        self.inventory.push(item.to_string());
        self.history.insert(item.to_string());
    }

    /// Remove one occurrence of `item` from the inventory. History is
    /// untouched, so a consumed item can never be re-discovered by search.
    pub fn consume(&mut self, item: &str) -> bool {
        if let Some(index) = self.inventory.iter().position(|held| held == item) {
            self.inventory.remove(index);
            true
        } else {
            false
        }
    }

    /// True when every required item is currently in the inventory.
    pub fn has_all(&self, required: &[String]) -> bool {
        required.iter().all(|item| self.inventory.contains(item))
    }

    /// Decrement health by one, clamped at zero.
    pub fn apply_hazard(&mut self) {
        self.health = self.health.saturating_sub(1);
    }
}

fn parse_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::store::MemoryStore;

    const DEFAULT_HEALTH: u32 = 20;

    #[test]
    fn fresh_slot_loads_defaults() {
        let store = MemoryStore::new();
        let player = PlayerState::load(&store, DEFAULT_HEALTH);
        assert_eq!(player, PlayerState::fresh(DEFAULT_HEALTH));
    }

    #[test]
    fn persist_then_load_round_trips() {
        let store = MemoryStore::new();
        let mut player = PlayerState::fresh(DEFAULT_HEALTH);
        player.location = Some(Location::Main {
            floor: 2,
            row: 1,
            col: 1,
        });
        player.health = 7;
        player.acquire("Rusty Key");
        player.acquire("Oil Lantern");
        player.persist(&store).expect("persist");

        let loaded = PlayerState::load(&store, DEFAULT_HEALTH);
        assert_eq!(loaded, player);
        assert!(store.read(keys::SAVED_AT).expect("read").is_some());
    }

    #[test]
    fn corrupt_location_falls_back_to_fresh_start() {
        let store = MemoryStore::new();
        store.write(keys::LOCATION, "0111").expect("write");
        store.write(keys::HEALTH, "5").expect("write");
        let player = PlayerState::load(&store, DEFAULT_HEALTH);
        assert_eq!(player.location, None);
        // Other records still load independently.
        assert_eq!(player.health, 5);
    }

    #[test]
    fn corrupt_health_falls_back_to_default() {
        let store = MemoryStore::new();
        store.write(keys::HEALTH, "plenty").expect("write");
        let player = PlayerState::load(&store, DEFAULT_HEALTH);
        assert_eq!(player.health, DEFAULT_HEALTH);
    }

    #[test]
    fn discover_skips_history_and_appends_new() {
        let mut player = PlayerState::fresh(DEFAULT_HEALTH);
        player.history.insert("Rusty Key".to_string());

        let room_items = vec!["Rusty Key".to_string(), "Oil Lantern".to_string()];
        let found = player.discover(&room_items);
        assert_eq!(found, vec!["Oil Lantern".to_string()]);
        assert_eq!(player.inventory, vec!["Oil Lantern".to_string()]);
        assert!(player.history.contains("Rusty Key"));
        assert!(player.history.contains("Oil Lantern"));

        // Second pass finds nothing and changes nothing.
        let again = player.discover(&room_items);
        assert!(again.is_empty());
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(player.history.len(), 2);
    }

    #[test]
    fn consume_removes_one_occurrence_and_keeps_history() {
        let mut player = PlayerState::fresh(DEFAULT_HEALTH);
        player.acquire("Brass Crank");
        assert!(player.consume("Brass Crank"));
        assert!(player.inventory.is_empty());
        assert!(player.history.contains("Brass Crank"));
        assert!(!player.consume("Brass Crank"));
    }

    #[test]
    fn inventory_stays_subset_of_history_through_discovery() {
        let mut player = PlayerState::fresh(DEFAULT_HEALTH);
        player.discover(&["A".to_string(), "B".to_string()]);
        player.acquire("C");
        for item in &player.inventory {
            assert!(player.history.contains(item));
        }
    }

    #[test]
    fn hazard_clamps_at_zero() {
        let mut player = PlayerState::fresh(1);
        player.apply_hazard();
        assert_eq!(player.health, 0);
        player.apply_hazard();
        assert_eq!(player.health, 0);
    }

    #[test]
    fn reset_clears_everything() {
        let store = MemoryStore::new();
        let mut player = PlayerState::fresh(DEFAULT_HEALTH);
        player.location = Some(Location::Tutorial { row: 2, col: 2 });
        player.acquire("Rusty Key");
        player.health = 3;
        player.persist(&store).expect("persist");

        player.reset(DEFAULT_HEALTH);
        player.persist(&store).expect("persist");

        let loaded = PlayerState::load(&store, DEFAULT_HEALTH);
        assert_eq!(loaded, PlayerState::fresh(DEFAULT_HEALTH));
        assert_eq!(store.read(keys::LOCATION).expect("read"), None);
    }
}
