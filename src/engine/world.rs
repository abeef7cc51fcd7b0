//! World model: resolves raw content records into [`Room`]s on demand.
//! Resolution is pure apart from a per-session cache and never touches
//! player state.

use std::collections::HashMap;

use log::trace;

use crate::engine::content::ContentRepository;
use crate::engine::types::{Direction, Location, Recipe, Room, RoomRecord};

/// Fixed placeholder shown when a coordinate has no authored room. Walking
/// off the map is a normal game event, not an error.
pub const MISSING_ROOM_TEXT: &str = "Room description not found.";

/// Resolves rooms from a [`ContentRepository`], caching resolved entries for
/// the lifetime of the session.
pub struct WorldModel<C> {
    repo: C,
    cache: HashMap<Location, Room>,
}

impl<C: ContentRepository> WorldModel<C> {
    pub fn new(repo: C) -> Self {
        Self {
            repo,
            cache: HashMap::new(),
        }
    }

    /// Narrative blob passthrough; missing keys resolve to empty text.
    pub fn text(&self, key: &str) -> String {
        self.repo.text(key)
    }

    /// Resolve the room at `location`. Missing records degrade to a
    /// placeholder room with no exits, items, hazard, or recipe.
    pub fn resolve_room(&mut self, location: &Location) -> Room {
        if let Some(room) = self.cache.get(location) {
            return room.clone();
        }
        let room = match self.repo.room(location) {
            Some(record) => resolve_record(record),
            None => {
                trace!("no room authored at {location}");
                Room {
                    description: MISSING_ROOM_TEXT.to_string(),
                    ..Room::default()
                }
            }
        };
        self.cache.insert(*location, room.clone());
        room
    }
}

/// Turn a raw record into a resolved room. Exit tokens that are not
/// recognized directions are ignored; a recipe with no produced item is
/// treated as absent.
fn resolve_record(record: RoomRecord) -> Room {
    let exits = record
        .exits
        .split(',')
        .filter_map(|token| token.trim().parse::<Direction>().ok())
        .collect();
    let hazard_text = record.hazard.filter(|text| !text.trim().is_empty());
    let recipe = record.recipe.and_then(|raw| {
        if raw.produces.trim().is_empty() {
            return None;
        }
        Some(Recipe {
            requires: raw.requires,
            description: raw.description,
            produces: raw.produces,
        })
    });
    Room {
        description: record.description,
        exits,
        items: record.items,
        hazard_text,
        recipe,
    }
}
