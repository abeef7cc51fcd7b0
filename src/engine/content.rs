//! Content repository: read-only narrative text and room metadata, keyed by
//! logical name or coordinate. The session layer treats everything here as
//! opaque blobs; missing keys resolve to empty values, never to an error.

use std::collections::HashMap;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::errors::GameError;
use crate::engine::types::{Location, RecipeRecord, RoomRecord};

/// Read-only lookup the world model resolves from.
pub trait ContentRepository {
    /// Fetch a narrative blob by key. Missing keys yield an empty string.
    fn text(&self, key: &str) -> String;

    /// Fetch the raw room record for a coordinate, if one is authored.
    fn room(&self, location: &Location) -> Option<RoomRecord>;
}

/// A tutorial room entry in the world file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorialRoomEntry {
    pub row: i32,
    pub col: i32,
    #[serde(flatten)]
    pub room: RoomRecord,
}

/// A main-area room entry in the world file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MainRoomEntry {
    pub floor: i32,
    pub row: i32,
    pub col: i32,
    #[serde(flatten)]
    pub room: RoomRecord,
}

/// The on-disk world document: narrative blobs plus both room grids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldFile {
    #[serde(default)]
    pub texts: HashMap<String, String>,
    #[serde(default)]
    pub tutorial: Vec<TutorialRoomEntry>,
    #[serde(default)]
    pub main: Vec<MainRoomEntry>,
}

/// In-memory content repository indexed by coordinate. Backs both the JSON
/// world file in production and hand-built worlds in tests.
#[derive(Debug, Clone, Default)]
pub struct WorldContent {
    texts: HashMap<String, String>,
    rooms: HashMap<Location, RoomRecord>,
}

impl WorldContent {
    /// Load and index a JSON world file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let world: WorldFile = serde_json::from_str(&raw)?;
        debug!(
            "loaded world file {} ({} tutorial rooms, {} main rooms, {} texts)",
            path.as_ref().display(),
            world.tutorial.len(),
            world.main.len(),
            world.texts.len()
        );
        Ok(Self::from_world(world))
    }

    pub fn from_world(world: WorldFile) -> Self {
        let mut rooms = HashMap::new();
        for entry in world.tutorial {
            rooms.insert(
                Location::Tutorial {
                    row: entry.row,
                    col: entry.col,
                },
                entry.room,
            );
        }
        for entry in world.main {
            rooms.insert(
                Location::Main {
                    floor: entry.floor,
                    row: entry.row,
                    col: entry.col,
                },
                entry.room,
            );
        }
        Self {
            texts: world.texts,
            rooms,
        }
    }

    /// Builder helper for tests: attach a narrative blob.
    pub fn with_text(mut self, key: &str, value: &str) -> Self {
        self.texts.insert(key.to_string(), value.to_string());
        self
    }

    /// Builder helper for tests: attach a room record at a coordinate.
    pub fn with_room(mut self, location: Location, room: RoomRecord) -> Self {
        self.rooms.insert(location, room);
        self
    }
}

impl ContentRepository for WorldContent {
    fn text(&self, key: &str) -> String {
        self.texts.get(key).cloned().unwrap_or_default()
    }

    fn room(&self, location: &Location) -> Option<RoomRecord> {
        self.rooms.get(location).cloned()
    }
}

/// The bundled sample world: a two-room-and-a-porch cabin tutorial feeding a
/// small two-floor manor. `init` writes this to disk as a starting point for
/// world authors; the integration tests drive it directly.
pub fn sample_world() -> WorldFile {
    let mut texts = HashMap::new();
    texts.insert("title".into(), "THE HOLLOW MANOR".into());
    texts.insert(
        "prologue".into(),
        "The letter arrived three weeks after your uncle's funeral, in an \
         envelope the color of ash. It named you caretaker of the manor on \
         the ridge and asked only one thing: that you find what he left \
         behind, and wind it.\n\nYou spend your first night in the old \
         groundskeeper's cabin below the house."
            .into(),
    );
    texts.insert(
        "tutorial_complete".into(),
        "With the key in your pocket and the lantern lit, you push the cabin \
         door open against the wind. The manor waits at the top of the ridge, \
         every window dark."
            .into(),
    );
    texts.insert(
        "game_over".into(),
        "The cold settles in for good this time. Whatever walks these halls \
         walks them alone again."
            .into(),
    );
    texts.insert(
        "win".into(),
        "The music box winds down to a single repeating note, and the house \
         exhales. Somewhere upstairs a door closes gently, like a goodbye. \
         The manor is only a building now."
            .into(),
    );
    texts.insert(
        "credits".into(),
        "THE HOLLOW MANOR\n\nWritten and built with the manse engine.".into(),
    );

    let tutorial = vec![
        TutorialRoomEntry {
            row: 1,
            col: 1,
            room: RoomRecord {
                description: "The cabin's single bunkroom. A stripped mattress, \
                              a wood stove gone cold, and your uncle's trunk at \
                              the foot of the bed."
                    .into(),
                exits: "east".into(),
                items: vec!["Rusty Key".into()],
                ..RoomRecord::default()
            },
        },
        TutorialRoomEntry {
            row: 1,
            col: 2,
            room: RoomRecord {
                description: "The hearth room. Ash in the grate, a workbench \
                              under the window, and pegs by the door where the \
                              tools used to hang."
                    .into(),
                exits: "west, south".into(),
                items: vec!["Oil Lantern".into()],
                ..RoomRecord::default()
            },
        },
        TutorialRoomEntry {
            row: 2,
            col: 2,
            room: RoomRecord {
                description: "The covered porch. Rain ticks on the shingles. \
                              Up the ridge, the manor's roofline cuts the sky."
                    .into(),
                exits: "north".into(),
                ..RoomRecord::default()
            },
        },
    ];

    let main = vec![
        MainRoomEntry {
            floor: 1,
            row: 1,
            col: 1,
            room: RoomRecord {
                description: "The manor foyer. Dust sheets over the furniture, \
                              a grand staircase climbing into the dark, and a \
                              corridor east toward the parlor."
                    .into(),
                exits: "south, east, up".into(),
                hazard: Some(
                    "Somewhere above, floorboards creak under a weight that \
                     is not yours."
                        .into(),
                ),
                ..RoomRecord::default()
            },
        },
        MainRoomEntry {
            floor: 1,
            row: 1,
            col: 2,
            room: RoomRecord {
                description: "The parlor. A writing desk with a locked drawer, \
                              curtains drawn against the daylight."
                    .into(),
                exits: "west".into(),
                items: vec!["Brass Crank".into()],
                hazard: Some("The curtains stir, though every window is shut.".into()),
                recipe: Some(RecipeRecord {
                    requires: vec!["Rusty Key".into()],
                    description: "The key turns stiffly and the drawer slides \
                                  open. Inside is a letter in your uncle's hand."
                        .into(),
                    produces: "Cellar Letter".into(),
                }),
            },
        },
        MainRoomEntry {
            floor: 1,
            row: 2,
            col: 1,
            room: RoomRecord {
                description: "The chapel at the back of the house. A bare altar \
                              under a round window, and a shelf built to hold \
                              something small."
                    .into(),
                exits: "north".into(),
                hazard: Some("A draft snuffs your lantern for one long breath.".into()),
                ..RoomRecord::default()
            },
        },
        MainRoomEntry {
            floor: 2,
            row: 1,
            col: 1,
            room: RoomRecord {
                description: "The upstairs landing. Portraits with their faces \
                              turned to the wall."
                    .into(),
                exits: "down, east".into(),
                hazard: Some("One of the portraits is facing outward now.".into()),
                ..RoomRecord::default()
            },
        },
        MainRoomEntry {
            floor: 2,
            row: 1,
            col: 2,
            room: RoomRecord {
                description: "Your uncle's study. A cabinet of curiosities \
                              stands open, one mechanism missing its fittings."
                    .into(),
                exits: "west".into(),
                items: vec!["Silver Handle".into()],
                hazard: Some("The chair behind the desk rocks once, twice, still.".into()),
                recipe: Some(RecipeRecord {
                    requires: vec!["Brass Crank".into(), "Silver Handle".into()],
                    description: "The crank seats into the cabinet's works and \
                                  the handle winds them. A small music box \
                                  rises from the mechanism."
                        .into(),
                    produces: "Music Box".into(),
                }),
            },
        },
    ];

    WorldFile {
        texts,
        tutorial,
        main,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_text_resolves_to_empty() {
        let content = WorldContent::default();
        assert_eq!(content.text("prologue"), "");
    }

    #[test]
    fn rooms_index_by_region_and_coordinate() {
        let content = WorldContent::from_world(sample_world());
        assert!(content
            .room(&Location::Tutorial { row: 1, col: 1 })
            .is_some());
        assert!(content
            .room(&Location::Main {
                floor: 2,
                row: 1,
                col: 2
            })
            .is_some());
        // Same row/col in the other region is a different coordinate.
        assert!(content
            .room(&Location::Tutorial { row: 9, col: 9 })
            .is_none());
    }

    #[test]
    fn the_handle_waits_in_the_study_beside_its_recipe() {
        let content = WorldContent::from_world(sample_world());
        let study = content
            .room(&Location::Main {
                floor: 2,
                row: 1,
                col: 2,
            })
            .expect("study");
        assert_eq!(study.items, vec!["Silver Handle".to_string()]);
        assert!(study.recipe.is_some());
        // The landing holds nothing; the handle lives only in the study.
        let landing = content
            .room(&Location::Main {
                floor: 2,
                row: 1,
                col: 1,
            })
            .expect("landing");
        assert!(landing.items.is_empty());
    }

    #[test]
    fn world_file_round_trips_through_json() {
        let world = sample_world();
        let raw = serde_json::to_string_pretty(&world).expect("serialize");
        let parsed: WorldFile = serde_json::from_str(&raw).expect("parse");
        assert_eq!(parsed.tutorial.len(), world.tutorial.len());
        assert_eq!(parsed.main.len(), world.main.len());
        let content = WorldContent::from_world(parsed);
        assert!(!content.text("title").is_empty());
    }

    #[test]
    fn sparse_room_entries_deserialize_with_defaults() {
        let raw = r#"{ "tutorial": [ { "row": 1, "col": 1, "description": "bare" } ] }"#;
        let world: WorldFile = serde_json::from_str(raw).expect("parse");
        let content = WorldContent::from_world(world);
        let room = content
            .room(&Location::Tutorial { row: 1, col: 1 })
            .expect("room");
        assert_eq!(room.description, "bare");
        assert!(room.exits.is_empty());
        assert!(room.items.is_empty());
        assert!(room.hazard.is_none());
        assert!(room.recipe.is_none());
    }
}
