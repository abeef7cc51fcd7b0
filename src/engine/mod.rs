//! The game engine: world model, player state, persistence, and the session
//! state machine, glued together by the interaction port.
//!
//! Layering, outermost first:
//!
//! - [`session`] - the menu/tutorial/main-game state machine
//! - [`world`] - cached room resolution over a content repository
//! - [`content`] - read-only narrative text and room records
//! - [`player`] - the mutable per-session player record
//! - [`store`] - the durable keyed-text save slot
//! - [`port`] - the blocking text boundary to the presentation layer
//! - [`hazard`] - the per-turn randomized hazard draw
//! - [`types`] - directions, coordinates, rooms, recipes
//! - [`errors`] - the shared error type

pub mod content;
pub mod errors;
pub mod hazard;
pub mod player;
pub mod port;
pub mod session;
pub mod store;
pub mod types;
pub mod world;

pub use content::{sample_world, ContentRepository, WorldContent, WorldFile};
pub use errors::GameError;
pub use hazard::HazardDice;
pub use player::PlayerState;
pub use port::{channel_port, ChannelPort, InteractionPort, LineFeed, ScriptedPort};
pub use session::{GameEngine, SessionEnd};
pub use store::{keys, MemoryStore, SaveStore, SledStore};
pub use types::{Direction, Location, Recipe, RecipeRecord, Room, RoomRecord};
pub use world::WorldModel;
