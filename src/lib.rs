//! # Manse - a turn-based text exploration engine
//!
//! Manse drives coordinate-addressed text adventures: a small tutorial area
//! that gates entry into a multi-floor main world, item discovery and
//! room-local combine recipes, a randomized hazard that wears health down,
//! and a single durable save slot that survives restarts.
//!
//! The engine is presentation-agnostic. It runs as a blocking loop behind an
//! interaction port that exchanges text one line at a time; the bundled
//! binary wires that port to stdin/stdout, but anything that can feed lines
//! and display text can host a session.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use manse::config::Config;
//! use manse::engine::{channel_port, GameEngine, SledStore, WorldContent};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let world = WorldContent::from_world(manse::engine::sample_world());
//! let store = SledStore::open(config.storage.save_path())?;
//! let (port, feed) = channel_port(std::io::stdout());
//! // feed.submit(...) from the input side; the engine blocks on the port.
//! # let _ = feed;
//! let mut engine = GameEngine::new(config.game, world, store, port);
//! let ending = engine.run();
//! # let _ = ending;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module organization
//!
//! - [`engine`] - world model, player state, save store, and the session
//!   state machine
//! - [`config`] - TOML configuration with validation
//! - [`logutil`] - log sanitization for player-supplied text

pub mod config;
pub mod engine;
pub mod logutil;
