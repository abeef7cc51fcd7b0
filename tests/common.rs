//! Shared helpers for the integration tests: the bundled sample world, an
//! in-memory save store, and a scripted interaction port driving the engine
//! end to end.
#![allow(dead_code)]

use manse::config::GameConfig;
use manse::engine::{sample_world, GameEngine, MemoryStore, ScriptedPort, WorldContent};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A denominator large enough that the seeded RNG never draws the trigger
/// in a short session.
pub const QUIET_HAZARD: u32 = u32::MAX;

pub fn manor_world() -> WorldContent {
    WorldContent::from_world(sample_world())
}

/// Game config with hazards effectively disabled, for deterministic scripts.
pub fn quiet_config() -> GameConfig {
    GameConfig {
        hazard_denominator: QUIET_HAZARD,
        ..GameConfig::default()
    }
}

/// Engine over the sample world with a fixed RNG seed.
pub fn engine(
    config: GameConfig,
    store: MemoryStore,
    port: ScriptedPort,
) -> GameEngine<WorldContent, MemoryStore, ScriptedPort> {
    GameEngine::new(config, manor_world(), store, port).with_rng(StdRng::seed_from_u64(1984))
}
