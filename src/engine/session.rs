//! The game state machine: menu, tutorial, main game, and the terminal
//! endings. Drives movement, search, use, and hazard resolution against the
//! world model and player state, persisting after every mutating turn and
//! exchanging text with the interaction port.
//!
//! Nothing in this module terminates the process. Terminal transitions are
//! reported through [`SessionEnd`] and the binary decides what to do with
//! them; every fault below that (missing content, corrupt records, failed
//! writes) degrades and the loop continues.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::engine::content::ContentRepository;
use crate::engine::hazard::HazardDice;
use crate::engine::player::PlayerState;
use crate::engine::port::InteractionPort;
use crate::engine::store::SaveStore;
use crate::engine::types::{Direction, Location, Room};
use crate::engine::world::WorldModel;
use crate::logutil::escape_log;

/// Fixed user-facing messages. Invalid input and blocked movement are normal
/// game events, never errors.
pub const MSG_INVALID: &str = "That is not a valid input.";
pub const MSG_NO_WAY: &str = "You can't go that way.";
pub const MSG_FOUND_NOTHING: &str = "You found nothing.";
pub const MSG_CANT_USE_HERE: &str = "You can't do that here.";
pub const MSG_NO_RECIPE: &str = "You have no usable items for this room.";
pub const MSG_MISSING_RECIPE_ITEMS: &str = "You are missing one or more items.";
pub const MSG_MISSING_WIN_ITEMS: &str = "You don't have all usable items for this room.";

const PROMPT: &str = "\n\n INPUT >> ";
const ACK: &str = "\n\nPRESS ENTER TO CONTINUE... ";
const HELP_COMMANDS: &str = "\n\nAvailable commands:\n north\n south\n east\n west\n up\n down\n inventory\n search\n use\n menu";
const DEFAULT_TITLE: &str = "MANSE";

/// How a session ended. `GameOver`, `Win`, and `Exit` are terminal;
/// `ResetRequested` asks the caller to end the process so the next launch
/// reloads the cleared slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Exit,
    GameOver,
    Win,
    ResetRequested,
}

/// Result of one trip through Play: back to the menu, a terminal ending, or
/// a closed input feed.
enum PlayExit {
    ToMenu,
    GameOver,
    Win,
    Disconnected,
}

/// The session engine. Owns the player state exclusively for its lifetime;
/// the world model, save store, and interaction port are injected.
pub struct GameEngine<C, S, P> {
    config: GameConfig,
    world: WorldModel<C>,
    store: S,
    port: P,
    player: PlayerState,
    rng: StdRng,
}

impl<C, S, P> GameEngine<C, S, P>
where
    C: ContentRepository,
    S: SaveStore,
    P: InteractionPort,
{
    /// Build an engine, reloading the player from the save slot.
    pub fn new(config: GameConfig, repo: C, store: S, port: P) -> Self {
        let player = PlayerState::load(&store, config.default_health);
        Self {
            world: WorldModel::new(repo),
            config,
            store,
            port,
            player,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the hazard RNG; tests use a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Run the menu loop until a terminal transition.
    pub fn run(&mut self) -> SessionEnd {
        info!("session started");
        loop {
            self.port.emit(&self.menu_text());
            let Some(input) = self.port.request_line() else {
                info!("input feed closed; ending session");
                return SessionEnd::Exit;
            };
            match input.trim() {
                "1" => match self.play() {
                    PlayExit::ToMenu => {}
                    PlayExit::GameOver => return SessionEnd::GameOver,
                    PlayExit::Win => return SessionEnd::Win,
                    PlayExit::Disconnected => {
                        info!("input feed closed; ending session");
                        return SessionEnd::Exit;
                    }
                },
                "2" => {
                    self.port.emit(&format!(
                        "\n\nTo navigate the world, use simple commands.{HELP_COMMANDS}\n (all lower case)"
                    ));
                    if !self.ack() {
                        return SessionEnd::Exit;
                    }
                }
                "3" => {
                    info!("exit selected from menu");
                    return SessionEnd::Exit;
                }
                "4" => {
                    let credits = self.text_or("credits", "Credits not found.");
                    self.port.emit(&format!("\n\n{credits}"));
                    if !self.ack() {
                        return SessionEnd::Exit;
                    }
                }
                "5" => {
                    self.reset_slot();
                    self.port.emit("\n\nRESET\n\nPlease restart the program.");
                    self.ack();
                    return SessionEnd::ResetRequested;
                }
                other => {
                    debug!("unrecognized menu input: {}", escape_log(other));
                    self.port.emit(&format!("\n\n{MSG_INVALID}"));
                }
            }
        }
    }

    /// Play: route to the tutorial or the main game based on the persisted
    /// location. A fresh (or corrupt, already degraded at load) slot runs
    /// the prologue first.
    fn play(&mut self) -> PlayExit {
        match self.player.location {
            None => {
                self.reset_slot();
                let prologue = self.text_or("prologue", "Prologue not found.");
                self.port.emit(&format!("\n\n{prologue}"));
                if !self.ack() {
                    return PlayExit::Disconnected;
                }
                self.player.location = Some(self.config.tutorial_entry_location());
                self.persist();
                self.run_tutorial()
            }
            Some(Location::Tutorial { .. }) => self.run_tutorial(),
            Some(Location::Main { .. }) => self.run_main(),
        }
    }

    fn run_tutorial(&mut self) -> PlayExit {
        if let Some(location) = self.player.location {
            info!("entering tutorial at {location}");
        }
        loop {
            let Some(location) = self.player.location else {
                return PlayExit::ToMenu;
            };
            let room = self.world.resolve_room(&location);
            self.port.emit(&format!("\n\n{}", room.description));
            self.port
                .emit(&format!("\n\nPossible exits: {}", room.exits_line()));
            self.port.emit(HELP_COMMANDS);
            self.port.emit(PROMPT);

            let Some(line) = self.port.request_line() else {
                return PlayExit::Disconnected;
            };
            let input = normalize(&line);
            let mut to_menu = false;
            match input.as_str() {
                // Never valid exits in the tutorial region.
                "up" | "down" => self.port.emit(&format!("\n\n{MSG_NO_WAY}")),
                "inventory" => self.emit_inventory(),
                "search" => self.do_search(&room),
                "use" => self.port.emit(&format!("\n\n{MSG_CANT_USE_HERE}")),
                "menu" => {
                    self.port.emit("\n\nReturning to main menu...");
                    to_menu = true;
                }
                other => match other.parse::<Direction>() {
                    Ok(direction) => self.do_move(direction, &room, location),
                    Err(()) => {
                        debug!("unrecognized command: {}", escape_log(other));
                        self.port.emit(&format!("\n\n{MSG_INVALID}"));
                    }
                },
            }
            self.persist();
            if to_menu {
                return PlayExit::ToMenu;
            }
            if !self.ack() {
                return PlayExit::Disconnected;
            }

            // Evaluated after every turn, whatever the command was.
            if self.player.has_all(&self.config.tutorial_required_items) {
                info!("tutorial requirements met; moving to the main game");
                let completed = self.text_or("tutorial_complete", "Tutorial completed.");
                self.port.emit(&format!("\n\n{completed}"));
                if !self.ack() {
                    return PlayExit::Disconnected;
                }
                self.player.location = Some(self.config.main_entry_location());
                self.persist();
                return self.run_main();
            }
        }
    }

    fn run_main(&mut self) -> PlayExit {
        if let Some(location) = self.player.location {
            info!("entering main game at {location}");
        }
        let dice = HazardDice::new(self.config.hazard_denominator);
        loop {
            let Some(location) = self.player.location else {
                return PlayExit::ToMenu;
            };
            let room = self.world.resolve_room(&location);

            let mut banner = String::from("\n\nHEALTH: ");
            banner.extend(std::iter::repeat('#').take(self.player.health as usize));
            self.port.emit(&banner);
            self.port.emit(&format!("\n\n{}", room.description));

            if dice.fires(&mut self.rng) {
                debug!("hazard fired at {location}");
                if let Some(hazard) = &room.hazard_text {
                    self.port.emit(&format!("\n\n{hazard}"));
                }
                self.port.emit("\n\nYour health has decreased.");
                self.player.apply_hazard();
                self.persist();
            }
            if self.player.health == 0 {
                self.ack();
                self.finish_game_over();
                return PlayExit::GameOver;
            }

            self.port
                .emit(&format!("\n\nPossible exits: {}", room.exits_line()));
            self.port.emit(HELP_COMMANDS);
            self.port.emit(PROMPT);

            let Some(line) = self.port.request_line() else {
                return PlayExit::Disconnected;
            };
            let input = normalize(&line);
            let mut to_menu = false;
            match input.as_str() {
                "inventory" => self.emit_inventory(),
                "search" => self.do_search(&room),
                "use" => {
                    if self.do_use(&room, location) {
                        self.finish_win();
                        return PlayExit::Win;
                    }
                }
                "menu" => {
                    self.port.emit("\n\nReturning to main menu...");
                    to_menu = true;
                }
                other => match other.parse::<Direction>() {
                    Ok(direction) => self.do_move(direction, &room, location),
                    Err(()) => {
                        debug!("unrecognized command: {}", escape_log(other));
                        self.port.emit(&format!("\n\n{MSG_INVALID}"));
                    }
                },
            }
            self.persist();
            if to_menu {
                return PlayExit::ToMenu;
            }
            if !self.ack() {
                return PlayExit::Disconnected;
            }
        }
    }

    /// Movement: one axis by one unit, only through a declared exit. The new
    /// coordinate keeps the current region tag and is persisted whether or
    /// not a room is authored there; the next resolve degrades gracefully.
    fn do_move(&mut self, direction: Direction, room: &Room, location: Location) {
        if room.exits.contains(&direction) {
            let next = location.step(direction);
            debug!("moved {direction} to {next}");
            self.player.location = Some(next);
        } else {
            self.port.emit(&format!("\n\n{MSG_NO_WAY}"));
        }
    }

    /// Search: everything in the room not already in the inventory history
    /// is collected. Idempotent per room between resets.
    fn do_search(&mut self, room: &Room) {
        let found = self.player.discover(&room.items);
        if found.is_empty() {
            self.port.emit(&format!("\n\n{MSG_FOUND_NOTHING}"));
        } else {
            info!("search found: {}", found.join(", "));
            self.port
                .emit(&format!("\n\nYou found:\n{}", found.join("\n")));
        }
    }

    /// Use: the win check at the configured win room, a recipe everywhere
    /// else. Returns true when the win condition is satisfied.
    fn do_use(&mut self, room: &Room, location: Location) -> bool {
        if location == self.config.win_location() {
            let required = &self.config.win_required_items;
            if !required.is_empty() && self.player.has_all(required) {
                return true;
            }
            self.port.emit(&format!("\n\n{MSG_MISSING_WIN_ITEMS}"));
            return false;
        }

        match &room.recipe {
            None => self.port.emit(&format!("\n\n{MSG_NO_RECIPE}")),
            Some(recipe) => {
                // All-or-nothing: nothing is consumed unless every required
                // item is present.
                if !self.player.has_all(&recipe.requires) {
                    self.port.emit(&format!("\n\n{MSG_MISSING_RECIPE_ITEMS}"));
                } else {
                    for item in &recipe.requires {
                        self.player.consume(item);
                    }
                    self.player.acquire(&recipe.produces);
                    self.persist();
                    info!(
                        "used {} to produce {}",
                        recipe.requires.join(", "),
                        recipe.produces
                    );
                    self.port.emit(&format!(
                        "\n\nUsed {}.\n\n{}\n\nYou found:\n{}",
                        recipe.requires.join(", "),
                        recipe.description,
                        recipe.produces
                    ));
                }
            }
        }
        false
    }

    fn finish_game_over(&mut self) {
        info!("health exhausted; game over");
        let text = self.text_or("game_over", "Game over text not found.");
        self.port.emit(&format!("\n\n{text}\n\n\nGAME OVER"));
        self.reset_slot();
        self.port.emit("\n\nPress ENTER to exit... ");
        let _ = self.port.request_line();
    }

    fn finish_win(&mut self) {
        info!("win condition satisfied");
        let text = self.text_or("win", "Win text not found.");
        self.port.emit(&format!("\n\n{text}\n\n\nYOU WIN"));
        self.reset_slot();
        self.port.emit("\n\nPress ENTER to exit... ");
        let _ = self.port.request_line();
    }

    /// Clear the slot back to initial values and persist the cleared state.
    fn reset_slot(&mut self) {
        self.player.reset(self.config.default_health);
        self.persist();
        info!("save slot reset");
    }

    /// Best-effort persistence: the in-memory state stays authoritative for
    /// the rest of the session even when the store is unwritable.
    fn persist(&mut self) {
        if let Err(e) = self.player.persist(&self.store) {
            warn!("save write failed: {e}; continuing with in-memory state");
        }
    }

    fn emit_inventory(&mut self) {
        if self.player.inventory.is_empty() {
            self.port.emit("\n\nYour inventory is empty.");
        } else {
            self.port.emit(&format!(
                "\n\nYour inventory:\n{}",
                self.player.inventory.join("\n")
            ));
        }
    }

    /// Returns false when the input feed closed instead of acknowledging.
    fn ack(&mut self) -> bool {
        self.port.emit(ACK);
        self.port.request_line().is_some()
    }

    fn menu_text(&self) -> String {
        let mut title = self.world.text("title");
        if title.trim().is_empty() {
            title = DEFAULT_TITLE.to_string();
        }
        format!(
            "\n{title}\n\n MAIN MENU\n\n  PLAY    - [1]\n  HELP    - [2]\n  EXIT    - [3]\n  CREDITS - [4]\n  RESET   - [5]\n\n >> "
        )
    }

    fn text_or(&self, key: &str, placeholder: &str) -> String {
        let text = self.world.text(key);
        if text.trim().is_empty() {
            placeholder.to_string()
        } else {
            text
        }
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}
