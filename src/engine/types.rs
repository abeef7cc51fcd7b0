//! Core world-model types: directions, coordinates, resolved rooms, and the
//! raw content records the world file is authored in.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Version prefix for the persisted location record. Bump when the encoding
/// changes shape; unrecognized versions parse as corrupt and fall back to a
/// fresh start.
pub const LOCATION_ENCODING_VERSION: &str = "v1";

/// A compass or vertical movement direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Direction::North),
            "south" => Ok(Direction::South),
            "east" => Ok(Direction::East),
            "west" => Ok(Direction::West),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(()),
        }
    }
}

/// A player position. The region tag is part of the coordinate: the tutorial
/// area has no floor axis, the main area is a multi-floor grid.
///
/// Coordinates are never validated against a grid; they are only meaningful
/// when the content repository has a room for them, and resolution of a
/// coordinate with no room degrades gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Tutorial { row: i32, col: i32 },
    Main { floor: i32, row: i32, col: i32 },
}

impl Location {
    /// Apply one step in `direction`: exactly one axis changes by one unit.
    /// North decreases the row, south increases it; east increases the
    /// column, west decreases it; up/down move between floors. The tutorial
    /// region has no floor axis, so up/down leave it unchanged there (the
    /// session layer never routes them through a valid exit anyway).
    pub fn step(self, direction: Direction) -> Self {
        match self {
            Location::Tutorial { row, col } => {
                let (row, col) = match direction {
                    Direction::North => (row - 1, col),
                    Direction::South => (row + 1, col),
                    Direction::East => (row, col + 1),
                    Direction::West => (row, col - 1),
                    Direction::Up | Direction::Down => (row, col),
                };
                Location::Tutorial { row, col }
            }
            Location::Main { floor, row, col } => {
                let (floor, row, col) = match direction {
                    Direction::North => (floor, row - 1, col),
                    Direction::South => (floor, row + 1, col),
                    Direction::East => (floor, row, col + 1),
                    Direction::West => (floor, row, col - 1),
                    Direction::Up => (floor + 1, row, col),
                    Direction::Down => (floor - 1, row, col),
                };
                Location::Main { floor, row, col }
            }
        }
    }

    pub fn is_tutorial(&self) -> bool {
        matches!(self, Location::Tutorial { .. })
    }

    /// Compact versioned text encoding for the save record.
    pub fn encode(&self) -> String {
        match self {
            Location::Tutorial { row, col } => {
                format!("{LOCATION_ENCODING_VERSION}:tutorial:{row},{col}")
            }
            Location::Main { floor, row, col } => {
                format!("{LOCATION_ENCODING_VERSION}:main:{floor},{row},{col}")
            }
        }
    }

    /// Parse a persisted location record. Returns `None` for anything that
    /// does not match a recognized shape; callers treat that as a corrupt
    /// record and fall back to a fresh start rather than failing.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().splitn(3, ':');
        if parts.next()? != LOCATION_ENCODING_VERSION {
            return None;
        }
        let tag = parts.next()?;
        let coords: Vec<i32> = parts
            .next()?
            .split(',')
            .map(|c| c.trim().parse::<i32>())
            .collect::<Result<_, _>>()
            .ok()?;
        match (tag, coords.as_slice()) {
            ("tutorial", [row, col]) => Some(Location::Tutorial {
                row: *row,
                col: *col,
            }),
            ("main", [floor, row, col]) => Some(Location::Main {
                floor: *floor,
                row: *row,
                col: *col,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Tutorial { row, col } => write!(f, "tutorial y{row} x{col}"),
            Location::Main { floor, row, col } => write!(f, "main floor {floor} y{row} x{col}"),
        }
    }
}

/// A room-local combine rule: consume `requires`, produce `produces`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub requires: Vec<String>,
    pub description: String,
    pub produces: String,
}

/// A resolved room, ready for the session loop. Built by the world model
/// from a [`RoomRecord`]; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Room {
    pub description: String,
    pub exits: BTreeSet<Direction>,
    pub items: Vec<String>,
    pub hazard_text: Option<String>,
    pub recipe: Option<Recipe>,
}

impl Room {
    /// Render the exit set the way the prompt shows it ("north, east").
    pub fn exits_line(&self) -> String {
        let names: Vec<String> = self.exits.iter().map(Direction::to_string).collect();
        names.join(", ")
    }
}

/// Raw room data as authored in the world file. Exits are a comma-delimited
/// string; every field is optional so sparse rooms stay easy to author and
/// missing sub-records degrade to empty values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoomRecord {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exits: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hazard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<RecipeRecord>,
}

/// Raw recipe data as authored in the world file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecipeRecord {
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub produces: String,
}
