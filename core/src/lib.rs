#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rogue Grid engine.
//!
//! This crate defines the value types that connect adapters, the
//! authoritative world, and pure systems: grid coordinates, terrain kinds,
//! entity identifiers, configuration, and the error surface reported by world
//! accessors and the map parser.

use std::{
    fmt,
    ops::{Add, Mul, Sub},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Rogue Grid.";

/// Tie-break priority assigned to entities without special standing.
pub const DEFAULT_PRIORITY: i32 = 0;

/// Sentinel priority granted to players so they outrank every other claimant.
pub const PLAYER_PRIORITY: i32 = 9_999;

/// Chance that a wandering enemy attempts a step on any given tick.
pub const DEFAULT_WANDER_PROBABILITY: f64 = 0.5;

/// Integral two-dimensional point or offset on the tile grid.
///
/// Rows grow downward: `y == 0` is the top row of a map. Arithmetic
/// saturates at the `i32` limits, which always lie outside any grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal component, increasing toward the right.
    pub x: i32,
    /// Vertical component, increasing downward.
    pub y: i32,
}

impl Vector2 {
    /// The origin, also used as the "stay in place" step.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }
}

impl Mul<i32> for Vector2 {
    type Output = Self;

    fn mul(self, factor: i32) -> Self {
        Self::new(self.x.saturating_mul(factor), self.y.saturating_mul(factor))
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement directions available to entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction, clockwise from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit offset travelled by a single step in this direction.
    #[must_use]
    pub const fn step(self) -> Vector2 {
        match self {
            Self::North => Vector2::new(0, -1),
            Self::East => Vector2::new(1, 0),
            Self::South => Vector2::new(0, 1),
            Self::West => Vector2::new(-1, 0),
        }
    }
}

/// Closed set of tile kinds that make up a map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Open floor.
    #[default]
    Empty,
    /// Impassable wall.
    Wall,
    /// Player glyph; marks the spawn point in a map source.
    PlayerMarker,
    /// Enemy glyph; spawns a wandering enemy in a map source.
    EnemyMarker,
    /// Boss glyph; currently stored as terrain only.
    BossMarker,
}

impl TileType {
    /// Every tile kind in glyph-table order.
    pub const ALL: [Self; 5] = [
        Self::Empty,
        Self::Wall,
        Self::PlayerMarker,
        Self::EnemyMarker,
        Self::BossMarker,
    ];

    /// Single-character glyph used by maps and snapshots.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => '#',
            Self::PlayerMarker => '@',
            Self::EnemyMarker => 'e',
            Self::BossMarker => 'B',
        }
    }

    /// Looks up the tile kind drawn with the provided glyph.
    #[must_use]
    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::ALL.into_iter().find(|tile| tile.glyph() == glyph)
    }

    /// Reports whether an entity may enter a cell showing this tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Unique identifier assigned to an entity when it is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generates a fresh identifier that no other entity in the process shares.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID, for adapters that receive ids from clients.
    #[must_use]
    pub const fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Retrieves the underlying UUID.
    #[must_use]
    pub const fn get(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Tunable parameters applied when a world is created.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the world-owned random generator.
    pub seed: u64,
    /// Probability that enemies spawned from a map attempt a step each tick.
    pub wander_probability: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            wander_probability: DEFAULT_WANDER_PROBABILITY,
        }
    }
}

/// Failures reported by world accessors and action application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// A bounds-checked accessor received a position outside the grid.
    #[error("position {position} is outside the {size} grid")]
    OutOfBounds {
        /// Position that was requested.
        position: Vector2,
        /// Exclusive upper bound of the grid.
        size: Vector2,
    },
    /// An action referenced an entity that is not registered.
    #[error("no entity with id {0}")]
    UnknownEntity(EntityId),
    /// An entity with the same id is already registered.
    #[error("entity {0} is already registered")]
    DuplicateEntity(EntityId),
}

/// Reasons an ASCII map fails to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    /// The source contained no rows.
    #[error("map contains no rows")]
    Empty,
    /// A row's length differs from the first row's length.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character outside the glyph table was found.
    #[error("unknown glyph {glyph:?} at {position}")]
    UnknownGlyph {
        /// Character that could not be mapped.
        glyph: char,
        /// Cell holding the character.
        position: Vector2,
    },
    /// More than one spawn marker was found.
    #[error("spawn marker at {second} duplicates the one at {first}")]
    DuplicateSpawn {
        /// First spawn marker encountered.
        first: Vector2,
        /// Repeated spawn marker.
        second: Vector2,
    },
}
