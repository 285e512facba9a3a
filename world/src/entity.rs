//! Entities that inhabit the grid and the behavior attached to each kind.

use rand::Rng;
use rogue_grid_core::{
    Direction, EntityId, TileType, Vector2, DEFAULT_PRIORITY, PLAYER_PRIORITY,
};

/// Behavior attached to an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityKind {
    /// Driven exclusively by external move actions.
    Player,
    /// Takes a random cardinal step on some ticks.
    WanderingEnemy {
        /// Chance of attempting a step on any given tick, within `[0, 1]`.
        wander_probability: f64,
    },
}

/// Unit occupying a grid cell.
///
/// `position` is authoritative. `target_position` holds the cell the entity
/// intends to enter and equals `position` while the entity is at rest; the
/// world's move resolution is the only thing that turns one into the other.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    id: EntityId,
    position: Vector2,
    target_position: Vector2,
    kind: EntityKind,
}

impl Entity {
    /// Creates a player standing at the provided position.
    #[must_use]
    pub fn player(position: Vector2) -> Self {
        Self::new(position, EntityKind::Player)
    }

    /// Creates a wandering enemy standing at the provided position.
    ///
    /// The probability is clamped into `[0, 1]`; `NaN` disables wandering.
    #[must_use]
    pub fn wandering_enemy(position: Vector2, wander_probability: f64) -> Self {
        let wander_probability = if wander_probability.is_nan() {
            0.0
        } else {
            wander_probability.clamp(0.0, 1.0)
        };
        Self::new(position, EntityKind::WanderingEnemy { wander_probability })
    }

    fn new(position: Vector2, kind: EntityKind) -> Self {
        Self {
            id: EntityId::generate(),
            position,
            target_position: position,
            kind,
        }
    }

    /// Identifier assigned at construction.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Cell currently occupied by the entity.
    #[must_use]
    pub const fn position(&self) -> Vector2 {
        self.position
    }

    /// Cell the entity intends to enter during the next resolution.
    #[must_use]
    pub const fn target_position(&self) -> Vector2 {
        self.target_position
    }

    /// Behavior attached to the entity.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Reports whether the entity is a player.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player)
    }

    /// Tile drawn on top of the terrain where the entity stands.
    #[must_use]
    pub const fn tile(&self) -> TileType {
        match self.kind {
            EntityKind::Player => TileType::PlayerMarker,
            EntityKind::WanderingEnemy { .. } => TileType::EnemyMarker,
        }
    }

    /// Tie-break priority used when several entities claim the same cell.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        match self.kind {
            EntityKind::Player => PLAYER_PRIORITY,
            EntityKind::WanderingEnemy { .. } => DEFAULT_PRIORITY,
        }
    }

    /// Records the intent to move by `step` from the current position.
    ///
    /// Nothing moves until the world resolves pending moves. Steps that would
    /// overflow saturate to a target outside the grid, which never resolves.
    pub fn queue_move(&mut self, step: Vector2) {
        self.target_position = self.position + step;
    }

    /// Runs the per-tick behavior, drawing randomness from `rng`.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self.kind {
            EntityKind::Player => {}
            EntityKind::WanderingEnemy { wander_probability } => {
                if rng.gen_bool(wander_probability) {
                    let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
                    self.queue_move(direction.step());
                }
            }
        }
    }

    pub(crate) fn is_moving(&self) -> bool {
        self.position != self.target_position
    }

    pub(crate) fn relocate(&mut self, destination: Vector2) {
        self.position = destination;
    }
}
