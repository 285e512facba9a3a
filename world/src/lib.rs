#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Rogue Grid.
//!
//! The world owns the terrain grid, the entity registry and the indexes
//! derived from it. Collaborators drive it one tick at a time through
//! [`World::update`] and read the outcome back through the accessors or a
//! [`World::snapshot`].

mod action;
mod entity;
mod map;

use std::{cmp::Reverse, collections::HashMap, fmt};

use log::{debug, trace, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rogue_grid_core::{EntityId, TileType, Vector2, WorldConfig, WorldError};

pub use action::Action;
pub use entity::{Entity, EntityKind};
pub use map::{parse, parse_with_config};

const DEFAULT_SPAWN: Vector2 = Vector2::new(1, 1);

/// Summary of a single tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Resolution rounds executed, including the final round that moved nothing.
    pub rounds: usize,
    /// Total number of relocations committed across all rounds.
    pub relocations: usize,
    /// Actions from the batch that could not be applied.
    pub rejected: Vec<WorldError>,
}

/// Represents the authoritative Rogue Grid world state.
#[derive(Clone, Debug)]
pub struct World {
    size: Vector2,
    config: WorldConfig,
    tiles: Vec<TileType>,
    entities: Vec<Entity>,
    position_index: HashMap<Vector2, Vec<EntityId>>,
    id_index: HashMap<EntityId, usize>,
    players: Vec<EntityId>,
    spawn: Vector2,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates an empty world covering `size` cells of open floor.
    ///
    /// Negative dimensions are treated as zero.
    #[must_use]
    pub fn new(size: Vector2, config: WorldConfig) -> Self {
        let size = Vector2::new(size.x.max(0), size.y.max(0));
        let capacity = usize::try_from(i64::from(size.x) * i64::from(size.y)).unwrap_or(0);
        Self {
            size,
            config,
            tiles: vec![TileType::Empty; capacity],
            entities: Vec::new(),
            position_index: HashMap::new(),
            id_index: HashMap::new(),
            players: Vec::new(),
            spawn: DEFAULT_SPAWN,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    /// Exclusive upper bound of the grid on each axis.
    #[must_use]
    pub const fn size(&self) -> Vector2 {
        self.size
    }

    /// Configuration the world was created with.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Position where newly joining players should be created.
    #[must_use]
    pub const fn spawn_position(&self) -> Vector2 {
        self.spawn
    }

    /// Reports whether `position` lies on the grid.
    #[must_use]
    pub const fn in_bounds(&self, position: Vector2) -> bool {
        position.x >= 0 && position.x < self.size.x && position.y >= 0 && position.y < self.size.y
    }

    /// Tile visible at `position`: the first occupant's tile, else the terrain.
    pub fn get(&self, position: Vector2) -> Result<TileType, WorldError> {
        let index = self.index(position).ok_or(WorldError::OutOfBounds {
            position,
            size: self.size,
        })?;
        Ok(self.visible_tile(index, position))
    }

    /// Terrain at `position`, or [`TileType::Empty`] outside the grid.
    #[must_use]
    pub fn get_safe(&self, position: Vector2) -> TileType {
        self.index(position)
            .map_or(TileType::Empty, |index| self.tiles[index])
    }

    /// Writes terrain at `position`.
    pub fn set(&mut self, position: Vector2, tile: TileType) -> Result<(), WorldError> {
        let index = self.index(position).ok_or(WorldError::OutOfBounds {
            position,
            size: self.size,
        })?;
        self.tiles[index] = tile;
        Ok(())
    }

    /// Writes terrain at `position`, ignoring positions outside the grid.
    pub fn set_safe(&mut self, position: Vector2, tile: TileType) {
        if let Some(index) = self.index(position) {
            self.tiles[index] = tile;
        }
    }

    /// Every registered entity in insertion order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Looks up an entity by identifier.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.id_index
            .get(&id)
            .and_then(|&index| self.entities.get(index))
    }

    /// Player entities in the order they joined.
    pub fn players(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.players.iter().filter_map(|&id| self.entity(id))
    }

    /// Entities standing on `position`, in arrival order.
    #[must_use]
    pub fn occupants(&self, position: Vector2) -> &[EntityId] {
        self.position_index
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Renders the visible grid, one newline-terminated line per row.
    #[must_use]
    pub fn snapshot(&self) -> String {
        let width = usize::try_from(self.size.x).unwrap_or(0);
        let height = usize::try_from(self.size.y).unwrap_or(0);
        let mut out = String::with_capacity((width + 1) * height);
        for y in 0..self.size.y {
            for x in 0..self.size.x {
                let position = Vector2::new(x, y);
                let tile = self
                    .index(position)
                    .map_or(TileType::Empty, |index| self.visible_tile(index, position));
                out.push(tile.glyph());
            }
            out.push('\n');
        }
        out
    }

    /// Advances the world by one tick.
    ///
    /// Actions are applied in order; one that fails is logged, recorded in the
    /// report and skipped without aborting the batch. Every entity then runs its
    /// behavior in registry order, including entities added by this batch, and
    /// pending moves are resolved until a round relocates nobody.
    pub fn update<I>(&mut self, actions: I) -> TickReport
    where
        I: IntoIterator<Item = Action>,
    {
        let mut rejected = Vec::new();
        for action in actions {
            if let Err(error) = action.apply(self) {
                warn!("rejected action: {error}");
                rejected.push(error);
            }
        }

        for entity in &mut self.entities {
            entity.update(&mut self.rng);
        }

        let (rounds, relocations) = self.resolve_moves();
        TickReport {
            rounds,
            relocations,
            rejected,
        }
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let index = *self.id_index.get(&id)?;
        self.entities.get_mut(index)
    }

    pub(crate) fn add_entity(&mut self, entity: Entity) -> Result<(), WorldError> {
        let id = entity.id();
        let position = entity.position();
        if self.id_index.contains_key(&id) {
            return Err(WorldError::DuplicateEntity(id));
        }
        if !self.in_bounds(position) {
            return Err(WorldError::OutOfBounds {
                position,
                size: self.size,
            });
        }

        debug!("added {:?} entity {id} at {position}", entity.kind());
        self.position_index.entry(position).or_default().push(id);
        let _ = self.id_index.insert(id, self.entities.len());
        if entity.is_player() {
            self.players.push(id);
        }
        self.entities.push(entity);
        Ok(())
    }

    /// Runs resolution rounds until one relocates nobody.
    ///
    /// Returns the number of rounds executed and the total relocations.
    fn resolve_moves(&mut self) -> (usize, usize) {
        let mut rounds = 0;
        let mut relocations = 0;
        loop {
            rounds += 1;
            let moved = self.resolve_round();
            trace!("resolution round {rounds} relocated {moved} entities");
            if moved == 0 {
                return (rounds, relocations);
            }
            relocations += moved;
        }
    }

    /// Executes a single resolution round and reports how many entities moved.
    ///
    /// Claims are grouped per target cell in registry order. A cell claimed by
    /// several entities goes to the strict highest priority; a tie at the top
    /// blocks every claimant of that cell for the round. Walkability is checked
    /// against the live grid, so cells vacated earlier in the round are free.
    fn resolve_round(&mut self) -> usize {
        let mut claims: Vec<(Vector2, Vec<usize>)> = Vec::new();
        let mut slots: HashMap<Vector2, usize> = HashMap::new();
        for (index, entity) in self.entities.iter().enumerate() {
            if !entity.is_moving() {
                continue;
            }
            let target = entity.target_position();
            let slot = *slots.entry(target).or_insert_with(|| {
                claims.push((target, Vec::new()));
                claims.len() - 1
            });
            claims[slot].1.push(index);
        }

        let mut moved = 0;
        for (target, mut claimants) in claims {
            claimants.sort_by_key(|&index| Reverse(self.entities[index].priority()));
            if let [first, second, ..] = claimants.as_slice() {
                if self.entities[*first].priority() == self.entities[*second].priority() {
                    continue;
                }
            }
            let Some(&winner) = claimants.first() else {
                continue;
            };
            if !self.is_walkable(target) {
                continue;
            }
            self.relocate(winner, target);
            moved += 1;
        }
        moved
    }

    fn is_walkable(&self, position: Vector2) -> bool {
        self.get(position).map_or(false, TileType::is_walkable)
    }

    fn relocate(&mut self, index: usize, destination: Vector2) {
        let entity = &mut self.entities[index];
        let id = entity.id();
        let origin = entity.position();
        if let Some(bucket) = self.position_index.get_mut(&origin) {
            bucket.retain(|occupant| *occupant != id);
            if bucket.is_empty() {
                let _ = self.position_index.remove(&origin);
            }
        }
        entity.relocate(destination);
        self.position_index.entry(destination).or_default().push(id);
    }

    fn visible_tile(&self, index: usize, position: Vector2) -> TileType {
        self.position_index
            .get(&position)
            .and_then(|bucket| bucket.first())
            .and_then(|&id| self.entity(id))
            .map_or(self.tiles[index], Entity::tile)
    }

    fn index(&self, position: Vector2) -> Option<usize> {
        if !self.in_bounds(position) {
            return None;
        }
        let row = usize::try_from(position.y).ok()?;
        let column = usize::try_from(position.x).ok()?;
        let width = usize::try_from(self.size.x).ok()?;
        Some(row * width + column)
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.snapshot())
    }
}
