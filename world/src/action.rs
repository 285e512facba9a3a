//! Mutating intents submitted to the world in batches.

use rogue_grid_core::{EntityId, Vector2, WorldError};

use crate::{Entity, World};

/// Closed set of mutations a collaborator may request.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Queues a step for the identified entity.
    Move {
        /// Entity that should attempt the step.
        entity: EntityId,
        /// Offset relative to the entity's current position.
        step: Vector2,
    },
    /// Registers a new entity with the world.
    AddEntity(Entity),
}

impl Action {
    /// Creates an action that queues `step` for `entity`.
    #[must_use]
    pub const fn move_entity(entity: EntityId, step: Vector2) -> Self {
        Self::Move { entity, step }
    }

    /// Creates an action that registers `entity`.
    #[must_use]
    pub fn add_entity(entity: Entity) -> Self {
        Self::AddEntity(entity)
    }

    /// Applies the action to the world.
    ///
    /// Fails with [`WorldError::UnknownEntity`] when a move targets an id the
    /// world does not know, and with [`WorldError::DuplicateEntity`] or
    /// [`WorldError::OutOfBounds`] when an entity cannot be registered.
    pub fn apply(self, world: &mut World) -> Result<(), WorldError> {
        match self {
            Self::Move { entity, step } => {
                world
                    .entity_mut(entity)
                    .ok_or(WorldError::UnknownEntity(entity))?
                    .queue_move(step);
                Ok(())
            }
            Self::AddEntity(entity) => world.add_entity(entity),
        }
    }
}
