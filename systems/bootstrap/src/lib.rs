#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a Rogue Grid session.

use rogue_grid_core::WELCOME_BANNER;
use rogue_grid_world::{Action, Entity, World};

/// Produces the data and actions required to start a session.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        WELCOME_BANNER
    }

    /// Summarises the freshly loaded world for presentation purposes.
    #[must_use]
    pub fn describe(&self, world: &World) -> String {
        let size = world.size();
        format!(
            "{}x{} map, {} entities, spawn at {}",
            size.x,
            size.y,
            world.entities().len(),
            world.spawn_position()
        )
    }

    /// Builds the actions that add `count` players at the world's spawn point.
    #[must_use]
    pub fn spawn_players(&self, world: &World, count: usize) -> Vec<Action> {
        let spawn = world.spawn_position();
        (0..count)
            .map(|_| Action::add_entity(Entity::player(spawn)))
            .collect()
    }
}
