//! ASCII map parser that builds the initial world.

use log::{debug, warn};
use rogue_grid_core::{MapError, TileType, Vector2, WorldConfig};

use crate::{Action, Entity, World};

/// Parses an ASCII map into a world using the default configuration.
pub fn parse(source: &str) -> Result<World, MapError> {
    parse_with_config(source, WorldConfig::default())
}

/// Parses an ASCII map into a world seeded from `config`.
///
/// Rows are separated by newlines and must all have the same width. Lines
/// holding only whitespace before the first row and after the last row are
/// dropped; spaces inside the kept rows encode empty floor and are kept. The
/// spawn marker records the spawn point and enemy markers spawn wandering
/// enemies; neither is written into the terrain. The whole source is validated before the world is built.
pub fn parse_with_config(source: &str, config: WorldConfig) -> Result<World, MapError> {
    let lines: Vec<&str> = source.lines().collect();
    let is_blank = |line: &&str| line.trim().is_empty();
    let start = lines.iter().position(|line| !is_blank(line)).unwrap_or(lines.len());
    let end = lines.iter().rposition(|line| !is_blank(line)).map_or(start, |last| last + 1);
    let rows = &lines[start..end];
    let Some(first) = rows.first() else {
        return Err(MapError::Empty);
    };
    let width = first.chars().count();
    if width == 0 {
        return Err(MapError::Empty);
    }

    let mut cells = Vec::with_capacity(width * rows.len());
    let mut spawn: Option<Vector2> = None;
    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(MapError::RaggedRow {
                row,
                expected: width,
                found,
            });
        }

        for (column, glyph) in line.chars().enumerate() {
            let position = Vector2::new(to_coordinate(column), to_coordinate(row));
            let tile =
                TileType::from_glyph(glyph).ok_or(MapError::UnknownGlyph { glyph, position })?;
            if tile == TileType::PlayerMarker {
                if let Some(first) = spawn {
                    return Err(MapError::DuplicateSpawn {
                        first,
                        second: position,
                    });
                }
                spawn = Some(position);
            }
            cells.push((position, tile));
        }
    }

    let size = Vector2::new(to_coordinate(width), to_coordinate(rows.len()));
    let mut world = World::new(size, config);
    if let Some(spawn) = spawn {
        world.spawn = spawn;
    }

    for (position, tile) in cells {
        match tile {
            TileType::PlayerMarker => {}
            TileType::EnemyMarker => {
                let enemy = Entity::wandering_enemy(position, config.wander_probability);
                if let Err(error) = Action::add_entity(enemy).apply(&mut world) {
                    warn!("skipped enemy at {position}: {error}");
                }
            }
            terrain => world.set_safe(position, terrain),
        }
    }

    debug!(
        "parsed {}x{} map with {} entities, spawn at {}",
        size.x,
        size.y,
        world.entities().len(),
        world.spawn_position()
    );
    Ok(world)
}

fn to_coordinate(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
