use rogue_grid_core::{EntityId, TileType, Vector2, WorldConfig};
use rogue_grid_world::{Action, Entity, World};

fn open_world(columns: i32, rows: i32) -> World {
    World::new(Vector2::new(columns, rows), WorldConfig::default())
}

fn spawn(world: &mut World, entity: Entity) -> EntityId {
    let id = entity.id();
    let report = world.update([Action::add_entity(entity)]);
    assert!(report.rejected.is_empty(), "spawn rejected: {report:?}");
    id
}

fn idle_enemy(position: Vector2) -> Entity {
    Entity::wandering_enemy(position, 0.0)
}

fn position_of(world: &World, id: EntityId) -> Vector2 {
    world.entity(id).expect("entity registered").position()
}

#[test]
fn unobstructed_entity_reaches_target_in_one_tick() {
    let mut world = open_world(5, 5);
    let player = spawn(&mut world, Entity::player(Vector2::new(1, 1)));

    let report = world.update([Action::move_entity(player, Vector2::new(1, 0))]);

    assert_eq!(position_of(&world, player), Vector2::new(2, 1));
    assert_eq!(report.relocations, 1);
    assert_eq!(report.rounds, 2, "one moving round plus the quiet round");
    assert_eq!(world.get(Vector2::new(2, 1)), Ok(TileType::PlayerMarker));
    assert_eq!(world.get(Vector2::new(1, 1)), Ok(TileType::Empty));
}

#[test]
fn stationary_entities_do_not_contend() {
    let mut world = open_world(3, 3);
    let player = spawn(&mut world, Entity::player(Vector2::new(1, 1)));

    let report = world.update([Action::move_entity(player, Vector2::ZERO)]);

    assert_eq!(report.rounds, 1);
    assert_eq!(report.relocations, 0);
    assert_eq!(position_of(&world, player), Vector2::new(1, 1));
}

#[test]
fn equal_priorities_block_each_other() {
    let mut world = open_world(5, 5);
    let left = spawn(&mut world, idle_enemy(Vector2::new(1, 2)));
    let right = spawn(&mut world, idle_enemy(Vector2::new(3, 2)));

    let report = world.update([
        Action::move_entity(left, Vector2::new(1, 0)),
        Action::move_entity(right, Vector2::new(-1, 0)),
    ]);

    assert_eq!(report.relocations, 0);
    assert_eq!(position_of(&world, left), Vector2::new(1, 2));
    assert_eq!(position_of(&world, right), Vector2::new(3, 2));
    assert_eq!(world.get(Vector2::new(2, 2)), Ok(TileType::Empty));
}

#[test]
fn tied_players_block_each_other() {
    let mut world = open_world(3, 1);
    let left = spawn(&mut world, Entity::player(Vector2::new(0, 0)));
    let right = spawn(&mut world, Entity::player(Vector2::new(2, 0)));

    let _ = world.update([
        Action::move_entity(left, Vector2::new(1, 0)),
        Action::move_entity(right, Vector2::new(-1, 0)),
    ]);

    assert_eq!(position_of(&world, left), Vector2::new(0, 0));
    assert_eq!(position_of(&world, right), Vector2::new(2, 0));
}

#[test]
fn tie_at_the_top_blocks_lower_claimants_too() {
    let mut world = open_world(3, 3);
    let north = spawn(&mut world, Entity::player(Vector2::new(1, 0)));
    let south = spawn(&mut world, Entity::player(Vector2::new(1, 2)));
    let west = spawn(&mut world, idle_enemy(Vector2::new(0, 1)));

    let report = world.update([
        Action::move_entity(north, Vector2::new(0, 1)),
        Action::move_entity(south, Vector2::new(0, -1)),
        Action::move_entity(west, Vector2::new(1, 0)),
    ]);

    assert_eq!(report.relocations, 0);
    assert!(world.occupants(Vector2::new(1, 1)).is_empty());
}

#[test]
fn higher_priority_wins_and_loser_stays_pending() {
    let mut world = open_world(5, 5);
    let enemy = spawn(&mut world, idle_enemy(Vector2::new(1, 2)));
    let player = spawn(&mut world, Entity::player(Vector2::new(3, 2)));
    let contested = Vector2::new(2, 2);

    let report = world.update([
        Action::move_entity(enemy, Vector2::new(1, 0)),
        Action::move_entity(player, Vector2::new(-1, 0)),
    ]);

    assert_eq!(report.relocations, 1);
    assert_eq!(position_of(&world, player), contested);
    let enemy_state = world.entity(enemy).expect("enemy registered");
    assert_eq!(enemy_state.position(), Vector2::new(1, 2));
    assert_eq!(enemy_state.target_position(), contested);
}

#[test]
fn pending_claim_is_fulfilled_once_the_cell_frees_up() {
    let mut world = open_world(5, 5);
    let enemy = spawn(&mut world, idle_enemy(Vector2::new(1, 2)));
    let player = spawn(&mut world, Entity::player(Vector2::new(3, 2)));
    let _ = world.update([
        Action::move_entity(enemy, Vector2::new(1, 0)),
        Action::move_entity(player, Vector2::new(-1, 0)),
    ]);

    let _ = world.update(Vec::new());
    assert_eq!(position_of(&world, enemy), Vector2::new(1, 2));

    let _ = world.update([Action::move_entity(player, Vector2::new(0, 1))]);

    assert_eq!(position_of(&world, player), Vector2::new(2, 3));
    assert_eq!(position_of(&world, enemy), Vector2::new(2, 2));
}

#[test]
fn head_to_tail_chain_advances_within_one_tick() {
    let mut world = open_world(6, 3);
    let tail = spawn(&mut world, Entity::player(Vector2::new(1, 1)));
    let middle = spawn(&mut world, Entity::player(Vector2::new(2, 1)));
    let head = spawn(&mut world, Entity::player(Vector2::new(3, 1)));
    let east = Vector2::new(1, 0);

    let report = world.update([
        Action::move_entity(tail, east),
        Action::move_entity(middle, east),
        Action::move_entity(head, east),
    ]);

    assert_eq!(position_of(&world, tail), Vector2::new(2, 1));
    assert_eq!(position_of(&world, middle), Vector2::new(3, 1));
    assert_eq!(position_of(&world, head), Vector2::new(4, 1));
    assert_eq!(report.relocations, 3);
    assert_eq!(report.rounds, 4, "head, middle and tail resolve in successive rounds");
}

#[test]
fn rounds_are_bounded_by_claimant_count() {
    let mut world = open_world(12, 1);
    let mut ids = Vec::new();
    for x in 0..10 {
        ids.push(spawn(&mut world, Entity::player(Vector2::new(x, 0))));
    }
    let actions: Vec<_> = ids
        .iter()
        .map(|&id| Action::move_entity(id, Vector2::new(1, 0)))
        .collect();

    let report = world.update(actions);

    assert_eq!(report.relocations, ids.len());
    assert!(report.rounds <= ids.len() + 1);
    for (x, id) in (1..).zip(&ids) {
        assert_eq!(position_of(&world, *id), Vector2::new(x, 0));
    }
}

#[test]
fn walls_are_never_entered() {
    let mut world = open_world(3, 3);
    world.set(Vector2::new(2, 1), TileType::Wall).expect("in bounds");
    let player = spawn(&mut world, Entity::player(Vector2::new(1, 1)));

    for _ in 0..3 {
        let report = world.update([Action::move_entity(player, Vector2::new(1, 0))]);
        assert_eq!(report.relocations, 0);
    }

    assert_eq!(position_of(&world, player), Vector2::new(1, 1));
    assert_eq!(world.get(Vector2::new(2, 1)), Ok(TileType::Wall));
}

#[test]
fn entities_cannot_swap_places() {
    let mut world = open_world(2, 1);
    let left = spawn(&mut world, Entity::player(Vector2::new(0, 0)));
    let right = spawn(&mut world, idle_enemy(Vector2::new(1, 0)));

    let report = world.update([
        Action::move_entity(left, Vector2::new(1, 0)),
        Action::move_entity(right, Vector2::new(-1, 0)),
    ]);

    assert_eq!(report.relocations, 0);
    assert_eq!(position_of(&world, left), Vector2::new(0, 0));
    assert_eq!(position_of(&world, right), Vector2::new(1, 0));
}

#[test]
fn targets_outside_the_grid_are_blocked() {
    let mut world = open_world(1, 1);
    let player = spawn(&mut world, Entity::player(Vector2::ZERO));

    let report = world.update([Action::move_entity(player, Vector2::new(-1, 0))]);

    assert_eq!(report.relocations, 0);
    assert_eq!(position_of(&world, player), Vector2::ZERO);
}

#[test]
fn oversized_steps_never_resolve() {
    let mut world = open_world(3, 3);
    let player = spawn(&mut world, Entity::player(Vector2::new(1, 1)));

    for step in [
        Vector2::new(i32::MAX, 0),
        Vector2::new(0, i32::MIN),
        Vector2::new(i32::MIN, i32::MAX),
    ] {
        let report = world.update([Action::move_entity(player, step)]);
        assert_eq!(report.relocations, 0, "{step:?}");
        assert_eq!(position_of(&world, player), Vector2::new(1, 1));
    }

    let pending = world.entity(player).expect("player registered").target_position();
    assert!(!world.in_bounds(pending));
}

#[test]
fn players_sharing_the_spawn_can_split_up() {
    let mut world = open_world(5, 5);
    let spawn_cell = Vector2::new(2, 2);
    let first = spawn(&mut world, Entity::player(spawn_cell));
    let second = spawn(&mut world, Entity::player(spawn_cell));
    assert_eq!(world.occupants(spawn_cell), &[first, second]);

    let _ = world.update([
        Action::move_entity(first, Vector2::new(0, -1)),
        Action::move_entity(second, Vector2::new(0, 1)),
    ]);

    assert_eq!(position_of(&world, first), Vector2::new(2, 1));
    assert_eq!(position_of(&world, second), Vector2::new(2, 3));
    assert!(world.occupants(spawn_cell).is_empty());
}

#[test]
fn entities_added_this_tick_run_their_behavior() {
    let config = WorldConfig {
        seed: 5,
        wander_probability: 1.0,
    };
    let mut world = World::new(Vector2::new(3, 3), config);
    let center = Vector2::new(1, 1);
    let enemy = Entity::wandering_enemy(center, 1.0);
    let id = enemy.id();

    let report = world.update([Action::add_entity(enemy)]);

    assert_eq!(report.relocations, 1);
    let moved = position_of(&world, id) - center;
    assert_eq!(moved.x.abs() + moved.y.abs(), 1);
}

#[test]
fn players_are_listed_in_join_order() {
    let mut world = open_world(4, 4);
    let first = spawn(&mut world, Entity::player(Vector2::new(0, 0)));
    let _ = spawn(&mut world, idle_enemy(Vector2::new(1, 0)));
    let second = spawn(&mut world, Entity::player(Vector2::new(2, 0)));

    let players: Vec<_> = world.players().map(Entity::id).collect();

    assert_eq!(players, vec![first, second]);
    assert_eq!(world.entities().len(), 3);
}
