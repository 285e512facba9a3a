//! Collects one round of moves from every player at the terminal.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::info;
use rogue_grid_core::EntityId;
use rogue_grid_world::Action;

use crate::input::PlayerInput;

/// Moves gathered for a single tick.
#[derive(Debug, Default)]
pub(crate) struct Turn {
    /// Move actions in player order.
    pub(crate) actions: Vec<Action>,
    /// Set once any player asked to end the session or input ran out.
    pub(crate) finished: bool,
}

/// Prompts each player in turn and decodes their reply.
///
/// A quit key does not cut the round short: the remaining players are still
/// prompted so the final tick carries their moves. Running out of input stops
/// prompting immediately.
pub(crate) fn read_turn<R, W>(players: &[EntityId], input: &mut R, output: &mut W) -> Result<Turn>
where
    R: BufRead,
    W: Write,
{
    let mut turn = Turn {
        actions: Vec::with_capacity(players.len()),
        finished: false,
    };
    let mut line = String::new();
    for (number, &player) in (1..).zip(players) {
        write!(output, "Move for player {number}: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line).context("failed to read input")? == 0 {
            turn.finished = true;
            break;
        }
        match PlayerInput::from_line(line.trim_end_matches('\n')) {
            PlayerInput::Step(step) => turn.actions.push(Action::move_entity(player, step)),
            PlayerInput::Quit => {
                info!("player {number} ended the session");
                turn.finished = true;
            }
        }
    }
    Ok(turn)
}
