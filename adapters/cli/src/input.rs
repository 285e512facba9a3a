//! Keyboard commands read from the terminal.

use rogue_grid_core::{Direction, Vector2};

/// Intent decoded from a single line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayerInput {
    /// Queue the provided step; a zero step waits in place.
    Step(Vector2),
    /// End the session.
    Quit,
}

impl PlayerInput {
    /// Decodes `w`/`a`/`s`/`d` as moves and a single space as waiting.
    ///
    /// Anything else ends the session.
    pub(crate) fn from_line(line: &str) -> Self {
        match line.trim_end_matches('\r') {
            "w" => Self::Step(Direction::North.step()),
            "a" => Self::Step(Direction::West.step()),
            "s" => Self::Step(Direction::South.step()),
            "d" => Self::Step(Direction::East.step()),
            " " => Self::Step(Vector2::ZERO),
            _ => Self::Quit,
        }
    }
}
