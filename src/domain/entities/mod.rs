//! Domain entities - What the game client reports about the world

mod game_state;

pub use game_state::{GameStateSnapshot, Npc};

#[cfg(test)]
pub use game_state::{Coordinate, Dialog, Player};
