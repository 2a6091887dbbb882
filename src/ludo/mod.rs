mod board;
mod game_state;
mod input;
mod player;

pub use board::{space_name, Position, StepCount, StepCountError, PERIMETER_LEN};
pub use game_state::{play_game, GameError, GameState};
pub use input::{InputError, Roll, Turn};
pub use player::{Player, PlayerStatus, TokenId, Tokens};
