pub mod ludo;

pub use ludo::{
    play_game, space_name, GameError, GameState, InputError, Player, PlayerStatus, Position, Roll,
    StepCount, StepCountError, TokenId, Tokens, Turn,
};
