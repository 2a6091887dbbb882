use crate::ludo::board::{Position, StepCount};
use crate::ludo::input::{InputError, Roll, Turn};
use crate::ludo::player::{Player, PlayerStatus, TokenId};
use hashbrown::HashMap;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("no positions supplied for the game")]
    NoPlayers,
    #[error("position {0} appears more than once in the player list")]
    DuplicatePosition(Position),
    #[error("turn addresses position {0}, which is not in the game")]
    UnknownTurnPosition(Position),
    #[error(transparent)]
    Input(#[from] InputError),
}

/// A single game of Ludo. Owns every player for its lifetime and
/// resolves turns strictly in input order, since each turn's selection
/// and capture outcomes depend on the board state left by earlier turns.
pub struct GameState {
    // Roster order drives the final report; the map serves position lookups.
    players: Vec<Player>,
    by_position: HashMap<Position, usize>,
}

impl GameState {
    /// Seat one player per requested position and mark everyone Playing.
    /// The roster must be non-empty and free of duplicates.
    pub fn new(positions: &[Position]) -> Result<Self, GameError> {
        if positions.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let mut players = Vec::with_capacity(positions.len());
        let mut by_position = HashMap::with_capacity(positions.len());
        for &position in positions {
            if by_position.insert(position, players.len()).is_some() {
                return Err(GameError::DuplicatePosition(position));
            }
            players.push(Player::new(position));
        }
        for player in &mut players {
            player.set_playing();
        }
        Ok(GameState {
            players,
            by_position,
        })
    }

    pub fn player(&self, position: Position) -> Option<&Player> {
        self.by_position
            .get(&position)
            .map(|&index| &self.players[index])
    }

    /// Decide which of the mover's tokens takes the roll, tie-breaking
    /// toward First throughout. Returns None only when both tokens are
    /// shut in Home and the roll is not a six.
    fn select_token(&self, mover: usize, roll: Roll) -> Option<TokenId> {
        let player = &self.players[mover];
        let first = player.step_count(TokenId::First);
        let second = player.step_count(TokenId::Second);

        // A six frees a token from Home before anything else.
        if roll.is_six() {
            if first.is_home() {
                return Some(TokenId::First);
            }
            if second.is_home() {
                return Some(TokenId::Second);
            }
        }

        if first.is_home() && second.is_home() {
            return None;
        }

        // A token that can land exactly on the finish space does.
        let exact = StepCount::FINISH.get() - roll.get() as i8;
        if first.get() == exact {
            return Some(TokenId::First);
        }
        if second.get() == exact {
            return Some(TokenId::Second);
        }

        // A token that can land on an opposing token moves. The check is
        // slot-matched (First against First, Second against Second) and
        // compares raw step counts rather than board cells, exactly as
        // the original game resolves it.
        for (index, opponent) in self.players.iter().enumerate() {
            if index == mover {
                continue;
            }
            let reach = roll.get() as i8;
            if first.get() + reach == opponent.step_count(TokenId::First).get() {
                return Some(TokenId::First);
            }
            if second.get() + reach == opponent.step_count(TokenId::Second).get() {
                return Some(TokenId::Second);
            }
        }

        if !first.is_home() && second.is_home() {
            return Some(TokenId::First);
        }

        // The token further from the finish moves; First wins ties. A
        // lone Home token sorts below every entered token, so it is the
        // one to move here and exits to Ready even without a six.
        if first <= second {
            Some(TokenId::First)
        } else {
            Some(TokenId::Second)
        }
    }

    /// Apply the movement transition for the selected token, then resolve
    /// same-player stacking and opponent captures on the landing space.
    /// Home, Ready, and the finish space never take part in either.
    fn apply_move(&mut self, mover: usize, token: TokenId, roll: Roll) {
        self.players[mover].apply_roll(token, roll);

        let landed = self.players[mover].step_count(token);
        if landed.is_safe() {
            return;
        }

        self.players[mover].stack_if_together(token);

        let label = self.players[mover].space(token);
        for index in 0..self.players.len() {
            if index == mover {
                continue;
            }
            if self.players[index].capture_at(&label) {
                debug!(
                    captured = %self.players[index].position(),
                    space = %label,
                    "token captured and sent home"
                );
            }
        }
    }

    /// Resolve one turn: select a token, move it (skipped when nothing
    /// can move), then refresh every player's Finished status before the
    /// next turn is examined.
    pub fn take_turn(&mut self, turn: &Turn) -> Result<(), GameError> {
        let mover = *self
            .by_position
            .get(&turn.position)
            .ok_or(GameError::UnknownTurnPosition(turn.position))?;

        let selected = self.select_token(mover, turn.roll);
        trace!(
            position = %turn.position,
            roll = turn.roll.get(),
            token = ?selected,
            "token selected"
        );
        if let Some(token) = selected {
            self.apply_move(mover, token, turn.roll);
        }

        for player in &mut self.players {
            let before = player.status();
            player.refresh_status();
            if before != PlayerStatus::Finished && player.status() == PlayerStatus::Finished {
                debug!(position = %player.position(), "player finished");
            }
        }
        Ok(())
    }

    /// The final report: two labels per player, First token then Second,
    /// in the order the positions were supplied.
    pub fn spaces(&self) -> Vec<String> {
        self.players
            .iter()
            .flat_map(|player| [player.space(TokenId::First), player.space(TokenId::Second)])
            .collect()
    }
}

/// Run a full game from raw input: position letters and (letter, roll)
/// pairs. Validation failures and turns addressing absent positions are
/// surfaced as errors, never silently ignored.
pub fn play_game(positions: &[char], turns: &[(char, u8)]) -> Result<Vec<String>, GameError> {
    let positions = positions
        .iter()
        .map(|&letter| Position::from_char(letter))
        .collect::<Result<Vec<_>, InputError>>()?;
    let turns = turns
        .iter()
        .map(|&(letter, roll)| Turn::new(Position::from_char(letter)?, roll))
        .collect::<Result<Vec<_>, InputError>>()?;

    let mut game = GameState::new(&positions)?;
    for turn in &turns {
        game.take_turn(turn)?;
    }
    Ok(game.spaces())
}
