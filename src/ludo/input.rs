use crate::ludo::board::Position;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("roll {0} is outside the range 1..=6")]
    InvalidRoll(u8),
    #[error("'{0}' does not name a board position")]
    InvalidPosition(char),
}

/// A die roll supplied by the caller. Rolls are opaque external input;
/// the engine never generates them.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub struct Roll(u8);

impl Roll {
    pub fn new(value: u8) -> Result<Self, InputError> {
        if !(1..=6).contains(&value) {
            return Err(InputError::InvalidRoll(value));
        }
        Ok(Roll(value))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    pub fn is_six(&self) -> bool {
        self.0 == 6
    }
}

impl TryFrom<u8> for Roll {
    type Error = InputError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Roll::new(value)
    }
}

impl From<Roll> for u8 {
    fn from(roll: Roll) -> u8 {
        roll.0
    }
}

/// One entry of the turn list: which player rolls, and what they rolled.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub position: Position,
    pub roll: Roll,
}

impl Turn {
    pub fn new(position: Position, roll: u8) -> Result<Self, InputError> {
        Ok(Turn {
            position,
            roll: Roll::new(roll)?,
        })
    }
}
