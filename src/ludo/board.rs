use crate::ludo::input::{InputError, Roll};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of cells on the shared perimeter track.
pub const PERIMETER_LEN: i32 = 56;

/// The four fixed seats on the board. Each position enters the shared
/// perimeter at its own offset and owns a private six-cell home stretch
/// labeled with its letter.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    A,
    B,
    C,
    D,
}

impl Position {
    /// The perimeter cell a token at this position steps onto first.
    pub fn start_offset(&self) -> i32 {
        match self {
            Position::A => 1,
            Position::B => 15,
            Position::C => 29,
            Position::D => 43,
        }
    }

    pub fn from_char(letter: char) -> Result<Self, InputError> {
        match letter {
            'A' => Ok(Position::A),
            'B' => Ok(Position::B),
            'C' => Ok(Position::C),
            'D' => Ok(Position::D),
            _ => Err(InputError::InvalidPosition(letter)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Position::A => 'A',
            Position::B => 'B',
            Position::C => 'C',
            Position::D => 'D',
        };
        write!(f, "{}", letter)
    }
}

#[derive(Error, Debug)]
pub enum StepCountError {
    #[error("step count {0} is outside the legal domain of -1 and 0..=57")]
    OutOfRange(i8),
}

/// A token's progress along its own 58-space sequence: -1 sits in Home,
/// 0 is the Ready space, 1..=50 are shared perimeter cells, 51..=56 the
/// private home stretch, and 57 is the finish space.
#[derive(
    Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(try_from = "i8", into = "i8")]
pub struct StepCount(i8);

impl StepCount {
    pub const HOME: StepCount = StepCount(-1);
    pub const READY: StepCount = StepCount(0);
    pub const FINISH: StepCount = StepCount(57);

    // Ensure the raw count stays inside the domain above; anything else
    // is a defect in the caller, not a playable state.
    pub fn new(count: i8) -> Result<Self, StepCountError> {
        if !(-1..=57).contains(&count) {
            return Err(StepCountError::OutOfRange(count));
        }
        Ok(StepCount(count))
    }

    pub fn get(&self) -> i8 {
        self.0
    }

    pub fn is_home(&self) -> bool {
        *self == Self::HOME
    }

    pub fn is_finished(&self) -> bool {
        *self == Self::FINISH
    }

    /// True on Home, Ready, and the finish space: a token standing there
    /// never stacks with its sibling, never captures, and is never captured.
    pub fn is_safe(&self) -> bool {
        matches!(self.0, -1 | 0 | 57)
    }

    /// Advance an entered token by a roll. A move past the finish space
    /// bounces back by the excess, so the result never leaves 51..=57.
    pub fn advance(&self, roll: Roll) -> StepCount {
        let target = self.0 + roll.get() as i8;
        if target > Self::FINISH.0 {
            StepCount(Self::FINISH.0 - (target - Self::FINISH.0))
        } else {
            StepCount(target)
        }
    }
}

impl TryFrom<i8> for StepCount {
    type Error = StepCountError;
    fn try_from(count: i8) -> Result<Self, Self::Error> {
        StepCount::new(count)
    }
}

impl From<StepCount> for i8 {
    fn from(count: StepCount) -> i8 {
        count.0
    }
}

/// Map a position and step count to the printed space label. One formula
/// covers all four positions: "H" for Home, "R" for Ready, the shared
/// perimeter cell number for 1..=50 starting at the position's offset and
/// wrapping past 56, "<Pos>1".."<Pos>6" for the home stretch, and "E" for
/// the finish space. Total over the StepCount domain.
pub fn space_name(position: Position, step: StepCount) -> String {
    match step.get() {
        -1 => "H".to_string(),
        0 => "R".to_string(),
        n @ 1..=50 => {
            let cell = (position.start_offset() + i32::from(n) - 2) % PERIMETER_LEN + 1;
            cell.to_string()
        }
        n @ 51..=56 => format!("{}{}", position, n - 50),
        _ => "E".to_string(),
    }
}
