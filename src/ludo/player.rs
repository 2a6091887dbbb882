use crate::ludo::board::{space_name, Position, StepCount};
use crate::ludo::input::Roll;
use serde::{Deserialize, Serialize};

/// The two tokens every player owns. Whenever the selection rules find
/// both tokens equally eligible, First wins.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenId {
    First,
    Second,
}

impl TokenId {
    pub fn sibling(&self) -> TokenId {
        match self {
            TokenId::First => TokenId::Second,
            TokenId::Second => TokenId::First,
        }
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerStatus {
    NotPlaying,
    Playing,
    Finished,
}

/// A player's movable material. A stacked pair shares one step count and
/// moves as a unit, so a "stacked" pair with divergent counts cannot be
/// represented at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tokens {
    Split {
        first: StepCount,
        second: StepCount,
    },
    Stacked(StepCount),
}

impl Tokens {
    pub fn step_count(&self, id: TokenId) -> StepCount {
        match self {
            Tokens::Split { first, second } => match id {
                TokenId::First => *first,
                TokenId::Second => *second,
            },
            Tokens::Stacked(shared) => *shared,
        }
    }

    pub fn is_stacked(&self) -> bool {
        matches!(self, Tokens::Stacked(_))
    }
}

pub struct Player {
    position: Position,
    tokens: Tokens,
    status: PlayerStatus,
}

impl Player {
    pub fn new(position: Position) -> Self {
        Player {
            position,
            tokens: Tokens::Split {
                first: StepCount::HOME,
                second: StepCount::HOME,
            },
            status: PlayerStatus::NotPlaying,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn set_playing(&mut self) {
        self.status = PlayerStatus::Playing;
    }

    pub fn step_count(&self, id: TokenId) -> StepCount {
        self.tokens.step_count(id)
    }

    /// The label of the space this token currently occupies.
    pub fn space(&self, id: TokenId) -> String {
        space_name(self.position, self.step_count(id))
    }

    /// Move this player's material by a roll. A stacked pair advances as
    /// a unit with the overshoot bounce; a split token exits Home to the
    /// Ready space regardless of the roll, or advances normally.
    pub fn apply_roll(&mut self, id: TokenId, roll: Roll) {
        match self.tokens {
            Tokens::Stacked(shared) => {
                self.tokens = Tokens::Stacked(shared.advance(roll));
            }
            Tokens::Split { first, second } => {
                let moved = self.tokens.step_count(id);
                let landed = if moved.is_home() {
                    StepCount::READY
                } else {
                    moved.advance(roll)
                };
                self.tokens = match id {
                    TokenId::First => Tokens::Split {
                        first: landed,
                        second,
                    },
                    TokenId::Second => Tokens::Split {
                        first,
                        second: landed,
                    },
                };
            }
        }
    }

    /// Merge into a stacked pair when the moved token has landed on its
    /// sibling's space. Home, Ready, and the finish space never stack.
    /// Same-player labels coincide exactly when the step counts do.
    pub fn stack_if_together(&mut self, moved: TokenId) {
        if let Tokens::Split { first, second } = self.tokens {
            if self.tokens.step_count(moved).is_safe() {
                return;
            }
            if first == second {
                self.tokens = Tokens::Stacked(first);
            }
        }
    }

    /// Resolve a capture on `label` (a perimeter or home-stretch cell):
    /// any token standing there is sent Home, and a stacked pair hit
    /// there comes apart entirely. Returns true if anything was captured.
    pub fn capture_at(&mut self, label: &str) -> bool {
        match self.tokens {
            Tokens::Stacked(shared) => {
                if !shared.is_safe() && space_name(self.position, shared) == label {
                    self.tokens = Tokens::Split {
                        first: StepCount::HOME,
                        second: StepCount::HOME,
                    };
                    return true;
                }
                false
            }
            Tokens::Split { first, second } => {
                let mut first = first;
                let mut second = second;
                let mut hit = false;
                if !first.is_safe() && space_name(self.position, first) == label {
                    first = StepCount::HOME;
                    hit = true;
                }
                if !second.is_safe() && space_name(self.position, second) == label {
                    second = StepCount::HOME;
                    hit = true;
                }
                if hit {
                    self.tokens = Tokens::Split { first, second };
                }
                hit
            }
        }
    }

    /// Finished is set the moment both tokens stand on the finish space,
    /// and never reverts afterwards.
    pub fn refresh_status(&mut self) {
        if self.step_count(TokenId::First).is_finished()
            && self.step_count(TokenId::Second).is_finished()
        {
            self.status = PlayerStatus::Finished;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(position: Position, first: i8, second: i8) -> Player {
        Player {
            position,
            tokens: Tokens::Split {
                first: StepCount::new(first).unwrap(),
                second: StepCount::new(second).unwrap(),
            },
            status: PlayerStatus::Playing,
        }
    }

    #[test]
    fn test_new_player_sits_in_home() {
        let player = Player::new(Position::C);
        assert_eq!(player.status(), PlayerStatus::NotPlaying);
        assert!(player.step_count(TokenId::First).is_home());
        assert!(player.step_count(TokenId::Second).is_home());
        assert_eq!(player.space(TokenId::First), "H");
    }

    #[test]
    fn test_exit_home_lands_on_ready_for_any_roll() {
        for roll in 1..=6 {
            let mut player = Player::new(Position::A);
            player.apply_roll(TokenId::First, Roll::new(roll).unwrap());
            assert_eq!(player.step_count(TokenId::First), StepCount::READY);
            assert_eq!(player.space(TokenId::First), "R");
        }
    }

    #[test]
    fn test_stacked_pair_moves_as_a_unit() {
        let mut player = Player {
            position: Position::B,
            tokens: Tokens::Stacked(StepCount::new(10).unwrap()),
            status: PlayerStatus::Playing,
        };
        player.apply_roll(TokenId::Second, Roll::new(4).unwrap());
        assert_eq!(player.step_count(TokenId::First).get(), 14);
        assert_eq!(player.step_count(TokenId::Second).get(), 14);
        assert!(player.tokens().is_stacked());
    }

    #[test]
    fn test_stacked_pair_overshoot_bounces() {
        let mut player = Player {
            position: Position::A,
            tokens: Tokens::Stacked(StepCount::new(55).unwrap()),
            status: PlayerStatus::Playing,
        };
        player.apply_roll(TokenId::First, Roll::new(6).unwrap());
        // 55 + 6 overshoots by 4, landing both tokens on 53.
        assert_eq!(player.step_count(TokenId::First).get(), 53);
        assert_eq!(player.step_count(TokenId::Second).get(), 53);
    }

    #[test]
    fn test_stack_when_landing_on_sibling() {
        let mut player = split(Position::A, 8, 8);
        player.stack_if_together(TokenId::First);
        assert_eq!(player.tokens(), &Tokens::Stacked(StepCount::new(8).unwrap()));
    }

    #[test]
    fn test_no_stack_on_ready() {
        // Both tokens freshly out of Home share the Ready space but stay split.
        let mut player = split(Position::A, 0, 0);
        player.stack_if_together(TokenId::Second);
        assert!(!player.tokens().is_stacked());
    }

    #[test]
    fn test_capture_sends_token_home() {
        let mut player = split(Position::B, 3, 20);
        // Position B, step 3 stands on perimeter cell 17.
        assert!(player.capture_at("17"));
        assert!(player.step_count(TokenId::First).is_home());
        assert_eq!(player.step_count(TokenId::Second).get(), 20);
    }

    #[test]
    fn test_capture_splits_stacked_pair() {
        let mut player = Player {
            position: Position::A,
            tokens: Tokens::Stacked(StepCount::new(12).unwrap()),
            status: PlayerStatus::Playing,
        };
        assert!(player.capture_at("12"));
        assert!(!player.tokens().is_stacked());
        assert!(player.step_count(TokenId::First).is_home());
        assert!(player.step_count(TokenId::Second).is_home());
    }

    #[test]
    fn test_capture_misses_other_labels() {
        let mut player = split(Position::D, 5, -1);
        // Position D, step 5 stands on cell 47; a capture on 48 misses,
        // and the Home token is never a capture target.
        assert!(!player.capture_at("48"));
        assert!(!player.capture_at("H"));
        assert_eq!(player.step_count(TokenId::First).get(), 5);
    }

    #[test]
    fn test_finished_requires_both_tokens() {
        let mut player = split(Position::A, 57, 30);
        player.refresh_status();
        assert_eq!(player.status(), PlayerStatus::Playing);

        let mut player = split(Position::A, 57, 57);
        player.refresh_status();
        assert_eq!(player.status(), PlayerStatus::Finished);
    }

    #[test]
    fn test_finished_never_reverts() {
        let mut player = split(Position::A, 57, 57);
        player.refresh_status();
        // A later roll bounces the pair off the finish space, but the
        // status stays Finished.
        player.apply_roll(TokenId::First, Roll::new(3).unwrap());
        player.refresh_status();
        assert_eq!(player.step_count(TokenId::First).get(), 54);
        assert_eq!(player.status(), PlayerStatus::Finished);
    }
}
