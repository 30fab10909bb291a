//! Mutable per-session game state.
//!
//! One `GameState` lives on the game context for a whole session and is
//! `reset()` between matches. It holds flags and counters only; players
//! live alongside it on the context.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Run/pause/over flags and turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Set by `start`, cleared by `stop`.
    pub running: bool,

    pub paused: bool,

    pub game_over: bool,

    /// Seat of the player whose turn it is. `None` before the first turn.
    pub current_player_index: Option<usize>,

    pub current_player: Option<PlayerId>,

    /// Turn number (starts at 1, bumps each time play wraps to seat 0).
    pub turn_number: u32,

    /// Last dice value rolled, 0 before the first roll.
    pub current_dice_value: u32,

    pub winner: Option<PlayerId>,

    /// The current player goes again. Consumed by the next turn start.
    pub extra_turn: bool,

    /// A cell effect asked for an extra turn during this turn.
    pub extra_turn_requested: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            running: false,
            paused: false,
            game_over: false,
            current_player_index: None,
            current_player: None,
            turn_number: 1,
            current_dice_value: 0,
            winner: None,
            extra_turn: false,
            extra_turn_requested: false,
        }
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last roll as a signed step count, saturating at `i32::MAX`.
    #[must_use]
    pub fn dice_steps(&self) -> i32 {
        i32::try_from(self.current_dice_value).unwrap_or(i32::MAX)
    }

    /// Restore every field to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move to the next seat unless an extra turn is pending.
    ///
    /// Wrapping from the last seat back to seat 0 increments the turn
    /// number. The extra-turn flag is consumed either way. Returns the
    /// seat that now has the turn.
    pub fn advance_player(&mut self, player_count: usize) -> usize {
        let extra = std::mem::take(&mut self.extra_turn);

        let next = match self.current_player_index {
            Some(current) if extra => current,
            Some(current) => {
                let next = (current + 1) % player_count;
                if next == 0 {
                    self.turn_number += 1;
                }
                next
            }
            None => 0,
        };

        self.current_player_index = Some(next);
        next
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }
}
