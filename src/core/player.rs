//! Players and their chessmen.
//!
//! ## PlayerId
//!
//! Type-safe, stable player identifier. Indices are 0-based and double as
//! the player's seat in turn order.
//!
//! ## Chessman
//!
//! A token on the race path. Position `-1` is the holding area, positions
//! `0..end` are on the path, and the owner's end position means finished.
//! Chessmen never own their player; they carry the owner's `PlayerId`.
//!
//! Position writes from outside the crate go through
//! [`GameContext::set_position`](crate::engine::GameContext::set_position),
//! which publishes `ChessmanMoved`. The silent setter here is crate-private
//! and only used for intermediate animation steps.

use serde::{Deserialize, Serialize};

/// Position of a chessman that has not yet taken off.
pub const HOLDING_AREA: i32 = -1;

/// Player identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use dice_race::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Handle to one chessman: owner plus index within the owner's set.
///
/// Events carry handles rather than chessmen so payloads stay `Copy` and
/// never alias the live game data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessmanRef {
    pub player: PlayerId,
    pub index: usize,
}

impl ChessmanRef {
    #[must_use]
    pub const fn new(player: PlayerId, index: usize) -> Self {
        Self { player, index }
    }
}

impl std::fmt::Display for ChessmanRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}#{}", self.player.0, self.index)
    }
}

/// A single chessman.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chessman {
    index: usize,
    owner: PlayerId,
    position: i32,
}

impl Chessman {
    /// Create a chessman waiting in the holding area.
    #[must_use]
    pub fn new(owner: PlayerId, index: usize) -> Self {
        Self {
            index,
            owner,
            position: HOLDING_AREA,
        }
    }

    /// Index within the owner's chessmen.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Handle for use in events and board calls.
    #[must_use]
    pub fn handle(&self) -> ChessmanRef {
        ChessmanRef::new(self.owner, self.index)
    }

    /// Still waiting to take off.
    #[must_use]
    pub fn in_holding_area(&self) -> bool {
        self.position == HOLDING_AREA
    }

    /// Write the position without notifying anyone.
    pub(crate) fn set_position_silent(&mut self, position: i32) {
        self.position = position;
    }

    /// Return to the holding area.
    pub fn reset(&mut self) {
        self.position = HOLDING_AREA;
    }
}

/// A player and the chessmen they own.
///
/// Created once per game setup and reset, not recreated, between matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    chessmen: Vec<Chessman>,
    is_winner: bool,
    is_active: bool,
}

impl Player {
    /// Create a player with `chessman_count` chessmen in the holding area.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, chessman_count: usize) -> Self {
        Self {
            id,
            name: name.into(),
            chessmen: (0..chessman_count).map(|i| Chessman::new(id, i)).collect(),
            is_winner: false,
            is_active: true,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn chessmen(&self) -> &[Chessman] {
        &self.chessmen
    }

    #[must_use]
    pub fn chessman(&self, index: usize) -> Option<&Chessman> {
        self.chessmen.get(index)
    }

    pub(crate) fn chessman_mut(&mut self, index: usize) -> Option<&mut Chessman> {
        self.chessmen.get_mut(index)
    }

    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.is_winner
    }

    pub fn mark_winner(&mut self) {
        self.is_winner = true;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Count chessmen at or beyond `end_position`.
    #[must_use]
    pub fn finished_count(&self, end_position: i32) -> usize {
        self.chessmen
            .iter()
            .filter(|c| c.position >= end_position)
            .count()
    }

    /// Clear the winner flag, reactivate, and send every chessman home.
    pub fn reset(&mut self) {
        self.is_winner = false;
        self.is_active = true;
        for chessman in &mut self.chessmen {
            chessman.reset();
        }
    }
}
