//! Map provider contract.
//!
//! A map is a 2-D grid of [`Cell`]s plus the geometry that threads each
//! player's path through it. Path positions are integers; the provider
//! maps them to `(x, y)` grid coordinates. Grid cells not on any path hold
//! an `Empty` effect and a path index of `-1`.

use std::sync::Arc;

use crate::core::PlayerId;

use super::cells::CellEffect;
use super::{PluginInfo, Rgb};

/// One grid cell: a path index and the effect that fires on landing.
///
/// Immutable after construction.
#[derive(Clone)]
pub struct Cell {
    position: i32,
    effect: Arc<dyn CellEffect>,
}

impl Cell {
    #[must_use]
    pub fn new(position: i32, effect: Arc<dyn CellEffect>) -> Self {
        Self { position, effect }
    }

    /// Path index, or `-1` for off-path decoration.
    #[must_use]
    pub fn position(&self) -> i32 {
        self.position
    }

    #[must_use]
    pub fn effect(&self) -> &Arc<dyn CellEffect> {
        &self.effect
    }

    /// Display label of the effect, e.g. `"Teleport"`.
    #[must_use]
    pub fn label(&self) -> &str {
        self.effect.label()
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("position", &self.position)
            .field("effect", &self.effect.label())
            .finish()
    }
}

/// Rows of cells, indexed `grid[y][x]`.
pub type Grid = Vec<Vec<Cell>>;

/// Display colour assigned to a player seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerColor {
    pub rgb: Rgb,
    pub name: &'static str,
}

/// The four seat colours shared by the built-in maps.
pub const SEAT_COLORS: [PlayerColor; 4] = [
    PlayerColor { rgb: Rgb::new(255, 0, 0), name: "red" },
    PlayerColor { rgb: Rgb::new(0, 0, 255), name: "blue" },
    PlayerColor { rgb: Rgb::new(128, 0, 128), name: "purple" },
    PlayerColor { rgb: Rgb::new(0, 255, 0), name: "green" },
];

/// A map plugin.
///
/// Implementations must be pure given their construction parameters:
/// building twice from the same seed yields the same grid.
pub trait MapProvider: Send + Sync {
    fn info(&self) -> &PluginInfo;

    fn grid(&self) -> &[Vec<Cell>];

    /// Total number of path cells on the board.
    fn path_length(&self) -> usize;

    /// Grid coordinate `(x, y)` of a path position, or `None` if the
    /// position is not on any path (including the holding area).
    fn position_to_xy(&self, position: i32) -> Option<(usize, usize)>;

    fn start_position(&self, player: PlayerId) -> i32;

    fn end_position(&self, player: PlayerId) -> i32;

    fn min_players(&self) -> usize;

    fn max_players(&self) -> usize;

    fn max_chessmen_per_player(&self) -> usize;

    /// Rough difficulty from 1 (gentle) upward.
    fn difficulty(&self) -> u8 {
        2
    }

    fn recommended_players(&self) -> usize {
        self.max_players()
    }

    fn player_color(&self, player: PlayerId) -> PlayerColor {
        SEAT_COLORS[player.index() % SEAT_COLORS.len()]
    }

    /// The cell at a path position.
    fn cell_at(&self, position: i32) -> Option<&Cell> {
        let (x, y) = self.position_to_xy(position)?;
        self.grid().get(y)?.get(x)
    }
}

/// Serpentine coordinate mapping over a grid `width` cells wide.
///
/// Even rows run left to right, odd rows right to left.
#[must_use]
pub fn serpentine_xy(position: usize, width: usize) -> (usize, usize) {
    let row = position / width;
    let col = position % width;
    if row % 2 == 0 {
        (col, row)
    } else {
        (width - 1 - col, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serpentine_rows_alternate() {
        assert_eq!(serpentine_xy(0, 13), (0, 0));
        assert_eq!(serpentine_xy(12, 13), (12, 0));
        assert_eq!(serpentine_xy(13, 13), (12, 1));
        assert_eq!(serpentine_xy(25, 13), (0, 1));
        assert_eq!(serpentine_xy(26, 13), (0, 2));
    }

    #[test]
    fn test_seat_colors_are_distinct() {
        for (i, a) in SEAT_COLORS.iter().enumerate() {
            for b in &SEAT_COLORS[i + 1..] {
                assert_ne!(a.rgb, b.rgb);
                assert_ne!(a.name, b.name);
            }
        }
    }
}
