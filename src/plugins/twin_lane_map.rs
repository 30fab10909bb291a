//! Fixed two-player board with a separate lane per player.
//!
//! A 13x7 grid. Seat 0 races positions 0..=24 through the upper half,
//! seat 1 races 25..=49 through the lower half. The lanes never share a
//! cell.

use crate::core::PlayerId;

use super::cells::CellKind;
use super::map::{Cell, Grid, MapProvider};
use super::PluginInfo;

const WIDTH: usize = 13;
const HEIGHT: usize = 7;

/// Start and end of each seat's lane.
const LANES: [(i32, i32); 2] = [(0, 24), (25, 49)];

/// The built-in two-lane map.
pub struct TwinLaneMap {
    info: PluginInfo,
    grid: Grid,
}

impl TwinLaneMap {
    /// Registered name.
    pub const NAME: &'static str = "twin-lane";

    #[must_use]
    pub fn new() -> Self {
        let empty = CellKind::Empty.effect();
        let mut grid: Grid = (0..HEIGHT)
            .map(|_| (0..WIDTH).map(|_| Cell::new(-1, empty.clone())).collect())
            .collect();

        for position in 0..=LANES[1].1 {
            if let Some((x, y)) = lane_xy(position) {
                grid[y][x] = Cell::new(position, kind_at(position).effect());
            }
        }

        Self {
            info: PluginInfo::new(
                Self::NAME,
                "1.0.0",
                "Two-player S-shaped board, one lane per player",
                "dice-race",
            ),
            grid,
        }
    }

    fn lane(player: PlayerId) -> (i32, i32) {
        LANES.get(player.index()).copied().unwrap_or(LANES[0])
    }
}

impl Default for TwinLaneMap {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_at(position: i32) -> CellKind {
    match position {
        0 | 25 => CellKind::Start,
        24 | 49 => CellKind::Destination,
        5 | 28 => CellKind::Mine,
        8 => CellKind::SpeedUp,
        17..=23 | 32..=48 => CellKind::Lucky,
        _ => CellKind::Normal,
    }
}

fn lane_xy(position: i32) -> Option<(usize, usize)> {
    let (x, y) = match position {
        0..=10 => (position, 0),
        11 => (10, 1),
        12..=22 => (22 - position, 2),
        23 => (0, 3),
        24 => (1, 4),
        25 => (11, 4),
        26..=36 => (37 - position, 5),
        37 => (1, 6),
        38..=48 => (position - 36, 6),
        49 => (12, 5),
        _ => return None,
    };
    Some((x as usize, y))
}

impl MapProvider for TwinLaneMap {
    fn info(&self) -> &PluginInfo {
        &self.info
    }

    fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    fn path_length(&self) -> usize {
        50
    }

    fn position_to_xy(&self, position: i32) -> Option<(usize, usize)> {
        lane_xy(position)
    }

    fn start_position(&self, player: PlayerId) -> i32 {
        Self::lane(player).0
    }

    fn end_position(&self, player: PlayerId) -> i32 {
        Self::lane(player).1
    }

    fn min_players(&self) -> usize {
        2
    }

    fn max_players(&self) -> usize {
        2
    }

    fn max_chessmen_per_player(&self) -> usize {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_lanes_do_not_overlap() {
        let mut seen = FxHashSet::default();
        for position in 0..50 {
            let xy = lane_xy(position).unwrap();
            assert!(xy.0 < WIDTH && xy.1 < HEIGHT, "{position} -> {xy:?}");
            assert!(seen.insert(xy), "{position} reuses {xy:?}");
        }
        assert_eq!(lane_xy(-1), None);
        assert_eq!(lane_xy(50), None);
    }

    #[test]
    fn test_lane_ends() {
        let map = TwinLaneMap::new();
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));

        assert_eq!((map.start_position(p0), map.end_position(p0)), (0, 24));
        assert_eq!((map.start_position(p1), map.end_position(p1)), (25, 49));
        assert_eq!(map.cell_at(0).unwrap().label(), "Start");
        assert_eq!(map.cell_at(25).unwrap().label(), "Start");
        assert_eq!(map.cell_at(24).unwrap().label(), "Destination");
        assert_eq!(map.cell_at(49).unwrap().label(), "Destination");
    }

    #[test]
    fn test_fixed_hazards() {
        let map = TwinLaneMap::new();
        assert_eq!(map.cell_at(5).unwrap().label(), "Mine");
        assert_eq!(map.cell_at(28).unwrap().label(), "Mine");
        assert_eq!(map.cell_at(8).unwrap().label(), "SpeedUp");
        assert_eq!(map.cell_at(20).unwrap().label(), "Lucky");
        assert_eq!(map.cell_at(12).unwrap().label(), "Normal");
    }

    #[test]
    fn test_off_path_cells_are_empty() {
        let map = TwinLaneMap::new();
        let empty = map
            .grid()
            .iter()
            .flatten()
            .filter(|c| c.position() == -1)
            .inspect(|c| assert_eq!(c.label(), "Empty"))
            .count();
        assert_eq!(empty, WIDTH * HEIGHT - 50);
    }
}
