//! Seeded random single-path board.
//!
//! All players share one serpentine path from position 0 (Start) to
//! `path_length - 1` (Destination), laid out 13 cells wide. Special cells
//! are sprinkled over a safe zone that leaves two cells clear after the
//! start and two before the end:
//!
//! | Kind | Share of path |
//! |---|---|
//! | Lucky | 10% |
//! | SpeedUp | 8% |
//! | SlowDown | 6% |
//! | Mine | 4%, at most one per 10 cells |
//! | Teleport | 3% |
//!
//! Each kind is spread over the safe zone at an even interval with a
//! random offset. Mines go last, at random spots, and never within two
//! cells of another mine. Counts are exact: a kind always receives
//! `floor(path_length * share)` cells.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{GameError, GameRng, MapSettings, PlayerId};

use super::cells::CellKind;
use super::map::{serpentine_xy, Cell, Grid, MapProvider};
use super::PluginInfo;

const LUCKY_RATIO: f64 = 0.10;
const SPEED_UP_RATIO: f64 = 0.08;
const SLOW_DOWN_RATIO: f64 = 0.06;
const MINE_RATIO: f64 = 0.04;
const TELEPORT_RATIO: f64 = 0.03;

/// Cells kept free of specials after the start and before the end.
const SAFE_MARGIN: usize = 2;

/// Minimum distance between two mines.
const MINE_SPACING: usize = 2;

/// Number of each special cell a path receives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialCounts {
    pub lucky: usize,
    pub speed_up: usize,
    pub slow_down: usize,
    pub mine: usize,
    pub teleport: usize,
}

impl SpecialCounts {
    /// Counts for a path of `path_length` cells.
    #[must_use]
    pub fn for_path(path_length: usize) -> Self {
        let share = |ratio: f64| (path_length as f64 * ratio) as usize;
        Self {
            lucky: share(LUCKY_RATIO),
            speed_up: share(SPEED_UP_RATIO),
            slow_down: share(SLOW_DOWN_RATIO),
            mine: share(MINE_RATIO).min(path_length / 10),
            teleport: share(TELEPORT_RATIO),
        }
    }

    /// How many cells of `kind` the path receives. Zero for non-special kinds.
    #[must_use]
    pub fn of(&self, kind: CellKind) -> usize {
        match kind {
            CellKind::Lucky => self.lucky,
            CellKind::SpeedUp => self.speed_up,
            CellKind::SlowDown => self.slow_down,
            CellKind::Mine => self.mine,
            CellKind::Teleport => self.teleport,
            _ => 0,
        }
    }
}

/// Randomly generated single-path map.
pub struct RandomMap {
    info: PluginInfo,
    settings: MapSettings,
    height: usize,
    kinds: Vec<CellKind>,
    grid: Grid,
}

impl RandomMap {
    /// Registered name.
    pub const NAME: &'static str = "random";

    /// Grid width in cells.
    pub const WIDTH: usize = 13;

    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = 4;
    pub const MIN_PATH_LENGTH: usize = 20;
    pub const MAX_PATH_LENGTH: usize = 100;
    pub const MAX_CHESSMEN: usize = 4;

    /// Generate a board from `settings`.
    ///
    /// Fails if the player count is outside 2..=4 or the path length is
    /// outside 20..=100.
    pub fn new(settings: &MapSettings) -> Result<Self, GameError> {
        if !(Self::MIN_PLAYERS..=Self::MAX_PLAYERS).contains(&settings.player_count) {
            return Err(GameError::PlayerCountOutOfRange {
                count: settings.player_count,
                min: Self::MIN_PLAYERS,
                max: Self::MAX_PLAYERS,
            });
        }
        if !(Self::MIN_PATH_LENGTH..=Self::MAX_PATH_LENGTH).contains(&settings.path_length) {
            return Err(GameError::PathLengthOutOfRange {
                length: settings.path_length,
                min: Self::MIN_PATH_LENGTH,
                max: Self::MAX_PATH_LENGTH,
            });
        }

        let path_length = settings.path_length;
        let height = path_length.div_ceil(Self::WIDTH);
        debug!(
            width = Self::WIDTH,
            height,
            path_length,
            players = settings.player_count,
            "generating random map"
        );

        let mut rng = GameRng::new(settings.seed);
        let kinds = generate_pattern(path_length, &mut rng);
        let grid = build_grid(&kinds, height);
        debug!(seed = settings.seed, "random map generated");

        Ok(Self {
            info: PluginInfo::new(
                Self::NAME,
                "1.0.0",
                "Seeded random single-path board",
                "dice-race",
            ),
            settings: settings.clone(),
            height,
            kinds,
            grid,
        })
    }

    /// Cell kind at every path position, start to destination.
    #[must_use]
    pub fn cell_kinds(&self) -> &[CellKind] {
        &self.kinds
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.settings.seed
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }
}

impl std::fmt::Debug for RandomMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomMap")
            .field("settings", &self.settings)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl MapProvider for RandomMap {
    fn info(&self) -> &PluginInfo {
        &self.info
    }

    fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    fn path_length(&self) -> usize {
        self.settings.path_length
    }

    fn position_to_xy(&self, position: i32) -> Option<(usize, usize)> {
        let position = usize::try_from(position).ok()?;
        (position < self.settings.path_length).then(|| serpentine_xy(position, Self::WIDTH))
    }

    fn start_position(&self, _player: PlayerId) -> i32 {
        0
    }

    fn end_position(&self, _player: PlayerId) -> i32 {
        self.settings.path_length as i32 - 1
    }

    fn min_players(&self) -> usize {
        Self::MIN_PLAYERS
    }

    fn max_players(&self) -> usize {
        Self::MAX_PLAYERS
    }

    fn max_chessmen_per_player(&self) -> usize {
        Self::MAX_CHESSMEN
    }

    fn difficulty(&self) -> u8 {
        let danger_percent = ((MINE_RATIO + SLOW_DOWN_RATIO) * 100.0).round() as u32;
        if danger_percent > 15 {
            4
        } else if danger_percent > 10 {
            3
        } else {
            2
        }
    }

    fn recommended_players(&self) -> usize {
        self.settings.player_count
    }
}

fn generate_pattern(path_length: usize, rng: &mut GameRng) -> Vec<CellKind> {
    let counts = SpecialCounts::for_path(path_length);
    debug!(?counts, "special cell counts");

    let mut pattern = vec![CellKind::Normal; path_length];
    let safe_start = SAFE_MARGIN;
    let safe_end = path_length - SAFE_MARGIN - 1;

    for kind in [
        CellKind::Lucky,
        CellKind::SpeedUp,
        CellKind::SlowDown,
        CellKind::Teleport,
    ] {
        distribute(&mut pattern, kind, counts.of(kind), safe_start..safe_end, rng);
    }
    distribute_mines(&mut pattern, counts.mine, safe_start..safe_end, rng);

    pattern[0] = CellKind::Start;
    pattern[path_length - 1] = CellKind::Destination;
    pattern
}

/// Spread `count` cells of `kind` evenly over `zone`, each nudged by a
/// random offset. Occupied targets slide forward, wrapping to the zone
/// start, until a Normal cell is found.
fn distribute(
    pattern: &mut [CellKind],
    kind: CellKind,
    count: usize,
    zone: std::ops::Range<usize>,
    rng: &mut GameRng,
) {
    let span = zone.len();
    if count == 0 || span == 0 {
        return;
    }

    let interval = span as f64 / count as f64;
    for i in 0..count {
        let base = zone.start + (i as f64 * interval) as usize;
        let offset = rng.gen_range_usize(0..interval as usize + 1);
        let first = (base + offset).min(zone.end - 1) - zone.start;

        let free = (0..span)
            .map(|step| zone.start + (first + step) % span)
            .find(|&pos| pattern[pos] == CellKind::Normal);
        match free {
            Some(pos) => pattern[pos] = kind,
            None => {
                warn!(?kind, placed = i, count, "safe zone full");
                return;
            }
        }
    }
}

fn distribute_mines(
    pattern: &mut [CellKind],
    count: usize,
    zone: std::ops::Range<usize>,
    rng: &mut GameRng,
) {
    if count == 0 || zone.is_empty() {
        return;
    }

    let mut placed = 0;
    let max_attempts = count * 10;
    for _ in 0..max_attempts {
        if placed == count {
            break;
        }
        let pos = rng.gen_range_usize(zone.clone());
        if can_hold_mine(pattern, pos) {
            pattern[pos] = CellKind::Mine;
            placed += 1;
        }
    }

    // Random probing gave up; take the first legal cells in order.
    for pos in zone {
        if placed == count {
            break;
        }
        if can_hold_mine(pattern, pos) {
            pattern[pos] = CellKind::Mine;
            placed += 1;
        }
    }

    if placed < count {
        warn!(placed, count, "could not place every mine");
    }
}

fn can_hold_mine(pattern: &[CellKind], pos: usize) -> bool {
    if pattern[pos] != CellKind::Normal {
        return false;
    }
    let lo = pos.saturating_sub(MINE_SPACING);
    let hi = (pos + MINE_SPACING).min(pattern.len() - 1);
    !(lo..=hi).any(|i| i != pos && pattern[i] == CellKind::Mine)
}

fn build_grid(kinds: &[CellKind], height: usize) -> Grid {
    let empty = CellKind::Empty.effect();
    let mut grid: Grid = (0..height)
        .map(|_| {
            (0..RandomMap::WIDTH)
                .map(|_| Cell::new(-1, empty.clone()))
                .collect()
        })
        .collect();

    let effects: Vec<_> = [
        CellKind::Start,
        CellKind::Destination,
        CellKind::Normal,
        CellKind::Lucky,
        CellKind::Mine,
        CellKind::SpeedUp,
        CellKind::SlowDown,
        CellKind::Teleport,
    ]
    .into_iter()
    .map(|kind| (kind, kind.effect()))
    .collect();

    for (pos, kind) in kinds.iter().enumerate() {
        let (x, y) = serpentine_xy(pos, RandomMap::WIDTH);
        let effect = effects
            .iter()
            .find(|(k, _)| k == kind)
            .map_or_else(|| kind.effect(), |(_, e)| Arc::clone(e));
        grid[y][x] = Cell::new(pos as i32, effect);
    }
    grid
}
