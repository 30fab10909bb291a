//! Random map generation properties and built-in map wiring.

use dice_race::core::{MapSettings, PlayerId};
use dice_race::plugins::{CellKind, MapProvider, PluginRegistry, RandomMap, SpecialCounts};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

const SPECIALS: [CellKind; 5] = [
    CellKind::Lucky,
    CellKind::SpeedUp,
    CellKind::SlowDown,
    CellKind::Mine,
    CellKind::Teleport,
];

fn generate(players: usize, path: usize, seed: u64) -> RandomMap {
    RandomMap::new(&MapSettings::new(players, path, seed)).unwrap()
}

proptest! {
    #[test]
    fn prop_same_seed_same_board(path in 20usize..=100, seed in any::<u64>()) {
        let a = generate(2, path, seed);
        let b = generate(4, path, seed);
        prop_assert_eq!(a.cell_kinds(), b.cell_kinds());
    }

    #[test]
    fn prop_special_counts_are_exact(path in 20usize..=100, seed in any::<u64>()) {
        let map = generate(2, path, seed);
        let counts = SpecialCounts::for_path(path);
        for kind in SPECIALS {
            let placed = map.cell_kinds().iter().filter(|&&k| k == kind).count();
            prop_assert_eq!(placed, counts.of(kind), "{:?}", kind);
        }
    }

    #[test]
    fn prop_mines_keep_their_distance(path in 20usize..=100, seed in any::<u64>()) {
        let map = generate(3, path, seed);
        let mines: Vec<usize> = map
            .cell_kinds()
            .iter()
            .enumerate()
            .filter(|(_, k)| **k == CellKind::Mine)
            .map(|(pos, _)| pos)
            .collect();
        prop_assert!(mines.len() <= path / 10);
        for pair in mines.windows(2) {
            prop_assert!(pair[1] - pair[0] > 2, "mines at {} and {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn prop_ends_and_margins_stay_plain(path in 20usize..=100, seed in any::<u64>()) {
        let map = generate(2, path, seed);
        let kinds = map.cell_kinds();

        prop_assert_eq!(kinds.len(), path);
        prop_assert_eq!(kinds[0], CellKind::Start);
        prop_assert_eq!(kinds[path - 1], CellKind::Destination);
        for pos in [1, path - 3, path - 2] {
            prop_assert_eq!(kinds[pos], CellKind::Normal, "position {}", pos);
        }
        prop_assert!(kinds[1..path - 1]
            .iter()
            .all(|k| !matches!(k, CellKind::Start | CellKind::Destination | CellKind::Empty)));
    }

    #[test]
    fn prop_every_position_has_its_own_cell(path in 20usize..=100, seed in any::<u64>()) {
        let map = generate(2, path, seed);
        let mut seen = FxHashSet::default();

        for pos in 0..path as i32 {
            let (x, y) = map.position_to_xy(pos).unwrap();
            prop_assert!(x < RandomMap::WIDTH && y < map.height());
            prop_assert!(seen.insert((x, y)));
            prop_assert_eq!(map.grid()[y][x].position(), pos);
        }
        prop_assert!(map.position_to_xy(path as i32).is_none());
        prop_assert!(map.position_to_xy(-1).is_none());
    }
}

#[test]
fn test_seeds_change_the_layout() {
    let layouts: FxHashSet<Vec<CellKind>> = (0..10)
        .map(|seed| generate(2, 60, seed).cell_kinds().to_vec())
        .collect();
    assert!(layouts.len() > 1);
}

#[test]
fn test_registry_builds_every_builtin_map() {
    let registry = PluginRegistry::with_builtins();

    let random = registry
        .build_map("Random", &MapSettings::new(3, 40, 7))
        .unwrap();
    assert_eq!(random.path_length(), 40);
    assert_eq!(random.end_position(PlayerId::new(2)), 39);
    assert_eq!(random.recommended_players(), 3);

    let twin = registry
        .build_map("twin-lane", &MapSettings::new(2, 52, 0))
        .unwrap();
    assert_eq!(twin.start_position(PlayerId::new(1)), 25);
    assert_eq!(twin.end_position(PlayerId::new(1)), 49);

    assert!(registry.build_map("hexagon", &MapSettings::new(2, 52, 0)).is_err());
}
