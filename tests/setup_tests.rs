//! Whole games built through `GameSetup` on the built-in plugins.

mod common;

use common::{count, init_tracing, record};
use dice_race::core::{EngineConfig, HOLDING_AREA};
use dice_race::engine::{EnginePhase, GameEngine, ScriptedActor};
use dice_race::events::EventKind;
use dice_race::plugins::PluginRegistry;
use dice_race::setup::GameSetup;

fn build(setup: &GameSetup) -> GameEngine {
    init_tracing();
    setup
        .build(&PluginRegistry::with_builtins(), Box::new(ScriptedActor::new()))
        .unwrap()
}

fn assert_positions_on_board(engine: &GameEngine) {
    let ctx = engine.context();
    for player in ctx.players() {
        let start = ctx.start_position(player.id());
        let end = ctx.end_position(player.id());
        for chessman in player.chessmen() {
            let position = chessman.position();
            assert!(
                position == HOLDING_AREA || (start..=end).contains(&position),
                "{} chessman {} at {position}",
                player.name(),
                chessman.index()
            );
        }
    }
}

fn play_out(engine: &mut GameEngine, max_turns: usize) {
    engine.start();
    for _ in 0..max_turns {
        if !engine.play_turn() {
            break;
        }
        assert_positions_on_board(engine);
    }
}

#[test]
fn test_random_map_games_keep_invariants() {
    for seed in 0..6 {
        let setup = GameSetup::default()
            .with_players(["Ann", "Bo", "Cy"])
            .with_chessmen_per_player(2)
            .with_path_length(24)
            .with_map_seed(seed)
            .with_engine(EngineConfig::default().with_seed(seed));
        let mut engine = build(&setup);
        let log = record(engine.context_mut(), &[EventKind::GameOver]);

        play_out(&mut engine, 3000);

        let game_overs = count(&log, EventKind::GameOver);
        assert!(game_overs <= 1, "seed {seed}");
        if let Some(winner) = engine.winner() {
            assert_eq!(game_overs, 1);
            assert_eq!(engine.phase(), EnginePhase::Over);
            let ctx = engine.context();
            let player = ctx.player(winner).unwrap();
            assert!(player.is_winner());
            assert_eq!(
                player.finished_count(ctx.end_position(winner)),
                player.chessmen().len()
            );
            assert_eq!(ctx.players().iter().filter(|p| p.is_winner()).count(), 1);
        }
    }
}

#[test]
fn test_twin_lane_game_keeps_lanes_apart() {
    let setup = GameSetup::default()
        .with_map("twin-lane")
        .with_chessmen_per_player(1)
        .with_engine(EngineConfig::default().with_seed(3));
    let mut engine = build(&setup);

    play_out(&mut engine, 2000);

    let ctx = engine.context();
    let first = ctx.players()[0].chessmen()[0].position();
    let second = ctx.players()[1].chessmen()[0].position();
    assert!(first == HOLDING_AREA || (0..=24).contains(&first));
    assert!(second == HOLDING_AREA || (25..=49).contains(&second));
}

#[test]
fn test_setup_from_json() {
    let setup: GameSetup = serde_json::from_str(
        r#"{
            "map": "twin-lane",
            "player_names": ["North", ""],
            "chessmen_per_player": 3
        }"#,
    )
    .unwrap();
    let engine = build(&setup);

    let ctx = engine.context();
    assert_eq!(ctx.players()[1].name(), "Player 2");
    assert_eq!(ctx.players()[0].chessmen().len(), 3);
    assert_eq!(ctx.map().info().name, "twin-lane");
    assert_eq!(engine.phase(), EnginePhase::Idle);
}
