//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use dice_race::core::{EngineConfig, Player, PlayerId};
use dice_race::engine::{GameContext, GameEngine, ScriptedActor, Transcript};
use dice_race::events::{EventKind, GameEvent, SubscriberId};
use dice_race::plugins::{
    Cell, CellEffect, CellKind, MapProvider, PluginInfo, PolicyRuleSet, RuleSet,
};

/// Install a test-writer tracing subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Straight single-row board shared by every player.
///
/// Position 0 is Start, the last position is Destination, everything else
/// is Normal unless overridden.
pub struct LineMap {
    info: PluginInfo,
    grid: Vec<Vec<Cell>>,
}

impl LineMap {
    pub fn new(length: usize) -> Self {
        let row = (0..length)
            .map(|pos| {
                let kind = if pos == 0 {
                    CellKind::Start
                } else if pos + 1 == length {
                    CellKind::Destination
                } else {
                    CellKind::Normal
                };
                Cell::new(pos as i32, kind.effect())
            })
            .collect();

        Self {
            info: PluginInfo::new("line", "0.1.0", "Straight test board", "tests"),
            grid: vec![row],
        }
    }

    pub fn with_cell(mut self, position: usize, effect: Arc<dyn CellEffect>) -> Self {
        self.grid[0][position] = Cell::new(position as i32, effect);
        self
    }

    pub fn with_kind(self, position: usize, kind: CellKind) -> Self {
        self.with_cell(position, kind.effect())
    }
}

impl MapProvider for LineMap {
    fn info(&self) -> &PluginInfo {
        &self.info
    }

    fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    fn path_length(&self) -> usize {
        self.grid[0].len()
    }

    fn position_to_xy(&self, position: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(position).ok()?;
        (x < self.path_length()).then_some((x, 0))
    }

    fn start_position(&self, _player: PlayerId) -> i32 {
        0
    }

    fn end_position(&self, _player: PlayerId) -> i32 {
        self.path_length() as i32 - 1
    }

    fn min_players(&self) -> usize {
        1
    }

    fn max_players(&self) -> usize {
        4
    }

    fn max_chessmen_per_player(&self) -> usize {
        4
    }
}

/// A fully wired, initialized engine over `map`.
pub fn engine_with(
    map: impl MapProvider + 'static,
    rules: impl RuleSet + 'static,
    actor: ScriptedActor,
    config: EngineConfig,
    players: usize,
    chessmen: usize,
) -> GameEngine {
    init_tracing();
    let ctx = GameContext::new(Arc::new(map), Arc::new(rules), Box::new(actor), config).unwrap();
    let mut engine = GameEngine::new(ctx);
    let roster = (0..players)
        .map(|seat| Player::new(PlayerId::new(seat as u8), format!("P{seat}"), chessmen))
        .collect();
    engine.initialize(roster).unwrap();
    engine
}

/// Engine over a plain line board with standard rules and a fresh actor.
pub fn line_engine(length: usize, players: usize, chessmen: usize) -> (GameEngine, Arc<Mutex<Transcript>>) {
    let actor = ScriptedActor::new();
    let transcript = actor.transcript();
    let engine = engine_with(
        LineMap::new(length),
        PolicyRuleSet::standard(),
        actor,
        EngineConfig::default(),
        players,
        chessmen,
    );
    (engine, transcript)
}

/// Collect every event of the given kinds published on `ctx`.
pub fn record(ctx: &mut GameContext, kinds: &[EventKind]) -> Arc<Mutex<Vec<GameEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    for &kind in kinds {
        let sink = Arc::clone(&log);
        ctx.event_bus_mut()
            .subscribe(kind, SubscriberId::new("recorder"), move |_, event| {
                sink.lock().unwrap().push(event.clone());
                Ok(())
            });
    }
    log
}

/// Count recorded events of `kind`.
pub fn count(log: &Arc<Mutex<Vec<GameEvent>>>, kind: EventKind) -> usize {
    log.lock().unwrap().iter().filter(|e| e.kind() == kind).count()
}
