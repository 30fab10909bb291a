//! Game setup.
//!
//! [`GameSetup`] is the serializable description of a game: which plugins,
//! who plays, how many chessmen, and engine settings. `build` turns it into
//! an initialized [`GameEngine`], rejecting every bad value up front.
//!
//! ```
//! use dice_race::engine::ScriptedActor;
//! use dice_race::plugins::PluginRegistry;
//! use dice_race::setup::GameSetup;
//!
//! let registry = PluginRegistry::with_builtins();
//! let setup = GameSetup::default()
//!     .with_players(["Ann", "Bo", "Cy"])
//!     .with_path_length(40)
//!     .with_map_seed(7);
//!
//! let engine = setup.build(&registry, Box::new(ScriptedActor::new())).unwrap();
//! assert_eq!(engine.context().players().len(), 3);
//! assert_eq!(engine.context().map().path_length(), 40);
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{EngineConfig, GameError, MapSettings, Player, PlayerId};
use crate::engine::{Actor, GameContext, GameEngine};
use crate::plugins::{PluginRegistry, PolicyRuleSet, RandomMap};

/// Everything needed to build a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSetup {
    /// Rule set name, matched case-insensitively.
    pub rule_set: String,

    /// Map name, matched case-insensitively.
    pub map: String,

    /// One entry per seat. Empty names become `Player N`.
    pub player_names: Vec<String>,

    pub chessmen_per_player: usize,

    /// Path length for generated maps. Fixed maps ignore it.
    pub path_length: usize,

    pub map_seed: u64,

    pub engine: EngineConfig,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            rule_set: PolicyRuleSet::STANDARD_NAME.to_string(),
            map: RandomMap::NAME.to_string(),
            player_names: vec!["Player 1".into(), "Player 2".into()],
            chessmen_per_player: 4,
            path_length: 52,
            map_seed: 0,
            engine: EngineConfig::default(),
        }
    }
}

impl GameSetup {
    #[must_use]
    pub fn with_rule_set(mut self, name: impl Into<String>) -> Self {
        self.rule_set = name.into();
        self
    }

    #[must_use]
    pub fn with_map(mut self, name: impl Into<String>) -> Self {
        self.map = name.into();
        self
    }

    #[must_use]
    pub fn with_players<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.player_names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_chessmen_per_player(mut self, count: usize) -> Self {
        self.chessmen_per_player = count;
        self
    }

    #[must_use]
    pub fn with_path_length(mut self, length: usize) -> Self {
        self.path_length = length;
        self
    }

    #[must_use]
    pub fn with_map_seed(mut self, seed: u64) -> Self {
        self.map_seed = seed;
        self
    }

    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Settings handed to the map factory.
    #[must_use]
    pub fn map_settings(&self) -> MapSettings {
        MapSettings::new(self.player_names.len(), self.path_length, self.map_seed)
    }

    /// Resolve plugins, validate, and return an initialized engine.
    pub fn build(&self, registry: &PluginRegistry, actor: Box<dyn Actor>) -> Result<GameEngine, GameError> {
        if self.player_names.is_empty() {
            return Err(GameError::NoPlayers);
        }
        self.engine.validate()?;

        let rules = registry.rule_set(&self.rule_set)?;
        let map = registry.build_map(&self.map, &self.map_settings())?;

        let count = self.player_names.len();
        if count < map.min_players() || count > map.max_players() {
            return Err(GameError::PlayerCountOutOfRange {
                count,
                min: map.min_players(),
                max: map.max_players(),
            });
        }
        let max_chessmen = map.max_chessmen_per_player();
        if self.chessmen_per_player == 0 || self.chessmen_per_player > max_chessmen {
            return Err(GameError::ChessmenOutOfRange {
                count: self.chessmen_per_player,
                max: max_chessmen,
            });
        }

        let players = self
            .player_names
            .iter()
            .enumerate()
            .map(|(seat, name)| {
                let id = PlayerId::new(seat as u8);
                let name = if name.trim().is_empty() {
                    format!("Player {}", seat + 1)
                } else {
                    name.clone()
                };
                Player::new(id, name, self.chessmen_per_player)
            })
            .collect();

        info!(
            rules = %rules.info(),
            map = %map.info(),
            players = count,
            chessmen = self.chessmen_per_player,
            "building game"
        );
        let ctx = GameContext::new(map, rules, actor, self.engine.clone())?;
        let mut engine = GameEngine::new(ctx);
        engine.initialize(players)?;
        Ok(engine)
    }
}
