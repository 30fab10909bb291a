//! # dice-race
//!
//! A plugin-driven race-to-the-end dice board game engine.
//!
//! Players roll a die, take chessmen off from a holding area, and race them
//! along a path of cells. Landing on a cell fires its effect, which may
//! move the chessman again. The first player with every chessman home wins.
//!
//! ## Design Principles
//!
//! 1. **Plugins at the seams**: Rules, maps and cell effects are traits.
//!    The engine knows nothing about specific boards or policies.
//!
//! 2. **One context, passed explicitly**: A single `GameContext` owns all
//!    game state for a session and is handed to every listener and effect.
//!
//! 3. **Events, synchronously**: Components talk through a typed event
//!    bus. Publishing runs every listener before it returns.
//!
//! ## Modules
//!
//! - `core`: Players, chessmen, state, RNG, configuration, errors
//! - `events`: Event types and the publish/subscribe bus
//! - `plugins`: Rule set, map and cell effect contracts plus built-ins
//! - `engine`: Context, board, rule engine, turn engine, actor
//! - `setup`: Serializable game description and validated construction

pub mod core;
pub mod engine;
pub mod events;
pub mod plugins;
pub mod setup;

// Re-export commonly used types
pub use crate::core::{
    Chessman, ChessmanRef, Dice, EngineConfig, GameError, GameRng, GameState, MapSettings,
    Player, PlayerId, PluginKind, HOLDING_AREA,
};

pub use crate::events::{EventBus, EventHost, EventKind, EventPayload, GameEvent, SubscriberId};

pub use crate::plugins::{
    CellEffect, CellKind, MapProvider, PluginInfo, PluginRegistry, PolicyRuleSet, RandomMap,
    RuleSet, TwinLaneMap,
};

pub use crate::engine::{
    Actor, Board, EnginePhase, GameContext, GameEngine, RuleEngine, ScriptedActor, TurnAction,
};

pub use crate::setup::GameSetup;
