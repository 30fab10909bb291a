//! Crate-wide error type.
//!
//! Setup problems (bad player counts, unknown plugins) surface here before
//! any turn runs. During play the only error a listener can raise is a
//! contract violation such as landing on an unreachable cell; the event bus
//! logs those and keeps going.

use super::player::ChessmanRef;

/// Which plugin registry a lookup went to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PluginKind {
    RuleSet,
    Map,
}

impl std::fmt::Display for PluginKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginKind::RuleSet => write!(f, "rule set"),
            PluginKind::Map => write!(f, "map"),
        }
    }
}

/// Errors raised by the engine, its plugins, and game setup.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("player list must not be empty")]
    NoPlayers,

    #[error("player count {count} outside supported range {min}..={max}")]
    PlayerCountOutOfRange { count: usize, min: usize, max: usize },

    #[error("chessmen per player {count} outside supported range 1..={max}")]
    ChessmenOutOfRange { count: usize, max: usize },

    #[error("path length {length} outside supported range {min}..={max}")]
    PathLengthOutOfRange { length: usize, min: usize, max: usize },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("{kind} plugin '{name}' not found (registered: {})", .available.join(", "))]
    PluginNotFound {
        kind: PluginKind,
        name: String,
        available: Vec<String>,
    },

    #[error("{kind} plugin '{name}' is already registered")]
    DuplicatePlugin { kind: PluginKind, name: String },

    #[error("position {position} maps to an empty cell that no chessman may occupy")]
    UnreachableCell { position: i32 },

    #[error("unknown chessman {0}")]
    UnknownChessman(ChessmanRef),
}
