//! Core engine types: players, chessmen, state, RNG, configuration, errors.
//!
//! These are plain data with no knowledge of the event bus or plugins.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{EngineConfig, MapSettings};
pub use error::{GameError, PluginKind};
pub use player::{Chessman, ChessmanRef, Player, PlayerId, HOLDING_AREA};
pub use rng::{Dice, GameRng};
pub use state::GameState;
