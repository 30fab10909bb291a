//! Game engine.
//!
//! ## Key Components
//!
//! - [`GameContext`]: Players, state, plugins, actor and event bus for one session
//! - [`Board`]: Step-by-step movement and chained cell-effect dispatch
//! - [`RuleEngine`]: Legal actions, overshoot resolution, win checks
//! - [`GameEngine`]: Lifecycle and the turn loop
//! - [`Actor`]: The external decision maker, with [`ScriptedActor`] for
//!   headless play
//!
//! Components are wired through the context's event bus: the turn engine
//! publishes rolls, the rule engine reacts with moves, moves trigger cell
//! effects through the board.

mod actor;
mod board;
mod context;
mod rules;
mod turn;

pub use actor::{Actor, ScriptedActor, Transcript};
pub use board::{Board, CHAIN_LIMIT_MESSAGE};
pub use context::GameContext;
pub use rules::{RuleEngine, TurnAction};
pub use turn::{EnginePhase, GameEngine};
