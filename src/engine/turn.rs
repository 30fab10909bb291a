//! Turn engine: game lifecycle and the turn loop.
//!
//! A turn is: pick the next seat (or the same one after an extra turn),
//! roll, let the rule engine resolve the roll through `DiceRolled`, then
//! publish `EndTurn`. The `EndTurn` handler grants an extra turn if the
//! rule set says so for the roll or a cell effect asked for one, then
//! publishes `TurnEnded`.

use tracing::{debug, info, warn};

use crate::core::{GameError, Player, PlayerId};
use crate::events::{EventHost, EventKind, EventPayload, GameEvent, SubscriberId};

use super::board::Board;
use super::context::GameContext;
use super::rules::RuleEngine;

/// Coarse lifecycle phase, derived from the state flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnginePhase {
    /// Not started, or stopped.
    Idle,
    Running,
    Paused,
    /// A winner has been declared.
    Over,
}

/// Drives a game on its [`GameContext`].
///
/// ```
/// use std::sync::Arc;
/// use dice_race::core::{EngineConfig, Player, PlayerId};
/// use dice_race::engine::{EnginePhase, GameContext, GameEngine, ScriptedActor};
/// use dice_race::plugins::{PolicyRuleSet, TwinLaneMap};
///
/// let ctx = GameContext::new(
///     Arc::new(TwinLaneMap::new()),
///     Arc::new(PolicyRuleSet::standard()),
///     Box::new(ScriptedActor::new()),
///     EngineConfig::default(),
/// )
/// .unwrap();
///
/// let mut engine = GameEngine::new(ctx);
/// engine
///     .initialize(vec![
///         Player::new(PlayerId::new(0), "Ann", 1),
///         Player::new(PlayerId::new(1), "Bo", 1),
///     ])
///     .unwrap();
/// engine.start();
///
/// assert_eq!(engine.phase(), EnginePhase::Running);
/// assert!(engine.play_turn());
/// ```
#[derive(Debug)]
pub struct GameEngine {
    ctx: GameContext,
}

impl GameEngine {
    pub const SUBSCRIBER: SubscriberId = SubscriberId::new("turn-engine");

    /// Wrap `ctx` and attach board landing dispatch.
    #[must_use]
    pub fn new(mut ctx: GameContext) -> Self {
        Board::attach(ctx.event_bus_mut());
        Self { ctx }
    }

    #[must_use]
    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    /// Set up a new game with `players`.
    ///
    /// Stops a running game first. Resets session state, subscribes the
    /// rule engine and turn handlers (re-subscribing is a no-op), and
    /// publishes `GameInitialized`.
    ///
    /// Seats are looked up by id, so `players[i]` must carry id `i`.
    pub fn initialize(&mut self, players: Vec<Player>) -> Result<(), GameError> {
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        if let Some((seat, player)) = players
            .iter()
            .enumerate()
            .find(|(seat, p)| p.id().index() != *seat)
        {
            return Err(GameError::InvalidConfig {
                reason: format!("{} is listed at seat {seat}", player.id()),
            });
        }
        if self.ctx.state().running {
            info!("stopping running game before re-initializing");
            self.stop();
        }

        let ids: Vec<PlayerId> = players.iter().map(Player::id).collect();
        self.ctx.set_players(players);
        Board::reset(&mut self.ctx);
        self.ctx.state_mut().reset();

        let bus = self.ctx.event_bus_mut();
        RuleEngine::attach(bus);
        bus.subscribe(EventKind::EndTurn, Self::SUBSCRIBER, |ctx: &mut GameContext, event| {
            if let EventPayload::EndTurn { dice_value } = event.payload {
                Self::on_end_turn(ctx, dice_value);
            }
            Ok(())
        });
        bus.subscribe(EventKind::GrantNewTurn, Self::SUBSCRIBER, |ctx: &mut GameContext, _| {
            ctx.state_mut().extra_turn_requested = true;
            Ok(())
        });

        info!(players = ids.len(), "game initialized");
        self.ctx.publish(GameEvent::new(
            EventPayload::GameInitialized { players: ids },
            "game initialized",
        ));
        Ok(())
    }

    /// Reset every player and start over with the same roster.
    pub fn rematch(&mut self) -> Result<(), GameError> {
        let mut players = self.ctx.players().to_vec();
        for player in &mut players {
            player.reset();
        }
        self.initialize(players)
    }

    /// Start the game. Resumes it if paused; no-op if already running.
    pub fn start(&mut self) {
        let state = self.ctx.state();
        if state.running && !state.paused {
            warn!("start ignored, game already running");
            return;
        }
        if state.running {
            self.resume();
            return;
        }

        self.ctx.state_mut().running = true;
        info!("game started");
        self.ctx
            .publish(GameEvent::new(EventPayload::GameStarted, "game started"));
    }

    pub fn stop(&mut self) {
        if !self.ctx.state().running {
            return;
        }
        let state = self.ctx.state_mut();
        state.running = false;
        state.paused = false;
        info!("game stopped");
        self.ctx
            .publish(GameEvent::new(EventPayload::GameStopped, "game stopped"));
    }

    pub fn pause(&mut self) {
        let state = self.ctx.state();
        if !state.running || state.paused {
            return;
        }
        self.ctx.state_mut().paused = true;
        info!("game paused");
        self.ctx
            .publish(GameEvent::new(EventPayload::GamePaused, "game paused"));
    }

    pub fn resume(&mut self) {
        let state = self.ctx.state();
        if !state.running || !state.paused {
            return;
        }
        self.ctx.state_mut().paused = false;
        info!("game resumed");
        self.ctx
            .publish(GameEvent::new(EventPayload::GameResumed, "game resumed"));
    }

    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        let state = self.ctx.state();
        if state.game_over {
            EnginePhase::Over
        } else if !state.running {
            EnginePhase::Idle
        } else if state.paused {
            EnginePhase::Paused
        } else {
            EnginePhase::Running
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.ctx.state().winner()
    }

    /// Play one turn. Returns `false` without doing anything unless the
    /// game is running, unpaused, and not over.
    pub fn play_turn(&mut self) -> bool {
        let state = self.ctx.state();
        if !state.running || state.paused || state.game_over {
            return false;
        }
        let player_count = self.ctx.players().len();
        if player_count == 0 {
            return false;
        }

        let seat = self.ctx.state_mut().advance_player(player_count);
        let player = self.ctx.players()[seat].id();
        self.ctx.state_mut().current_player = Some(player);
        let name = self.ctx.player_name(player);
        self.ctx.publish(GameEvent::new(
            EventPayload::TurnStarted { player },
            format!("{name}'s turn"),
        ));

        let dice_value = self.ctx.roll_dice();
        self.ctx.state_mut().current_dice_value = dice_value;
        debug!(%player, dice_value, turn = self.ctx.state().turn_number, "dice rolled");
        self.ctx.publish(GameEvent::new(
            EventPayload::DiceRolled { player, dice_value },
            format!("{name} rolled {dice_value}"),
        ));

        self.ctx.publish(GameEvent::new(
            EventPayload::EndTurn { dice_value },
            "turn complete",
        ));
        true
    }

    /// Play turns until someone wins or `max_turns` turns have run.
    pub fn play_until_over(&mut self, max_turns: usize) -> Option<PlayerId> {
        for _ in 0..max_turns {
            if !self.play_turn() {
                break;
            }
        }
        self.winner()
    }

    fn on_end_turn(ctx: &mut GameContext, dice_value: u32) {
        let Some(player) = ctx.state().current_player else {
            return;
        };

        let by_roll = ctx.rules().should_grant_extra_turn(dice_value);
        let state = ctx.state_mut();
        let has_extra_turn = by_roll || state.extra_turn_requested;
        state.extra_turn = has_extra_turn;
        state.extra_turn_requested = false;
        let current_dice = state.current_dice_value;

        let name = ctx.player_name(player);
        let suffix = if has_extra_turn { " (extra turn)" } else { "" };
        ctx.publish(GameEvent::new(
            EventPayload::TurnEnded {
                player,
                dice_value: current_dice,
                has_extra_turn,
            },
            format!("{name}'s turn ended{suffix}"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::EngineConfig;
    use crate::engine::ScriptedActor;
    use crate::plugins::{PolicyRuleSet, TwinLaneMap};

    fn engine() -> GameEngine {
        let ctx = GameContext::new(
            Arc::new(TwinLaneMap::new()),
            Arc::new(PolicyRuleSet::standard()),
            Box::new(ScriptedActor::new()),
            EngineConfig::default(),
        )
        .unwrap();
        GameEngine::new(ctx)
    }

    fn players() -> Vec<Player> {
        vec![
            Player::new(PlayerId::new(0), "Ann", 2),
            Player::new(PlayerId::new(1), "Bo", 2),
        ]
    }

    #[test]
    fn test_initialize_requires_players() {
        let mut engine = engine();
        assert!(matches!(engine.initialize(Vec::new()), Err(GameError::NoPlayers)));
    }

    #[test]
    fn test_initialize_requires_ids_in_seat_order() {
        let mut engine = engine();
        let swapped = vec![
            Player::new(PlayerId::new(1), "Bo", 2),
            Player::new(PlayerId::new(0), "Ann", 2),
        ];
        assert!(matches!(
            engine.initialize(swapped),
            Err(GameError::InvalidConfig { .. })
        ));

        let gap = vec![
            Player::new(PlayerId::new(0), "Ann", 2),
            Player::new(PlayerId::new(2), "Cy", 2),
        ];
        assert!(matches!(
            engine.initialize(gap),
            Err(GameError::InvalidConfig { .. })
        ));
        assert!(engine.context().players().is_empty());
    }

    #[test]
    fn test_lifecycle() {
        let mut engine = engine();
        engine.initialize(players()).unwrap();
        assert_eq!(engine.phase(), EnginePhase::Idle);
        assert!(!engine.play_turn());

        engine.start();
        assert_eq!(engine.phase(), EnginePhase::Running);

        engine.pause();
        assert_eq!(engine.phase(), EnginePhase::Paused);
        assert!(!engine.play_turn());

        engine.start();
        assert_eq!(engine.phase(), EnginePhase::Running);

        engine.stop();
        assert_eq!(engine.phase(), EnginePhase::Idle);
    }

    #[test]
    fn test_resume_requires_pause() {
        let mut engine = engine();
        engine.initialize(players()).unwrap();
        engine.resume();
        assert_eq!(engine.phase(), EnginePhase::Idle);
    }

    #[test]
    fn test_reinitialize_does_not_duplicate_handlers() {
        let mut engine = engine();
        engine.initialize(players()).unwrap();
        engine.initialize(players()).unwrap();

        let bus = engine.context_mut().event_bus_mut();
        assert_eq!(bus.listener_count(EventKind::EndTurn), 1);
        assert_eq!(bus.listener_count(EventKind::DiceRolled), 1);
        assert_eq!(bus.listener_count(EventKind::ChessmanMoved), 2);
    }

    #[test]
    fn test_first_turn_goes_to_seat_zero() {
        let mut engine = engine();
        engine.initialize(players()).unwrap();
        engine.start();

        assert!(engine.play_turn());
        let state = engine.context().state();
        assert_eq!(state.current_player, Some(PlayerId::new(0)));
        assert_eq!(state.turn_number, 1);
        assert!((1..=6).contains(&state.current_dice_value));
    }

    #[test]
    fn test_initialize_while_running_stops_first() {
        let mut engine = engine();
        engine.initialize(players()).unwrap();
        engine.start();
        engine.play_turn();

        engine.initialize(players()).unwrap();
        assert_eq!(engine.phase(), EnginePhase::Idle);
        assert_eq!(engine.context().state().current_player, None);
    }
}
