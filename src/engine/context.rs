//! Shared game context.
//!
//! One `GameContext` exists per game session. It owns the players, the
//! session state, the selected plugins, the actor, and the event bus, and
//! is handed by `&mut` to every listener and cell effect. Nothing else
//! holds game state.

use std::sync::Arc;

use tracing::{debug, info};

use crate::core::{
    Chessman, ChessmanRef, Dice, EngineConfig, GameError, GameRng, GameState, Player, PlayerId,
};
use crate::events::{EventBus, EventHost, EventPayload, GameEvent};
use crate::plugins::{MapProvider, RuleSet};

use super::actor::Actor;

/// Everything a running game needs, in one place.
pub struct GameContext {
    state: GameState,
    players: Vec<Player>,
    map: Arc<dyn MapProvider>,
    rules: Arc<dyn RuleSet>,
    actor: Box<dyn Actor>,
    bus: EventBus<GameContext>,
    dice: Dice,
    effect_rng: GameRng,
    config: EngineConfig,
    /// Nesting level of cell-effect dispatch on the current call stack.
    effect_depth: u32,
}

impl GameContext {
    /// Create a context with no players yet.
    pub fn new(
        map: Arc<dyn MapProvider>,
        rules: Arc<dyn RuleSet>,
        actor: Box<dyn Actor>,
        config: EngineConfig,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let rng = GameRng::new(config.seed);
        let dice = Dice::new(config.dice_sides, rng.for_context("dice"))?;

        Ok(Self {
            state: GameState::new(),
            players: Vec::new(),
            map,
            rules,
            actor,
            bus: EventBus::new(),
            dice,
            effect_rng: rng.for_context("effects"),
            config,
            effect_depth: 0,
        })
    }

    // === State ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Players ===

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Display name of a player, falling back to `Player N`.
    #[must_use]
    pub fn player_name(&self, id: PlayerId) -> String {
        self.player(id)
            .map_or_else(|| id.to_string(), |p| p.name().to_string())
    }

    #[must_use]
    pub fn chessman(&self, chessman: ChessmanRef) -> Option<&Chessman> {
        self.player(chessman.player)?.chessman(chessman.index)
    }

    pub(crate) fn set_players(&mut self, players: Vec<Player>) {
        self.players = players;
    }

    /// Send every chessman home and clear winner flags.
    pub(crate) fn reset_players(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }

    fn chessman_mut(&mut self, chessman: ChessmanRef) -> Result<&mut Chessman, GameError> {
        self.players
            .get_mut(chessman.player.index())
            .and_then(|p| p.chessman_mut(chessman.index))
            .ok_or(GameError::UnknownChessman(chessman))
    }

    // === Positions ===

    /// Move a chessman and publish `ChessmanMoved`.
    ///
    /// This is the authoritative write: landing effects and the win check
    /// both run off the notification before this returns.
    pub fn set_position(&mut self, chessman: ChessmanRef, position: i32) -> Result<(), GameError> {
        let from = self.place(chessman, position)?;
        debug!(%chessman, from, to = position, "chessman moved");
        self.publish(GameEvent::new(
            EventPayload::ChessmanMoved {
                chessman,
                from,
                to: position,
            },
            format!("chessman {chessman} moved to {position}"),
        ));
        Ok(())
    }

    /// Write a position without notifying anyone. Returns the old position.
    ///
    /// For intermediate animation steps and for arranging a board before
    /// play; game rules go through [`set_position`](Self::set_position).
    pub fn place(&mut self, chessman: ChessmanRef, position: i32) -> Result<i32, GameError> {
        let target = self.chessman_mut(chessman)?;
        let from = target.position();
        target.set_position_silent(position);
        Ok(from)
    }

    #[must_use]
    pub fn start_position(&self, player: PlayerId) -> i32 {
        self.map.start_position(player)
    }

    #[must_use]
    pub fn end_position(&self, player: PlayerId) -> i32 {
        self.map.end_position(player)
    }

    // === Outcome ===

    /// Record `player` as the winner and publish `GameOver`.
    ///
    /// Does nothing once the game is over, so the first winner sticks.
    pub fn declare_winner(&mut self, player: PlayerId) {
        if self.state.game_over {
            return;
        }
        let Some(winner) = self.players.get_mut(player.index()) else {
            return;
        };
        winner.mark_winner();
        let name = winner.name().to_string();

        self.state.winner = Some(player);
        self.state.game_over = true;
        info!(%player, %name, "game over");

        self.publish(GameEvent::new(
            EventPayload::GameOver {
                winner: Some(player),
            },
            format!("game over, winner: {name}"),
        ));
    }

    // === Plugins and services ===

    #[must_use]
    pub fn map(&self) -> &Arc<dyn MapProvider> {
        &self.map
    }

    #[must_use]
    pub fn rules(&self) -> &Arc<dyn RuleSet> {
        &self.rules
    }

    pub fn actor(&mut self) -> &mut dyn Actor {
        self.actor.as_mut()
    }

    /// Randomness for cell effects. Separate from the dice stream.
    pub fn effect_rng(&mut self) -> &mut GameRng {
        &mut self.effect_rng
    }

    pub(crate) fn roll_dice(&mut self) -> u32 {
        self.dice.roll()
    }

    /// Mutable access for registering listeners.
    pub fn event_bus_mut(&mut self) -> &mut EventBus<GameContext> {
        &mut self.bus
    }

    #[must_use]
    pub fn effect_depth(&self) -> u32 {
        self.effect_depth
    }

    pub(crate) fn set_effect_depth(&mut self, depth: u32) {
        self.effect_depth = depth;
    }
}

impl EventHost for GameContext {
    fn event_bus(&self) -> &EventBus<Self> {
        &self.bus
    }
}

impl std::fmt::Debug for GameContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameContext")
            .field("state", &self.state)
            .field("players", &self.players)
            .field("map", &self.map.info().name)
            .field("rules", &self.rules.info().name)
            .field("bus", &self.bus)
            .field("effect_depth", &self.effect_depth)
            .finish_non_exhaustive()
    }
}
