//! Rule engine.
//!
//! Reacts to three events:
//!
//! - `DiceRolled`: offer the current player every legal action for the
//!   roll through the actor, then carry out the one chosen
//! - `ChessmanOverEnd`: ask the rule set's overshoot policy where the
//!   chessman ends up and put it there
//! - `ChessmanMoved`: ask the win condition whether someone has won
//!
//! Legal actions are moves of on-path chessmen short of the end that the
//! move strategy allows, then takeoffs of held chessmen if the roll
//! permits takeoff.

use tracing::{debug, info};

use crate::core::{ChessmanRef, GameError, PlayerId};
use crate::events::{EventBus, EventHost, EventKind, EventPayload, GameEvent, SubscriberId};

use super::board::Board;
use super::context::GameContext;

/// One thing a player may do with a roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnAction {
    /// Advance an on-path chessman by the roll.
    Move { chessman: ChessmanRef, from: i32 },
    /// Put a held chessman on its start cell.
    TakeOff { chessman: ChessmanRef },
}

impl TurnAction {
    #[must_use]
    pub fn chessman(&self) -> ChessmanRef {
        match self {
            TurnAction::Move { chessman, .. } | TurnAction::TakeOff { chessman } => *chessman,
        }
    }

    /// Option text shown to the actor.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            TurnAction::Move { chessman, from } => {
                format!("Move chessman {} (at position {from})", chessman.index)
            }
            TurnAction::TakeOff { chessman } => format!("Take off chessman {}", chessman.index),
        }
    }
}

/// Stateless rule handling over a [`GameContext`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub const SUBSCRIBER: SubscriberId = SubscriberId::new("rule-engine");

    /// Subscribe to `DiceRolled`, `ChessmanMoved` and `ChessmanOverEnd`.
    ///
    /// Idempotent.
    pub fn attach(bus: &mut EventBus<GameContext>) {
        bus.subscribe(EventKind::DiceRolled, Self::SUBSCRIBER, |ctx: &mut GameContext, event| {
            if let EventPayload::DiceRolled { player, dice_value } = event.payload {
                Self::on_dice_rolled(ctx, player, dice_value)?;
            }
            Ok(())
        });
        bus.subscribe(EventKind::ChessmanMoved, Self::SUBSCRIBER, |ctx: &mut GameContext, _| {
            Self::check_game_over(ctx);
            Ok(())
        });
        bus.subscribe(EventKind::ChessmanOverEnd, Self::SUBSCRIBER, |ctx: &mut GameContext, event| {
            if let EventPayload::ChessmanOverEnd {
                chessman,
                end_position,
                over_steps,
                ..
            } = event.payload
            {
                Self::on_over_end(ctx, chessman, end_position, over_steps)?;
            }
            Ok(())
        });
    }

    /// Everything `player` may do with `dice_value`, moves first.
    #[must_use]
    pub fn legal_actions(ctx: &GameContext, player: PlayerId, dice_value: u32) -> Vec<TurnAction> {
        let Some(p) = ctx.player(player) else {
            return Vec::new();
        };
        let rules = ctx.rules();
        let end = ctx.end_position(player);

        let moves = p.chessmen().iter().filter_map(|c| {
            let position = c.position();
            (position >= 0
                && position < end
                && rules.move_strategy().can_move(c, dice_value, ctx))
            .then(|| TurnAction::Move {
                chessman: c.handle(),
                from: position,
            })
        });

        let can_take_off = rules.takeoff().can_take_off(dice_value);
        let takeoffs = p
            .chessmen()
            .iter()
            .filter(move |c| can_take_off && c.in_holding_area())
            .map(|c| TurnAction::TakeOff {
                chessman: c.handle(),
            });

        moves.chain(takeoffs).collect()
    }

    fn on_dice_rolled(ctx: &mut GameContext, player: PlayerId, dice_value: u32) -> Result<(), GameError> {
        let name = ctx.player_name(player);
        let actions = Self::legal_actions(ctx, player, dice_value);
        if actions.is_empty() {
            debug!(%player, dice_value, "no legal actions");
            ctx.actor().display_message(&format!(
                "[NOTICE] {name} rolled {dice_value} but has no available action!"
            ));
            return Ok(());
        }

        let options: Vec<String> = actions.iter().map(TurnAction::describe).collect();
        let prompt = format!("{name} rolled {dice_value}, choose an action:");
        let mut choice = ctx.actor().choose(&prompt, &options);
        while choice >= options.len() {
            ctx.actor().display_error("Invalid choice, please choose again!");
            choice = ctx.actor().choose(&prompt, &options);
        }

        Self::execute(ctx, actions[choice], dice_value)
    }

    fn execute(ctx: &mut GameContext, action: TurnAction, dice_value: u32) -> Result<(), GameError> {
        let chessman = action.chessman();
        let name = ctx.player_name(chessman.player);

        match action {
            TurnAction::Move { from, .. } => {
                let steps = i32::try_from(dice_value).unwrap_or(i32::MAX);
                Board::move_chessman(ctx, chessman, steps);
                let to = ctx.chessman(chessman).map_or(from, |c| c.position());
                ctx.actor().display_message(&format!(
                    "[OK] {name} moved chessman {} from {from} to {to}",
                    chessman.index
                ));
            }
            TurnAction::TakeOff { .. } => {
                let start = ctx.start_position(chessman.player);
                ctx.set_position(chessman, start)?;
                ctx.actor().display_message(&format!(
                    "[OK] {name}'s chessman {} took off to {start}!",
                    chessman.index
                ));
                ctx.publish(GameEvent::new(
                    EventPayload::ChessmanTakeOff { chessman },
                    format!("chessman {} took off to {start}", chessman.index),
                ));
            }
        }
        Ok(())
    }

    fn on_over_end(
        ctx: &mut GameContext,
        chessman: ChessmanRef,
        end_position: i32,
        over_steps: i32,
    ) -> Result<(), GameError> {
        let rules = std::sync::Arc::clone(ctx.rules());
        let delta = rules.over_end().handle_over_end(chessman, over_steps, ctx);
        let target = end_position
            .saturating_add(delta)
            .clamp(ctx.start_position(chessman.player), end_position);

        debug!(%chessman, over_steps, target, "overshoot resolved");
        ctx.set_position(chessman, target)
    }

    fn check_game_over(ctx: &mut GameContext) {
        if ctx.state().is_game_over() {
            return;
        }
        let rules = std::sync::Arc::clone(ctx.rules());
        if let Some(winner) = rules.win_condition().winner(ctx) {
            info!(%winner, "win condition met");
            ctx.declare_winner(winner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::{EngineConfig, Player};
    use crate::engine::ScriptedActor;
    use crate::plugins::{AnyRoll, PolicyRuleSet, RandomMap, TwinLaneMap};

    fn context(rules: PolicyRuleSet) -> GameContext {
        let mut ctx = GameContext::new(
            Arc::new(TwinLaneMap::new()),
            Arc::new(rules),
            Box::new(ScriptedActor::new()),
            EngineConfig::default(),
        )
        .unwrap();
        ctx.set_players(vec![
            Player::new(PlayerId::new(0), "Ann", 3),
            Player::new(PlayerId::new(1), "Bo", 3),
        ]);
        ctx
    }

    #[test]
    fn test_all_held_needs_takeoff_roll() {
        let ctx = context(PolicyRuleSet::standard());
        let p0 = PlayerId::new(0);
        let takeoff = ctx.rules().takeoff();

        for roll in 1..=6 {
            let actions = RuleEngine::legal_actions(&ctx, p0, roll);
            if takeoff.can_take_off(roll) {
                assert_eq!(actions.len(), 3, "roll {roll}");
                assert!(actions
                    .iter()
                    .all(|a| matches!(a, TurnAction::TakeOff { .. })));
            } else {
                assert!(actions.is_empty(), "roll {roll}");
            }
        }
        assert!(!RuleEngine::legal_actions(&ctx, p0, 6).is_empty());
    }

    #[test]
    fn test_moves_listed_before_takeoffs() {
        let mut ctx = context(PolicyRuleSet::standard());
        let p0 = PlayerId::new(0);
        ctx.place(ChessmanRef::new(p0, 1), 4).unwrap();
        ctx.place(ChessmanRef::new(p0, 2), 24).unwrap();

        let actions = RuleEngine::legal_actions(&ctx, p0, 6);
        assert_eq!(
            actions,
            vec![
                TurnAction::Move {
                    chessman: ChessmanRef::new(p0, 1),
                    from: 4
                },
                TurnAction::TakeOff {
                    chessman: ChessmanRef::new(p0, 0)
                },
            ]
        );
    }

    #[test]
    fn test_finished_chessmen_cannot_move() {
        let mut ctx = context(PolicyRuleSet::standard().with_takeoff(AnyRoll));
        let p1 = PlayerId::new(1);
        for i in 0..3 {
            ctx.place(ChessmanRef::new(p1, i), 49).unwrap();
        }
        assert!(RuleEngine::legal_actions(&ctx, p1, 2).is_empty());
    }

    #[test]
    fn test_descriptions() {
        let r = ChessmanRef::new(PlayerId::new(0), 2);
        assert_eq!(
            TurnAction::Move { chessman: r, from: 7 }.describe(),
            "Move chessman 2 (at position 7)"
        );
        assert_eq!(TurnAction::TakeOff { chessman: r }.describe(), "Take off chessman 2");
    }

    #[test]
    fn test_overshoot_bounces_back() {
        let mut ctx = GameContext::new(
            Arc::new(RandomMap::new(&crate::core::MapSettings::new(2, 20, 0)).unwrap()),
            Arc::new(PolicyRuleSet::standard()),
            Box::new(ScriptedActor::new()),
            EngineConfig::default(),
        )
        .unwrap();
        ctx.set_players(vec![Player::new(PlayerId::new(0), "Ann", 1)]);
        RuleEngine::attach(ctx.event_bus_mut());

        let r = ChessmanRef::new(PlayerId::new(0), 0);
        ctx.place(r, 17).unwrap();

        assert!(!Board::move_chessman(&mut ctx, r, 5));
        assert_eq!(ctx.chessman(r).unwrap().position(), 16);
    }
}
