//! Board movement and cell-effect dispatch.
//!
//! ## Moving
//!
//! [`Board::move_chessman`] walks one cell at a time. Every step but the
//! last is a silent write plus a `ChessmanMoveEasing` event for animation;
//! the last step goes through [`GameContext::set_position`] and so
//! triggers landing effects. A forward move that would pass the owner's
//! end stops where it is and publishes `ChessmanOverEnd` instead. The rule
//! engine decides where the chessman ends up.
//!
//! ## Landing
//!
//! `ChessmanMoved` and `ChessmanTakeOff` both run the effect of the cell
//! under the chessman. Effects may move the chessman again, which lands it
//! again. The context carries a nesting counter; once it reaches the rule
//! set's maximum depth, dispatch is skipped and a `BlockEffect` warning is
//! published. The counter is restored on every exit path.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{ChessmanRef, GameError};
use crate::events::{EventBus, EventHost, EventKind, EventPayload, GameEvent, SubscriberId};

use super::context::GameContext;

/// Message published when an effect chain is cut.
pub const CHAIN_LIMIT_MESSAGE: &str = "[Board] Maximum chain reaction reached, effects stop here!";

/// Stateless movement and landing logic over a [`GameContext`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Board;

impl Board {
    /// Subscriber name of the landing dispatcher.
    pub const SUBSCRIBER: SubscriberId = SubscriberId::new("board");

    /// Subscribe landing dispatch to `ChessmanMoved` and `ChessmanTakeOff`.
    ///
    /// Idempotent.
    pub fn attach(bus: &mut EventBus<GameContext>) {
        for kind in [EventKind::ChessmanMoved, EventKind::ChessmanTakeOff] {
            bus.subscribe(kind, Self::SUBSCRIBER, |ctx: &mut GameContext, event| {
                match event.payload.chessman() {
                    Some(chessman) => Self::dispatch_landing(ctx, chessman),
                    None => Ok(()),
                }
            });
        }
    }

    /// Move `chessman` by `steps`, positive forward and negative backward.
    ///
    /// Returns `false` without publishing anything when `steps` is zero or
    /// the chessman is unknown, and `false` after publishing
    /// `ChessmanOverEnd` when a forward move would pass the end. Backward
    /// moves stop at the owner's start position.
    pub fn move_chessman(ctx: &mut GameContext, chessman: ChessmanRef, steps: i32) -> bool {
        if steps == 0 {
            return false;
        }
        let Some(current) = ctx.chessman(chessman).map(|c| c.position()) else {
            return false;
        };

        let owner = chessman.player;
        let end = ctx.end_position(owner);
        let start = ctx.start_position(owner);
        let delay = ctx.config().step_delay();
        let total = steps.unsigned_abs();
        debug!(%chessman, from = current, steps, "moving chessman");

        let mut position = current;
        for i in 0..total {
            let next = if steps > 0 {
                position + 1
            } else {
                (position - 1).max(start)
            };

            if next > end {
                let remaining = i32::try_from(total - i).unwrap_or(i32::MAX);
                let target = position.saturating_add(remaining);
                ctx.publish(GameEvent::new(
                    EventPayload::ChessmanOverEnd {
                        chessman,
                        target_position: target,
                        end_position: end,
                        over_steps: target - end,
                    },
                    "chessman passed the end",
                ));
                return false;
            }

            let result = if i + 1 == total {
                ctx.set_position(chessman, next)
            } else {
                Self::ease(ctx, chessman, next)
            };
            if result.is_err() {
                return false;
            }
            position = next;

            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }
        true
    }

    /// Silent intermediate step with an animation notification.
    fn ease(ctx: &mut GameContext, chessman: ChessmanRef, to: i32) -> Result<(), GameError> {
        let from = ctx.place(chessman, to)?;
        ctx.publish(GameEvent::new(
            EventPayload::ChessmanMoveEasing { chessman, from, to },
            "chessman step",
        ));
        Ok(())
    }

    /// Run the effect of the cell under `chessman`, bounded by the rule
    /// set's maximum chain depth. Off-board positions have no effect to
    /// run, so they never hit the limit.
    fn dispatch_landing(ctx: &mut GameContext, chessman: ChessmanRef) -> Result<(), GameError> {
        let Some(position) = ctx.chessman(chessman).map(|c| c.position()) else {
            return Ok(());
        };
        let Some(effect) = ctx.map().cell_at(position).map(|cell| Arc::clone(cell.effect())) else {
            return Ok(());
        };

        let depth = ctx.effect_depth();
        let max_depth = ctx.rules().max_effect_depth();
        if depth >= max_depth {
            warn!(%chessman, position, depth, max_depth, "cell effect chain limit reached");
            ctx.publish(GameEvent::new(
                EventPayload::BlockEffect {
                    chessman,
                    message: CHAIN_LIMIT_MESSAGE.to_string(),
                },
                "cell effect chain cut",
            ));
            return Ok(());
        }

        debug!(%chessman, position, cell = effect.label(), depth, "cell effect");
        ctx.set_effect_depth(depth + 1);
        let result = effect.on_land(chessman, ctx);
        ctx.set_effect_depth(depth);
        result
    }

    /// Every chessman, of any player, standing on `position`.
    ///
    /// Sharing a cell has no effect; this is for rendering and queries.
    #[must_use]
    pub fn chessmen_at(ctx: &GameContext, position: i32) -> Vec<ChessmanRef> {
        ctx.players()
            .iter()
            .flat_map(|p| p.chessmen())
            .filter(|c| c.position() == position)
            .map(|c| c.handle())
            .collect()
    }

    /// Whether `position` is the start of `chessman`'s owner.
    #[must_use]
    pub fn in_start(ctx: &GameContext, chessman: ChessmanRef, position: i32) -> bool {
        position == ctx.start_position(chessman.player)
    }

    /// Whether `position` is the end of `chessman`'s owner.
    #[must_use]
    pub fn in_destination(ctx: &GameContext, chessman: ChessmanRef, position: i32) -> bool {
        position == ctx.end_position(chessman.player)
    }

    /// Send every chessman back to the holding area and clear winners.
    pub fn reset(ctx: &mut GameContext) {
        ctx.reset_players();
    }
}
