//! Cell effects.
//!
//! Every grid cell carries a [`CellEffect`] that fires when a chessman
//! lands on it. Effects get the live game context and may move the
//! chessman again; the board bounds how deep such chains go.
//!
//! ## Built-in Effects
//!
//! | Effect | On landing |
//! |---|---|
//! | [`Start`], [`Normal`] | nothing |
//! | [`Destination`] | declares the owner winner once all their chessmen are home |
//! | [`Lucky`] | random: advance, extra turn, maybe jump to the end, or nothing |
//! | [`Mine`] | back to the holding area |
//! | [`SpeedUp`] | forward twice the last roll |
//! | [`SlowDown`] | backward twice the last roll |
//! | [`Teleport`] | jump to a random other cell on the owner's path |
//! | [`Empty`] | unreachable; landing is a contract violation |
//!
//! The cosmetic prompts some effects show do not influence the outcome.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ChessmanRef, GameError, PlayerId, HOLDING_AREA};
use crate::engine::{Board, GameContext};
use crate::events::{EventHost, EventPayload, GameEvent};

use super::Rgb;

/// Behavior attached to a grid cell.
pub trait CellEffect: Send + Sync {
    /// Short display label, e.g. `"Mine"`.
    fn label(&self) -> &str;

    fn description(&self) -> &str;

    fn color(&self) -> Rgb;

    /// Two-character glyph for text renderers.
    fn glyph(&self) -> &str;

    fn on_land(&self, chessman: ChessmanRef, ctx: &mut GameContext) -> Result<(), GameError>;
}

/// The built-in effect variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Start,
    Destination,
    Normal,
    Lucky,
    Mine,
    SpeedUp,
    SlowDown,
    Teleport,
    Empty,
}

impl CellKind {
    /// Shared instance of this effect.
    #[must_use]
    pub fn effect(self) -> Arc<dyn CellEffect> {
        match self {
            CellKind::Start => Arc::new(Start),
            CellKind::Destination => Arc::new(Destination),
            CellKind::Normal => Arc::new(Normal),
            CellKind::Lucky => Arc::new(Lucky),
            CellKind::Mine => Arc::new(Mine),
            CellKind::SpeedUp => Arc::new(SpeedUp),
            CellKind::SlowDown => Arc::new(SlowDown),
            CellKind::Teleport => Arc::new(Teleport),
            CellKind::Empty => Arc::new(Empty),
        }
    }
}

/// Position and owner of the chessman an effect fired for.
fn landed(ctx: &GameContext, chessman: ChessmanRef) -> Result<(i32, PlayerId), GameError> {
    ctx.chessman(chessman)
        .map(|c| (c.position(), c.owner()))
        .ok_or(GameError::UnknownChessman(chessman))
}

fn report(ctx: &mut GameContext, chessman: ChessmanRef, message: String) {
    ctx.publish(GameEvent::new(
        EventPayload::BlockEffect { chessman, message },
        "cell effect fired",
    ));
}

fn cosmetic_choice(ctx: &mut GameContext, prompt: &str, options: &[&str]) {
    let options: Vec<String> = options.iter().map(|s| (*s).to_string()).collect();
    let _ = ctx.actor().choose(prompt, &options);
}

/// Where every chessman enters the path.
#[derive(Clone, Copy, Debug, Default)]
pub struct Start;

impl CellEffect for Start {
    fn label(&self) -> &str {
        "Start"
    }

    fn description(&self) -> &str {
        "Start cell, where chessmen take off."
    }

    fn color(&self) -> Rgb {
        Rgb::PURPLE
    }

    fn glyph(&self) -> &str {
        "ST"
    }

    fn on_land(&self, _chessman: ChessmanRef, _ctx: &mut GameContext) -> Result<(), GameError> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Normal;

impl CellEffect for Normal {
    fn label(&self) -> &str {
        "Normal"
    }

    fn description(&self) -> &str {
        "Plain cell with no effect."
    }

    fn color(&self) -> Rgb {
        Rgb::GRAY
    }

    fn glyph(&self) -> &str {
        "[]"
    }

    fn on_land(&self, _chessman: ChessmanRef, _ctx: &mut GameContext) -> Result<(), GameError> {
        Ok(())
    }
}

/// End of a path. Ends the game when the owner's last chessman arrives.
#[derive(Clone, Copy, Debug, Default)]
pub struct Destination;

impl CellEffect for Destination {
    fn label(&self) -> &str {
        "Destination"
    }

    fn description(&self) -> &str {
        "Destination cell."
    }

    fn color(&self) -> Rgb {
        Rgb::YELLOW
    }

    fn glyph(&self) -> &str {
        "EN"
    }

    fn on_land(&self, chessman: ChessmanRef, ctx: &mut GameContext) -> Result<(), GameError> {
        let (_, owner) = landed(ctx, chessman)?;
        let end = ctx.end_position(owner);
        let Some(player) = ctx.player(owner) else {
            return Err(GameError::UnknownChessman(chessman));
        };

        let total = player.chessmen().len();
        let finished = player.finished_count(end);
        let message = format!(
            "[Destination] {} has {}/{} chessmen home",
            player.name(),
            finished,
            total
        );
        report(ctx, chessman, message);

        if finished == total {
            ctx.declare_winner(owner);
        }
        Ok(())
    }
}

/// Random reward.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lucky;

impl CellEffect for Lucky {
    fn label(&self) -> &str {
        "Lucky"
    }

    fn description(&self) -> &str {
        "Lucky cell: a random reward, or nothing."
    }

    fn color(&self) -> Rgb {
        Rgb::ORANGE
    }

    fn glyph(&self) -> &str {
        "LK"
    }

    fn on_land(&self, chessman: ChessmanRef, ctx: &mut GameContext) -> Result<(), GameError> {
        let (position, owner) = landed(ctx, chessman)?;
        let name = ctx.player_name(owner);
        cosmetic_choice(ctx, "Pick your luck", &["Luck 1", "Luck 2", "Luck 3"]);

        match ctx.effect_rng().gen_range(0..4) {
            0 => {
                let end = ctx.end_position(owner);
                if position >= end {
                    return Ok(());
                }
                let target = ctx.effect_rng().gen_range(position + 1..end + 1);
                let steps = target - position;
                report(
                    ctx,
                    chessman,
                    format!("[Lucky] {name}'s chessman {} advances {steps} steps", chessman.index),
                );
                Board::move_chessman(ctx, chessman, steps);
            }
            1 => {
                let message = format!("[Lucky] {name}'s chessman {} earns an extra turn", chessman.index);
                ctx.publish(GameEvent::new(
                    EventPayload::GrantNewTurn {
                        chessman,
                        message: message.clone(),
                    },
                    "extra turn granted",
                ));
                report(ctx, chessman, message);
            }
            2 => {
                cosmetic_choice(
                    ctx,
                    "You might jump straight to the end! Pick a chance",
                    &["Chance 1", "Chance 2", "Chance 3"],
                );
                if ctx.effect_rng().gen_bool(1.0 / 3.0) {
                    let end = ctx.end_position(owner);
                    report(
                        ctx,
                        chessman,
                        format!("[Lucky] {name}'s chessman {} jumps to the end", chessman.index),
                    );
                    ctx.set_position(chessman, end)?;
                } else {
                    report(ctx, chessman, "[Lucky] No luck this time.".into());
                }
            }
            _ => report(ctx, chessman, "[Lucky] No luck this time.".into()),
        }
        Ok(())
    }
}

/// Sends the chessman back to the holding area.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mine;

impl CellEffect for Mine {
    fn label(&self) -> &str {
        "Mine"
    }

    fn description(&self) -> &str {
        "Mine cell: the chessman returns to the holding area."
    }

    fn color(&self) -> Rgb {
        Rgb::RED
    }

    fn glyph(&self) -> &str {
        "MN"
    }

    fn on_land(&self, chessman: ChessmanRef, ctx: &mut GameContext) -> Result<(), GameError> {
        let (_, owner) = landed(ctx, chessman)?;
        let name = ctx.player_name(owner);
        cosmetic_choice(ctx, "Choose your fate", &["Boom", "Bang", "Fizzle"]);

        report(
            ctx,
            chessman,
            format!(
                "[Mine] {name}'s chessman {} hit a mine and returns to the holding area",
                chessman.index
            ),
        );
        ctx.set_position(chessman, HOLDING_AREA)
    }
}

/// Moves forward twice the last roll.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpeedUp;

impl CellEffect for SpeedUp {
    fn label(&self) -> &str {
        "SpeedUp"
    }

    fn description(&self) -> &str {
        "Speed-up cell: move forward again, twice the roll."
    }

    fn color(&self) -> Rgb {
        Rgb::BLUE
    }

    fn glyph(&self) -> &str {
        ">>"
    }

    fn on_land(&self, chessman: ChessmanRef, ctx: &mut GameContext) -> Result<(), GameError> {
        let (_, owner) = landed(ctx, chessman)?;
        let name = ctx.player_name(owner);
        report(
            ctx,
            chessman,
            format!("[SpeedUp] {name}'s chessman {} speeds ahead", chessman.index),
        );

        let steps = ctx.state().dice_steps().saturating_mul(2);
        Board::move_chessman(ctx, chessman, steps);
        Ok(())
    }
}

/// Returns over the last roll and keeps going backward the same distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct SlowDown;

impl CellEffect for SlowDown {
    fn label(&self) -> &str {
        "SlowDown"
    }

    fn description(&self) -> &str {
        "Slow-down cell: go back over the roll, then as far again."
    }

    fn color(&self) -> Rgb {
        Rgb::GREEN
    }

    fn glyph(&self) -> &str {
        "<<"
    }

    fn on_land(&self, chessman: ChessmanRef, ctx: &mut GameContext) -> Result<(), GameError> {
        let (_, owner) = landed(ctx, chessman)?;
        let name = ctx.player_name(owner);
        report(
            ctx,
            chessman,
            format!(
                "[SlowDown] {name}'s chessman {} turns back the same distance",
                chessman.index
            ),
        );

        let steps = ctx.state().dice_steps().saturating_mul(-2);
        Board::move_chessman(ctx, chessman, steps);
        Ok(())
    }
}

/// Jumps to a random position on the owner's path.
#[derive(Clone, Copy, Debug, Default)]
pub struct Teleport;

impl Teleport {
    const MAX_ATTEMPTS: u32 = 50;
}

impl CellEffect for Teleport {
    fn label(&self) -> &str {
        "Teleport"
    }

    fn description(&self) -> &str {
        "Teleport cell: jump somewhere else on the path."
    }

    fn color(&self) -> Rgb {
        Rgb::CYAN
    }

    fn glyph(&self) -> &str {
        "TP"
    }

    fn on_land(&self, chessman: ChessmanRef, ctx: &mut GameContext) -> Result<(), GameError> {
        let (position, owner) = landed(ctx, chessman)?;
        cosmetic_choice(
            ctx,
            "Pick a destination",
            &["Mystery spot 1", "Mystery spot 2", "Mystery spot 3"],
        );

        let start = ctx.start_position(owner);
        let end = ctx.end_position(owner);
        if end <= start {
            return Ok(());
        }

        let mut target = ctx.effect_rng().gen_range(start..end);
        let mut attempts = 0;
        while (target == position || target == start) && attempts < Self::MAX_ATTEMPTS {
            target = ctx.effect_rng().gen_range(start..end);
            attempts += 1;
        }
        debug!(%chessman, from = position, to = target, attempts, "teleport");

        report(
            ctx,
            chessman,
            format!("[Teleport] chessman {} teleports to {target}", chessman.index),
        );
        ctx.set_position(chessman, target)
    }
}

/// Off-path filler. Never landed on.
#[derive(Clone, Copy, Debug, Default)]
pub struct Empty;

impl CellEffect for Empty {
    fn label(&self) -> &str {
        "Empty"
    }

    fn description(&self) -> &str {
        "Empty cell, never reachable."
    }

    fn color(&self) -> Rgb {
        Rgb::WHITE
    }

    fn glyph(&self) -> &str {
        "  "
    }

    fn on_land(&self, chessman: ChessmanRef, ctx: &mut GameContext) -> Result<(), GameError> {
        let position = ctx.chessman(chessman).map_or(HOLDING_AREA, |c| c.position());
        Err(GameError::UnreachableCell { position })
    }
}
