//! Rule set contract and the standard policies.
//!
//! A rule set bundles four single-method policies plus two knobs:
//!
//! - [`TakeoffCondition`]: which rolls let a chessman leave the holding area
//! - [`MoveStrategy`]: which on-path chessmen may move on a roll
//! - [`OverEndRule`]: where a chessman ends up after overshooting the end
//! - [`WinCondition`]: who, if anyone, has won
//! - extra-turn policy by dice value, and the maximum cell-effect chain depth
//!
//! The standard policies are small structs; [`PolicyRuleSet`] composes any
//! mix of them (or custom ones) into a rule set.

use crate::core::{Chessman, ChessmanRef, PlayerId};
use crate::engine::GameContext;
use crate::events::{EventHost, EventPayload, GameEvent};

use super::PluginInfo;

/// Decides whether a roll allows takeoff.
pub trait TakeoffCondition: Send + Sync {
    fn can_take_off(&self, dice_value: u32) -> bool;

    fn description(&self) -> String;
}

/// Decides whether an on-path chessman may move.
pub trait MoveStrategy: Send + Sync {
    fn can_move(&self, chessman: &Chessman, steps: u32, ctx: &GameContext) -> bool;

    /// Whether `attacker` could knock `defender` back to the holding area.
    ///
    /// Part of the contract for rule sets that want captures; the engine
    /// never calls it and shared cells have no side effect.
    fn can_capture(&self, attacker: &Chessman, defender: &Chessman) -> bool;
}

/// Resolves an overshoot into a position delta relative to the end.
pub trait OverEndRule: Send + Sync {
    /// `over_steps` is how far past the end the move would have gone.
    /// The chessman's final position is `end_position + returned delta`.
    fn handle_over_end(&self, chessman: ChessmanRef, over_steps: i32, ctx: &mut GameContext) -> i32;
}

/// Decides whether the game is over and who won.
pub trait WinCondition: Send + Sync {
    fn winner(&self, ctx: &GameContext) -> Option<PlayerId>;
}

/// A complete rule set plugin.
pub trait RuleSet: Send + Sync {
    fn info(&self) -> &PluginInfo;

    fn takeoff(&self) -> &dyn TakeoffCondition;

    fn move_strategy(&self) -> &dyn MoveStrategy;

    fn over_end(&self) -> &dyn OverEndRule;

    fn win_condition(&self) -> &dyn WinCondition;

    fn should_grant_extra_turn(&self, dice_value: u32) -> bool;

    /// How many nested cell-effect dispatches may run before the chain is
    /// cut. `1` disables chaining entirely.
    fn max_effect_depth(&self) -> u32;
}

// === Standard policies ===

/// Take off only on one specific roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollExactly(pub u32);

impl TakeoffCondition for RollExactly {
    fn can_take_off(&self, dice_value: u32) -> bool {
        dice_value == self.0
    }

    fn description(&self) -> String {
        format!("roll a {} to take off", self.0)
    }
}

/// Take off on any roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnyRoll;

impl TakeoffCondition for AnyRoll {
    fn can_take_off(&self, _dice_value: u32) -> bool {
        true
    }

    fn description(&self) -> String {
        "any roll takes off".into()
    }
}

/// Any chessman on the path and short of the end may move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OnPathUnfinished;

impl MoveStrategy for OnPathUnfinished {
    fn can_move(&self, chessman: &Chessman, _steps: u32, ctx: &GameContext) -> bool {
        let position = chessman.position();
        position >= 0 && position < ctx.end_position(chessman.owner())
    }

    fn can_capture(&self, attacker: &Chessman, defender: &Chessman) -> bool {
        attacker.owner() != defender.owner()
    }
}

/// Bounce back from the end by the overshoot amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BounceBack;

impl OverEndRule for BounceBack {
    fn handle_over_end(&self, chessman: ChessmanRef, over_steps: i32, ctx: &mut GameContext) -> i32 {
        ctx.publish(GameEvent::new(
            EventPayload::BlockEffect {
                chessman,
                message: format!(
                    "[Rule] chessman {} passed the end, bouncing back {} steps",
                    chessman.index, over_steps
                ),
            },
            "overshoot resolved",
        ));
        -over_steps
    }
}

/// A player wins once flagged as winner or once every chessman is home.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllChessmenHome;

impl WinCondition for AllChessmenHome {
    fn winner(&self, ctx: &GameContext) -> Option<PlayerId> {
        ctx.players()
            .iter()
            .find(|p| {
                let end = ctx.end_position(p.id());
                p.is_winner()
                    || (!p.chessmen().is_empty() && p.finished_count(end) == p.chessmen().len())
            })
            .map(|p| p.id())
    }
}

/// Rule set assembled from individual policies.
///
/// ```
/// use dice_race::plugins::{AnyRoll, PolicyRuleSet, RuleSet};
///
/// let rules = PolicyRuleSet::standard()
///     .with_takeoff(AnyRoll)
///     .with_max_effect_depth(3);
///
/// assert!(rules.takeoff().can_take_off(1));
/// assert_eq!(rules.max_effect_depth(), 3);
/// ```
pub struct PolicyRuleSet {
    info: PluginInfo,
    takeoff: Box<dyn TakeoffCondition>,
    move_strategy: Box<dyn MoveStrategy>,
    over_end: Box<dyn OverEndRule>,
    win_condition: Box<dyn WinCondition>,
    /// Roll that earns another turn, if any.
    extra_turn_roll: Option<u32>,
    max_effect_depth: u32,
}

impl PolicyRuleSet {
    /// Registered name of the standard rules.
    pub const STANDARD_NAME: &'static str = "default";

    /// Standard race rules: take off and go again on a 6, bounce back on
    /// overshoot, win with all chessmen home, chain effects up to 5 deep.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            info: PluginInfo::new(
                Self::STANDARD_NAME,
                "1.0.0",
                "Standard race rules",
                "dice-race",
            ),
            takeoff: Box::new(RollExactly(6)),
            move_strategy: Box::new(OnPathUnfinished),
            over_end: Box::new(BounceBack),
            win_condition: Box::new(AllChessmenHome),
            extra_turn_roll: Some(6),
            max_effect_depth: 5,
        }
    }

    #[must_use]
    pub fn with_info(mut self, info: PluginInfo) -> Self {
        self.info = info;
        self
    }

    #[must_use]
    pub fn with_takeoff(mut self, takeoff: impl TakeoffCondition + 'static) -> Self {
        self.takeoff = Box::new(takeoff);
        self
    }

    #[must_use]
    pub fn with_move_strategy(mut self, strategy: impl MoveStrategy + 'static) -> Self {
        self.move_strategy = Box::new(strategy);
        self
    }

    #[must_use]
    pub fn with_over_end(mut self, rule: impl OverEndRule + 'static) -> Self {
        self.over_end = Box::new(rule);
        self
    }

    #[must_use]
    pub fn with_win_condition(mut self, condition: impl WinCondition + 'static) -> Self {
        self.win_condition = Box::new(condition);
        self
    }

    #[must_use]
    pub fn with_extra_turn_roll(mut self, roll: Option<u32>) -> Self {
        self.extra_turn_roll = roll;
        self
    }

    #[must_use]
    pub fn with_max_effect_depth(mut self, depth: u32) -> Self {
        self.max_effect_depth = depth;
        self
    }
}

impl Default for PolicyRuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet for PolicyRuleSet {
    fn info(&self) -> &PluginInfo {
        &self.info
    }

    fn takeoff(&self) -> &dyn TakeoffCondition {
        self.takeoff.as_ref()
    }

    fn move_strategy(&self) -> &dyn MoveStrategy {
        self.move_strategy.as_ref()
    }

    fn over_end(&self) -> &dyn OverEndRule {
        self.over_end.as_ref()
    }

    fn win_condition(&self) -> &dyn WinCondition {
        self.win_condition.as_ref()
    }

    fn should_grant_extra_turn(&self, dice_value: u32) -> bool {
        self.extra_turn_roll == Some(dice_value)
    }

    fn max_effect_depth(&self) -> u32 {
        self.max_effect_depth
    }
}
