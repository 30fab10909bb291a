//! Plugin contracts and the built-in plugins.
//!
//! Two kinds of plugin extend the game:
//!
//! - **Rule sets** ([`RuleSet`]): takeoff, movement, overshoot, winning,
//!   extra turns and effect chain depth
//! - **Maps** ([`MapProvider`]): grid, path geometry and cell effects
//!
//! Cell effects ([`CellEffect`]) are the third extension seam; maps pick
//! which effect sits on each cell.
//!
//! Plugins are looked up by case-insensitive name through a
//! [`PluginRegistry`].

mod cells;
mod map;
mod random_map;
mod registry;
mod rules;
mod twin_lane_map;

use serde::{Deserialize, Serialize};

pub use cells::{
    CellEffect, CellKind, Destination, Empty, Lucky, Mine, Normal, SlowDown, SpeedUp, Start,
    Teleport,
};
pub use map::{serpentine_xy, Cell, Grid, MapProvider, PlayerColor, SEAT_COLORS};
pub use random_map::{RandomMap, SpecialCounts};
pub use registry::{MapFactory, PluginRegistry, Registry};
pub use rules::{
    AllChessmenHome, AnyRoll, BounceBack, MoveStrategy, OnPathUnfinished, OverEndRule,
    PolicyRuleSet, RollExactly, RuleSet, TakeoffCondition, WinCondition,
};
pub use twin_lane_map::TwinLaneMap;

/// Descriptive metadata carried by every plugin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Registry key. Matched case-insensitively.
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
}

impl PluginInfo {
    #[must_use]
    pub fn new(name: &str, version: &str, description: &str, author: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            description: description.to_string(),
            author: author.to_string(),
        }
    }
}

impl std::fmt::Display for PluginInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// A display colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
    pub const PURPLE: Rgb = Rgb::new(128, 0, 128);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_info_display() {
        let info = PluginInfo::new("random", "1.2.0", "Random board", "someone");
        assert_eq!(info.to_string(), "random v1.2.0");
    }

    #[test]
    fn test_plugin_info_serde() {
        let info = PluginInfo::new("default", "1.0.0", "Standard rules", "dice-race");
        let json = serde_json::to_string(&info).unwrap();
        let back: PluginInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
