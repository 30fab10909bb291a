//! Plugin registry.
//!
//! Rule sets and maps are registered at startup under a unique name and
//! looked up case-insensitively. Rule sets are shared instances; maps are
//! registered as factories because a board is built per game from
//! [`MapSettings`].

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{GameError, MapSettings, PluginKind};

use super::map::MapProvider;
use super::random_map::RandomMap;
use super::rules::{PolicyRuleSet, RuleSet};
use super::twin_lane_map::TwinLaneMap;

/// Builds a map for one game.
pub type MapFactory =
    Arc<dyn Fn(&MapSettings) -> Result<Arc<dyn MapProvider>, GameError> + Send + Sync>;

/// Name-keyed store for one kind of plugin.
///
/// ```
/// use dice_race::core::PluginKind;
/// use dice_race::plugins::Registry;
///
/// let mut registry = Registry::new(PluginKind::Map);
/// registry.register("Spiral", 1).unwrap();
///
/// assert_eq!(*registry.get("spiral").unwrap(), 1);
/// assert!(registry.get("maze").is_err());
/// ```
pub struct Registry<T> {
    kind: PluginKind,
    entries: FxHashMap<String, T>,
    /// Names as registered, in registration order.
    names: Vec<String>,
}

impl<T> Registry<T> {
    #[must_use]
    pub fn new(kind: PluginKind) -> Self {
        Self {
            kind,
            entries: FxHashMap::default(),
            names: Vec::new(),
        }
    }

    /// Register `plugin` under `name`.
    ///
    /// Fails if a plugin with the same name, ignoring case, exists.
    pub fn register(&mut self, name: &str, plugin: T) -> Result<(), GameError> {
        let key = name.to_lowercase();
        if self.entries.contains_key(&key) {
            return Err(GameError::DuplicatePlugin {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        self.entries.insert(key, plugin);
        self.names.push(name.to_string());
        Ok(())
    }

    /// Look up a plugin by name, ignoring case.
    ///
    /// The error lists every registered name.
    pub fn get(&self, name: &str) -> Result<&T, GameError> {
        self.entries
            .get(&name.to_lowercase())
            .ok_or_else(|| GameError::PluginNotFound {
                kind: self.kind,
                name: name.to_string(),
                available: self.names.clone(),
            })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    /// Registered names, in registration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> std::fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("names", &self.names)
            .finish()
    }
}

/// All plugins available to game setup.
#[derive(Debug)]
pub struct PluginRegistry {
    pub rule_sets: Registry<Arc<dyn RuleSet>>,
    pub maps: Registry<MapFactory>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rule_sets: Registry::new(PluginKind::RuleSet),
            maps: Registry::new(PluginKind::Map),
        }
    }

    /// A registry holding the built-in plugins: the `default` rule set and
    /// the `random` and `twin-lane` maps.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        // Names are distinct constants, registration cannot collide.
        let _ = registry.register_rule_set(Arc::new(PolicyRuleSet::standard()));
        let _ = registry.register_map(RandomMap::NAME, |settings| {
            Ok(Arc::new(RandomMap::new(settings)?) as Arc<dyn MapProvider>)
        });
        let _ = registry.register_map(TwinLaneMap::NAME, |_| {
            Ok(Arc::new(TwinLaneMap::new()) as Arc<dyn MapProvider>)
        });
        registry
    }

    /// Register a rule set under its own [`PluginInfo`](super::PluginInfo) name.
    pub fn register_rule_set(&mut self, rules: Arc<dyn RuleSet>) -> Result<(), GameError> {
        let name = rules.info().name.clone();
        self.rule_sets.register(&name, rules)
    }

    pub fn register_map<F>(&mut self, name: &str, factory: F) -> Result<(), GameError>
    where
        F: Fn(&MapSettings) -> Result<Arc<dyn MapProvider>, GameError> + Send + Sync + 'static,
    {
        self.maps.register(name, Arc::new(factory))
    }

    pub fn rule_set(&self, name: &str) -> Result<Arc<dyn RuleSet>, GameError> {
        self.rule_sets.get(name).map(Arc::clone)
    }

    /// Build the map registered as `name` from `settings`.
    pub fn build_map(&self, name: &str, settings: &MapSettings) -> Result<Arc<dyn MapProvider>, GameError> {
        let factory = self.maps.get(name)?;
        factory(settings)
    }
}
