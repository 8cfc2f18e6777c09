//! Strategy selection.
//!
//! Strategies are registered once at startup into an immutable
//! registry; selection is by enum, not by string tag, so an unknown
//! strategy is unrepresentable.

use crate::error::PipelineError;
use crate::strategy::GeneratorStrategy;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The known generation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Single-backend generation with reflection.
    Direct,
    /// Research-backed generation with delegation to direct.
    Research,
}

impl StrategyKind {
    /// Stable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Direct => "direct",
            StrategyKind::Research => "research",
        }
    }

    /// All kinds, in preference order.
    pub fn all() -> [StrategyKind; 2] {
        [StrategyKind::Direct, StrategyKind::Research]
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(StrategyKind::Direct),
            "research" => Ok(StrategyKind::Research),
            other => Err(format!("unknown strategy kind: {other}")),
        }
    }
}

/// Immutable registry of strategies, keyed by kind.
///
/// Registration order is preserved and doubles as preference order for
/// [`first_available`](StrategyRegistry::first_available).
pub struct StrategyRegistry {
    entries: IndexMap<StrategyKind, Arc<dyn GeneratorStrategy>>,
}

impl StrategyRegistry {
    /// Build a registry from strategies, keyed by their own kind.
    /// A later strategy of the same kind replaces an earlier one.
    pub fn new(strategies: Vec<Arc<dyn GeneratorStrategy>>) -> Self {
        let mut entries = IndexMap::new();
        for strategy in strategies {
            entries.insert(strategy.kind(), strategy);
        }
        Self { entries }
    }

    /// Look up a strategy by kind.
    pub fn get(&self, kind: StrategyKind) -> Option<&Arc<dyn GeneratorStrategy>> {
        self.entries.get(&kind)
    }

    /// Kinds whose strategies report as available, in registration order.
    pub fn available(&self) -> Vec<StrategyKind> {
        self.entries
            .iter()
            .filter(|(_, s)| s.is_available())
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// The first available strategy, in registration order.
    pub fn first_available(&self) -> Result<&Arc<dyn GeneratorStrategy>, PipelineError> {
        self.entries
            .values()
            .find(|s| s.is_available())
            .ok_or(PipelineError::NoStrategyAvailable)
    }

    /// Number of registered strategies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::DirectStrategy;
    use variantgen_backends::MockBackend;

    #[test]
    fn test_kind_round_trip() {
        for kind in StrategyKind::all() {
            assert_eq!(kind.as_str().parse::<StrategyKind>().unwrap(), kind);
        }
        assert!("perplexity".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_registry_lookup_and_availability() {
        let up = Arc::new(DirectStrategy::new(Arc::new(MockBackend::new("up"))));
        let registry = StrategyRegistry::new(vec![up]);

        assert_eq!(registry.len(), 1);
        assert!(registry.get(StrategyKind::Direct).is_some());
        assert!(registry.get(StrategyKind::Research).is_none());
        assert_eq!(registry.available(), vec![StrategyKind::Direct]);
        assert_eq!(
            registry.first_available().unwrap().kind(),
            StrategyKind::Direct
        );
    }

    #[test]
    fn test_no_strategy_available() {
        let down = Arc::new(DirectStrategy::new(Arc::new(
            MockBackend::new("down").unavailable(),
        )));
        let registry = StrategyRegistry::new(vec![down]);

        assert!(registry.available().is_empty());
        assert!(matches!(
            registry.first_available(),
            Err(PipelineError::NoStrategyAvailable)
        ));
    }
}
