//! Configuration for merges and for the pool design workflow.
//!
//! A merge is parameterized by four knobs:
//! - intersection vs. union: whether unconfirmed output structure is pruned
//!   (intersection) or input structure is grafted onto the output (union).
//! - complete match: whether a match must cover every node reachable from
//!   the input frontier to count at all.
//! - strength: how strict edge-label compatibility is, see [`MatchStrength`].
//! - degree: which nodes seed the walk, see [`MatchDegree`].
//!
//! The pool workflow uses two fixed combinations, available as
//! [`MergeConfig::matching`] and [`MergeConfig::consolidation`].
//!
//! ```ignore
//! use pool_common::{MatchDegree, MatchStrength, MergeConfig};
//! let cfg = MergeConfig::builder()
//!     .intersection(true)
//!     .strength(MatchStrength::Identical)
//!     .degree(MatchDegree::StartNodes)
//!     .build();
//! ```

use serde::{Deserialize, Serialize};

use crate::PoolError;

/// Edge-label compatibility strictness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchStrength {
    /// Identical component-id sets and identical role sets.
    Identical,
    /// A shared component id and a shared role.
    #[default]
    SharedComponents,
    /// A shared role only.
    SharedRoles,
}

impl MatchStrength {
    /// Numeric level, 0 being the strictest.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Identical => 0,
            Self::SharedComponents => 1,
            Self::SharedRoles => 2,
        }
    }
}

impl TryFrom<u8> for MatchStrength {
    type Error = PoolError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::Identical),
            1 => Ok(Self::SharedComponents),
            2 => Ok(Self::SharedRoles),
            other => Err(PoolError::InvalidParameter(format!(
                "strength must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

/// Which nodes seed the frontiers of a merge walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchDegree {
    /// Start nodes of both graphs.
    #[default]
    StartNodes,
    /// Start nodes of the input graph against every node of the output graph.
    Mixed,
    /// Every node of both graphs.
    AllNodes,
}

impl MatchDegree {
    /// Numeric level, 0 being the narrowest seeding.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::StartNodes => 0,
            Self::Mixed => 1,
            Self::AllNodes => 2,
        }
    }
}

impl TryFrom<u8> for MatchDegree {
    type Error = PoolError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::StartNodes),
            1 => Ok(Self::Mixed),
            2 => Ok(Self::AllNodes),
            other => Err(PoolError::InvalidParameter(format!(
                "degree must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

/// Parameters of a single merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Prune unconfirmed output structure (true) or graft input structure (false).
    pub intersection: bool,
    /// Accept a match only when it covers everything reachable from the input frontier.
    pub complete_match: bool,
    /// Edge-label compatibility strictness.
    pub strength: MatchStrength,
    /// Frontier seeding.
    pub degree: MatchDegree,
}

impl MergeConfig {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(
        intersection: bool,
        complete_match: bool,
        strength: MatchStrength,
        degree: MatchDegree,
    ) -> Self {
        Self {
            intersection,
            complete_match,
            strength,
            degree,
        }
    }

    /// Start a builder from [`MergeConfig::default`].
    #[must_use]
    pub fn builder() -> MergeConfigBuilder {
        MergeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Matching a query against one candidate: a complete intersection,
    /// shared components, query starts against every candidate node.
    #[must_use]
    pub const fn matching() -> Self {
        Self::new(
            true,
            true,
            MatchStrength::SharedComponents,
            MatchDegree::Mixed,
        )
    }

    /// Folding the surviving matches of one query into one graph: a partial
    /// union on shared roles, seeded from start nodes.
    #[must_use]
    pub const fn consolidation() -> Self {
        Self::new(
            false,
            false,
            MatchStrength::SharedRoles,
            MatchDegree::StartNodes,
        )
    }
}

impl Default for MergeConfig {
    /// A partial union at the default strength and degree.
    fn default() -> Self {
        Self::new(
            false,
            false,
            MatchStrength::default(),
            MatchDegree::default(),
        )
    }
}

/// Builder for [`MergeConfig`].
#[derive(Clone, Debug)]
pub struct MergeConfigBuilder {
    config: MergeConfig,
}

impl MergeConfigBuilder {
    /// Set intersection (true) or union (false).
    #[must_use]
    pub const fn intersection(mut self, intersection: bool) -> Self {
        self.config.intersection = intersection;
        self
    }

    /// Require complete matches.
    #[must_use]
    pub const fn complete_match(mut self, complete_match: bool) -> Self {
        self.config.complete_match = complete_match;
        self
    }

    /// Set the label strictness.
    #[must_use]
    pub const fn strength(mut self, strength: MatchStrength) -> Self {
        self.config.strength = strength;
        self
    }

    /// Set the frontier seeding.
    #[must_use]
    pub const fn degree(mut self, degree: MatchDegree) -> Self {
        self.config.degree = degree;
        self
    }

    /// Finish the configuration.
    #[must_use]
    pub const fn build(self) -> MergeConfig {
        self.config
    }
}

/// Number of nodes a graph needs to exceed before it counts as composite.
/// A single part is a two-node graph.
pub const COMPOSITE_THRESHOLD: usize = 2;

/// How library graphs are picked as candidates for a query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidatePolicy {
    /// Composite graphs with at least as many nodes as the query.
    #[default]
    SizeMatched,
    /// Every graph with more than the given number of nodes.
    FixedThreshold(usize),
}

impl CandidatePolicy {
    /// Smallest node count (exclusive) a candidate may have for a query of
    /// `query_size` nodes.
    #[must_use]
    pub fn min_size_exclusive(self, query_size: usize) -> usize {
        match self {
            Self::SizeMatched => COMPOSITE_THRESHOLD.max(query_size.saturating_sub(1)),
            Self::FixedThreshold(threshold) => threshold,
        }
    }
}

/// Configuration of the pool design workflow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignConfig {
    /// Merge used to match each query against each candidate.
    pub matching: MergeConfig,
    /// Merge used to fold the surviving matches of one query together.
    pub consolidation: MergeConfig,
    /// Candidate selection.
    pub candidates: CandidatePolicy,
    /// When set, designed pools are saved to storage as `{prefix}{i}`.
    pub persist_prefix: Option<String>,
}

impl DesignConfig {
    /// Start a builder from [`DesignConfig::default`].
    #[must_use]
    pub fn builder() -> DesignConfigBuilder {
        DesignConfigBuilder {
            config: Self::default(),
        }
    }
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            matching: MergeConfig::matching(),
            consolidation: MergeConfig::consolidation(),
            candidates: CandidatePolicy::default(),
            persist_prefix: None,
        }
    }
}

/// Builder for [`DesignConfig`].
#[derive(Clone, Debug)]
pub struct DesignConfigBuilder {
    config: DesignConfig,
}

impl DesignConfigBuilder {
    /// Override the matching merge.
    #[must_use]
    pub const fn matching(mut self, matching: MergeConfig) -> Self {
        self.config.matching = matching;
        self
    }

    /// Override the consolidation merge.
    #[must_use]
    pub const fn consolidation(mut self, consolidation: MergeConfig) -> Self {
        self.config.consolidation = consolidation;
        self
    }

    /// Override candidate selection.
    #[must_use]
    pub const fn candidates(mut self, candidates: CandidatePolicy) -> Self {
        self.config.candidates = candidates;
        self
    }

    /// Persist designed pools under `prefix`.
    #[must_use]
    pub fn persist_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.persist_prefix = Some(prefix.into());
        self
    }

    /// Finish the configuration.
    #[must_use]
    pub fn build(self) -> DesignConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_match_workflow_levels() {
        let matching = MergeConfig::matching();
        assert!(matching.intersection && matching.complete_match);
        assert_eq!(matching.strength.level(), 1);
        assert_eq!(matching.degree.level(), 1);

        let consolidation = MergeConfig::consolidation();
        assert!(!consolidation.intersection && !consolidation.complete_match);
        assert_eq!(consolidation.strength.level(), 2);
        assert_eq!(consolidation.degree.level(), 0);
    }

    #[test]
    fn test_levels_round_trip_through_try_from() {
        for level in 0..3u8 {
            assert_eq!(MatchStrength::try_from(level).map(MatchStrength::level), Ok(level));
            assert_eq!(MatchDegree::try_from(level).map(MatchDegree::level), Ok(level));
        }
        assert!(matches!(
            MatchStrength::try_from(3),
            Err(PoolError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_candidate_threshold() {
        assert_eq!(CandidatePolicy::SizeMatched.min_size_exclusive(2), 2);
        assert_eq!(CandidatePolicy::SizeMatched.min_size_exclusive(5), 4);
        assert_eq!(CandidatePolicy::FixedThreshold(0).min_size_exclusive(9), 0);
    }

    #[test]
    fn test_builder_overrides_defaults() {
        let cfg = DesignConfig::builder()
            .candidates(CandidatePolicy::FixedThreshold(2))
            .persist_prefix("pool")
            .build();
        assert_eq!(cfg.matching, MergeConfig::matching());
        assert_eq!(cfg.persist_prefix.as_deref(), Some("pool"));
    }
}
