//! Pair-key claims of a single merge pass.
//!
//! Each `(input node, output node)` pair reached by the walk is assigned one
//! designated output node. An output node may be designated by at most one
//! pair; claiming it under a second pair requires cloning it first.

use std::collections::HashMap;

use contracts::*;

use crate::model::NodeIdx;

/// `(input node, output node)` as reached by the walk.
pub type PairKey = (NodeIdx, NodeIdx);

/// Outcome of [`PairClaims::claim`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Claim {
    /// The pair was seen before; reuse its designated node.
    Existing(NodeIdx),
    /// The pair is new and now designates the returned node.
    Fresh(NodeIdx),
}

impl Claim {
    /// The designated output node.
    #[must_use]
    pub const fn node(self) -> NodeIdx {
        match self {
            Self::Existing(n) | Self::Fresh(n) => n,
        }
    }
}

/// The designated output node of every [`PairKey`] reached in one merge
/// walk.
///
/// A designated node belongs to exactly one pair. An input node may have
/// several designated nodes when the walk pairs it with more than one output
/// node.
#[derive(Clone, Debug, Default)]
pub struct PairClaims {
    /// Pair key to its designated output node.
    by_pair: HashMap<PairKey, NodeIdx>,
    /// Designated output node back to the one pair that owns it.
    owner: HashMap<NodeIdx, PairKey>,
    /// Input node to every output node designated for it, in claim order.
    by_input: HashMap<NodeIdx, Vec<NodeIdx>>,
}

impl PairClaims {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every designated node is owned by exactly the pair that designates it.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.by_pair.len() != self.owner.len() {
            return false;
        }
        let owned = self
            .by_pair
            .iter()
            .all(|(pair, node)| self.owner.get(node) == Some(pair));
        let indexed: usize = self.by_input.values().map(Vec::len).sum();
        owned
            && indexed == self.by_pair.len()
            && self
                .by_pair
                .iter()
                .all(|((input, _), node)| self.by_input.get(input).is_some_and(|v| v.contains(node)))
    }

    /// Designates an output node for `pair`.
    ///
    /// A known pair returns its node. Otherwise `pair.1` is taken when nobody
    /// owns it yet; if another pair already owns it, `clone` is called with it
    /// and must return a fresh, unowned node to designate instead.
    #[debug_requires(self.is_consistent())]
    #[debug_ensures(self.is_consistent())]
    #[debug_ensures(self.owner.get(&ret.node()) == Some(&pair))]
    pub fn claim(&mut self, pair: PairKey, clone: impl FnOnce(NodeIdx) -> NodeIdx) -> Claim {
        if let Some(&node) = self.by_pair.get(&pair) {
            return Claim::Existing(node);
        }
        let (input, output) = pair;
        let node = if self.owner.contains_key(&output) {
            let cloned = clone(output);
            tracing::trace!("pair ({input}, {output}) forces clone {cloned}");
            cloned
        } else {
            output
        };
        self.by_pair.insert(pair, node);
        self.owner.insert(node, pair);
        self.by_input.entry(input).or_default().push(node);
        Claim::Fresh(node)
    }

    /// Output nodes designated for `input`.
    #[must_use]
    pub fn outputs_of(&self, input: NodeIdx) -> &[NodeIdx] {
        self.by_input.get(&input).map_or(&[], Vec::as_slice)
    }

    /// Whether any output node was designated for `input`.
    #[must_use]
    pub fn is_mapped(&self, input: NodeIdx) -> bool {
        self.by_input.contains_key(&input)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: u32) -> NodeIdx {
        NodeIdx::new(i)
    }

    #[test]
    fn test_repeat_pair_reuses_node() {
        let mut claims = PairClaims::new();
        assert_eq!(claims.claim((n(0), n(10)), |_| unreachable!()), Claim::Fresh(n(10)));
        assert_eq!(claims.claim((n(0), n(10)), |_| unreachable!()), Claim::Existing(n(10)));
        assert_eq!(claims.len(), 1);
    }

    #[test]
    fn test_second_pair_on_same_output_clones() {
        let mut claims = PairClaims::new();
        claims.claim((n(0), n(10)), |_| unreachable!());
        let second = claims.claim((n(1), n(10)), |_| n(11));
        assert_eq!(second, Claim::Fresh(n(11)));
        assert_eq!(claims.outputs_of(n(0)), [n(10)]);
        assert_eq!(claims.outputs_of(n(1)), [n(11)]);
        assert!(claims.is_consistent());
    }

    #[test]
    fn test_one_input_many_outputs() {
        let mut claims = PairClaims::new();
        claims.claim((n(0), n(10)), |_| unreachable!());
        claims.claim((n(0), n(12)), |_| unreachable!());
        assert_eq!(claims.outputs_of(n(0)), [n(10), n(12)]);
        assert!(claims.is_mapped(n(0)));
        assert!(!claims.is_mapped(n(5)));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, quickcheck};

    #[derive(Clone, Debug)]
    struct ArbitraryPair {
        input: NodeIdx,
        output: NodeIdx,
    }

    impl Arbitrary for ArbitraryPair {
        fn arbitrary(g: &mut Gen) -> Self {
            Self {
                input: NodeIdx::new(u32::arbitrary(g) % 8),
                output: NodeIdx::new(u32::arbitrary(g) % 8),
            }
        }
    }

    quickcheck! {
        fn prop_claims_never_share_a_node(pairs: Vec<ArbitraryPair>) -> bool {
            let mut claims = PairClaims::new();
            // Clones are minted above the range of seeded output handles.
            let mut next = 1000u32;
            let mut designated: Vec<(PairKey, NodeIdx)> = Vec::new();
            for p in pairs {
                let pair = (p.input, p.output);
                let claim = claims.claim(pair, |_| {
                    next += 1;
                    NodeIdx::new(next)
                });
                if !claims.is_consistent() {
                    return false;
                }
                if let Claim::Fresh(node) = claim {
                    if designated.iter().any(|(_, other)| *other == node) {
                        return false;
                    }
                    designated.push((pair, node));
                }
            }
            true
        }

        fn prop_claim_is_stable(pairs: Vec<ArbitraryPair>) -> bool {
            let mut claims = PairClaims::new();
            let mut next = 1000u32;
            let mut first: HashMap<PairKey, NodeIdx> = HashMap::new();
            for p in pairs {
                let pair = (p.input, p.output);
                let node = claims
                    .claim(pair, |_| {
                        next += 1;
                        NodeIdx::new(next)
                    })
                    .node();
                if *first.entry(pair).or_insert(node) != node {
                    return false;
                }
            }
            true
        }
    }
}
