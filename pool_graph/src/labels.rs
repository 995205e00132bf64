//! Component labels carried by edges and the set algebra the merge engine
//! applies to them.
//!
//! An edge either carries both a component-id list and a role list or
//! neither. [`Components`] can only be built with both lists non-empty, so an
//! `Option<Components>` on the edge states the property in the type.

use pool_common::MatchStrength;
use pool_common::prefix::{is_reverse, toggle_reverse};
use serde::{Deserialize, Serialize};

/// Role given to leaf parts that declare none.
pub const DEFAULT_ROLE: &str = "sequence_feature";

/// Ordered, duplicate-free component ids and roles of one edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Components {
    /// Component ids, first-seen order.
    ids: Vec<String>,
    /// Component roles, first-seen order.
    roles: Vec<String>,
}

impl Components {
    /// Builds a label set, dropping duplicates. Returns `None` when either
    /// list ends up empty.
    #[must_use]
    pub fn new<I, R>(ids: I, roles: R) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let ids = dedup(ids);
        let roles = dedup(roles);
        if ids.is_empty() || roles.is_empty() {
            None
        } else {
            Some(Self { ids, roles })
        }
    }

    /// Component ids in order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Component roles in order.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Whether any id carries the reverse marker.
    #[must_use]
    pub fn has_reverse_ids(&self) -> bool {
        self.ids.iter().any(|id| is_reverse(id))
    }

    /// Toggles the reverse marker on every id.
    pub fn toggle_orientation(&mut self) {
        for id in &mut self.ids {
            *id = toggle_reverse(id);
        }
    }

    /// Identical id sets and identical role sets.
    #[must_use]
    pub fn has_same_components(&self, other: &Self) -> bool {
        same_set(&self.ids, &other.ids) && same_set(&self.roles, &other.roles)
    }

    /// At least one shared id and at least one shared role.
    #[must_use]
    pub fn has_shared_components(&self, other: &Self) -> bool {
        overlaps(&self.ids, &other.ids) && overlaps(&self.roles, &other.roles)
    }

    /// At least one shared role.
    #[must_use]
    pub fn has_shared_roles(&self, other: &Self) -> bool {
        overlaps(&self.roles, &other.roles)
    }

    /// Keeps only ids and roles also present in `other`. Returns `None` when
    /// nothing is left of either list.
    #[must_use]
    pub fn intersect(mut self, other: &Self) -> Option<Self> {
        self.ids.retain(|id| other.ids.contains(id));
        self.roles.retain(|role| other.roles.contains(role));
        if self.ids.is_empty() || self.roles.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// Appends the ids and roles of `other` not already present.
    pub fn union_with(&mut self, other: &Self) {
        for id in &other.ids {
            if !self.ids.contains(id) {
                self.ids.push(id.clone());
            }
        }
        for role in &other.roles {
            if !self.roles.contains(role) {
                self.roles.push(role.clone());
            }
        }
    }
}

/// Whether two edge labels are compatible at `strength`.
///
/// Two label-free edges match at every strength; a labelled edge never
/// matches a label-free one.
#[must_use]
pub fn labels_match(a: Option<&Components>, b: Option<&Components>, strength: MatchStrength) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => match strength {
            MatchStrength::Identical => a.has_same_components(b),
            MatchStrength::SharedComponents => a.has_shared_components(b),
            MatchStrength::SharedRoles => a.has_shared_roles(b),
        },
        _ => false,
    }
}

/// Combines the labels of a matched output edge with its input counterpart.
///
/// Intersection keeps only what both share; a label set left empty makes the
/// edge unusable and the second tuple field reports it. Union appends what the
/// output lacks. Mixed label-free/labelled pairs are left untouched.
#[must_use]
pub fn combine_labels(
    output: Option<Components>,
    input: Option<&Components>,
    intersection: bool,
) -> (Option<Components>, bool) {
    match (output, input) {
        (Some(out), Some(inp)) if intersection => match out.intersect(inp) {
            Some(kept) => (Some(kept), true),
            None => (None, false),
        },
        (Some(mut out), Some(inp)) => {
            out.union_with(inp);
            (Some(out), true)
        }
        (out, _) => (out, true),
    }
}

fn dedup<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.into();
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn same_set(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x))
}

fn overlaps(a: &[String], b: &[String]) -> bool {
    a.iter().any(|x| b.contains(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comps(ids: &[&str], roles: &[&str]) -> Components {
        Components::new(ids.iter().copied(), roles.iter().copied())
            .expect("non-empty labels")
    }

    #[test]
    fn test_new_requires_both_lists() {
        assert!(Components::new(["a"], Vec::<String>::new()).is_none());
        assert!(Components::new(Vec::<String>::new(), ["promoter"]).is_none());
        let c = comps(&["a", "a", "b"], &["promoter"]);
        assert_eq!(c.ids(), ["a", "b"]);
    }

    #[test]
    fn test_identical_ignores_order() {
        let a = comps(&["a", "b"], &["promoter", "cds"]);
        let b = comps(&["b", "a"], &["cds", "promoter"]);
        assert!(labels_match(Some(&a), Some(&b), MatchStrength::Identical));
    }

    #[test]
    fn test_shared_components_needs_both_overlaps() {
        let a = comps(&["a"], &["promoter"]);
        let b = comps(&["a"], &["cds"]);
        assert!(!labels_match(Some(&a), Some(&b), MatchStrength::SharedComponents));
        let c = comps(&["c"], &["promoter"]);
        assert!(labels_match(Some(&a), Some(&c), MatchStrength::SharedRoles));
        assert!(!labels_match(Some(&a), Some(&c), MatchStrength::SharedComponents));
    }

    #[test]
    fn test_label_free_edges() {
        let a = comps(&["a"], &["promoter"]);
        for strength in [
            MatchStrength::Identical,
            MatchStrength::SharedComponents,
            MatchStrength::SharedRoles,
        ] {
            assert!(labels_match(None, None, strength));
            assert!(!labels_match(Some(&a), None, strength));
        }
    }

    #[test]
    fn test_intersection_drops_exhausted_labels() {
        let out = comps(&["a", "b"], &["promoter"]);
        let inp = comps(&["b", "c"], &["promoter"]);
        let (kept, usable) = combine_labels(Some(out.clone()), Some(&inp), true);
        assert!(usable);
        assert_eq!(kept.as_ref().map(Components::ids), Some(&["b".to_string()][..]));

        let disjoint = comps(&["z"], &["promoter"]);
        let (kept, usable) = combine_labels(Some(out), Some(&disjoint), true);
        assert!(!usable);
        assert!(kept.is_none());
    }

    #[test]
    fn test_union_appends_in_order() {
        let mut out = comps(&["a"], &["promoter"]);
        out.union_with(&comps(&["b", "a"], &["cds", "promoter"]));
        assert_eq!(out.ids(), ["a", "b"]);
        assert_eq!(out.roles(), ["promoter", "cds"]);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, quickcheck};

    const IDS: [&str; 4] = ["a", "b", "r^a", "c"];
    const ROLES: [&str; 3] = ["promoter", "cds", "terminator"];

    #[derive(Clone, Debug)]
    struct ArbitraryLabels(Option<Components>);

    impl Arbitrary for ArbitraryLabels {
        fn arbitrary(g: &mut Gen) -> Self {
            if bool::arbitrary(g) && bool::arbitrary(g) {
                return Self(None);
            }
            let ids: Vec<&str> = IDS.iter().copied().filter(|_| bool::arbitrary(g)).collect();
            let roles: Vec<&str> = ROLES.iter().copied().filter(|_| bool::arbitrary(g)).collect();
            Self(Components::new(ids, roles))
        }
    }

    quickcheck! {
        fn prop_identical_implies_weaker(a: ArbitraryLabels, b: ArbitraryLabels) -> bool {
            let (a, b) = (a.0.as_ref(), b.0.as_ref());
            !labels_match(a, b, MatchStrength::Identical)
                || (labels_match(a, b, MatchStrength::SharedComponents)
                    && labels_match(a, b, MatchStrength::SharedRoles))
        }

        fn prop_shared_components_implies_shared_roles(a: ArbitraryLabels, b: ArbitraryLabels) -> bool {
            let (a, b) = (a.0.as_ref(), b.0.as_ref());
            !labels_match(a, b, MatchStrength::SharedComponents)
                || labels_match(a, b, MatchStrength::SharedRoles)
        }

        fn prop_matching_is_symmetric(a: ArbitraryLabels, b: ArbitraryLabels) -> bool {
            let (a, b) = (a.0.as_ref(), b.0.as_ref());
            [MatchStrength::Identical, MatchStrength::SharedComponents, MatchStrength::SharedRoles]
                .into_iter()
                .all(|s| labels_match(a, b, s) == labels_match(b, a, s))
        }
    }
}
