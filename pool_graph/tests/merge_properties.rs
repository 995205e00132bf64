#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::sync::OnceLock;

use pool_common::{MatchDegree, MatchStrength, MergeConfig};
use pool_graph::{Components, DesignSpace, NodeKind, merge_design_spaces};
use quickcheck::{Arbitrary, Gen, quickcheck};

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

type NodeSig = (String, Option<NodeKind>);
type EdgeSig = (String, String, Vec<String>, Vec<String>);

/// Handle-independent description of a graph.
fn signature(space: &DesignSpace) -> (Vec<NodeSig>, Vec<EdgeSig>) {
    let mut nodes: Vec<NodeSig> = space
        .nodes()
        .map(|(_, n)| (n.node_id().to_string(), n.kind()))
        .collect();
    let mut edges: Vec<EdgeSig> = space
        .edges()
        .map(|(_, e)| {
            (
                space[e.tail()].node_id().to_string(),
                space[e.head()].node_id().to_string(),
                e.component_ids().to_vec(),
                e.component_roles().to_vec(),
            )
        })
        .collect();
    nodes.sort_by(|a, b| a.0.cmp(&b.0));
    edges.sort();
    (nodes, edges)
}

#[derive(Clone, Debug)]
struct ArbitrarySpace(DesignSpace);

impl Arbitrary for ArbitrarySpace {
    fn arbitrary(g: &mut Gen) -> Self {
        const IDS: [&str; 4] = ["a", "b", "r^c", "d"];
        const ROLES: [&str; 2] = ["promoter", "cds"];

        let mut space = DesignSpace::new("arbitrary");
        let count = 1 + usize::arbitrary(g) % 6;
        let nodes: Vec<_> = (0..count)
            .map(|_| {
                let kind = *g.choose(&[None, Some(NodeKind::Start), Some(NodeKind::Accept)]).unwrap_or(&None);
                space.create_typed_node(kind)
            })
            .collect();
        for _ in 0..usize::arbitrary(g) % 10 {
            let tail = *g.choose(&nodes).expect("at least one node");
            let head = *g.choose(&nodes).expect("at least one node");
            let ids: Vec<&str> = IDS.iter().copied().filter(|_| bool::arbitrary(g)).collect();
            let roles: Vec<&str> = ROLES.iter().copied().filter(|_| bool::arbitrary(g)).collect();
            space.create_edge(tail, head, Components::new(ids, roles));
        }
        Self(space)
    }
}

quickcheck! {
    fn prop_reverse_complement_is_involution(space: ArbitrarySpace) -> bool {
        let mut space = space.0;
        let before = signature(&space);
        space.reverse_complement();
        space.reverse_complement();
        space.is_consistent() && signature(&space) == before
    }

    fn prop_copy_is_structural_clone(space: ArbitrarySpace) -> bool {
        let original = space.0;
        let before = signature(&original);
        let mut copy = original.copy("copy");
        let same = signature(&copy) == before
            && copy.node_count() == original.node_count()
            && copy.edge_count() == original.edge_count();

        copy.reverse_complement();
        let start = copy.create_node();
        let first_edge = copy.edges().next().map(|(edge, _)| edge);
        if let Some(edge) = first_edge {
            copy.set_components(edge, None);
        }
        copy.create_edge(start, start, None);

        same && signature(&original) == before && original.is_consistent()
    }
}

fn diamond(id: &str) -> DesignSpace {
    let mut space = DesignSpace::new(id);
    let s = space.create_typed_node(Some(NodeKind::Start));
    let a = space.create_node();
    let b = space.create_node();
    let end = space.create_typed_node(Some(NodeKind::Accept));
    space.create_edge(s, a, Components::new(["x"], ["promoter"]));
    space.create_edge(s, b, Components::new(["y"], ["promoter"]));
    space.create_edge(a, end, Components::new(["z"], ["cds"]));
    space.create_edge(b, end, Components::new(["z"], ["cds"]));
    space
}

#[test]
fn test_self_intersection_at_strength_zero_prunes_nothing() {
    init_test_logger();
    let config = MergeConfig::builder()
        .intersection(true)
        .complete_match(true)
        .strength(MatchStrength::Identical)
        .degree(MatchDegree::StartNodes)
        .build();

    for original in [
        diamond("d"),
        DesignSpace::from_chain(
            "c",
            vec![
                Components::new(["p1", "p2"], ["promoter"]),
                Components::new(["g"], ["cds"]),
            ],
        ),
    ] {
        let query = original.copy("query");
        let mut output = original.copy("output");
        let diff = merge_design_spaces(&[&query], &mut output, &config);

        assert!(diff.is_empty());
        assert_eq!(signature(&output), signature(&original));
    }
}

fn branched_query() -> DesignSpace {
    let mut query = DesignSpace::from_chain(
        "query",
        vec![
            Components::new(["x"], ["promoter"]),
            Components::new(["y"], ["cds"]),
        ],
    );
    let middle = query.find_node("n1").expect("chain has n1");
    let branch = query.create_node();
    query.create_edge(middle, branch, Components::new(["w"], ["terminator"]));
    query
}

fn library_chain() -> DesignSpace {
    DesignSpace::from_chain(
        "library",
        vec![
            Components::new(["x"], ["promoter"]),
            Components::new(["y"], ["cds"]),
        ],
    )
}

#[test]
fn test_unreachable_branch_fails_complete_match() {
    init_test_logger();
    let query = branched_query();
    let mut output = library_chain();
    merge_design_spaces(&[&query], &mut output, &MergeConfig::matching());
    assert!(output.is_empty());
    assert_eq!(output.edge_count(), 0);
}

#[test]
fn test_unreachable_branch_allows_partial_match() {
    init_test_logger();
    let query = branched_query();
    let mut output = library_chain();
    let config = MergeConfig::builder()
        .intersection(true)
        .complete_match(false)
        .strength(MatchStrength::SharedComponents)
        .degree(MatchDegree::Mixed)
        .build();
    merge_design_spaces(&[&query], &mut output, &config);
    assert_eq!(output.node_count(), 3);
    assert_eq!(output.edge_count(), 2);
    assert!(output.is_consistent());
}

#[test]
fn test_intersection_on_shared_roles_drops_disjoint_edges() {
    let query = DesignSpace::from_chain("q", vec![Components::new(["x"], ["promoter"])]);
    let mut output = DesignSpace::from_chain("o", vec![Components::new(["y"], ["promoter"])]);
    let config = MergeConfig::builder()
        .intersection(true)
        .strength(MatchStrength::SharedRoles)
        .build();
    let diff = merge_design_spaces(&[&query], &mut output, &config);
    assert!(output.is_empty());
    assert_eq!(diff.nodes.len(), 2);
}
