#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use pool_common::{CandidatePolicy, MatchDegree, MatchStrength, MergeConfig, PoolError};
use rstest::rstest;

#[rstest]
#[case::identical(0, MatchStrength::Identical)]
#[case::shared_components(1, MatchStrength::SharedComponents)]
#[case::shared_roles(2, MatchStrength::SharedRoles)]
fn test_strength_levels(#[case] level: u8, #[case] expected: MatchStrength) {
    assert_eq!(MatchStrength::try_from(level), Ok(expected));
}

#[rstest]
#[case::start_nodes(0, MatchDegree::StartNodes)]
#[case::mixed(1, MatchDegree::Mixed)]
#[case::all_nodes(2, MatchDegree::AllNodes)]
fn test_degree_levels(#[case] level: u8, #[case] expected: MatchDegree) {
    assert_eq!(MatchDegree::try_from(level), Ok(expected));
}

#[rstest]
#[case::strength(MatchStrength::try_from(7).err())]
#[case::degree(MatchDegree::try_from(255).err())]
fn test_out_of_range_levels(#[case] err: Option<PoolError>) {
    assert!(matches!(err, Some(PoolError::InvalidParameter(_))));
}

#[rstest]
#[case::two_part_query(3, 2)]
#[case::long_query(7, 6)]
#[case::single_node(1, 2)]
fn test_size_matched_threshold(#[case] query_size: usize, #[case] expected: usize) {
    assert_eq!(
        CandidatePolicy::SizeMatched.min_size_exclusive(query_size),
        expected
    );
}

#[test]
fn test_builder_starts_from_default() {
    let cfg = MergeConfig::builder()
        .intersection(true)
        .strength(MatchStrength::Identical)
        .build();
    assert!(cfg.intersection);
    assert!(!cfg.complete_match);
    assert_eq!(cfg.strength, MatchStrength::Identical);
    assert_eq!(cfg.degree, MatchDegree::StartNodes);
}
