//! Reserved string prefixes.
//!
//! Component ids written with [`REVERSE_PREFIX`] denote a part used on the
//! reverse strand. Graph ids starting with [`RESERVED_PREFIX`] belong to the
//! pool workflow's temporaries and never count as library candidates.

/// Marks a component id (or a part name in a pool spec) as reverse-complemented.
pub const REVERSE_PREFIX: &str = "r^";

/// Prefix of every graph id minted by the pool workflow.
pub const RESERVED_PREFIX: &str = "poolDesigner";

/// Whether `id` carries the reverse-orientation marker.
#[must_use]
pub fn is_reverse(id: &str) -> bool {
    id.starts_with(REVERSE_PREFIX)
}

/// Adds the reverse marker when absent and strips it when present.
#[must_use]
pub fn toggle_reverse(id: &str) -> String {
    match id.strip_prefix(REVERSE_PREFIX) {
        Some(forward) => forward.to_string(),
        None => format!("{REVERSE_PREFIX}{id}"),
    }
}

/// Splits a written part name into its bare name and orientation.
///
/// Returns `(name, true)` when the name was written with the reverse marker.
#[must_use]
pub fn split_reverse(name: &str) -> (&str, bool) {
    match name.strip_prefix(REVERSE_PREFIX) {
        Some(bare) => (bare, true),
        None => (name, false),
    }
}

/// Tags `id` with the reverse marker unless it already carries it.
#[must_use]
pub fn as_reverse(id: &str) -> String {
    if is_reverse(id) {
        id.to_string()
    } else {
        format!("{REVERSE_PREFIX}{id}")
    }
}

/// Whether a graph id lies in the workflow's reserved namespace.
#[must_use]
pub fn is_reserved(space_id: &str) -> bool {
    space_id.starts_with(RESERVED_PREFIX)
}

/// Id of the temporary graph built for the `index`-th query spec.
#[must_use]
pub fn spec_space_id(index: usize) -> String {
    format!("{RESERVED_PREFIX}S{index}")
}

/// Id of the working copy of the `index`-th candidate.
#[must_use]
pub fn match_space_id(index: usize) -> String {
    format!("{RESERVED_PREFIX}M{index}")
}
