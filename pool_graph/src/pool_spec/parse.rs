use lazy_static::lazy_static;
use pool_common::PoolError;
use regex::Regex;

use super::{PartRef, PoolSpec, SubPool};

lazy_static! {
    static ref POOL_SPEC_RE: Regex = Regex::new(
        r"^\[(?:r\^)?[\w\s]+(?:,(?:r\^)?[\w\s]+)*\](?:,\[(?:r\^)?[\w\s]+(?:,(?:r\^)?[\w\s]+)*\])*$"
    )
    .expect("pool spec pattern is valid");
    static ref SUB_POOL_RE: Regex =
        Regex::new(r"\[((?:r\^)?[\w\s]+(?:,(?:r\^)?[\w\s]+)*)\]").expect("sub-pool pattern is valid");
}

/// Parses pool-spec text such as `[pTet,pBAD],[r^gfp]`.
///
/// Surrounding whitespace of the whole text is ignored; everything else must
/// follow the grammar exactly.
///
/// # Errors
/// `ParameterEmpty` for blank text, `InvalidPoolSpec` for anything the
/// grammar rejects.
pub fn parse_pool_spec(text: &str) -> Result<PoolSpec, PoolError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PoolError::parameter_empty("pool spec"));
    }
    if !POOL_SPEC_RE.is_match(text) {
        return Err(PoolError::invalid_spec(text, explain(text)));
    }

    let sub_pools = SUB_POOL_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|group| SubPool {
            parts: group.as_str().split(',').map(PartRef::new).collect(),
        })
        .collect();
    Ok(PoolSpec { sub_pools })
}

/// A short reason for a grammar failure.
fn explain(text: &str) -> &'static str {
    let opens = text.matches('[').count();
    let closes = text.matches(']').count();
    if !text.starts_with('[') {
        "expected '[' at the start"
    } else if opens != closes {
        "unbalanced brackets"
    } else if text.contains("[]") || text.contains(",,") || text.contains("[,") || text.contains(",]") {
        "empty part name"
    } else if text.contains("][") {
        "positions must be separated by ','"
    } else {
        "part names may only contain word characters and spaces, optionally prefixed by 'r^'"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_and_orientation() {
        let spec = parse_pool_spec("[pTet,pBAD],[r^gfp]").expect("valid spec");
        assert_eq!(spec.sub_pools.len(), 2);
        assert_eq!(spec.sub_pools[0].parts.len(), 2);
        assert_eq!(spec.sub_pools[1].parts[0].name, "gfp");
        assert!(spec.sub_pools[1].parts[0].reverse);
    }

    #[test]
    fn test_spaces_belong_to_names() {
        let spec = parse_pool_spec("[double terminator]").expect("valid spec");
        assert_eq!(spec.sub_pools[0].parts[0].name, "double terminator");
    }

    #[test]
    fn test_display_reproduces_text() {
        let text = "[a,r^b],[c]";
        assert_eq!(parse_pool_spec(text).expect("valid spec").to_string(), text);
    }
}
