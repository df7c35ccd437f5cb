// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::HashSet;
use std::sync::Arc;

use crate::{Error, Result};

/// Splits a comma-separated node list, trimming whitespace and dropping empty segments.
///
/// This is the format node lists usually arrive in from environment variables such as
/// `BACKEND_HOSTS=app-1:8001, app-2:8001`.
///
/// # Examples
///
/// ```
/// use resonance_routing::parse_node_list;
///
/// assert_eq!(parse_node_list(" a, b ,,c "), ["a", "b", "c"]);
/// assert!(parse_node_list(" , ").is_empty());
/// ```
#[must_use]
pub fn parse_node_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Collects and validates a node list for a router.
pub(crate) fn validate<I, N>(nodes: I) -> Result<Arc<[String]>>
where
    I: IntoIterator<Item = N>,
    N: Into<String>,
{
    let nodes: Vec<String> = nodes.into_iter().map(Into::into).collect();
    if nodes.is_empty() {
        return Err(Error::EmptyNodeList);
    }

    let mut seen = HashSet::with_capacity(nodes.len());
    for (position, node) in nodes.iter().enumerate() {
        if node.trim().is_empty() {
            return Err(Error::BlankNode { position });
        }
        if !seen.insert(node.as_str()) {
            return Err(Error::DuplicateNode { node: node.clone() });
        }
    }

    Ok(nodes.into())
}
