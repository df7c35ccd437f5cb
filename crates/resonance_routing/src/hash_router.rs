// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::str::FromStr;
use std::sync::Arc;

use tracing::{Level, event};

use crate::hashing::{golden_index, key_digest};
use crate::node_list::{parse_node_list, validate};
use crate::{Error, Result};

/// Routes keys to application servers with golden-ratio multiplicative hashing.
///
/// The node list is fixed at construction and never changes; a router is therefore freely
/// shareable across threads without locking. Cloning is cheap and shares the node list.
///
/// # Examples
///
/// ```
/// use resonance_routing::HashRouter;
///
/// let router = HashRouter::new(["a", "b", "c"])?;
///
/// let node = router.resolve("user1");
/// assert_eq!(node, "b");
/// assert_eq!(router.resolve("user1"), node);
/// # Ok::<(), resonance_routing::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashRouter {
    nodes: Arc<[String]>,
}

impl HashRouter {
    /// Creates a router over the given node identifiers, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyNodeList`] if no identifiers are given,
    /// [`Error::BlankNode`] if an identifier is empty or whitespace, and
    /// [`Error::DuplicateNode`] if an identifier appears more than once.
    pub fn new<I, N>(nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let nodes = validate(nodes)?;
        event!(Level::DEBUG, node_count = nodes.len(), "hash router constructed");
        Ok(Self { nodes })
    }

    /// Returns the node responsible for `key`.
    #[must_use]
    pub fn resolve(&self, key: &str) -> &str {
        &self.nodes[self.resolve_index(key)]
    }

    /// Returns the position in [`nodes()`](Self::nodes) of the node responsible for `key`.
    #[must_use]
    pub fn resolve_index(&self, key: &str) -> usize {
        golden_index(key_digest(key), self.nodes.len())
    }

    /// Returns the configured nodes in routing order.
    #[must_use]
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Returns the number of configured nodes. Always at least one.
    #[must_use]
    #[expect(clippy::len_without_is_empty, reason = "a router is never empty")]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl FromStr for HashRouter {
    type Err = Error;

    /// Parses a comma-separated node list, see [`parse_node_list`].
    fn from_str(s: &str) -> Result<Self> {
        Self::new(parse_node_list(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_golden_value() {
        let router = HashRouter::new(["a", "b", "c"]).unwrap();
        assert_eq!(router.resolve("user1"), "b");
        assert_eq!(router.resolve("user2"), "a");
        assert_eq!(router.resolve("order-42"), "c");
        assert_eq!(router.resolve(""), "a");
    }

    #[test]
    fn resolve_index_matches_resolve() {
        let router = HashRouter::new(["a", "b", "c"]).unwrap();
        for key in ["user1", "user2", "order-42", "🦀"] {
            assert_eq!(router.nodes()[router.resolve_index(key)], router.resolve(key));
        }
    }

    #[test]
    fn single_node_takes_everything() {
        let router = HashRouter::new(["only"]).unwrap();
        for i in 0..100 {
            assert_eq!(router.resolve(&format!("key-{i}")), "only");
        }
    }

    #[test]
    fn parse_from_str() {
        let router: HashRouter = "a, b ,c".parse().unwrap();
        assert_eq!(router.nodes(), ["a", "b", "c"]);
        assert_eq!(router.len(), 3);
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(" , ".parse::<HashRouter>(), Err(Error::EmptyNodeList));
    }

    #[test]
    fn construction_rejects_duplicates() {
        let err = HashRouter::new(["a", "b", "b"]).unwrap_err();
        assert_eq!(err, Error::DuplicateNode { node: "b".to_string() });
        assert_eq!(err.to_string(), "node list contains duplicate identifier 'b'");
    }

    #[test]
    fn accepts_owned_strings() {
        let nodes = vec!["x".to_string(), "y".to_string()];
        let router = HashRouter::new(nodes).unwrap();
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn clones_share_nodes() {
        let router = HashRouter::new(["a", "b"]).unwrap();
        let clone = router.clone();
        assert_eq!(router, clone);
        assert!(std::ptr::eq(router.nodes().as_ptr(), clone.nodes().as_ptr()));
    }

    #[test]
    fn router_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HashRouter>();
    }
}
