//! Route tree: the typed intermediate between the app directory and the manifest
//!
//! - `segment`: classification of directory names and special files
//! - `builder`: File Tree → Route Tree transformation with conflict detection

pub mod builder;
pub mod segment;

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub use builder::{build_route_tree, build_route_tree_with, RouteTreeBuilder};
pub use segment::{classify_segment, SegmentKind, SpecialFileMatcher};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`RouteNode`]
///
/// Assigned from a process-wide counter when a node is constructed, so two
/// nodes with identical contents at different positions (or from different
/// builds) never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Page,
    Group,
}

/// A directory that takes part in routing
#[derive(Debug, Serialize)]
pub struct RouteNode {
    #[serde(skip)]
    id: NodeId,
    /// Full URL, always ending in `/` (root is `/`)
    pub url: String,
    pub kind: RouteKind,
    /// Directory name, parentheses included for groups
    pub segment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// Creates a childless node with a fresh identity
    pub fn new(url: impl Into<String>, kind: RouteKind, segment: impl Into<String>) -> Self {
        Self {
            id: NodeId::next(),
            url: url.into(),
            kind,
            segment: segment.into(),
            layout: None,
            screen: None,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn is_group(&self) -> bool {
        self.kind == RouteKind::Group
    }

    /// Iterates over this node and all descendants in preorder
    pub fn iter(&self) -> impl Iterator<Item = &RouteNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Finds the first node in preorder whose URL matches exactly
    pub fn find(&self, url: &str) -> Option<&RouteNode> {
        self.iter().find(|node| node.url == url)
    }
}

impl PartialEq for RouteNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RouteNode {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_nodes_are_not_equal() {
        let a = RouteNode::new("/blog/", RouteKind::Page, "blog");
        let b = RouteNode::new("/blog/", RouteKind::Page, "blog");

        assert_ne!(a, b);
        assert_eq!(a, a);
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_iter_is_preorder() {
        let mut root = RouteNode::new("/", RouteKind::Page, "app");
        let mut group = RouteNode::new("/", RouteKind::Group, "(shop)");
        group.children.push(RouteNode::new("/cart/", RouteKind::Page, "cart"));
        root.children.push(group);
        root.children.push(RouteNode::new("/docs/", RouteKind::Page, "docs"));

        let segments: Vec<&str> = root.iter().map(|n| n.segment.as_str()).collect();
        assert_eq!(segments, vec!["app", "(shop)", "cart", "docs"]);

        assert_eq!(root.find("/cart/").map(|n| n.segment.as_str()), Some("cart"));
        assert!(root.find("/missing/").is_none());
    }

    #[test]
    fn test_serialize_skips_identity_and_empty_files() {
        let node = RouteNode::new("/", RouteKind::Group, "(a)");
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "url": "/", "kind": "group", "segment": "(a)", "children": [] })
        );
    }
}
