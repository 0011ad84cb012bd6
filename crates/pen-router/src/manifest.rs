//! Route Tree → Route Manifest
//!
//! A single depth-first pass over a finished route tree. Each node's layout
//! chain is its parent's chain plus its own layout, computed when the node is
//! attached so it is ready by the time the node is visited. Only nodes with a
//! screen produce manifest entries; layout-only and group nodes still extend
//! the chains of everything beneath them.
//!
//! # Examples
//!
//! ```
//! use pen_router::{build_route_manifest, build_route_tree, FileNode};
//!
//! let app = FileNode::from_entries("/app", [
//!     "layout.tsx",
//!     "screen.tsx",
//!     "blog/layout.tsx",
//!     "blog/screen.tsx",
//! ]);
//! let tree = build_route_tree(&app).unwrap().unwrap();
//! let manifest = build_route_manifest(&tree);
//!
//! let blog = manifest.get("/blog/").unwrap();
//! assert_eq!(blog.screen, "/app/blog/screen.tsx");
//! assert_eq!(
//!     blog.layouts.as_deref(),
//!     Some(&["/app/layout.tsx".to_string(), "/app/blog/layout.tsx".to_string()][..])
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{RouterError, RouterResult};
use crate::route::{NodeId, RouteNode};
use crate::traversal::Traversal;

/// Everything a renderer needs to serve one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMetadata {
    pub url: String,
    /// Directory name of the route, e.g. `blog`
    pub segment: String,
    /// Path of the screen file rendering this URL
    pub screen: String,
    /// Inherited layouts, outermost (root) first; absent when there are none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layouts: Option<Vec<String>>,
}

impl RouteMetadata {
    /// Layout chain, empty when the route has no layouts
    pub fn layout_chain(&self) -> &[String] {
        self.layouts.as_deref().unwrap_or_default()
    }
}

/// URL → [`RouteMetadata`], ordered by URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteManifest {
    routes: BTreeMap<String, RouteMetadata>,
}

impl RouteManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-match lookup by normalized URL (trailing slash included)
    pub fn get(&self, url: &str) -> Option<&RouteMetadata> {
        self.routes.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.routes.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteMetadata> {
        self.routes.values()
    }

    fn insert(&mut self, metadata: RouteMetadata) {
        self.routes.insert(metadata.url.clone(), metadata);
    }

    /// Pretty-printed JSON, the format written to `manifest.json`
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Writes the manifest as JSON, creating parent directories as needed
    pub fn write_to(&self, path: impl AsRef<Path>) -> RouterResult<()> {
        let path = path.as_ref();
        let write_error = |source| RouterError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let json = self
            .to_json()
            .map_err(|err| write_error(std::io::Error::other(err)))?;
        fs::write(path, json + "\n").map_err(write_error)
    }
}

impl<'a> IntoIterator for &'a RouteManifest {
    type Item = &'a RouteMetadata;
    type IntoIter = std::collections::btree_map::Values<'a, String, RouteMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.values()
    }
}

/// Scratch state for one manifest pass
struct ManifestBuilder {
    /// Route → its layout chain, filled in when the route is attached
    chains: HashMap<NodeId, Vec<String>>,
    manifest: RouteManifest,
}

impl ManifestBuilder {
    fn visit(&mut self, node: &RouteNode) {
        let Some(screen) = node.screen.as_ref() else {
            return;
        };
        let chain = self.chains.get(&node.id()).cloned().unwrap_or_default();

        debug!(url = %node.url, layouts = chain.len(), "Adding manifest entry");
        self.manifest.insert(RouteMetadata {
            url: node.url.clone(),
            segment: node.segment.clone(),
            screen: screen.clone(),
            layouts: (!chain.is_empty()).then_some(chain),
        });
    }

    fn attach(&mut self, child: &RouteNode, parent: &RouteNode) {
        let mut chain = self.chains.get(&parent.id()).cloned().unwrap_or_default();
        chain.extend(child.layout.iter().cloned());
        self.chains.insert(child.id(), chain);
    }
}

/// Flattens a route tree into its manifest
///
/// Never fails: conflicts were already rejected while building the tree.
pub fn build_route_manifest(route_tree: &RouteNode) -> RouteManifest {
    let root_chain = route_tree.layout.iter().cloned().collect();
    let mut builder = ManifestBuilder {
        chains: HashMap::from([(route_tree.id(), root_chain)]),
        manifest: RouteManifest::new(),
    };

    let mut walk = Traversal::<&RouteNode, ManifestBuilder, Infallible>::new(|_, node| {
        Ok((!node.children.is_empty()).then(|| node.children.iter().collect()))
    })
    .visit(|builder, node| {
        builder.visit(node);
        Ok(())
    })
    .attach(|builder, child, parent| builder.attach(child, parent));

    walk.depth_first(route_tree, &mut builder)
        .unwrap_or_else(|never| match never {});

    builder.manifest
}
