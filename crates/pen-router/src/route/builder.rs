//! File Tree → Route Tree
//!
//! The builder drives a depth-first [`Traversal`] over [`NodeId`] handles.
//! `expand` creates the child routes of a directory on the fly, `visit`
//! resolves its special files and claims its URL, and `attach` links children
//! to parents. Nodes live in a per-build arena until the walk finishes; only
//! then is the owned [`RouteNode`] tree assembled.
//!
//! # Examples
//!
//! ```
//! use pen_router::{build_route_tree, FileNode, RouteKind};
//!
//! let app = FileNode::from_entries("/src/app", [
//!     "layout.tsx",
//!     "screen.tsx",
//!     "(marketing)/about/screen.tsx",
//!     "_components/button.tsx",
//! ]);
//!
//! let root = build_route_tree(&app).unwrap().unwrap();
//! assert_eq!(root.url, "/");
//! assert_eq!(root.layout.as_deref(), Some("/src/app/layout.tsx"));
//!
//! let group = &root.children[0];
//! assert_eq!(group.kind, RouteKind::Group);
//! assert_eq!(group.url, "/");
//! assert_eq!(group.children[0].url, "/about/");
//!
//! // `_components` is private
//! assert_eq!(root.children.len(), 1);
//! ```

use std::collections::HashMap;
use tracing::{debug, instrument, warn};

use super::segment::{classify_segment, SegmentKind, SpecialFileMatcher};
use super::{NodeId, RouteKind, RouteNode};
use crate::error::{RouterError, RouterResult, SpecialFileKind};
use crate::file_tree::FileNode;
use crate::traversal::Traversal;

/// Builds a route tree recognizing the default special-file extensions
///
/// Returns `None` when the File Tree root is a file or an empty directory.
pub fn build_route_tree(file_tree: &FileNode) -> RouterResult<Option<RouteNode>> {
    build_route_tree_with(file_tree, &SpecialFileMatcher::default())
}

/// Builds a route tree with a custom special-file matcher
pub fn build_route_tree_with(
    file_tree: &FileNode,
    matcher: &SpecialFileMatcher,
) -> RouterResult<Option<RouteNode>> {
    RouteTreeBuilder::new(file_tree, matcher).build()
}

/// Scratch state for one File Tree → Route Tree build
///
/// Nothing here outlives [`RouteTreeBuilder::build`]; a fresh builder is
/// needed for every compile.
pub struct RouteTreeBuilder<'f> {
    file_tree: &'f FileNode,
    matcher: &'f SpecialFileMatcher,
    /// Routes created so far, children not yet linked
    nodes: HashMap<NodeId, RouteNode>,
    /// Parent → children, in attach order
    links: HashMap<NodeId, Vec<NodeId>>,
    /// Route → the directory it was created from
    sources: HashMap<NodeId, &'f FileNode>,
    /// URL → path of the screen file that claimed it
    claims: HashMap<String, String>,
}

impl<'f> RouteTreeBuilder<'f> {
    pub fn new(file_tree: &'f FileNode, matcher: &'f SpecialFileMatcher) -> Self {
        Self {
            file_tree,
            matcher,
            nodes: HashMap::new(),
            links: HashMap::new(),
            sources: HashMap::new(),
            claims: HashMap::new(),
        }
    }

    /// Runs the build, consuming the scratch state
    #[instrument(level = "debug", skip_all)]
    pub fn build(mut self) -> RouterResult<Option<RouteNode>> {
        let file_tree = self.file_tree;
        debug!(root = %file_tree.path, "Building route tree");

        match file_tree.children.as_deref() {
            None => {
                warn!("App root {} is a file, not a directory", file_tree.path);
                return Ok(None);
            }
            Some([]) => {
                debug!("App root {} is empty", file_tree.path);
                return Ok(None);
            }
            Some(_) => {}
        }

        let root = RouteNode::new("/", RouteKind::Page, file_tree.name.clone());
        let root_id = root.id();
        self.sources.insert(root_id, file_tree);
        self.nodes.insert(root_id, root);

        let mut walk = Traversal::<NodeId, Self, RouterError>::new(|builder, id| builder.expand(*id))
            .visit(|builder, id| builder.visit(*id))
            .attach(|builder, child, parent| builder.attach(*child, *parent));
        walk.depth_first(root_id, &mut self)?;

        Ok(self.assemble(root_id))
    }

    /// Resolves special files for a route and claims its URL if it has a screen
    fn visit(&mut self, id: NodeId) -> RouterResult<()> {
        let Some(&source) = self.sources.get(&id) else {
            return Ok(());
        };

        let layout = self.find_special_file(source, SpecialFileKind::Layout)?;
        let screen = self.find_special_file(source, SpecialFileKind::Screen)?;

        let Some(node) = self.nodes.get_mut(&id) else {
            return Ok(());
        };
        node.layout = layout;
        node.screen = screen;

        let Some(screen) = node.screen.as_ref() else {
            return Ok(());
        };

        match self.claims.get(&node.url) {
            Some(existing) if existing != screen => {
                return Err(RouterError::DuplicateRouteConflict {
                    url: node.url.clone(),
                    existing: existing.clone(),
                    conflicting: screen.clone(),
                });
            }
            Some(_) => {}
            None => {
                self.claims.insert(node.url.clone(), screen.clone());
            }
        }

        debug!(url = %node.url, screen = %screen, "Registered screen");
        Ok(())
    }

    /// Returns the single special file of `kind` in a directory
    fn find_special_file(
        &self,
        directory: &FileNode,
        kind: SpecialFileKind,
    ) -> RouterResult<Option<String>> {
        let files: Vec<&FileNode> = directory
            .entries()
            .iter()
            .filter(|entry| !entry.is_directory())
            .filter(|entry| self.matcher.classify(&entry.name) == Some(kind))
            .collect();

        match files.as_slice() {
            [] => Ok(None),
            [file] => Ok(Some(file.path.clone())),
            _ => Err(RouterError::SpecialFileConflict {
                kind,
                directory: directory.path.clone(),
                files: files.iter().map(|file| file.path.clone()).collect(),
            }),
        }
    }

    /// Creates the child routes of a directory, sorted by segment
    fn expand(&mut self, id: NodeId) -> RouterResult<Option<Vec<NodeId>>> {
        let Some(&source) = self.sources.get(&id) else {
            return Ok(None);
        };
        let Some(parent_url) = self.nodes.get(&id).map(|node| node.url.clone()) else {
            return Ok(None);
        };

        let mut routes: Vec<(RouteNode, &'f FileNode)> = Vec::new();
        for entry in source.entries().iter().filter(|entry| entry.is_directory()) {
            let (url, kind) = match classify_segment(&entry.name) {
                SegmentKind::Private => {
                    debug!(path = %entry.path, "Skipping private directory");
                    continue;
                }
                SegmentKind::Group => (parent_url.clone(), RouteKind::Group),
                SegmentKind::Page => (format!("{}{}/", parent_url, entry.name), RouteKind::Page),
            };
            routes.push((RouteNode::new(url, kind, entry.name.clone()), entry));
        }

        if routes.is_empty() {
            return Ok(None);
        }
        routes.sort_by(|(a, _), (b, _)| a.segment.cmp(&b.segment));

        let ids = routes
            .into_iter()
            .map(|(route, entry)| {
                let child_id = route.id();
                self.sources.insert(child_id, entry);
                self.nodes.insert(child_id, route);
                child_id
            })
            .collect();

        Ok(Some(ids))
    }

    fn attach(&mut self, child: NodeId, parent: NodeId) {
        self.links.entry(parent).or_default().push(child);
    }

    /// Moves arena nodes into an owned tree rooted at `id`
    fn assemble(&mut self, id: NodeId) -> Option<RouteNode> {
        let mut node = self.nodes.remove(&id)?;

        let children = self.links.remove(&id).unwrap_or_default();
        node.children = children
            .into_iter()
            .filter_map(|child| self.assemble(child))
            .collect();
        Some(node)
    }
}
