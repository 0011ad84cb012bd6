//! # Pen Router
//!
//! A filesystem-to-routing compiler. Turns an app directory into:
//! - a typed **route tree** ([`RouteNode`]), and
//! - a flat **route manifest** ([`RouteManifest`]) mapping every addressable
//!   URL to the screen that renders it and the layouts that wrap it.
//!
//! ## Conventions
//!
//! - `screen.tsx` makes a directory addressable
//! - `layout.tsx` wraps every screen at or below its directory
//! - `(group)` directories organize files without appearing in URLs
//! - `_private` directories are ignored entirely
//! - URLs always end in `/`; the app root is `/`
//!
//! ## Pipeline
//!
//! ```text
//! directory ──scan──▶ FileNode ──build_route_tree──▶ RouteNode ──build_route_manifest──▶ RouteManifest
//! ```
//!
//! Both conflict checks (two `screen`/`layout` files in one directory, two
//! screens resolving to one URL) happen while building the route tree and
//! abort the whole compile.
//!
//! ## Example
//!
//! ```
//! use pen_router::{compile, FileNode, SpecialFileMatcher};
//!
//! let app = FileNode::from_entries("/src/app", [
//!     "layout.tsx",
//!     "screen.tsx",
//!     "(marketing)/layout.tsx",
//!     "(marketing)/about/screen.tsx",
//! ]);
//!
//! let manifest = compile(&app, &SpecialFileMatcher::default()).unwrap();
//! let about = manifest.get("/about/").unwrap();
//!
//! assert_eq!(about.segment, "about");
//! assert_eq!(about.layout_chain(), &[
//!     "/src/app/layout.tsx",
//!     "/src/app/(marketing)/layout.tsx",
//! ]);
//! ```

use std::path::Path;
use tracing::info;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod error;
mod file_tree;
pub mod manifest;
pub mod route;
mod scan;
pub mod traversal;

pub use config::{BuildConfig, Config, RoutingConfig};
pub use error::{RouterError, RouterResult, SpecialFileKind};
pub use file_tree::FileNode;
pub use manifest::{build_route_manifest, RouteManifest, RouteMetadata};
pub use route::{
    build_route_tree, build_route_tree_with, NodeId, RouteKind, RouteNode, SpecialFileMatcher,
};
pub use scan::scan_directory;

// ============================================================================
// Compile Entry Points
// ============================================================================

/// Compiles a File Tree into its route manifest
///
/// An app root that is a file or an empty directory yields an empty manifest.
pub fn compile(file_tree: &FileNode, matcher: &SpecialFileMatcher) -> RouterResult<RouteManifest> {
    let manifest = match build_route_tree_with(file_tree, matcher)? {
        Some(route_tree) => build_route_manifest(&route_tree),
        None => RouteManifest::new(),
    };

    info!(routes = manifest.len(), root = %file_tree.path, "Compiled route manifest");
    Ok(manifest)
}

/// Scans an app directory and compiles it
pub fn compile_dir(app_dir: impl AsRef<Path>, matcher: &SpecialFileMatcher) -> RouterResult<RouteManifest> {
    let file_tree = scan_directory(app_dir)?;
    compile(&file_tree, matcher)
}
