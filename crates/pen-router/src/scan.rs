//! Filesystem → File Tree
//!
//! Reads an app directory into a [`FileNode`] tree with a breadth-first
//! [`Traversal`]. Only regular files and directories are kept; symlinks and
//! other entry types are skipped. Entries are sorted by name.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace};

use crate::error::{RouterError, RouterResult};
use crate::file_tree::FileNode;
use crate::traversal::Traversal;

/// Flat storage for entries while the walk is in progress
struct ScanEntry {
    name: String,
    path: PathBuf,
    children: Option<Vec<usize>>,
}

struct Scanner {
    entries: Vec<ScanEntry>,
}

impl Scanner {
    fn expand(&mut self, index: usize) -> RouterResult<Option<Vec<usize>>> {
        let dir = self.entries[index].path.clone();
        let io_error = |source| RouterError::Io {
            path: dir.clone(),
            source,
        };

        let mut found = Vec::new();
        for dirent in fs::read_dir(&dir).map_err(io_error)? {
            let dirent = dirent.map_err(io_error)?;
            let file_type = dirent.file_type().map_err(io_error)?;

            if !file_type.is_file() && !file_type.is_dir() {
                trace!(path = %dirent.path().display(), "Skipping non-regular entry");
                continue;
            }

            found.push(ScanEntry {
                name: dirent.file_name().to_string_lossy().into_owned(),
                path: dirent.path(),
                children: file_type.is_dir().then(Vec::new),
            });
        }
        found.sort_by(|a, b| a.name.cmp(&b.name));

        let start = self.entries.len();
        self.entries.extend(found);
        Ok(Some((start..self.entries.len()).collect()))
    }

    fn attach(&mut self, child: usize, parent: usize) {
        if let Some(children) = self.entries[parent].children.as_mut() {
            children.push(child);
        }
    }

    fn is_directory(&self, index: usize) -> bool {
        self.entries[index].children.is_some()
    }

    /// Converts the flat entries below `index` into an owned tree
    fn assemble(&mut self, index: usize) -> FileNode {
        let name = std::mem::take(&mut self.entries[index].name);
        let path = self.entries[index].path.to_string_lossy().into_owned();

        match self.entries[index].children.take() {
            None => FileNode::file(name, path),
            Some(children) => {
                let children = children.into_iter().map(|child| self.assemble(child)).collect();
                FileNode::directory(name, path, children)
            }
        }
    }
}

/// Scans `path` into a File Tree
///
/// Relative paths are resolved against the current directory. The root's
/// `name` is the last component of the resolved path.
///
/// # Errors
///
/// - [`RouterError::DirectoryNotFound`] if nothing exists at `path`
/// - [`RouterError::NotADirectory`] if `path` is a file
/// - [`RouterError::Io`] if a directory cannot be read
#[instrument(level = "debug", skip_all)]
pub fn scan_directory(path: impl AsRef<Path>) -> RouterResult<FileNode> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Scanning app directory");
    let root_path = std::path::absolute(path).map_err(|source| RouterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let metadata = match fs::metadata(&root_path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(RouterError::DirectoryNotFound(root_path));
        }
        Err(source) => return Err(RouterError::Io { path: root_path, source }),
    };
    if !metadata.is_dir() {
        return Err(RouterError::NotADirectory(root_path));
    }

    let name = root_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut scanner = Scanner {
        entries: vec![ScanEntry {
            name,
            path: root_path,
            children: Some(Vec::new()),
        }],
    };

    let mut walk = Traversal::<usize, Scanner, RouterError>::new(|scanner, index| scanner.expand(*index))
        .attach(|scanner, child, parent| scanner.attach(*child, *parent))
        .should_descend(|scanner, child| scanner.is_directory(*child));
    let root = walk.breadth_first(0, &mut scanner)?;

    debug!(entries = scanner.entries.len(), "Scanned app directory");
    Ok(scanner.assemble(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn names(node: &FileNode) -> Vec<&str> {
        node.entries().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_scan_builds_sorted_tree() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        fs::create_dir_all(app.join("blog")).unwrap();
        fs::create_dir_all(app.join("(auth)/login")).unwrap();
        fs::create_dir_all(app.join("empty")).unwrap();
        fs::write(app.join("screen.tsx"), "").unwrap();
        fs::write(app.join("layout.tsx"), "").unwrap();
        fs::write(app.join("blog/screen.tsx"), "").unwrap();

        let tree = scan_directory(&app).unwrap();

        assert_eq!(tree.name, "app");
        assert_eq!(tree.path, app.to_string_lossy());
        assert_eq!(names(&tree), vec!["(auth)", "blog", "empty", "layout.tsx", "screen.tsx"]);

        let blog = &tree.entries()[1];
        assert!(blog.is_directory());
        assert_eq!(names(blog), vec!["screen.tsx"]);
        assert_eq!(blog.entries()[0].children, None);
        assert_eq!(
            blog.entries()[0].path,
            app.join("blog").join("screen.tsx").to_string_lossy()
        );

        let empty = &tree.entries()[2];
        assert_eq!(empty.children, Some(vec![]));

        let auth = &tree.entries()[0];
        assert_eq!(names(auth), vec!["login"]);
        assert_eq!(auth.entries()[0].children, Some(vec![]));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_directory(dir.path().join("nope")).unwrap_err();

        assert!(matches!(err, RouterError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("screen.tsx");
        fs::write(&file, "").unwrap();

        let err = scan_directory(&file).unwrap_err();
        assert!(matches!(err, RouterError::NotADirectory(path) if path == file));
    }
}
