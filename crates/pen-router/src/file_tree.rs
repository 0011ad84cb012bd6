//! In-memory description of an app directory
//!
//! A [`FileNode`] is the compiler's input. Directories carry a (possibly empty)
//! `children` list; files carry none. The difference between "no children
//! field" and "empty children" is significant: an empty directory is still a
//! directory.

use serde::{Deserialize, Serialize};

/// One entry of the app directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// Entry name, e.g. `blog` or `screen.tsx`
    pub name: String,
    /// Fully-qualified source path, used only as an identifier
    pub path: String,
    /// Present only for directories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
}

impl FileNode {
    /// Creates a file entry
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: None,
        }
    }

    /// Creates a directory entry with the given children
    pub fn directory(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<FileNode>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: Some(children),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.children.is_some()
    }

    /// Direct children, empty for files
    pub fn entries(&self) -> &[FileNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Builds a tree from slash-separated entries relative to `root_path`
    ///
    /// Intermediate directories are created as needed. An entry ending in `/`
    /// declares a directory (possibly empty); anything else is a file. Children
    /// are sorted by name, the same order the filesystem scanner produces.
    ///
    /// # Examples
    ///
    /// ```
    /// use pen_router::FileNode;
    ///
    /// let tree = FileNode::from_entries("/src/app", ["screen.tsx", "blog/layout.tsx", "empty/"]);
    ///
    /// assert_eq!(tree.name, "app");
    /// assert_eq!(tree.entries().len(), 3);
    ///
    /// let blog = &tree.entries()[0];
    /// assert_eq!(blog.path, "/src/app/blog");
    /// assert_eq!(blog.entries()[0].path, "/src/app/blog/layout.tsx");
    ///
    /// let empty = &tree.entries()[1];
    /// assert_eq!(empty.children, Some(vec![]));
    /// ```
    pub fn from_entries<I, S>(root_path: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root_path = root_path.trim_end_matches('/');
        let name = root_path.rsplit('/').next().unwrap_or(root_path);
        let mut root = FileNode::directory(name, root_path, Vec::new());

        for entry in entries {
            let entry = entry.as_ref();
            let is_dir = entry.ends_with('/');
            let segments: Vec<&str> = entry.split('/').filter(|s| !s.is_empty()).collect();
            root.insert(&segments, is_dir);
        }

        root.sort_recursive();
        root
    }

    fn insert(&mut self, segments: &[&str], is_dir: bool) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };
        let path = format!("{}/{}", self.path, first);
        let children = self.children.get_or_insert_with(Vec::new);

        let position = match children.iter().position(|child| child.name == *first) {
            Some(position) => position,
            None => {
                let child = if rest.is_empty() && !is_dir {
                    FileNode::file(*first, path)
                } else {
                    FileNode::directory(*first, path, Vec::new())
                };
                children.push(child);
                children.len() - 1
            }
        };

        children[position].insert(rest, is_dir);
    }

    fn sort_recursive(&mut self) {
        if let Some(children) = self.children.as_mut() {
            children.sort_by(|a, b| a.name.cmp(&b.name));
            children.iter_mut().for_each(FileNode::sort_recursive);
        }
    }
}
