//! Errors raised while scanning an app directory or compiling its routes
//!
//! Conflict errors are static authoring mistakes: their `Display` output is
//! written for the developer who created the conflicting files and is meant to
//! be shown verbatim.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which special file a [`RouterError::SpecialFileConflict`] is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialFileKind {
    Layout,
    Screen,
}

impl SpecialFileKind {
    /// Base name (without extension) that marks this kind of file
    pub fn base_name(self) -> &'static str {
        match self {
            SpecialFileKind::Layout => "layout",
            SpecialFileKind::Screen => "screen",
        }
    }
}

impl fmt::Display for SpecialFileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_name())
    }
}

#[derive(Error, Debug)]
pub enum RouterError {
    #[error(
        "Conflicting {kind} files found in \"{directory}\":\n{}\n\n\
         Only one {kind} file is allowed per directory.\n\
         Keep one file and remove the others.",
        bullet_list(.files)
    )]
    SpecialFileConflict {
        kind: SpecialFileKind,
        directory: String,
        files: Vec<String>,
    },

    #[error(
        "Conflicting screen routes found at \"{url}\":\n  - {existing}\n  - {conflicting}\n\n\
         Each URL can only have one screen file.\n\
         Move one screen to a different directory or rename the route segment."
    )]
    DuplicateRouteConflict {
        url: String,
        existing: String,
        conflicting: String,
    },

    #[error("Directory not found: \"{}\"", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Path is not a directory: \"{}\"", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write \"{}\": {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type RouterResult<T> = Result<T, RouterError>;

fn bullet_list(files: &[String]) -> String {
    files
        .iter()
        .map(|file| format!("  - {file}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_file_conflict_lists_every_file() {
        let err = RouterError::SpecialFileConflict {
            kind: SpecialFileKind::Screen,
            directory: "/app/blog".to_string(),
            files: vec![
                "/app/blog/screen.ts".to_string(),
                "/app/blog/screen.tsx".to_string(),
            ],
        };
        let message = err.to_string();

        assert!(message.starts_with("Conflicting screen files found in \"/app/blog\""));
        assert!(message.contains("  - /app/blog/screen.ts\n  - /app/blog/screen.tsx"));
        assert!(message.contains("Only one screen file is allowed per directory."));
    }

    #[test]
    fn test_duplicate_route_conflict_names_url_and_both_paths() {
        let err = RouterError::DuplicateRouteConflict {
            url: "/".to_string(),
            existing: "/app/(a)/screen.tsx".to_string(),
            conflicting: "/app/(b)/screen.tsx".to_string(),
        };
        let message = err.to_string();

        assert!(message.contains("at \"/\""));
        assert!(message.contains("  - /app/(a)/screen.tsx\n  - /app/(b)/screen.tsx"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SpecialFileKind::Layout.to_string(), "layout");
        assert_eq!(SpecialFileKind::Screen.to_string(), "screen");
    }
}
