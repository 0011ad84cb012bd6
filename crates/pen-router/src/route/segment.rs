//! Classification of directory names and special files
//!
//! Pure functions: same input, same output, no side effects.

use crate::error::SpecialFileKind;

/// How a directory name participates in routing
///
/// # Examples
///
/// ```
/// use pen_router::route::segment::{classify_segment, SegmentKind};
///
/// assert_eq!(classify_segment("blog"), SegmentKind::Page);
/// assert_eq!(classify_segment("(marketing)"), SegmentKind::Group);
/// assert_eq!(classify_segment("_components"), SegmentKind::Private);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Contributes `name/` to the URL
    Page,
    /// Wrapped in parentheses: organizes files, contributes nothing to the URL
    Group,
    /// Prefixed with `_`: excluded from routing entirely
    Private,
}

/// Classifies a directory name
///
/// # Rules (evaluated in order)
///
/// 1. **Private**: starts with `_`
/// 2. **Group**: starts with `(` and ends with `)`
/// 3. **Page**: anything else
pub fn classify_segment(segment: &str) -> SegmentKind {
    if segment.starts_with('_') {
        SegmentKind::Private
    } else if segment.starts_with('(') && segment.ends_with(')') {
        SegmentKind::Group
    } else {
        SegmentKind::Page
    }
}

/// Recognizes `layout.<ext>` and `screen.<ext>` among a directory's files
#[derive(Debug, Clone)]
pub struct SpecialFileMatcher {
    extensions: Vec<String>,
}

impl SpecialFileMatcher {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| {
                    let ext: String = ext.into();
                    ext.trim_start_matches('.').to_string()
                })
                .collect(),
        }
    }

    /// Returns the special file kind a file name denotes, if any
    ///
    /// The name must be exactly `layout.<ext>` or `screen.<ext>` for one of
    /// the recognized extensions. Extensions may contain dots (`d.ts`).
    ///
    /// # Examples
    ///
    /// ```
    /// use pen_router::route::segment::SpecialFileMatcher;
    /// use pen_router::SpecialFileKind;
    ///
    /// let matcher = SpecialFileMatcher::default();
    /// assert_eq!(matcher.classify("screen.tsx"), Some(SpecialFileKind::Screen));
    /// assert_eq!(matcher.classify("layout.js"), Some(SpecialFileKind::Layout));
    /// assert_eq!(matcher.classify("screen.css"), None);
    /// assert_eq!(matcher.classify("screen"), None);
    /// assert_eq!(matcher.classify("my.screen.tsx"), None);
    /// ```
    pub fn classify(&self, file_name: &str) -> Option<SpecialFileKind> {
        self.extensions.iter().find_map(|ext| {
            let base = file_name.strip_suffix(ext.as_str())?.strip_suffix('.')?;
            match base {
                "layout" => Some(SpecialFileKind::Layout),
                "screen" => Some(SpecialFileKind::Screen),
                _ => None,
            }
        })
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for SpecialFileMatcher {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_EXTENSIONS.iter().copied())
    }
}
