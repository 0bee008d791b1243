//! Slash-separated paths into the tree
//!
//! A [`Path`] is an ordered list of non-empty segments. Parsing splits on `/`
//! and drops empty segments, so leading, trailing and duplicate slashes are
//! ignored. The empty path addresses the root.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A path from the tree root to a node
///
/// # Examples
///
/// ```
/// use firetest_core::Path;
///
/// let path: Path = "/users//alice/".parse().unwrap();
/// assert_eq!(path.segments(), ["users", "alice"]);
/// assert_eq!(path.to_string(), "users/alice");
///
/// assert!(Path::root().is_root());
/// assert_eq!(Path::root().child("a").child("b"), "a/b".parse().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Create the root path (empty path)
    pub fn root() -> Self {
        Path {
            segments: Vec::new(),
        }
    }

    /// Create a path from segments, dropping empty ones
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Path {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.is_empty())
                .collect(),
        }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the root path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True for the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Builder: append a child segment (empty keys are ignored)
    pub fn child(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !key.is_empty() {
            self.segments.push(key);
        }
        self
    }

    /// Parent path, `None` for the root
    pub fn parent(&self) -> Option<Path> {
        if self.is_root() {
            return None;
        }
        Some(Path {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Last segment, `None` for the root
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::from_segments(s.split('/')))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::from_segments(s.split('/'))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
