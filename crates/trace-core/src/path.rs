//! Field paths into a trace.
//!
//! A [`FieldPath`] is the parsed form of strings such as `x`, `marker.size`
//! or `customdata[2].value`. Parsing happens once, up front, so accessors can
//! walk the trace without re-interpreting the string.

use core::fmt;
use core::str::FromStr;

use crate::error::PathError;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member lookup.
    Key(String),
    /// Array element lookup.
    Index(usize),
}

/// A parsed dotted path with optional bracket indices.
///
/// # Example
///
/// ```rust
/// use trace_core::path::{FieldPath, Segment};
///
/// let path = FieldPath::parse("marker.colors[1]").unwrap();
/// assert_eq!(
///     path.segments(),
///     &[
///         Segment::Key("marker".to_string()),
///         Segment::Key("colors".to_string()),
///         Segment::Index(1),
///     ]
/// );
/// assert_eq!(path.to_string(), "marker.colors[1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parse a path string.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty path, an empty dotted segment, or a
    /// bracket that does not hold a non-negative integer.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        let mut position = 0;

        for part in path.split('.') {
            let (key, mut rest) = match part.find('[') {
                Some(open) => (&part[..open], &part[open..]),
                None => (part, ""),
            };

            if key.is_empty() {
                return Err(PathError::EmptySegment {
                    path: path.to_string(),
                    position,
                });
            }
            segments.push(Segment::Key(key.to_string()));

            while !rest.is_empty() {
                let bad_index = || PathError::BadIndex {
                    path: path.to_string(),
                    index: rest.to_string(),
                };

                if !rest.starts_with('[') {
                    return Err(bad_index());
                }
                let close = rest.find(']').ok_or_else(bad_index)?;
                let index = rest[1..close]
                    .parse::<usize>()
                    .map_err(|_| PathError::BadIndex {
                        path: path.to_string(),
                        index: rest[1..close].to_string(),
                    })?;

                segments.push(Segment::Index(index));
                rest = &rest[close + 1..];
            }

            position += part.len() + 1;
        }

        Ok(Self { segments })
    }

    /// The parsed segments, root first.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render the first `n` segments back to a path string.
    #[must_use]
    pub fn prefix(&self, n: usize) -> String {
        render(&self.segments[..n.min(self.segments.len())])
    }
}

fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            Segment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.segments))
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
