//! Property paths for addressing fields within a record

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Path of a property within a record
///
/// Used as the key of change sets and bag lookups. Written as dot-separated
/// segments, e.g. `m_Shader` or `m_Colors.Array.data[0]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    /// Create path from a single segment
    #[inline]
    #[must_use]
    pub fn single(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }
}

impl Display for PropertyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

fn valid_segment_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '[' | ']')
}

impl FromStr for PropertyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<String> = s
            .split('.')
            .map(|seg| {
                if seg.is_empty() {
                    Err(PathError::EmptySegment)
                } else if !seg.chars().all(valid_segment_char) {
                    Err(PathError::InvalidSegment(seg.to_string()))
                } else {
                    Ok(seg.to_string())
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self(segments))
    }
}

impl TryFrom<String> for PropertyPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PropertyPath> for String {
    fn from(path: PropertyPath) -> Self {
        path.to_string()
    }
}

/// Errors related to property paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Empty path or empty segment
    #[error("path contains empty segment")]
    EmptySegment,

    /// Invalid segment characters
    #[error("invalid segment: {0} (must be alphanumeric, underscore or brackets)")]
    InvalidSegment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_segment_matches_parsed() {
        let path = PropertyPath::single("m_Shader");
        assert_eq!(path, "m_Shader".parse().unwrap());
        assert_eq!(path.to_string(), "m_Shader");
    }

    #[test]
    fn display_roundtrips_array_segments() {
        let path: PropertyPath = "m_Colors.Array.data[0]".parse().unwrap();
        assert_eq!(path.to_string(), "m_Colors.Array.data[0]");
        assert_ne!(path, PropertyPath::single("m_Colors.Array.data[0]"));
    }

    #[test]
    fn empty_path_and_empty_segment_are_rejected() {
        assert_eq!("".parse::<PropertyPath>(), Err(PathError::EmptySegment));
        assert_eq!("a..b".parse::<PropertyPath>(), Err(PathError::EmptySegment));
    }

    #[test]
    fn invalid_chars_are_rejected() {
        let result: Result<PropertyPath, _> = "a.b-c".parse();
        assert!(matches!(result, Err(PathError::InvalidSegment(_))));
    }

    #[test]
    fn serializes_as_string() {
        let path: PropertyPath = "m_Floats._Glossiness".parse().unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"m_Floats._Glossiness\"");

        let back: PropertyPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);

        assert!(serde_json::from_str::<PropertyPath>("\"bad path\"").is_err());
    }
}
