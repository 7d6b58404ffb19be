//! Vertex identity.

use std::borrow::Borrow;
use std::fmt;

/// A graph vertex.
///
/// Identity and equality are defined solely by the identifier string. Vertices are immutable
/// once created; cloning yields an independent value with the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vertex(String);

impl Vertex {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of auto-generated ids (`"V12"` -> `12`).
    ///
    /// Ids without the `V` prefix are accepted when they are purely numeric.
    pub fn numeric_suffix(&self) -> Option<u64> {
        let digits = self.0.strip_prefix('V').unwrap_or(&self.0);
        digits.parse::<u64>().ok()
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Vertex {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Vertex {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for Vertex {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::Vertex;

    #[test]
    fn equality_is_by_id() {
        assert_eq!(Vertex::new("V1"), Vertex::from("V1".to_string()));
        assert_ne!(Vertex::new("V1"), Vertex::new("V2"));
    }

    #[test]
    fn numeric_suffix_strips_the_v_prefix() {
        assert_eq!(Vertex::new("V12").numeric_suffix(), Some(12));
        assert_eq!(Vertex::new("7").numeric_suffix(), Some(7));
        assert_eq!(Vertex::new("hub").numeric_suffix(), None);
        assert_eq!(Vertex::new("V").numeric_suffix(), None);
    }
}
