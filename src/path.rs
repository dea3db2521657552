//! Error-path representation for locating values in nested entities.
//!
//! [`FieldPath`] renders locations like `membresias[2].precio` so error
//! reports can point at the exact spot in a nested payload. Paths are
//! immutable; builder methods return new paths.

use std::fmt::{self, Display};

/// A segment of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field access (e.g., `precio`, `horaInicio`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[2]`)
    Index(usize),
}

/// A path to a value in a nested entity.
///
/// Field segments render dotted, index segments render bracketed. The
/// notation is deterministic so tests can assert exact error locations.
///
/// # Example
///
/// ```rust
/// use canonform::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("membresias")
///     .push_index(2)
///     .push_field("precio");
///
/// assert_eq!(path.to_string(), "membresias[2].precio");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_single_field() {
        let path = FieldPath::root().push_field("monto");
        assert_eq!(path.to_string(), "monto");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_single_index() {
        let path = FieldPath::root().push_index(0);
        assert_eq!(path.to_string(), "[0]");
    }

    #[test]
    fn test_nested_fields() {
        let path = FieldPath::root().push_field("factura").push_field("total");
        assert_eq!(path.to_string(), "factura.total");
    }

    #[test]
    fn test_field_with_index() {
        let path = FieldPath::root()
            .push_field("membresias")
            .push_index(2)
            .push_field("precio");
        assert_eq!(path.to_string(), "membresias[2].precio");
    }

    #[test]
    fn test_path_immutability() {
        let base = FieldPath::root().push_field("notificaciones");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "notificaciones");
        assert_eq!(path_a.to_string(), "notificaciones[0]");
        assert_eq!(path_b.to_string(), "notificaciones[1]");
    }

    #[test]
    fn test_from_field() {
        let path = FieldPath::from_field("estado");
        assert_eq!(path.to_string(), "estado");
    }

    #[test]
    fn test_equality() {
        let path1 = FieldPath::root().push_field("a").push_index(0);
        let path2 = FieldPath::root().push_field("a").push_index(0);
        let path3 = FieldPath::root().push_field("a").push_index(1);

        assert_eq!(path1, path2);
        assert_ne!(path1, path3);
    }

    #[test]
    fn test_segments_iterator() {
        let path = FieldPath::root().push_field("a").push_index(1);
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], &PathSegment::Field("a".to_string()));
        assert_eq!(segments[1], &PathSegment::Index(1));
    }
}
