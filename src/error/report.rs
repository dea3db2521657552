//! Screen-facing error aggregate.
//!
//! [`ErrorReport`] is the advisory output the UI layer consumes: an
//! insertion-ordered path → messages map plus derived aggregates. An empty
//! report means the data validated cleanly; a non-empty one renders as
//! non-blocking warning badges, never as a crash.

use indexmap::IndexMap;
use stillwater::Validation;

use super::SchemaErrors;

/// A path → messages map consumed by the UI layer.
///
/// Validation failure is data, not control flow: a report is produced for
/// every validation pass, and `is_valid()` is simply "no messages".
///
/// # Example
///
/// ```rust
/// use canonform::ErrorReport;
///
/// let mut report = ErrorReport::empty();
/// assert!(report.is_valid());
///
/// report.insert("factura.total", "total mismatch");
/// assert!(!report.is_valid());
/// assert_eq!(report.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorReport {
    by_path: IndexMap<String, Vec<String>>,
}

impl ErrorReport {
    /// Creates an empty (valid) report.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a report from accumulated errors.
    pub fn from_errors(errors: &SchemaErrors) -> Self {
        let mut report = Self::empty();
        for error in errors.iter() {
            report.insert(error.path.to_string(), error.message.clone());
        }
        report
    }

    /// Builds a report from a validation outcome.
    ///
    /// A success yields the empty report; a failure yields one message per
    /// accumulated error, in accumulation order.
    pub fn from_validation<T>(result: Validation<T, SchemaErrors>) -> Self {
        match result {
            Validation::Success(_) => Self::empty(),
            Validation::Failure(errors) => Self::from_errors(&errors),
        }
    }

    /// Adds a message at the given path.
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.by_path.entry(path.into()).or_default().push(message.into());
    }

    /// True when the report carries no messages.
    pub fn is_valid(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Total number of messages across all paths.
    pub fn len(&self) -> usize {
        self.by_path.values().map(Vec::len).sum()
    }

    /// True when the report carries no messages.
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Messages recorded at an exact path, or an empty slice.
    pub fn messages_at(&self, path: &str) -> &[String] {
        self.by_path.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over `(path, messages)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_path.iter().map(|(p, m)| (p.as_str(), m.as_slice()))
    }

    /// Iterates over the distinct paths with at least one message.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.by_path.keys().map(String::as_str)
    }

    /// Absorbs all messages from another report.
    ///
    /// Aggregation is order-independent for validity and counts; messages
    /// at a shared path append after existing ones.
    pub fn merge(&mut self, other: ErrorReport) {
        for (path, messages) in other.by_path {
            self.by_path.entry(path).or_default().extend(messages);
        }
    }

    /// Returns this report with every path prefixed by a section name.
    ///
    /// Used by the composer so per-part reports stay distinguishable after
    /// merging (`payment.monto`, `invoice.total`). Root-path messages land
    /// on the section name itself.
    pub fn prefixed(self, section: &str) -> ErrorReport {
        let mut report = ErrorReport::empty();
        for (path, messages) in self.by_path {
            let prefixed = if path.is_empty() {
                section.to_string()
            } else if path.starts_with('[') {
                format!("{}{}", section, path)
            } else {
                format!("{}.{}", section, path)
            };
            for message in messages {
                report.insert(prefixed.clone(), message);
            }
        }
        report
    }

    /// Extracts the messages belonging to list element `index`.
    ///
    /// List screens validate per item; paths look like `[2].precio`. This
    /// groups a batch report back per entity index so each row can render
    /// its own badge.
    pub fn errors_for_index(&self, index: usize) -> ErrorReport {
        let prefix = format!("[{}]", index);
        let mut report = ErrorReport::empty();
        for (path, messages) in &self.by_path {
            if path.starts_with(&prefix) {
                for message in messages {
                    report.insert(path.clone(), message.clone());
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::path::FieldPath;

    #[test]
    fn test_empty_report_is_valid() {
        let report = ErrorReport::empty();
        assert!(report.is_valid());
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn test_from_validation_success() {
        let result: Validation<i64, SchemaErrors> = Validation::Success(5);
        let report = ErrorReport::from_validation(result);
        assert!(report.is_valid());
    }

    #[test]
    fn test_from_validation_failure() {
        let errors = SchemaErrors::from_vec(vec![
            SchemaError::new(FieldPath::from_field("monto"), "too small"),
            SchemaError::new(FieldPath::from_field("monto"), "wrong type"),
            SchemaError::new(FieldPath::from_field("fecha"), "unparseable"),
        ]);
        let result: Validation<i64, SchemaErrors> = Validation::Failure(errors);
        let report = ErrorReport::from_validation(result);

        assert!(!report.is_valid());
        assert_eq!(report.len(), 3);
        assert_eq!(report.messages_at("monto").len(), 2);
        assert_eq!(report.messages_at("fecha"), &["unparseable".to_string()]);
        assert!(report.messages_at("estado").is_empty());
    }

    #[test]
    fn test_merge() {
        let mut left = ErrorReport::empty();
        left.insert("a", "e1");

        let mut right = ErrorReport::empty();
        right.insert("a", "e2");
        right.insert("b", "e3");

        left.merge(right);
        assert_eq!(left.len(), 3);
        assert_eq!(left.messages_at("a").len(), 2);
        assert_eq!(left.messages_at("b").len(), 1);
    }

    #[test]
    fn test_prefixed() {
        let mut report = ErrorReport::empty();
        report.insert("total", "mismatch");
        report.insert("", "shape error");
        report.insert("[0].precio", "too low");

        let prefixed = report.prefixed("invoice");
        assert_eq!(prefixed.messages_at("invoice.total").len(), 1);
        assert_eq!(prefixed.messages_at("invoice").len(), 1);
        assert_eq!(prefixed.messages_at("invoice[0].precio").len(), 1);
    }

    #[test]
    fn test_errors_for_index() {
        let mut report = ErrorReport::empty();
        report.insert("[0].nombre", "required");
        report.insert("[2].precio", "too low");
        report.insert("[2].precio", "wrong shape");
        report.insert("[12].precio", "too low");

        let second = report.errors_for_index(2);
        assert_eq!(second.len(), 2);
        assert_eq!(second.messages_at("[2].precio").len(), 2);

        // "[12]" must not leak into the report for index 1
        let first = report.errors_for_index(1);
        assert!(first.is_valid());
    }
}
