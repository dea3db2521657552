//! Parallel validation of independent list items.
//!
//! Screens that render lists (membership plans, notifications) validate
//! each item separately. Items share no mutable state, so validation is
//! embarrassingly parallel; error paths carry the item index, which makes
//! aggregation order-independent.

use rayon::prelude::*;
use serde_json::Value;

use crate::context::ValidationContext;
use crate::error::ErrorReport;
use crate::path::FieldPath;
use crate::schema::ValueValidator;

/// Validates every item of a list against one schema, in parallel.
///
/// Each item is validated at path `[i]`, so its errors are grouped by
/// index in the merged report (see
/// [`ErrorReport::errors_for_index`](crate::ErrorReport::errors_for_index)).
/// Corrupting one item never changes what is reported for another.
///
/// # Example
///
/// ```rust
/// use canonform::{validate_batch, Schema, ValidationContext};
/// use serde_json::json;
///
/// let schema = Schema::object().field("precio", Schema::number().positive());
/// let items = vec![
///     json!({"precio": 10}),
///     json!({"precio": -1}),
///     json!({"precio": 25}),
/// ];
///
/// let report = validate_batch(&schema, &items, &ValidationContext::default());
/// assert!(!report.is_valid());
/// assert!(report.errors_for_index(0).is_valid());
/// assert!(!report.errors_for_index(1).is_valid());
/// ```
pub fn validate_batch<S>(schema: &S, items: &[Value], ctx: &ValidationContext) -> ErrorReport
where
    S: ValueValidator,
{
    let reports: Vec<ErrorReport> = items
        .par_iter()
        .enumerate()
        .map(|(index, item)| {
            let path = FieldPath::root().push_index(index);
            ErrorReport::from_validation(schema.validate_value(item, &path, ctx))
        })
        .collect();

    let mut merged = ErrorReport::empty();
    for report in reports {
        merged.merge(report);
    }
    merged
}
