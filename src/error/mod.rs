//! Error types: single violations, accumulated collections, and the
//! screen-facing [`ErrorReport`].

mod report;
mod schema_error;

pub use report::ErrorReport;
pub use schema_error::{SchemaError, SchemaErrors};
