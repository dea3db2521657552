//! Built-in marketplace entity profiles.
//!
//! The shapes the app validates independently: transactions (with their
//! reservation, payment, and invoice sub-entities), memberships,
//! notifications, earnings summaries, and withdrawal requests. Each
//! entity gets one [`EntityProfile`](crate::EntityProfile) pairing its
//! normalization spec with its schema; specs and schemas are also
//! exported separately for callers that need only one half.

mod earnings;
mod membership;
mod notification;
mod transaction;
mod user;
mod withdrawal;

pub use earnings::{earnings_profile, earnings_schema, earnings_spec};
pub use membership::{membership_profile, membership_schema, membership_spec, precio_schema};
pub use notification::{notification_profile, notification_schema, notification_spec};
pub use transaction::{
    invoice_profile, invoice_schema, invoice_spec, payment_profile, payment_schema, payment_spec,
    reservation_profile, reservation_schema, reservation_spec, transaction_composer,
    transaction_profile, transaction_schema, transaction_spec,
};
pub use user::{user_profile, user_schema, user_spec};
pub use withdrawal::{
    withdrawal_gate, withdrawal_profile, withdrawal_schema, withdrawal_spec, MAX_WITHDRAWAL,
    MIN_WITHDRAWAL,
};
