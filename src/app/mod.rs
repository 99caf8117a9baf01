pub mod billing_app;

pub use billing_app::{check_rate_drafts, BillingApp};
