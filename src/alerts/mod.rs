//! Weather-alert pipeline
//!
//! The classifier, matcher, and aggregator are pure functions over fetched
//! forecast data; [`service::AlertService`] wires them to the (impure)
//! forecast provider.

pub mod classify;
pub mod matcher;
pub mod service;
pub mod summary;

pub use classify::{Classification, classify};
pub use matcher::match_travel_days;
pub use service::{AlertReport, AlertService};
pub use summary::summarize;
