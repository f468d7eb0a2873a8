//! Typed HTTP client for the Tourdesk API.
//!
//! - [`client::ApiClient`] -- base URL, bearer token and response unwrapping.
//! - [`surveys`] -- survey management, responses and the public form.
//! - [`pricing_insights`] -- per-fleet pricing insight cache.

pub mod client;
pub mod models;
pub mod pricing_insights;
pub mod surveys;

pub use client::{ApiClient, ClientError};
pub use pricing_insights::{group_by_vehicle, PricingInsightsCache};
