//! Remote commerce API access for the fieldsale client.
//!
//! This crate provides:
//! - `CommerceApi`, the seam repositories call through
//! - `HttpCommerceApi`, the reqwest implementation used in production
//! - `ApiEnvelope`, the `{code, data, message, status}` response wrapper
//! - Data-transfer shapes for orders, products, customers, visits, and uploads

mod client;
mod envelope;
mod error;
pub mod models;
mod traits;

pub use client::HttpCommerceApi;
pub use envelope::{ApiEnvelope, Confirmation};
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use traits::CommerceApi;

/// Transport status code the server uses for rejected credentials.
pub const UNAUTHORIZED: u16 = 401;
