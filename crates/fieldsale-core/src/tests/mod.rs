//! Repository-level tests for the client core.
//!
//! - `harness.rs`  - stub commerce API, fault-injecting store, fixtures
//! - `auth.rs`     - login persistence and atomicity, logout, registration
//! - `ordering.rs` - Loading strictly before one terminal per invocation
//! - `orders.rs`   - order listing and the delivery filter
//! - `catalog.rs`  - products, customers, seller catalog, visits, uploads
//! - `user.rs`     - session-derived values
//! - `context.rs`  - startup wiring over a temp directory

pub(crate) mod harness;
