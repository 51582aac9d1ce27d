//! Client core for the fieldsale field-sales app.
//!
//! This crate provides:
//! - **`ResultEnvelope`** and **`OperationSlot`**: the loading/success/failure
//!   stream every operation publishes
//! - **Error classification** into user-facing categories
//! - **Repositories** for auth, orders, catalog, customers, visits,
//!   recommendations and session-derived user data
//! - **`ClientContext`**: startup wiring of store, session and transport

pub mod classifier;
mod context;
pub mod delivery;
mod envelope;
mod error;
pub mod operation_fsm;
pub mod repositories;

#[cfg(test)]
mod tests;

pub use classifier::{classify, ErrorCategory};
pub use context::ClientContext;
pub use envelope::{OperationFailure, OperationSlot, ResultEnvelope};
pub use error::{ClientError, ClientResult};
pub use operation_fsm::OperationPhase;
