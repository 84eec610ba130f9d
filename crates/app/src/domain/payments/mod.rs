//! Payments
//!
//! The gateway checkout itself happens outside this client. We only create the
//! gateway order and forward the gateway's signed response for verification.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::PaymentsServiceError;
pub use service::*;
