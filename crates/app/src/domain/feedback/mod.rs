//! Feedback

pub mod errors;
pub mod models;
pub mod service;

pub use errors::FeedbackServiceError;
pub use service::*;
