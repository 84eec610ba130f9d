//! Exams

pub mod errors;
pub mod service;

pub use errors::ExamsServiceError;
pub use service::*;
