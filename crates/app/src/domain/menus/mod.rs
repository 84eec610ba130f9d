//! Canteens and menus

pub mod errors;
pub mod service;

pub use errors::MenusServiceError;
pub use service::*;
