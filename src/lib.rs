//! Canteen
//!
//! Domain rules for a campus canteen ordering client: single-canteen carts, university
//! ID range matching, priority order eligibility and order error classification.

pub mod cart;
pub mod exams;
pub mod menu;
pub mod order_errors;
pub mod orders;
pub mod priority;
pub mod receipt;
pub mod submission;
pub mod university_id;
