//! Canteen API Concerns

pub mod carts;
pub mod exams;
pub mod feedback;
pub mod menus;
pub mod orders;
pub mod payments;
