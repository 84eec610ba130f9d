//! Test Helpers

use canteen::{
    cart::{Cart, CartLine},
    exams::ExamWindow,
};
use rust_decimal::Decimal;

pub(crate) fn cart_line(item_id: &str, canteen_id: &str, price: i64, quantity: u32) -> CartLine {
    CartLine {
        item_id: item_id.to_string(),
        name: item_id.to_string(),
        price: Decimal::from(price),
        quantity,
        canteen_id: canteen_id.to_string(),
    }
}

pub(crate) fn cart_of(lines: impl IntoIterator<Item = CartLine>) -> Cart {
    Cart::from_lines(lines).expect("test cart lines should share a canteen")
}

pub(crate) fn exam(exam_id: &str, start: &str, end: &str) -> ExamWindow {
    ExamWindow {
        exam_id: exam_id.to_string(),
        exam_name: format!("Exam {exam_id}"),
        exam_date: "2026-10-19".to_string(),
        exam_time: "10:00".to_string(),
        department: "CS".to_string(),
        semester: "3".to_string(),
        start_university_id: start.to_string(),
        end_university_id: end.to_string(),
    }
}
