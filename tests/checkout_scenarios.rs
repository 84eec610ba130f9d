//! End to end checkout scenarios across the cart, eligibility and order modules.

use canteen::{
    cart::{Cart, CartError, CartLine},
    exams::ExamWindow,
    order_errors::{ErrorPayload, OrderErrorKind, classify},
    orders::{CheckoutDetails, Order, PaymentMethod},
    priority::{PriorityField, PriorityReason, PriorityRequest, Role, resolve},
    university_id::{RangeMatch, match_range},
};
use rust_decimal::Decimal;
use serde_json::json;
use testresult::TestResult;

fn line(item_id: &str, name: &str, canteen_id: &str, price: i64) -> CartLine {
    CartLine {
        item_id: item_id.to_string(),
        name: name.to_string(),
        price: Decimal::from(price),
        quantity: 1,
        canteen_id: canteen_id.to_string(),
    }
}

fn data_structures_exam() -> TestResult<ExamWindow> {
    Ok(serde_json::from_value(json!({
        "_id": "exam-ds",
        "examName": "Data Structures",
        "examDate": "2026-10-19",
        "examTime": "10:00",
        "department": "CS",
        "semester": "3",
        "startUniversityId": "22FE05CS050",
        "endUniversityId": "22FE05CS150"
    }))?)
}

#[test]
fn registered_range_scenarios() {
    assert_eq!(
        match_range("22FE05CS101", "22FE05CS050", "22FE05CS150"),
        RangeMatch::WithinRange
    );
    assert!(matches!(
        match_range("22FE05CS201", "22FE05CS050", "22FE05CS150"),
        RangeMatch::OutOfRange(_)
    ));
    assert!(matches!(
        match_range("22FE06CS101", "22FE05CS050", "22FE05CS150"),
        RangeMatch::IncomparableFormat(_)
    ));
}

#[test]
fn switching_canteens_requires_confirmation() -> TestResult {
    let mut cart = Cart::new();

    cart.add(line("a", "Tea", "x", 10))?;

    let refused = cart.add(line("b", "Dosa", "y", 40));

    assert!(
        matches!(refused, Err(CartError::CanteenConflict { .. })),
        "expected a canteen conflict, got {refused:?}"
    );
    assert_eq!(cart.lines().len(), 1);
    assert!(cart.line("a").is_some());

    cart.replace_with(line("b", "Dosa", "y", 40))?;

    assert_eq!(cart.lines().len(), 1);
    assert!(cart.line("b").is_some());

    Ok(())
}

#[test]
fn eligible_exam_priority_order_is_built() -> TestResult {
    let exams = [data_structures_exam()?];
    let mut cart = Cart::new();

    cart.add(line("a", "Tea", "x", 10))?;
    cart.add(line("b", "Samosa", "x", 15))?;

    let priority = PriorityRequest {
        enabled: true,
        reason: Some(PriorityReason::Exam),
        details: "Exam at 10".to_string(),
        exam_id: Some("exam-ds".to_string()),
    };

    let eligibility = resolve(Role::Student, Some("22fe05cs101"), &priority, &exams);

    assert!(eligibility.allowed(), "errors: {:?}", eligibility.errors());

    let order = Order::from_cart(
        &cart,
        CheckoutDetails {
            payment_method: PaymentMethod::Card,
            priority,
            ..CheckoutDetails::default()
        },
    )?;

    assert_eq!(order.total_amount, Decimal::from(25));
    assert!(order.payment_method.requires_gateway());

    Ok(())
}

#[test]
fn out_of_range_student_is_stopped_before_submission() -> TestResult {
    let exams = [data_structures_exam()?];

    let priority = PriorityRequest {
        enabled: true,
        reason: Some(PriorityReason::Exam),
        details: "Exam at 10".to_string(),
        exam_id: Some("exam-ds".to_string()),
    };

    let eligibility = resolve(Role::Student, Some("22FE05CS201"), &priority, &exams);

    assert!(!eligibility.allowed());
    assert!(eligibility.error(PriorityField::ExamId).is_some());

    Ok(())
}

#[test]
fn unavailable_items_leave_the_cart_untouched() -> TestResult {
    let mut cart = Cart::new();

    cart.add(line("s", "Samosa", "x", 15))?;

    let before = cart.clone();
    let payload: ErrorPayload = serde_json::from_value(json!({
        "errorType": "UNAVAILABLE_ITEMS_ERROR",
        "unavailableItems": [{ "name": "Samosa" }]
    }))?;

    let error = classify(Some(400), &payload);

    assert_eq!(error.kind(), OrderErrorKind::UnavailableItemsError);
    assert!(error.to_string().contains("Samosa"));
    assert_eq!(cart, before);

    Ok(())
}
