//! Property tests for the ID matcher, the cart invariant and the eligibility resolver.

use canteen::{
    cart::{Cart, CartLine},
    exams::ExamWindow,
    priority::{PriorityField, PriorityReason, PriorityRequest, Role, resolve},
    university_id::{RangeMatch, match_range},
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn id(cohort: &str, number: u16) -> String {
    format!("{cohort}{number:03}")
}

fn cohort() -> impl Strategy<Value = String> {
    "[0-9]{2}[A-Z]{2}[0-9]{2}[A-Z]{2,3}"
}

#[derive(Debug, Clone)]
enum CartOp {
    Add { item: u8, canteen: u8, quantity: u32 },
    Update { item: u8, quantity: u32 },
    Remove { item: u8 },
    Replace { item: u8, canteen: u8 },
}

fn cart_op() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        (0..5u8, 0..3u8, 1..4u32).prop_map(|(item, canteen, quantity)| CartOp::Add {
            item,
            canteen,
            quantity
        }),
        (0..5u8, 0..4u32).prop_map(|(item, quantity)| CartOp::Update { item, quantity }),
        (0..5u8).prop_map(|item| CartOp::Remove { item }),
        (0..5u8, 0..3u8).prop_map(|(item, canteen)| CartOp::Replace { item, canteen }),
    ]
}

fn cart_line(item: u8, canteen: u8, quantity: u32) -> CartLine {
    CartLine {
        item_id: format!("{canteen}-{item}"),
        name: format!("item {item}"),
        price: Decimal::from(10 + u32::from(item)),
        quantity,
        canteen_id: format!("canteen-{canteen}"),
    }
}

fn item_id(cart: &Cart, item: u8) -> String {
    let canteen = cart
        .canteen_id()
        .and_then(|canteen| canteen.strip_prefix("canteen-"))
        .unwrap_or("0");

    format!("{canteen}-{item}")
}

proptest! {
    #[test]
    fn same_cohort_ids_compare_by_number(
        cohort in cohort(),
        user in 0..1000u16,
        start in 0..1000u16,
        end in 0..1000u16,
    ) {
        let verdict = match_range(&id(&cohort, user), &id(&cohort, start), &id(&cohort, end));

        prop_assert_eq!(verdict.is_within(), start <= user && user <= end);
        prop_assert!(!matches!(verdict, RangeMatch::IncomparableFormat(_)));
    }

    #[test]
    fn different_cohorts_are_incomparable(
        user_cohort in cohort(),
        range_cohort in cohort(),
        user in 0..1000u16,
        start in 0..1000u16,
        end in 0..1000u16,
    ) {
        prop_assume!(user_cohort != range_cohort);

        let verdict = match_range(
            &id(&user_cohort, user),
            &id(&range_cohort, start),
            &id(&range_cohort, end),
        );

        prop_assert!(matches!(verdict, RangeMatch::IncomparableFormat(_)), "got {:?}", verdict);
    }

    #[test]
    fn malformed_ids_compare_lexicographically(
        user in "[A-Z]{1,6}",
        start in "[A-Z]{1,6}",
        end in "[A-Z]{1,6}",
    ) {
        let verdict = match_range(&user, &start, &end);

        prop_assert_eq!(verdict.is_within(), start <= user && user <= end);
    }

    #[test]
    fn cart_never_spans_canteens(ops in prop::collection::vec(cart_op(), 0..40)) {
        let mut cart = Cart::new();

        for op in ops {
            let _result = match op {
                CartOp::Add { item, canteen, quantity } => cart.add(cart_line(item, canteen, quantity)),
                CartOp::Update { item, quantity } => {
                    let item_id = item_id(&cart, item);
                    cart.update_quantity(&item_id, quantity)
                }
                CartOp::Remove { item } => {
                    let item_id = item_id(&cart, item);
                    cart.remove(&item_id).map(|_line| ())
                }
                CartOp::Replace { item, canteen } => cart.replace_with(cart_line(item, canteen, 1)),
            };

            let canteen = cart.canteen_id().map(str::to_string);

            prop_assert!(cart.lines().iter().all(|line| Some(&line.canteen_id) == canteen.as_ref()));
            prop_assert!(cart.lines().iter().all(|line| line.quantity > 0));
        }
    }

    #[test]
    fn disabled_priority_is_always_allowed(
        faculty in any::<bool>(),
        reason in prop::option::of(prop_oneof![
            Just(PriorityReason::Exam),
            Just(PriorityReason::Faculty),
            Just(PriorityReason::Medical),
            Just(PriorityReason::Other),
        ]),
        details in ".{0,12}",
        exam_id in prop::option::of("[a-z]{1,4}"),
    ) {
        let role = if faculty { Role::Faculty } else { Role::Student };
        let request = PriorityRequest { enabled: false, reason, details, exam_id };

        let eligibility = resolve(role, None, &request, &[]);

        prop_assert!(eligibility.allowed());
        prop_assert!(eligibility.errors().is_empty());
    }

    #[test]
    fn exam_priority_without_exams_is_never_allowed(
        faculty in any::<bool>(),
        details in ".{0,12}",
        exam_id in prop::option::of("[a-z]{1,4}"),
    ) {
        let role = if faculty { Role::Faculty } else { Role::Student };
        let request = PriorityRequest {
            enabled: true,
            reason: Some(PriorityReason::Exam),
            details,
            exam_id,
        };
        let no_exams: [ExamWindow; 0] = [];

        let eligibility = resolve(role, Some("22FE05CS101"), &request, &no_exams);

        prop_assert!(!eligibility.allowed());
        prop_assert!(eligibility.error(PriorityField::ExamId).is_some());
    }
}
