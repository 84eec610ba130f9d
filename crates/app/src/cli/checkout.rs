use std::sync::Arc;

use canteen::{
    orders::{CheckoutDetails, PaymentMethod},
    priority::{PriorityReason, PriorityRequest},
};
use canteen_app::{
    cart_store::{CartStore, CartStoreError},
    checkout::{Checkout, CheckoutOutcome, PlacedOrder},
    context::AppContext,
    domain::carts::CartsServiceError,
    session::Session,
};
use clap::Args;

use super::{describe, expire_session, require_email};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// cash, card or upi
    #[arg(long, default_value = "cash")]
    payment: PaymentMethod,

    /// Request priority: exam, faculty, medical or other
    #[arg(long)]
    priority_reason: Option<PriorityReason>,

    /// Why the order needs priority
    #[arg(long, default_value = "")]
    priority_details: String,

    /// Exam the priority request is for
    #[arg(long)]
    exam_id: Option<String>,

    /// Delivery address; pickup when omitted
    #[arg(long, default_value = "")]
    address: String,

    /// Notes for the kitchen
    #[arg(long, default_value = "")]
    instructions: String,
}

impl From<CheckoutArgs> for CheckoutDetails {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            payment_method: args.payment,
            priority: PriorityRequest {
                enabled: args.priority_reason.is_some(),
                reason: args.priority_reason,
                details: args.priority_details,
                exam_id: args.exam_id,
            },
            delivery_address: args.address,
            special_instructions: args.instructions,
        }
    }
}

pub(crate) async fn run(
    ctx: &AppContext,
    session: &mut Session,
    args: CheckoutArgs,
) -> Result<(), String> {
    require_email(session)?;

    let mut store = match CartStore::open(session, Arc::clone(&ctx.carts)).await {
        Ok(store) => store,
        Err(CartStoreError::Load(CartsServiceError::Unauthorized)) => {
            return Err(expire_session(session).await);
        }
        Err(error) => return Err(describe(&error)),
    };

    let outcome = Checkout::new(ctx)
        .submit(session, &mut store, args.into())
        .await
        .map_err(|error| describe(&error))?;

    match outcome {
        CheckoutOutcome::Placed(placed) => {
            println!("{}", placed.notice());

            if placed.payment_method.requires_gateway() {
                start_payment(ctx, &placed).await;
            }

            Ok(())
        }
        CheckoutOutcome::EmptyCart => Err("Your cart is empty.".to_string()),
        CheckoutOutcome::Invalid(eligibility) => Err(eligibility
            .errors()
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("\n")),
        CheckoutOutcome::Rejected(rejection) if rejection.forces_logout() => {
            Err(expire_session(session).await)
        }
        CheckoutOutcome::Rejected(rejection) => Err(match rejection.field() {
            Some(field) => format!("{field}: {rejection}"),
            None => rejection.to_string(),
        }),
        CheckoutOutcome::Unconfirmed => Err(CheckoutOutcome::UNCONFIRMED_NOTICE.to_string()),
        CheckoutOutcome::AlreadySubmitting => {
            Err("An order is already being submitted.".to_string())
        }
    }
}

async fn start_payment(ctx: &AppContext, placed: &PlacedOrder) {
    match ctx
        .payments
        .create_payment_order(placed.order_id.clone())
        .await
    {
        Ok(handle) => {
            println!("gateway_order_id: {}", handle.gateway_order_id);
            println!("amount: {}", handle.amount_money());

            if let Some(key) = handle.key {
                println!("gateway_key: {key}");
            }

            println!(
                "complete the payment, then run `canteen pay verify {}`",
                placed.order_id
            );
        }
        Err(error) => eprintln!(
            "Order placed but the payment could not be started: {}",
            describe(&error)
        ),
    }
}
