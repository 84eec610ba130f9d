use canteen_app::{
    context::AppContext,
    domain::payments::{PaymentsServiceError, models::GatewayResponse},
    session::Session,
};
use clap::{Args, Subcommand};

use super::{describe, expire_session};

#[derive(Debug, Args)]
pub(crate) struct PayCommand {
    #[command(subcommand)]
    command: PaySubcommand,
}

#[derive(Debug, Subcommand)]
enum PaySubcommand {
    /// Verify a completed gateway payment
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
struct VerifyArgs {
    /// Order that was paid for
    order_id: String,

    /// Gateway order id returned at checkout
    #[arg(long)]
    gateway_order_id: String,

    /// Gateway payment id
    #[arg(long)]
    payment_id: String,

    /// Gateway signature
    #[arg(long)]
    signature: String,
}

pub(crate) async fn run(
    ctx: &AppContext,
    session: &mut Session,
    command: PayCommand,
) -> Result<(), String> {
    let PaySubcommand::Verify(args) = command.command;

    let verification = match ctx
        .payments
        .verify_payment(GatewayResponse {
            order_id: args.order_id,
            gateway_order_id: args.gateway_order_id,
            gateway_payment_id: args.payment_id,
            signature: args.signature,
        })
        .await
    {
        Ok(verification) => verification,
        Err(PaymentsServiceError::Unauthorized) => return Err(expire_session(session).await),
        Err(error) => return Err(format!("failed to verify payment: {}", describe(&error))),
    };

    if verification.verified {
        println!("Payment verified. Your order is confirmed.");

        return Ok(());
    }

    Err(verification
        .message
        .unwrap_or_else(|| "Payment could not be verified.".to_string()))
}
