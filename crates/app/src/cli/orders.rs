use std::io;

use canteen::receipt::write_orders;
use canteen_app::{context::AppContext, domain::orders::OrdersServiceError, session::Session};
use clap::{Args, Subcommand};

use super::{describe, expire_session, require_email};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List your orders
    List,
    /// Cancel an order that has not been prepared yet
    Cancel(CancelArgs),
}

#[derive(Debug, Args)]
struct CancelArgs {
    order_id: String,
}

pub(crate) async fn run(
    ctx: &AppContext,
    session: &mut Session,
    command: OrdersCommand,
) -> Result<(), String> {
    let email = require_email(session)?;

    let orders = match ctx.orders.user_orders(email).await {
        Ok(orders) => orders,
        Err(OrdersServiceError::Unauthorized) => return Err(expire_session(session).await),
        Err(error) => return Err(format!("failed to load orders: {}", describe(&error))),
    };

    let args = match command.command {
        OrdersSubcommand::List => {
            if orders.is_empty() {
                println!("no orders yet");
                return Ok(());
            }

            return write_orders(io::stdout().lock(), &orders).map_err(|error| describe(&error));
        }
        OrdersSubcommand::Cancel(args) => args,
    };

    if let Some(order) = orders.iter().find(|order| order.id == args.order_id)
        && !order.status.can_cancel()
    {
        return Err(format!(
            "Order {} is {} and can no longer be cancelled.",
            order.id, order.status
        ));
    }

    match ctx.orders.cancel_order(args.order_id).await {
        Ok(cancellation) => {
            println!("{}", cancellation.notice());

            Ok(())
        }
        Err(OrdersServiceError::Unauthorized) => Err(expire_session(session).await),
        Err(error) => Err(format!("failed to cancel order: {}", describe(&error))),
    }
}
