use std::error::Error;

use canteen::order_errors::FORCED_LOGOUT_DELAY;
use canteen_app::{
    config::{AppConfig, LoggingConfig},
    context::AppContext,
    session::Session,
};
use clap::{Parser, Subcommand};

mod cart;
mod checkout;
mod exams;
mod feedback;
mod menu;
mod orders;
mod pay;

#[derive(Debug, Parser)]
#[command(name = "canteen", about = "Campus canteen ordering", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List canteens
    Canteens,
    /// Show a canteen's menu
    Menu(menu::MenuArgs),
    Cart(cart::CartCommand),
    /// List exams in the next 24 hours
    Exams,
    /// Check a university ID against a registered range
    IdCheck(exams::IdCheckArgs),
    /// Place an order for the cart
    Checkout(checkout::CheckoutArgs),
    Orders(orders::OrdersCommand),
    Pay(pay::PayCommand),
    Feedback(feedback::FeedbackCommand),
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let ctx = AppContext::from_config(&self.config.api).map_err(|error| describe(&error))?;
        let mut session = Session::from_config(&self.config.api, &self.config.session);

        match self.command {
            Commands::Canteens => menu::canteens(&ctx).await,
            Commands::Menu(args) => menu::run(&ctx, args).await,
            Commands::Cart(command) => cart::run(&ctx, &mut session, command).await,
            Commands::Exams => exams::list(&ctx).await,
            Commands::IdCheck(args) => exams::id_check(&args),
            Commands::Checkout(args) => checkout::run(&ctx, &mut session, args).await,
            Commands::Orders(command) => orders::run(&ctx, &mut session, command).await,
            Commands::Pay(command) => pay::run(&ctx, &mut session, command).await,
            Commands::Feedback(command) => feedback::run(&ctx, &mut session, command).await,
        }
    }
}

/// An error and its sources on one line.
fn describe(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}

fn require_email(session: &Session) -> Result<String, String> {
    match (session.is_authenticated(), session.email()) {
        (true, Some(email)) => Ok(email.to_string()),
        _ => Err("Please log in first: set CANTEEN_API_TOKEN and CANTEEN_USER_EMAIL.".to_string()),
    }
}

/// Sign the user out after a short pause so the message can be read.
///
/// The token comes from configuration, so the user has to replace it before the
/// next command.
async fn expire_session(session: &mut Session) -> String {
    eprintln!("Your session has expired.");

    tokio::time::sleep(FORCED_LOGOUT_DELAY).await;

    session.logout();

    LOGIN_AGAIN.to_string()
}

const LOGIN_AGAIN: &str = "Please log in again: set a fresh CANTEEN_API_TOKEN (or pass --api-token), \
     or unset it to continue signed out.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_session_points_at_the_token_setting() {
        assert!(LOGIN_AGAIN.contains("CANTEEN_API_TOKEN"), "{LOGIN_AGAIN}");
        assert!(LOGIN_AGAIN.contains("--api-token"), "{LOGIN_AGAIN}");
    }
}
