use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use canteen::{cart::CartError, receipt::write_cart};
use canteen_app::{
    cart_store::{CartStore, CartStoreError},
    context::AppContext,
    domain::carts::CartsServiceError,
    session::Session,
};
use clap::{Args, Subcommand};

use super::{describe, expire_session};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart
    Show,
    /// Add a menu item
    Add(AddArgs),
    /// Change an item's quantity; zero removes it
    Update(UpdateArgs),
    /// Remove an item
    Remove(RemoveArgs),
    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Canteen selling the item
    #[arg(long)]
    canteen: String,

    /// Menu item id
    item_id: String,

    #[arg(long, default_value_t = 1)]
    quantity: u32,

    /// Clear a cart holding another canteen's items without asking
    #[arg(long)]
    replace: bool,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    item_id: String,
    quantity: u32,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    item_id: String,
}

pub(crate) async fn run(
    ctx: &AppContext,
    session: &mut Session,
    command: CartCommand,
) -> Result<(), String> {
    let mut store = match CartStore::open(session, Arc::clone(&ctx.carts)).await {
        Ok(store) => store,
        Err(CartStoreError::Load(CartsServiceError::Unauthorized)) => {
            return Err(expire_session(session).await);
        }
        Err(error) => return Err(describe(&error)),
    };

    let result = match command.command {
        CartSubcommand::Show => Ok(()),
        CartSubcommand::Add(args) => add(ctx, &mut store, args).await,
        CartSubcommand::Update(args) => store
            .update_quantity(&args.item_id, args.quantity)
            .await
            .map_err(|error| report(&store, &error)),
        CartSubcommand::Remove(args) => store
            .remove(&args.item_id)
            .await
            .map_err(|error| report(&store, &error)),
        CartSubcommand::Clear => store.clear().await.map_err(|error| report(&store, &error)),
    };

    result?;

    write_cart(io::stdout().lock(), store.cart()).map_err(|error| describe(&error))
}

async fn add(ctx: &AppContext, store: &mut CartStore, args: AddArgs) -> Result<(), String> {
    let menu = ctx
        .menus
        .menu(args.canteen.clone())
        .await
        .map_err(|error| format!("failed to load menu: {}", describe(&error)))?;

    let item = menu
        .iter()
        .find(|item| item.id == args.item_id)
        .ok_or_else(|| format!("no item {} on canteen {}'s menu", args.item_id, args.canteen))?;

    let line = item
        .cart_line(args.quantity)
        .map_err(|error| error.to_string())?;

    match store.add(line.clone()).await {
        Ok(()) => Ok(()),
        Err(CartStoreError::Cart(conflict @ CartError::CanteenConflict { .. })) => {
            if !args.replace && !confirm(&format!("{conflict} Clear the cart and add {}?", item.name))? {
                return Err("cart unchanged".to_string());
            }

            store
                .replace_with(line)
                .await
                .map_err(|error| report(store, &error))
        }
        Err(error) => Err(report(store, &error)),
    }
}

/// Show the cart the store fell back to, then the error.
fn report(store: &CartStore, error: &CartStoreError) -> String {
    if matches!(error, CartStoreError::SyncFailed(_)) {
        let _written = write_cart(io::stdout().lock(), store.cart());
    }

    describe(error)
}

fn confirm(question: &str) -> Result<bool, String> {
    let mut stdout = io::stdout().lock();

    write!(stdout, "{question} [y/N] ").map_err(|error| error.to_string())?;
    stdout.flush().map_err(|error| error.to_string())?;

    let mut answer = String::new();

    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|error| error.to_string())?;

    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
