use std::io;

use canteen::receipt::{write_canteens, write_menu};
use canteen_app::context::AppContext;
use clap::Args;

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Canteen whose menu to show
    canteen_id: String,
}

pub(crate) async fn canteens(ctx: &AppContext) -> Result<(), String> {
    let canteens = ctx
        .menus
        .list_canteens()
        .await
        .map_err(|error| format!("failed to load canteens: {}", describe(&error)))?;

    write_canteens(io::stdout().lock(), &canteens).map_err(|error| describe(&error))
}

pub(crate) async fn run(ctx: &AppContext, args: MenuArgs) -> Result<(), String> {
    let items = ctx
        .menus
        .menu(args.canteen_id)
        .await
        .map_err(|error| format!("failed to load menu: {}", describe(&error)))?;

    write_menu(io::stdout().lock(), &items).map_err(|error| describe(&error))
}
