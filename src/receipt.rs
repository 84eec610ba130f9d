//! Receipts
//!
//! Terminal tables for carts, menus and order history.

use std::io;

use rusty_money::Money;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, currency},
    menu::{Canteen, MenuItem},
    orders::OrderSummary,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The output could not be written.
    #[error("failed to write receipt")]
    Io(#[from] io::Error),
}

/// Write the cart as a table followed by its total.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), ReceiptError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Item", "ID", "Qty", "Price", "Total"]);

    for line in cart.lines() {
        builder.push_record([
            line.name.clone(),
            line.item_id.clone(),
            line.quantity.to_string(),
            Money::from_decimal(line.price, currency()).to_string(),
            Money::from_decimal(line.line_total(), currency()).to_string(),
        ]);
    }

    write_table(&mut out, builder, Some(2))?;

    if let Some(canteen_id) = cart.canteen_id() {
        writeln!(out, " Canteen: {canteen_id}")?;
    }

    writeln!(
        out,
        " \x1b[1mTotal:\x1b[0m {} ({} items)\n",
        cart.total_money(),
        cart.item_count()
    )?;

    Ok(())
}

/// Write a canteen's menu.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the output cannot be written.
pub fn write_menu(mut out: impl io::Write, items: &[MenuItem]) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "ID", "Category", "Available", "Price"]);

    for item in items {
        builder.push_record([
            item.name.clone(),
            item.id.clone(),
            item.category.clone(),
            if item.available { "yes" } else { "no" }.to_string(),
            Money::from_decimal(item.price, currency()).to_string(),
        ]);
    }

    write_table(&mut out, builder, Some(4))
}

/// Write the list of canteens.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the output cannot be written.
pub fn write_canteens(mut out: impl io::Write, canteens: &[Canteen]) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Canteen", "ID", "Location", "Open"]);

    for canteen in canteens {
        builder.push_record([
            canteen.name.clone(),
            canteen.id.clone(),
            canteen.location.clone(),
            if canteen.is_open { "yes" } else { "no" }.to_string(),
        ]);
    }

    write_table(&mut out, builder, None)
}

/// Write the user's order history.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the output cannot be written.
pub fn write_orders(mut out: impl io::Write, orders: &[OrderSummary]) -> Result<(), ReceiptError> {
    if orders.is_empty() {
        writeln!(out, "You have not placed any orders yet.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Order", "Placed", "Status", "Priority", "Items", "Total"]);

    for order in orders {
        let items = order
            .items
            .iter()
            .map(|line| format!("{} x{}", line.name, line.quantity))
            .collect::<Vec<_>>()
            .join(", ");

        builder.push_record([
            order.id.clone(),
            order
                .created_at
                .map(|placed| placed.strftime("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            order.status.to_string(),
            if order.is_priority { "yes" } else { "" }.to_string(),
            items,
            order.total_money().to_string(),
        ]);
    }

    write_table(&mut out, builder, Some(5))
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    first_money_column: Option<usize>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    if let Some(column) = first_money_column {
        table.modify(Columns::new(column..), Alignment::right());
    }

    writeln!(out, "\n{table}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        cart::fixtures::line,
        orders::{OrderLine, OrderStatus, PaymentMethod},
    };

    use super::*;

    fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<(), ReceiptError>) -> TestResult<String> {
        let mut out = Vec::new();

        write(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn cart_lists_lines_and_total() -> TestResult {
        let cart = Cart::from_lines([line("tea", "x", 10, 2), line("samosa", "x", 15, 1)])?;

        let output = render(|out| write_cart(out, &cart))?;

        assert!(output.contains("tea"));
        assert!(output.contains("samosa"));
        assert!(output.contains(&cart.total_money().to_string()));
        assert!(output.contains("(3 items)"));

        Ok(())
    }

    #[test]
    fn empty_cart_says_so() -> TestResult {
        let output = render(|out| write_cart(out, &Cart::new()))?;

        assert_eq!(output, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn orders_show_status_and_priority() -> TestResult {
        let orders = [OrderSummary {
            id: "o1".to_string(),
            canteen_id: "x".to_string(),
            items: vec![OrderLine {
                name: "Tea".to_string(),
                price: Decimal::from(10),
                quantity: 2,
            }],
            total_amount: Decimal::from(20),
            status: OrderStatus::Preparing,
            is_priority: true,
            payment_method: PaymentMethod::Cash,
            created_at: Some(Timestamp::UNIX_EPOCH),
        }];

        let output = render(|out| write_orders(out, &orders))?;

        assert!(output.contains("o1"));
        assert!(output.contains("preparing"));
        assert!(output.contains("Tea x2"));
        assert!(output.contains("1970-01-01 00:00"));

        Ok(())
    }

    #[test]
    fn menu_marks_unavailable_items() -> TestResult {
        let items = [MenuItem {
            id: "m1".to_string(),
            name: "Vada".to_string(),
            price: Decimal::from(20),
            category: "Snacks".to_string(),
            canteen_id: "x".to_string(),
            available: false,
        }];

        let output = render(|out| write_menu(out, &items))?;

        assert!(output.contains("Vada"));
        assert!(output.contains("no"));

        Ok(())
    }
}
