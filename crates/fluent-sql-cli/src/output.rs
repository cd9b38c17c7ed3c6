//! Table rendering for command output.

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{Product, User};

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold).fg(Color::Cyan))
        .collect()
}

fn table(names: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(names));
    table
}

fn or_dash(value: Option<i64>) -> String {
    value.map_or_else(|| String::from("-"), |v| v.to_string())
}

/// Renders users as an `ID | Name | Email | Age` table.
pub fn users_table(users: &[User]) -> Table {
    let mut table = table(&["ID", "Name", "Email", "Age"]);
    for user in users {
        table.add_row(vec![
            Cell::new(user.id).fg(Color::Yellow),
            Cell::new(&user.name),
            Cell::new(&user.email),
            Cell::new(or_dash(user.age)),
        ]);
    }
    table
}

/// Renders products as an `ID | Name | Price | Stock` table.
pub fn products_table(products: &[Product]) -> Table {
    let mut table = table(&["ID", "Name", "Price", "Stock"]);
    for product in products {
        table.add_row(vec![
            Cell::new(product.id).fg(Color::Yellow),
            Cell::new(&product.name),
            Cell::new(format!("{:.2}", product.price)).fg(Color::Green),
            Cell::new(or_dash(product.stock)),
        ]);
    }
    table
}

/// Renders one user as a two-column field/value table.
pub fn user_details(user: &User) -> Table {
    let mut table = table(&["Field", "Value"]);
    table
        .add_row(vec![Cell::new("ID"), Cell::new(user.id)])
        .add_row(vec![Cell::new("Name"), Cell::new(&user.name)])
        .add_row(vec![Cell::new("Email"), Cell::new(&user.email)])
        .add_row(vec![Cell::new("Age"), Cell::new(or_dash(user.age))]);
    table
}
