//! Command implementations, writing to any [`Write`] sink.

use std::io::Write;

use fluent_sql_core::RenderedStatement;
use fluent_sql_sqlite::Session;
use serde::Serialize;
use tracing::debug;

use crate::error::{CliError, Result};
use crate::models::{Product, User, PRODUCT_COLUMNS, USER_COLUMNS};
use crate::output;

/// Flags shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Print rows as JSON instead of tables.
    pub json: bool,
    /// Print statements instead of executing writes.
    pub dry_run: bool,
}

/// Runs commands against one session.
pub struct App<'s, W> {
    session: &'s mut Session,
    out: W,
    options: Options,
}

impl<'s, W: Write> App<'s, W> {
    /// Creates an app writing to `out`.
    pub fn new(session: &'s mut Session, out: W, options: Options) -> Self {
        Self {
            session,
            out,
            options,
        }
    }

    /// Consumes the app and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Inserts a user and prints the new ID.
    pub fn add_user(&mut self, name: &str, email: &str, age: Option<i64>) -> Result<()> {
        let insert = self
            .session
            .insert("users")?
            .set("name", name)
            .set("email", email)
            .set("age", age);

        if self.options.dry_run {
            let rendered = insert.to_sql()?;
            return self.print_statement(&rendered);
        }

        let id = insert
            .execute()
            .map_err(|e| CliError::from_email_write(e, Some(email)))?;
        writeln!(self.out, "✓ User created successfully with ID: {id}")?;
        Ok(())
    }

    /// Lists every user ordered by ID.
    pub fn list_users(&mut self) -> Result<()> {
        let users = self.fetch_users(None)?;
        self.print_users(&users)
    }

    /// Shows one user.
    pub fn get_user(&mut self, id: i64) -> Result<()> {
        let user = self
            .session
            .select("users")?
            .fields(USER_COLUMNS)
            .where_clause("id = ?", [id])
            .fetch_one()?
            .map(User::try_from)
            .transpose()?
            .ok_or(CliError::UserNotFound(id))?;

        if self.options.json {
            return self.print_json(&user);
        }
        writeln!(self.out, "{}", output::user_details(&user))?;
        Ok(())
    }

    /// Updates the given fields of one user.
    pub fn update_user(
        &mut self,
        id: i64,
        name: Option<&str>,
        email: Option<&str>,
        age: Option<i64>,
    ) -> Result<()> {
        if name.is_none() && email.is_none() && age.is_none() {
            return Err(CliError::NothingToUpdate);
        }

        let mut update = self.session.update("users")?;
        if let Some(name) = name {
            update = update.set("name", name);
        }
        if let Some(email) = email {
            update = update.set("email", email);
        }
        if let Some(age) = age {
            update = update.set("age", age);
        }
        let update = update.where_clause("id = ?", [id]);

        if self.options.dry_run {
            let rendered = update.to_sql()?;
            return self.print_statement(&rendered);
        }

        let affected = update
            .execute()
            .map_err(|e| CliError::from_email_write(e, email))?;
        if affected == 0 {
            return Err(CliError::UserNotFound(id));
        }
        writeln!(self.out, "✓ User {id} updated successfully!")?;
        Ok(())
    }

    /// Deletes one user. Confirmation is the caller's job.
    pub fn delete_user(&mut self, id: i64) -> Result<()> {
        let delete = self
            .session
            .delete("users")?
            .where_clause("id = ?", [id]);

        if self.options.dry_run {
            let rendered = delete.to_sql()?;
            return self.print_statement(&rendered);
        }

        if delete.execute()? == 0 {
            return Err(CliError::UserNotFound(id));
        }
        writeln!(self.out, "✓ User {id} deleted successfully!")?;
        Ok(())
    }

    /// Inserts a product and prints the new ID.
    pub fn add_product(&mut self, name: &str, price: f64, stock: i64) -> Result<()> {
        let insert = self
            .session
            .insert("products")?
            .set("name", name)
            .set("price", price)
            .set("stock", stock);

        if self.options.dry_run {
            let rendered = insert.to_sql()?;
            return self.print_statement(&rendered);
        }

        let id = insert.execute()?;
        writeln!(self.out, "✓ Product created successfully with ID: {id}")?;
        Ok(())
    }

    /// Lists every product ordered by ID.
    pub fn list_products(&mut self) -> Result<()> {
        let products = self
            .session
            .select("products")?
            .fields(PRODUCT_COLUMNS)
            .order_by(&["id"])
            .fetch()?
            .map(Product::try_from)
            .collect::<Result<Vec<_>>>()?;

        if self.options.json {
            return self.print_json(&products);
        }
        if products.is_empty() {
            writeln!(self.out, "No products found.")?;
        } else {
            writeln!(self.out, "{}", output::products_table(&products))?;
        }
        Ok(())
    }

    /// Lists users, optionally only those at least `min_age` old (ordered
    /// by age in that case).
    pub fn search_users(&mut self, min_age: Option<i64>) -> Result<()> {
        let users = self.fetch_users(min_age)?;
        if !self.options.json {
            match min_age {
                Some(age) => writeln!(self.out, "Users with age >= {age}:")?,
                None => writeln!(self.out, "All users:")?,
            }
        }
        self.print_users(&users)
    }

    fn fetch_users(&mut self, min_age: Option<i64>) -> Result<Vec<User>> {
        let select = self.session.select("users")?.fields(USER_COLUMNS);
        let select = match min_age {
            Some(age) => select.where_clause("age >= ?", [age]).order_by(&["age"]),
            None => select.order_by(&["id"]),
        };
        select.fetch()?.map(User::try_from).collect()
    }

    fn print_users(&mut self, users: &[User]) -> Result<()> {
        if self.options.json {
            return self.print_json(&users);
        }
        if users.is_empty() {
            writeln!(self.out, "No users found.")?;
        } else {
            writeln!(self.out, "{}", output::users_table(users))?;
        }
        Ok(())
    }

    fn print_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn print_statement(&mut self, rendered: &RenderedStatement) -> Result<()> {
        debug!(kind = %rendered.kind, "Dry run, statement not executed");
        writeln!(self.out, "{};", rendered.sql)?;
        writeln!(
            self.out,
            "-- params: {}",
            serde_json::to_string(&rendered.params)?
        )?;
        Ok(())
    }
}
