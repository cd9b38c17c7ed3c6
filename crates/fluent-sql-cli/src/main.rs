//! fluent-sql CLI
//!
//! Manages users and products in a SQLite database.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use fluent_sql_cli::{App, CliError, Options};
use fluent_sql_sqlite::config::DEFAULT_DATABASE;
use fluent_sql_sqlite::{schema, Session, SessionConfig};

/// Manage users and products with a fluent SQL builder.
#[derive(Parser)]
#[command(name = "fluent-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQLite database file.
    #[arg(short, long, env = "FLUENT_SQL_DATABASE", default_value = DEFAULT_DATABASE)]
    database: PathBuf,

    /// Enable verbose output (logs every statement).
    #[arg(short, long)]
    verbose: bool,

    /// Print rows as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    /// Show SQL without executing writes (dry run).
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new user.
    AddUser {
        /// User name.
        #[arg(long)]
        name: String,

        /// User email (must be unique).
        #[arg(long)]
        email: String,

        /// User age.
        #[arg(long)]
        age: Option<i64>,
    },

    /// List all users.
    ListUsers,

    /// Show a user by ID.
    GetUser {
        /// User ID.
        id: i64,
    },

    /// Update user information.
    UpdateUser {
        /// User ID.
        id: i64,

        /// New name.
        #[arg(long)]
        name: Option<String>,

        /// New email.
        #[arg(long)]
        email: Option<String>,

        /// New age.
        #[arg(long)]
        age: Option<i64>,
    },

    /// Delete a user.
    DeleteUser {
        /// User ID.
        id: i64,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Add a new product.
    AddProduct {
        /// Product name.
        #[arg(long)]
        name: String,

        /// Product price.
        #[arg(long)]
        price: f64,

        /// Units in stock.
        #[arg(long, default_value_t = 0)]
        stock: i64,
    },

    /// List all products.
    ListProducts,

    /// Search users with filters.
    SearchUsers {
        /// Minimum age filter.
        #[arg(long)]
        min_age: Option<i64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose))
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Commands::DeleteUser { id, yes: false } = cli.command {
        if !cli.dry_run && !confirm(&format!("Are you sure you want to delete user {id}?"))? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = SessionConfig::new(&cli.database);
    let options = Options {
        json: cli.json,
        dry_run: cli.dry_run,
    };

    Session::scoped(&config, |session| -> Result<(), CliError> {
        schema::initialize(session)?;
        let mut app = App::new(session, io::stdout().lock(), options);
        run(&mut app, cli.command)
    })?;

    Ok(())
}

const fn log_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

fn run<W: Write>(app: &mut App<'_, W>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::AddUser { name, email, age } => app.add_user(&name, &email, age),
        Commands::ListUsers => app.list_users(),
        Commands::GetUser { id } => app.get_user(id),
        Commands::UpdateUser {
            id,
            name,
            email,
            age,
        } => app.update_user(id, name.as_deref(), email.as_deref(), age),
        Commands::DeleteUser { id, .. } => app.delete_user(id),
        Commands::AddProduct { name, price, stock } => app.add_product(&name, price, stock),
        Commands::ListProducts => app.list_products(),
        Commands::SearchUsers { min_age } => app.search_users(min_age),
    }
}

/// Asks a yes/no question on stderr; only `y` or `yes` confirms.
fn confirm(question: &str) -> io::Result<bool> {
    eprint!("{question} [y/N] ");
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    debug!(answer = answer.trim(), "Confirmation answered");

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
