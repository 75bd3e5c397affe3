use std::error::Error;

use clap::{Parser, Subcommand};
use sea_orm::Database;

use migration::MigratorTrait;

#[derive(Parser, Debug)]
#[command(name = "tally_admin")]
#[command(about = "Admin utilities for Tally (provision the database)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./tally.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drop and recreate every table, then seed the default category
    /// catalogs. Destructive: existing records are lost.
    Provision,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = Database::connect(&cli.database_url).await?;

    match cli.command {
        Command::Provision => {
            migration::Migrator::fresh(&db).await?;
            ledger::seed::insert_default_categories(&db).await?;
            println!("database provisioned with the default categories");
        }
    }

    Ok(())
}
