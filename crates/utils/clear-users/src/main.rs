//! # Clear Users Utility
//!
//! Deletes every account and every pending SMS code from the database.
//!
//! **WARNING**: This is a destructive operation that cannot be undone.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package clear-users --bin clear_users
//! ```
//!
//! Reads `DATABASE_URL` (falling back to the server default), applies pending
//! migrations, shows what would be removed and asks for confirmation.

use lib_core::config::DEFAULT_DATABASE_URL;
use lib_core::model::store::{UserRepository, VerificationRepository};
use lib_core::{create_pool, run_migrations};
use lib_utils::envs::get_env_or;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    println!("============================================");
    println!("  Clear Users Utility");
    println!("============================================");
    println!();
    println!("WARNING: This will delete ALL users and pending codes!");
    println!("This operation cannot be undone.");
    println!();

    let database_url = get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL);
    println!("Connecting to {}...", database_url);
    let pool = create_pool(&database_url).await?;
    run_migrations(&pool).await?;
    println!("Connected successfully.");
    println!();

    let user_count = UserRepository::count(&pool).await?;
    if user_count == 0 {
        println!("No users found in the database.");
    } else {
        println!("Found {} user(s) in the database.", user_count);
    }
    println!();

    print!("Delete all users and pending codes? (yes/no): ");
    io::stdout().flush()?;

    let mut confirmation = String::new();
    io::stdin().read_line(&mut confirmation)?;
    let confirmation = confirmation.trim().to_lowercase();

    if confirmation != "yes" && confirmation != "y" {
        println!("Operation cancelled.");
        return Ok(());
    }

    println!();
    let deleted_codes = VerificationRepository::delete_all(&pool).await?;
    let deleted_users = UserRepository::delete_all(&pool).await?;

    println!("Deleted {} user(s) and {} pending code(s).", deleted_users, deleted_codes);
    println!("Database cleared.");

    Ok(())
}
