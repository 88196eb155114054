//! A small CLI for resetting a user's password directly against the database.
//!
//! Useful when the user has locked themselves out, since the web app has no
//! email-based recovery flow.

use clap::Parser;
use rusqlite::Connection;

use expenseur_rs::{PasswordHash, get_user_by_email, initialize_db};

/// Reset the password for a user account.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The email of the account to reset.
    #[arg(long)]
    email: String,
}

fn main() {
    let args = Args::parse();

    let connection = Connection::open(&args.db_path).expect("Could not open the database file");
    initialize_db(&connection).expect("Could not initialize the database");

    let user = get_user_by_email(&args.email, &connection)
        .expect("Could not find a user with that email");

    let password = rpassword::prompt_password("New password: ").expect("Could not read password");
    let confirmation =
        rpassword::prompt_password("Confirm password: ").expect("Could not read password");

    if password != confirmation {
        eprintln!("The passwords do not match.");
        std::process::exit(1);
    }

    let password_hash = PasswordHash::from_raw_password(&password, PasswordHash::DEFAULT_COST)
        .expect("The password is too weak");

    connection
        .execute(
            "UPDATE user SET password = ?1 WHERE id = ?2",
            (password_hash.as_ref(), user.id.as_i64()),
        )
        .expect("Could not update the password");

    println!("Password updated for {}.", user.email);
}
