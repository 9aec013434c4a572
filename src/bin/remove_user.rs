use std::{error::Error, path::Path, process::exit};

use clap::Parser;
use rusqlite::Connection;

use ledgerly::{User, UserID, delete_user, get_user_by_email, get_user_by_id};

/// A utility for deleting a registered user along with their categories and transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The ID of the user to delete.
    #[arg(long, conflicts_with = "email", required_unless_present = "email")]
    id: Option<i64>,

    /// The email address of the user to delete.
    #[arg(long)]
    email: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let db_path = Path::new(&args.db_path);

    if !db_path.is_file() {
        eprintln!("No database found at {db_path:#?}.");
        exit(1);
    }

    let conn = Connection::open(db_path)?;
    // Needed for the user's categories and transactions to be deleted with them.
    conn.pragma_update(None, "foreign_keys", true)?;

    let user = match find_user(&args, &conn) {
        Ok(user) => user,
        Err(ledgerly::Error::NotFound) => {
            eprintln!("Could not find the user.");
            exit(1);
        }
        Err(error) => return Err(error.into()),
    };

    println!("Deleting user {} ({})", user.id, user.email);
    delete_user(user.id, &conn)?;
    println!("Success!");

    Ok(())
}

fn find_user(args: &Args, conn: &Connection) -> Result<User, ledgerly::Error> {
    match (&args.email, args.id) {
        (Some(email), _) => get_user_by_email(email, conn),
        (None, Some(id)) => get_user_by_id(UserID::new(id), conn),
        (None, None) => Err(ledgerly::Error::NotFound),
    }
}
