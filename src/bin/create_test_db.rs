use std::{error::Error, path::Path, process::exit};

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Date, Month, OffsetDateTime};

use ledgerly::{
    PasswordHash, RegistrationRequest, TransactionRequest, TransactionType, add_category,
    add_transaction, initialize_db, register_user, validate_registration,
};

/// A utility for creating a test database for the REST API server of ledgerly.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
///
/// The test user logs in with `test@example.com` and the password `test`.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let mut conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user...");
    let new_user = validate_registration(
        &RegistrationRequest {
            name: "Test User".to_owned(),
            email: "test@example.com".to_owned(),
            password: "test".to_owned(),
            preferred_currency: Some("USD".to_owned()),
        },
        PasswordHash::DEFAULT_COST,
    )?;
    let user = register_user(new_user, &mut conn)?;

    println!("Creating categories...");
    let salary = add_category(user.id, "Salary", &mut conn)?;
    let food = add_category(user.id, "Food", &mut conn)?;
    let rent = add_category(user.id, "Rent", &mut conn)?;
    let transport = add_category(user.id, "Transport", &mut conn)?;

    println!("Creating transactions...");
    let today = OffsetDateTime::now_utc().date();
    let mut transaction_count = 0;

    for months_ago in 0..12 {
        let (year, month) = months_before(today.year(), today.month(), months_ago);

        let samples = [
            (TransactionType::Income, Decimal::new(350000, 2), "Pay", 1, salary.id),
            (TransactionType::Expense, Decimal::new(120000, 2), "Monthly rent", 2, rent.id),
            (TransactionType::Expense, Decimal::new(8450, 2), "Groceries", 8, food.id),
            (TransactionType::Expense, Decimal::new(4000, 2), "Bus pass", 10, transport.id),
            (TransactionType::Expense, Decimal::new(6215, 2), "Groceries", 22, food.id),
        ];

        for (transaction_type, amount, description, day, category_id) in samples {
            let date = Date::from_calendar_date(year, month, day)?;

            if date > today {
                continue;
            }

            add_transaction(
                user.id,
                &TransactionRequest {
                    transaction_type,
                    amount,
                    description: Some(description.to_owned()),
                    date,
                    category_id,
                },
                &mut conn,
            )?;
            transaction_count += 1;
        }
    }

    println!("Created {transaction_count} transactions.");
    println!("Success!");

    Ok(())
}

fn months_before(year: i32, month: Month, months_ago: u8) -> (i32, Month) {
    let mut year = year;
    let mut month = month;

    for _ in 0..months_ago {
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    (year, month)
}
