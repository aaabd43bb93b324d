use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal_macros::dec;
use time::{Duration, OffsetDateTime};

use scrilla_rs::{
    AccountService, CategoryService, NewAccount, NewAccountGroup, NewTransaction, VendorService,
    create_transaction, initialize_db,
};

/// A utility for creating a test database for the JSON API server of scrilla_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
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
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating categories, accounts and vendors...");

    let categories = CategoryService::new(&conn);
    let groceries = categories.add_category("Groceries")?;
    let income = categories.add_category("Income")?;

    let accounts = AccountService::new(&conn);
    let everyday = accounts.add_account_group(NewAccountGroup::new("Everyday"))?;
    let cheque = accounts.add_account(NewAccount {
        name: "Cheque".to_owned(),
        initial_balance: dec!(1000),
        default_category_id: Some(groceries.id),
        account_group_id: Some(everyday.id),
    })?;
    accounts.add_account_name_map(cheque.id, "12-3456-7890123-00")?;

    let vendors = VendorService::new(&conn);
    let supermarket = vendors.add_vendor("Supermarket", Some(groceries.id))?;
    vendors.add_vendor_map(supermarket.id, "SUPERMARKET 1234 AUCKLAND")?;
    let employer = vendors.add_vendor("Employer", Some(income.id))?;

    println!("Creating transactions...");

    let today = OffsetDateTime::now_utc().date();
    for week in 0..8 {
        let date = today - Duration::weeks(week);
        create_transaction(
            NewTransaction {
                vendor_id: Some(supermarket.id),
                category_id: Some(groceries.id),
                description: "SUPERMARKET 1234 AUCKLAND".to_owned(),
                ..NewTransaction::new(cheque.id, dec!(-85.5), date)
            },
            &conn,
        )?;

        if week % 2 == 0 {
            create_transaction(
                NewTransaction {
                    vendor_id: Some(employer.id),
                    category_id: Some(income.id),
                    description: "SALARY".to_owned(),
                    ..NewTransaction::new(cheque.id, dec!(1500), date)
                },
                &conn,
            )?;
        }
    }

    accounts.update_account_balances()?;

    println!("Success!");

    Ok(())
}
