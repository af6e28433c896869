//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `coffee_core` linkage against a real database file.
//! - Print every stored coffee as one tab-separated line.

use coffee_core::{init_logging, CoffeeRepository, SqliteCoffeeRepository, StoreConfig};
use log::error;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = StoreConfig::from_env();

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("coffee_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &StoreConfig) -> Result<(), Box<dyn Error>> {
    println!("coffee_core version={}", coffee_core::core_version());
    println!("db_path={}", config.db_path.display());

    let conn = config.open()?;
    let repo = SqliteCoffeeRepository::try_new(&conn)?;
    let coffees = repo.get_all()?;

    println!("coffees={}", coffees.len());
    for coffee in coffees {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            coffee.name, coffee.supplier_id, coffee.price, coffee.sales, coffee.total
        );
    }

    Ok(())
}
