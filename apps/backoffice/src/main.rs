//! # Washdesk Operator CLI
//!
//! Prints back-office data as JSON, for checks and scripting.
//!
//! ## Usage
//! ```bash
//! # Salary report for the configured data root
//! cargo run -p washdesk-backoffice -- salary-report
//!
//! # Chemical stock from a specific root
//! cargo run -p washdesk-backoffice -- inventory --data ./washdesk_dev_data
//! ```

use std::env;

use washdesk_backoffice::commands::{
    client, employee, expense, inventory, price_list, salary, salary_scheme, wash_event,
};
use washdesk_backoffice::{init_tracing, open_state};
use washdesk_store::StoreConfig;

fn print_help() {
    println!("Washdesk back office");
    println!();
    println!("Usage: washdesk <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  salary-report     Earnings per employee");
    println!("  inventory         Chemical stock in grams");
    println!("  employees         Employee profiles");
    println!("  counter-agents    Counter agents");
    println!("  aggregators       Aggregators");
    println!("  wash-events       Wash events, newest first");
    println!("  expenses          Expenses, newest first");
    println!("  salary-schemes    Salary schemes");
    println!("  retail-prices     Retail price config");
    println!();
    println!("Options:");
    println!("  -d, --data <PATH>   Data root (overrides WASHDESK_DATA_PATH / washdesk.toml)");
    println!("  -h, --help          Show this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let mut command: Option<String> = None;
    let mut data_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other if command.is_none() => command = Some(other.to_string()),
            other => eprintln!("Ignoring extra argument: {}", other),
        }
        i += 1;
    }

    let Some(command) = command else {
        print_help();
        return Ok(());
    };

    init_tracing();

    let config = match data_path {
        Some(path) => StoreConfig::new(path),
        None => StoreConfig::load()?,
    };
    let state = open_state(&config)?;

    let output = match command.as_str() {
        "salary-report" => serde_json::to_string_pretty(&salary::salary_report(&state)?)?,
        "inventory" => serde_json::to_string_pretty(&inventory::get_inventory(&state)?)?,
        "employees" => serde_json::to_string_pretty(&employee::list_employees(&state)?)?,
        "counter-agents" => serde_json::to_string_pretty(&client::list_counter_agents(&state)?)?,
        "aggregators" => serde_json::to_string_pretty(&client::list_aggregators(&state)?)?,
        "wash-events" => serde_json::to_string_pretty(&wash_event::list_wash_events(&state)?)?,
        "expenses" => serde_json::to_string_pretty(&expense::list_expenses(&state)?)?,
        "salary-schemes" => {
            serde_json::to_string_pretty(&salary_scheme::list_salary_schemes(&state)?)?
        }
        "retail-prices" => {
            serde_json::to_string_pretty(&price_list::get_retail_price_config(&state)?)?
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_help();
            std::process::exit(2);
        }
    };

    println!("{}", output);
    Ok(())
}
