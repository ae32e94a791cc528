//! # Seed Data Generator
//!
//! Populates a data root with a small, realistic wash business for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed ./washdesk_dev_data with 60 washes (default)
//! cargo run -p washdesk-store --bin seed
//!
//! # Custom amount and location
//! cargo run -p washdesk-store --bin seed -- --count 200 --data ./data
//! ```
//!
//! ## Generated Data
//! - Four employees: two on a percentage scheme, two on a rate scheme
//! - One counter agent and one aggregator with price lists
//! - Retail price list
//! - Wash events spread over recent days across every payment method
//! - A chemical purchase and the matching starting inventory

use chrono::{Duration, Utc};
use std::env;
use washdesk_core::consumption::{chemical_purchase_grams, wash_consumption_grams};
use washdesk_core::{
    Aggregator, Car, CounterAgent, Employee, EmployeeConsumption, Expense, Inventory,
    NamedPriceList, PaymentMethod, PriceListItem, RateSource, RetailPriceConfig, SalaryRate,
    SalaryScheme, SchemeKind, SourceKind, WashEvent, WashServices, CHEMICAL_PURCHASE_CATEGORY,
};
use washdesk_store::ids::{self, generate_id};
use washdesk_store::{Store, StoreConfig};

/// Retail services: (name, price, grams of chemical)
const RETAIL_SERVICES: &[(&str, f64, f64)] = &[
    ("Body wash", 600.0, 40.0),
    ("Complex wash", 1200.0, 90.0),
    ("Interior dry clean", 3500.0, 150.0),
];

const EXTRA_SERVICES: &[(&str, f64, f64)] = &[
    ("Wax", 300.0, 20.0),
    ("Wheel arches", 200.0, 15.0),
    ("Mats", 150.0, 0.0),
];

const PLATES: &[&str] = &["A123BC", "K777KK", "M001OP", "T450XM", "E912PA", "O333OO"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let mut count: usize = 60;
    let mut data_path = "./washdesk_dev_data".to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Washdesk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>     Number of wash events (default: 60)");
                println!("  -d, --data <PATH>   Data root (default: ./washdesk_dev_data)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Washdesk Seed Data Generator");
    println!("===============================");
    println!("Data root: {}", data_path);
    println!("Washes:    {}", count);
    println!();

    let store = Store::open(&StoreConfig::new(&data_path))?;

    let existing = store.wash_events().list()?.len();
    if existing > 0 {
        println!("⚠ Data root already has {} wash events", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the directory to regenerate.");
        return Ok(());
    }

    // Schemes
    let percent = SalaryScheme {
        id: format!("{}_percent", ids::SALARY_SCHEME_PREFIX),
        name: "30% of net".to_string(),
        kind: SchemeKind::Percentage,
        percentage: 30.0,
        fixed_deduction: 100.0,
        ..Default::default()
    };
    let rates = SalaryScheme {
        id: format!("{}_retail_rates", ids::SALARY_SCHEME_PREFIX),
        name: "Retail piece rates".to_string(),
        kind: SchemeKind::Rate,
        rate_source: Some(RateSource {
            kind: SourceKind::Retail,
            id: washdesk_core::RETAIL_SOURCE_ID.to_string(),
            price_list_name: None,
        }),
        rates: RETAIL_SERVICES
            .iter()
            .map(|(name, price, _)| SalaryRate {
                service_name: name.to_string(),
                rate: price * 0.25,
                deduction: 20.0,
            })
            .collect(),
        ..Default::default()
    };
    store.salary_schemes().save(&percent)?;
    store.salary_schemes().save(&rates)?;
    println!("✓ Salary schemes");

    // Employees
    let names = ["Ivan Petrov", "Oleg Smirnov", "Anna Volkova", "Pavel Orlov"];
    let mut employees = Vec::new();
    for (idx, name) in names.iter().enumerate() {
        let scheme = if idx < 2 { &percent.id } else { &rates.id };
        let emp = Employee {
            id: generate_id(ids::EMPLOYEE_PREFIX),
            full_name: name.to_string(),
            phone: format!("+7900000000{}", idx),
            payment_details: format!("Card *{:04}", 1000 + idx * 37),
            has_car: idx % 2 == 0,
            username: (idx == 0).then(|| "admin".to_string()),
            password: (idx == 0).then(|| "admin".to_string()),
            salary_scheme_id: Some(scheme.clone()),
        };
        store.employees().save(&emp)?;
        employees.push(emp);
    }
    println!("✓ {} employees", employees.len());

    // Clients
    let retail_list = price_list(RETAIL_SERVICES);
    let extras = price_list(EXTRA_SERVICES);
    let agent = CounterAgent {
        id: generate_id(ids::COUNTER_AGENT_PREFIX),
        name: "Taxi Park North".to_string(),
        cars: vec![Car {
            id: "car_1".to_string(),
            license_plate: PLATES[1].to_string(),
        }],
        price_list: discounted(&retail_list, 0.8),
        additional_price_list: extras.clone(),
        ..Default::default()
    };
    let aggregator = Aggregator {
        id: generate_id(ids::AGGREGATOR_PREFIX),
        name: "CityDrive".to_string(),
        price_lists: vec![
            NamedPriceList {
                name: "Day".to_string(),
                services: discounted(&retail_list, 0.9),
            },
            NamedPriceList {
                name: "Night".to_string(),
                services: discounted(&retail_list, 0.7),
            },
        ],
        active_price_list_name: Some("Day".to_string()),
        ..Default::default()
    };
    store.counter_agents().save(&agent)?;
    store.aggregators().save(&aggregator)?;
    store.retail_prices().save(&RetailPriceConfig {
        main_price_list: retail_list.clone(),
        additional_price_list: extras.clone(),
        card_acquiring_percentage: 2.0,
        ..Default::default()
    })?;
    println!("✓ Clients and price lists");

    // Chemical purchase, then washes drawing it down
    let purchase = Expense {
        id: generate_id(ids::EXPENSE_PREFIX),
        date: Utc::now().format("%Y-%m-%d").to_string(),
        category: CHEMICAL_PURCHASE_CATEGORY.to_string(),
        description: "Active foam, 25 kg".to_string(),
        amount: 12500.0,
        quantity: 25.0,
        unit: "кг".to_string(),
        price_per_unit: 500.0,
    };
    store.expenses().save(&purchase)?;
    let mut stock = Inventory {
        chemical_stock_grams: chemical_purchase_grams(&purchase),
    };

    let methods = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Transfer,
        PaymentMethod::Aggregator,
        PaymentMethod::CounterAgentContract,
    ];
    let start = std::time::Instant::now();

    for n in 0..count {
        let method = methods[n % methods.len()];
        let (main_name, price, grams) = RETAIL_SERVICES[n % RETAIL_SERVICES.len()];
        let crew: Vec<&Employee> = employees.iter().skip(n % 3).take(1 + n % 2).collect();

        let mut main = item(main_name, price, grams);
        if n % 4 == 0 {
            main.employee_consumptions = crew
                .iter()
                .map(|e| EmployeeConsumption {
                    employee_id: e.id.clone(),
                    amount: 5.0,
                })
                .collect();
        }
        let additional = if n % 3 == 0 {
            let (name, price, grams) = EXTRA_SERVICES[n % EXTRA_SERVICES.len()];
            vec![item(name, price, grams)]
        } else {
            Vec::new()
        };
        let total: f64 = price + additional.iter().map(|s| s.price).sum::<f64>();

        let (source_id, source_name, price_list_name) = match method {
            PaymentMethod::Aggregator => (
                Some(aggregator.id.clone()),
                Some(aggregator.name.clone()),
                Some("Day".to_string()),
            ),
            PaymentMethod::CounterAgentContract => {
                (Some(agent.id.clone()), Some(agent.name.clone()), None)
            }
            _ => (None, None, None),
        };
        let acquiring_fee = if method == PaymentMethod::Card {
            total * 0.02
        } else {
            0.0
        };

        let event = WashEvent {
            id: generate_id(ids::WASH_EVENT_PREFIX),
            timestamp: (Utc::now() - Duration::hours(n as i64 * 5)).to_rfc3339(),
            vehicle_number: PLATES[n % PLATES.len()].to_string(),
            employee_ids: crew.iter().map(|e| e.id.clone()).collect(),
            payment_method: method,
            source_id,
            source_name,
            price_list_name,
            total_amount: total,
            net_amount: total - acquiring_fee,
            acquiring_fee,
            services: WashServices { main, additional },
            ..Default::default()
        };

        if let Err(e) = store.wash_events().save(&event) {
            eprintln!("Failed to save {}: {}", event.id, e);
            continue;
        }
        stock.apply_delta(-wash_consumption_grams(&event));
    }
    store.inventory().save(&stock)?;

    let elapsed = start.elapsed();
    println!("✓ Generated {} wash events in {:?}", count, elapsed);
    println!("✓ Chemical stock: {:.0} g", stock.chemical_stock_grams);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn item(name: &str, price: f64, grams: f64) -> PriceListItem {
    PriceListItem {
        service_name: name.to_string(),
        price,
        chemical_consumption: grams,
        ..Default::default()
    }
}

fn price_list(services: &[(&str, f64, f64)]) -> Vec<PriceListItem> {
    services
        .iter()
        .map(|(name, price, grams)| item(name, *price, *grams))
        .collect()
}

fn discounted(list: &[PriceListItem], factor: f64) -> Vec<PriceListItem> {
    list.iter()
        .map(|s| PriceListItem {
            price: (s.price * factor).round(),
            ..s.clone()
        })
        .collect()
}
