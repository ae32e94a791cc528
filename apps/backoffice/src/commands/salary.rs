//! # Salary Report Command
//!
//! ```text
//! wash_events().list()    ─┐
//! employees().list()      ─┼──► generate_salary_report ──► Vec<SalaryReportRow>
//! salary_schemes().list() ─┘        (washdesk-core)         highest earner first
//! ```
//!
//! All three listings come through the cache, so repeated reports only
//! rescan a collection after it has been written.

use std::time::Instant;

use tracing::{debug, info};
use washdesk_core::payroll::{generate_salary_report, SalaryReportRow};

use crate::error::ApiError;
use crate::state::StoreState;

/// Pay per employee across every recorded wash.
///
/// Every employee gets a row, including those who earned nothing.
pub fn salary_report(state: &StoreState) -> Result<Vec<SalaryReportRow>, ApiError> {
    let start = Instant::now();
    let store = state.inner();

    let events = store.wash_events().list()?;
    let employees = store.employees().list()?;
    let schemes = store.salary_schemes().list()?;
    debug!(
        events = events.len(),
        employees = employees.len(),
        schemes = schemes.len(),
        "salary_report command"
    );

    let report = generate_salary_report(&events, &employees, &schemes);

    info!(
        rows = report.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Salary report generated"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::employee::create_employee;
    use crate::commands::salary_scheme::create_salary_scheme;
    use crate::commands::test_support::open_state;
    use crate::commands::wash_event::create_wash_event;
    use washdesk_core::money::Money;
    use washdesk_core::{
        Employee, PaymentMethod, PriceListItem, RateSource, SalaryRate, SalaryScheme,
        SchemeKind, SourceKind, WashEvent, WashServices,
    };

    fn employee(id: &str, name: &str, scheme_id: &str) -> Employee {
        Employee {
            id: id.into(),
            full_name: name.into(),
            salary_scheme_id: Some(scheme_id.into()),
            ..Default::default()
        }
    }

    fn line(name: &str) -> PriceListItem {
        PriceListItem {
            service_name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_report_over_stored_records() {
        let (_dir, state) = open_state();
        create_salary_scheme(
            &state,
            SalaryScheme {
                id: "scheme_half".into(),
                kind: SchemeKind::Percentage,
                percentage: 50.0,
                fixed_deduction: 100.0,
                ..Default::default()
            },
        )
        .unwrap();
        create_salary_scheme(
            &state,
            SalaryScheme {
                id: "scheme_rates".into(),
                kind: SchemeKind::Rate,
                rates: vec![SalaryRate {
                    service_name: "Wash".into(),
                    rate: 100.0,
                    deduction: 20.0,
                }],
                ..Default::default()
            },
        )
        .unwrap();
        create_employee(&state, employee("emp_a", "Anna", "scheme_half")).unwrap();
        create_employee(&state, employee("emp_b", "Boris", "scheme_half")).unwrap();
        create_employee(&state, employee("emp_c", "Clara", "scheme_rates")).unwrap();
        create_employee(&state, employee("emp_d", "Denis", "scheme_missing")).unwrap();

        create_wash_event(
            &state,
            WashEvent {
                id: "we_1".into(),
                timestamp: "2024-05-01T10:00:00Z".into(),
                employee_ids: vec!["emp_a".into(), "emp_b".into()],
                payment_method: PaymentMethod::Cash,
                total_amount: 1000.0,
                services: WashServices {
                    main: line("Complex"),
                    additional: Vec::new(),
                },
                ..Default::default()
            },
        )
        .unwrap();
        create_wash_event(
            &state,
            WashEvent {
                id: "we_2".into(),
                timestamp: "2024-05-01T11:00:00Z".into(),
                employee_ids: vec!["emp_c".into()],
                payment_method: PaymentMethod::Card,
                total_amount: 300.0,
                services: WashServices {
                    main: line("Wash"),
                    additional: vec![line("Wax")],
                },
                ..Default::default()
            },
        )
        .unwrap();

        let report = salary_report(&state).unwrap();

        let ids: Vec<&str> = report.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["emp_a", "emp_b", "emp_c", "emp_d"]);
        assert_eq!(report[0].total_earnings, Money::from_cents(22500));
        assert_eq!(report[1].total_earnings, Money::from_cents(22500));
        assert_eq!(report[2].total_earnings, Money::from_cents(8000));
        assert_eq!(report[2].breakdown[0].unpaid_services, vec!["Wax".to_string()]);
        assert_eq!(report[3].total_earnings, Money::zero());
        assert!(report[3].breakdown.is_empty());
    }

    #[test]
    fn test_report_reflects_new_wash() {
        let (_dir, state) = open_state();
        create_salary_scheme(
            &state,
            SalaryScheme {
                id: "scheme_agg".into(),
                kind: SchemeKind::Rate,
                rate_source: Some(RateSource {
                    kind: SourceKind::Aggregator,
                    id: "agg_1".into(),
                    price_list_name: None,
                }),
                rates: vec![SalaryRate {
                    service_name: "Wash".into(),
                    rate: 100.0,
                    deduction: 0.0,
                }],
                ..Default::default()
            },
        )
        .unwrap();
        create_employee(&state, employee("emp_a", "Anna", "scheme_agg")).unwrap();
        assert_eq!(salary_report(&state).unwrap()[0].total_earnings, Money::zero());

        let mut wash = WashEvent {
            timestamp: "2024-05-01T10:00:00Z".into(),
            employee_ids: vec!["emp_a".into()],
            payment_method: PaymentMethod::Cash,
            services: WashServices {
                main: line("Wash"),
                additional: Vec::new(),
            },
            ..Default::default()
        };
        create_wash_event(&state, wash.clone()).unwrap();
        // Cash wash does not match an aggregator filter.
        let report = salary_report(&state).unwrap();
        assert_eq!(report[0].total_earnings, Money::zero());
        assert!(report[0].breakdown.is_empty());

        wash.payment_method = PaymentMethod::Aggregator;
        wash.source_id = Some("agg_1".into());
        create_wash_event(&state, wash).unwrap();
        let report = salary_report(&state).unwrap();
        assert_eq!(report[0].total_earnings, Money::from_cents(10000));
        assert_eq!(report[0].breakdown.len(), 1);
    }
}
