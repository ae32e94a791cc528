//! # Payroll Engine
//!
//! Turns wash events into per-employee earnings according to each
//! employee's salary scheme.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Salary Report                                  │
//! │                                                                         │
//! │  for each WashEvent with employees:                                    │
//! │    resolved = employeeIds that exist          (none → skip event)      │
//! │    n = |resolved|                                                      │
//! │    for each resolved employee with a known scheme:                     │
//! │                                                                         │
//! │      ┌─────────────── percentage ───────────────┐                      │
//! │      │ base  = net > 0 ? net : total            │                      │
//! │      │ share = (base - fixed) × pct/100 / n     │                      │
//! │      └──────────────────────────────────────────┘                      │
//! │      ┌──────────────────── rate ────────────────────────────┐          │
//! │      │ source filter mismatch → 0, no unpaid                │          │
//! │      │ Σ (rate - deduction) over lines with a rate entry    │          │
//! │      │ lines without one → unpaidServices (deduplicated)    │          │
//! │      │ share = Σ / n                                        │          │
//! │      └──────────────────────────────────────────────────────┘          │
//! │      share ≤ 0 → 0, else truncated to whole cents                      │
//! │      breakdown entry only if share > 0 or unpaid non-empty             │
//! │                                                                         │
//! │  rows: every employee, total desc, then employee id asc                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Employee, RateSource, SalaryRate, SalaryScheme, SchemeKind, SourceKind, WashEvent};
use crate::RETAIL_SOURCE_ID;

// =============================================================================
// Report Types
// =============================================================================

/// One wash's contribution to an employee's pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakdownItem {
    pub wash_event_id: String,
    pub timestamp: String,
    pub vehicle_number: String,
    #[serde(with = "crate::money::as_major")]
    #[ts(type = "number")]
    pub earnings: Money,
    /// Service names on the wash the scheme has no rate for.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unpaid_services: Vec<String>,
}

/// One employee's line in the salary report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalaryReportRow {
    pub employee_id: String,
    pub employee_name: String,
    #[serde(with = "crate::money::as_major")]
    #[ts(type = "number")]
    pub total_earnings: Money,
    pub breakdown: Vec<SalaryBreakdownItem>,
}

/// Result of evaluating one scheme for one employee on one wash.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Share {
    pub earnings: Money,
    pub unpaid_services: Vec<String>,
}

impl Share {
    fn none() -> Self {
        Share::default()
    }

    fn from_amount(amount: f64, unpaid_services: Vec<String>) -> Self {
        let earnings = if amount > 0.0 {
            Money::truncate_from_major(amount)
        } else {
            Money::zero()
        };
        Share {
            earnings,
            unpaid_services,
        }
    }

    /// Whether this share produces a breakdown entry.
    pub fn is_reportable(&self) -> bool {
        self.earnings.is_positive() || !self.unpaid_services.is_empty()
    }
}

// =============================================================================
// Scheme Evaluation
// =============================================================================

/// Computes one employee's share of one wash.
///
/// `employees_on_event` is the number of resolved employees the wash is
/// split between; zero yields an empty share.
///
/// ## Example
/// ```rust
/// use washdesk_core::payroll::calculate_individual_share;
/// use washdesk_core::{SalaryScheme, SchemeKind, WashEvent};
///
/// let scheme = SalaryScheme {
///     kind: SchemeKind::Percentage,
///     percentage: 50.0,
///     fixed_deduction: 100.0,
///     ..Default::default()
/// };
/// let event = WashEvent { total_amount: 1000.0, ..Default::default() };
///
/// let share = calculate_individual_share(&scheme, &event, 2);
/// assert_eq!(share.earnings.cents(), 22500);
/// ```
pub fn calculate_individual_share(
    scheme: &SalaryScheme,
    event: &WashEvent,
    employees_on_event: usize,
) -> Share {
    if employees_on_event == 0 {
        return Share::none();
    }
    let n = employees_on_event as f64;

    match scheme.kind {
        SchemeKind::Percentage => {
            let base = if event.net_amount > 0.0 {
                event.net_amount
            } else {
                event.total_amount
            };
            let pool = (base - scheme.fixed_deduction) * (scheme.percentage / 100.0);
            Share::from_amount(pool / n, Vec::new())
        }
        SchemeKind::Rate => {
            if let Some(source) = &scheme.rate_source {
                if !source_matches(source, event) {
                    return Share::none();
                }
            }
            let (total, unpaid) = rate_total(&scheme.rates, event);
            Share::from_amount(total / n, unpaid)
        }
    }
}

/// Whether a rate scheme's source filter accepts this wash.
pub fn source_matches(source: &RateSource, event: &WashEvent) -> bool {
    let Some(kind) = event.payment_method.source_kind() else {
        return false;
    };
    if kind != source.kind {
        return false;
    }

    let event_source_id = match kind {
        SourceKind::Retail => RETAIL_SOURCE_ID,
        _ => event.source_id.as_deref().unwrap_or_default(),
    };
    if source.id != event_source_id {
        return false;
    }

    match (kind, source.price_list_name.as_deref()) {
        (SourceKind::Aggregator, Some(wanted)) if !wanted.is_empty() => {
            event.price_list_name.as_deref().unwrap_or_default() == wanted
        }
        _ => true,
    }
}

/// Sums `rate - deduction` over the wash's service lines.
///
/// Lines whose name has no entry with a positive rate are collected as
/// unpaid, once each, in the order first seen.
fn rate_total(rates: &[SalaryRate], event: &WashEvent) -> (f64, Vec<String>) {
    let by_name: HashMap<&str, &SalaryRate> = rates
        .iter()
        .map(|rate| (rate.service_name.as_str(), rate))
        .collect();

    let mut total = 0.0;
    let mut unpaid: Vec<String> = Vec::new();

    for line in event.services.lines() {
        let name = line.service_name.as_str();
        if name.is_empty() {
            continue;
        }
        match by_name.get(name) {
            Some(rate) if rate.rate > 0.0 => {
                let earned = rate.rate - rate.deduction;
                if earned > 0.0 {
                    total += earned;
                }
            }
            _ => {
                if !unpaid.iter().any(|seen| seen == name) {
                    unpaid.push(name.to_string());
                }
            }
        }
    }

    (total, unpaid)
}

// =============================================================================
// Report
// =============================================================================

/// Builds the salary report: one row per employee, highest earner first.
///
/// Duplicate ids in a wash's employee list count once.
pub fn generate_salary_report(
    events: &[WashEvent],
    employees: &[Employee],
    schemes: &[SalaryScheme],
) -> Vec<SalaryReportRow> {
    let schemes_by_id: HashMap<&str, &SalaryScheme> =
        schemes.iter().map(|s| (s.id.as_str(), s)).collect();
    let employee_index: HashMap<&str, usize> = employees
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id.as_str(), i))
        .collect();

    let mut rows: Vec<SalaryReportRow> = employees
        .iter()
        .map(|e| SalaryReportRow {
            employee_id: e.id.clone(),
            employee_name: e.full_name.clone(),
            total_earnings: Money::zero(),
            breakdown: Vec::new(),
        })
        .collect();

    for event in events {
        let mut seen = HashSet::new();
        let resolved: Vec<usize> = event
            .employee_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| employee_index.get(id.as_str()).copied())
            .collect();
        if resolved.is_empty() {
            continue;
        }

        for &idx in &resolved {
            let Some(scheme) = employees[idx]
                .scheme_id()
                .and_then(|id| schemes_by_id.get(id))
            else {
                continue;
            };

            let share = calculate_individual_share(scheme, event, resolved.len());
            let row = &mut rows[idx];
            row.total_earnings += share.earnings;
            if share.is_reportable() {
                row.breakdown.push(SalaryBreakdownItem {
                    wash_event_id: event.id.clone(),
                    timestamp: event.timestamp.clone(),
                    vehicle_number: event.vehicle_number.clone(),
                    earnings: share.earnings,
                    unpaid_services: share.unpaid_services,
                });
            }
        }
    }

    rows.sort_by(|a, b| {
        b.total_earnings
            .cmp(&a.total_earnings)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    rows
}

// =============================================================================
// Unit Tests
// =============================================================================
