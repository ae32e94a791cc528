//! # Domain Types
//!
//! Every record Washdesk persists, in the exact JSON shape the files on
//! disk (and the web frontend) use: camelCase keys, optional fields omitted.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Employee     │   │   WashEvent     │   │  SalaryScheme   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  employeeIds    │   │  type           │       │
//! │  │  salarySchemeId │──►│  paymentMethod  │   │  percentage     │       │
//! │  │  username/pass  │   │  sourceId       │   │  rateSource     │       │
//! │  └─────────────────┘   │  services       │   │  rates[]        │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CounterAgent   │   │   Aggregator    │   │    Expense      │       │
//! │  │  balance        │   │  balance        │   │  category       │       │
//! │  │  priceList      │   │  priceLists[]   │   │  quantity/unit  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Ledgers: EmployeeTransaction, ClientTransaction (one file per owner)  │
//! │  Singletons: Inventory, RetailPriceConfig                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Monetary fields on records stay `f64`: they are what the dispatcher
//! parsed and what the files hold. Only computed earnings use [`Money`].
//!
//! [`Money`]: crate::money::Money

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Price Lists
// =============================================================================

/// Chemical used by one employee on one service line, in grams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeeConsumption {
    pub employee_id: String,
    pub amount: f64,
}

/// One service line: in a price list, or rendered on a wash.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceListItem {
    pub service_name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "is_false")]
    pub is_custom: bool,
    /// Direct chemical consumption in grams; non-positive means none.
    pub chemical_consumption: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub employee_consumptions: Vec<EmployeeConsumption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A price list with a name (aggregators keep several).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct NamedPriceList {
    pub name: String,
    pub services: Vec<PriceListItem>,
}

/// Retail (walk-in customer) pricing. Singleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct RetailPriceConfig {
    pub main_price_list: Vec<PriceListItem>,
    pub additional_price_list: Vec<PriceListItem>,
    #[serde(skip_serializing_if = "is_false")]
    pub allow_custom_retail_services: bool,
    /// Card acquiring fee, percent of the wash total.
    pub card_acquiring_percentage: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dismissed_custom_services: Vec<String>,
}

// =============================================================================
// Clients
// =============================================================================

/// A car registered to a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Car {
    pub id: String,
    pub license_plate: String,
}

/// A legal entity behind a client, with the details needed for invoicing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientCompany {
    pub company_name: String,
    pub owner_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_social_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accountant_social_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kpp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ogrn_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ogrn_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correspondent_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bik: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A corporate client washing on contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct CounterAgent {
    pub id: String,
    pub name: String,
    /// Running balance, moved only by client transactions.
    pub balance: f64,
    pub companies: Vec<ClientCompany>,
    pub cars: Vec<Car>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub price_list: Vec<PriceListItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_price_list: Vec<PriceListItem>,
    #[serde(skip_serializing_if = "is_false")]
    pub allow_custom_services: bool,
}

/// A booking/fleet aggregator sending cars to the wash.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Aggregator {
    pub id: String,
    pub name: String,
    /// Running balance, moved only by client transactions.
    pub balance: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<ClientCompany>,
    pub cars: Vec<Car>,
    pub price_lists: Vec<NamedPriceList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_price_list_name: Option<String>,
}

// =============================================================================
// Employees
// =============================================================================

/// A member of staff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub payment_details: String,
    pub has_car: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_scheme_id: Option<String>,
}

impl Employee {
    /// The salary scheme reference, treating an empty string as absent.
    pub fn scheme_id(&self) -> Option<&str> {
        non_empty(self.salary_scheme_id.as_deref())
    }

    /// True when both stored credentials are present and equal the inputs.
    pub fn credentials_match(&self, username: &str, password: &str) -> bool {
        non_empty(self.username.as_deref()) == Some(username)
            && non_empty(self.password.as_deref()) == Some(password)
    }
}

/// An employee as shown outside the store: never carries the password.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub payment_details: String,
    pub has_car: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_scheme_id: Option<String>,
}

impl From<&Employee> for EmployeeProfile {
    fn from(emp: &Employee) -> Self {
        EmployeeProfile {
            id: emp.id.clone(),
            full_name: emp.full_name.clone(),
            phone: emp.phone.clone(),
            payment_details: emp.payment_details.clone(),
            has_car: emp.has_car,
            username: emp.username.clone(),
            salary_scheme_id: emp.salary_scheme_id.clone(),
        }
    }
}

impl From<Employee> for EmployeeProfile {
    fn from(emp: Employee) -> Self {
        EmployeeProfile::from(&emp)
    }
}

// =============================================================================
// Salary Schemes
// =============================================================================

/// How a scheme converts a wash into earnings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum SchemeKind {
    /// Share of the wash amount minus a fixed deduction.
    #[default]
    Percentage,
    /// Fixed rate per named service.
    Rate,
}

/// Channel a wash was paid through, as a rate scheme filter sees it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    #[default]
    Retail,
    Aggregator,
    CounterAgent,
}

/// Restricts a rate scheme to washes from one channel/client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct RateSource {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// `"retail"` for retail, otherwise the client id.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_list_name: Option<String>,
}

/// Earnings rate for one service name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct SalaryRate {
    pub service_name: String,
    pub rate: f64,
    pub deduction: f64,
}

/// A configurable payroll rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct SalaryScheme {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SchemeKind,
    /// Percent of the pool paid out (percentage schemes).
    pub percentage: f64,
    /// Subtracted from the base amount before the percentage applies.
    pub fixed_deduction: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_source: Option<RateSource>,
    pub rates: Vec<SalaryRate>,
}

// =============================================================================
// Wash Events
// =============================================================================

/// How a wash was paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Aggregator,
    CounterAgentContract,
    /// Anything this build does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl PaymentMethod {
    /// The payment channel a rate scheme filter compares against.
    ///
    /// ```rust
    /// use washdesk_core::{PaymentMethod, SourceKind};
    ///
    /// assert_eq!(PaymentMethod::Card.source_kind(), Some(SourceKind::Retail));
    /// assert_eq!(PaymentMethod::Unknown.source_kind(), None);
    /// ```
    pub fn source_kind(&self) -> Option<SourceKind> {
        match self {
            PaymentMethod::Cash | PaymentMethod::Card | PaymentMethod::Transfer => {
                Some(SourceKind::Retail)
            }
            PaymentMethod::Aggregator => Some(SourceKind::Aggregator),
            PaymentMethod::CounterAgentContract => Some(SourceKind::CounterAgent),
            PaymentMethod::Unknown => None,
        }
    }
}

/// The service lines rendered on a wash.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct WashServices {
    pub main: PriceListItem,
    pub additional: Vec<PriceListItem>,
}

impl WashServices {
    /// Main line first, then additional lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &PriceListItem> {
        std::iter::once(&self.main).chain(self.additional.iter())
    }
}

/// A note left on a wash by a driver or manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct WashComment {
    pub text: String,
    pub author_id: String,
    pub date: String,
}

/// One earlier version of a wash, kept when it is edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct WashEditEntry {
    pub edited_at: String,
    pub edited_by: String,
    #[ts(type = "Record<string, unknown>")]
    pub previous_state: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A single vehicle wash.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct WashEvent {
    pub id: String,
    /// ISO-8601; lists sort on this string, newest first.
    pub timestamp: String,
    pub vehicle_number: String,
    pub employee_ids: Vec<String>,
    pub payment_method: PaymentMethod,
    /// Aggregator or counter-agent id for non-retail washes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_list_name: Option<String>,
    pub total_amount: f64,
    /// Amount after acquiring fee; zero when not computed.
    pub net_amount: f64,
    pub acquiring_fee: f64,
    pub services: WashServices,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub driver_comments: Vec<WashComment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edit_history: Vec<WashEditEntry>,
}

// =============================================================================
// Expenses & Inventory
// =============================================================================

/// Money spent by the business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub quantity: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unit: String,
    pub price_per_unit: f64,
}

/// Chemical in stock. Singleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Inventory {
    pub chemical_stock_grams: f64,
}

impl Inventory {
    /// Adds `delta_grams` to the stock, clamping at zero.
    ///
    /// The sum is taken in whole hundredths of a gram, so a delta followed
    /// by its negation lands back on the same stored value.
    ///
    /// Returns how many grams the clamp discarded (0 when it did not fire),
    /// so the caller can report the loss.
    ///
    /// ## Example
    /// ```rust
    /// use washdesk_core::Inventory;
    ///
    /// let mut inv = Inventory { chemical_stock_grams: 30.0 };
    /// assert_eq!(inv.apply_delta(-50.0), 20.0);
    /// assert_eq!(inv.chemical_stock_grams, 0.0);
    /// ```
    pub fn apply_delta(&mut self, delta_grams: f64) -> f64 {
        let next = to_centigrams(self.chemical_stock_grams) + to_centigrams(delta_grams);
        if next < 0 {
            self.chemical_stock_grams = 0.0;
            from_centigrams(-next)
        } else {
            self.chemical_stock_grams = from_centigrams(next);
            0.0
        }
    }
}

const CENTIGRAMS_PER_GRAM: f64 = 100.0;

fn to_centigrams(grams: f64) -> i64 {
    if grams.is_finite() {
        (grams * CENTIGRAMS_PER_GRAM).round() as i64
    } else {
        0
    }
}

fn from_centigrams(centigrams: i64) -> f64 {
    centigrams as f64 / CENTIGRAMS_PER_GRAM
}

// =============================================================================
// Ledgers
// =============================================================================

/// Kinds of money movement between the business and an employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum EmployeeTransactionKind {
    #[default]
    Payment,
    Loan,
    Bonus,
    Purchase,
}

/// An entry in an employee's ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeeTransaction {
    pub id: String,
    pub employee_id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: EmployeeTransactionKind,
    pub amount: f64,
    pub description: String,
}

/// Client ledgers only ever record payments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ClientTransactionKind {
    #[default]
    Payment,
}

/// An entry in a client's ledger. `amount` is signed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientTransaction {
    pub id: String,
    pub client_id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: ClientTransactionKind,
    pub amount: f64,
    pub description: String,
}

// =============================================================================
// Helpers
// =============================================================================

fn is_false(value: &bool) -> bool {
    !*value
}

/// Maps `Some("")` to `None`.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wash_event_reads_existing_file_shape() {
        let json = r#"{
            "id": "we_1700000000000_abc1234",
            "timestamp": "2024-05-01T10:00:00.000Z",
            "vehicleNumber": "A123BC",
            "employeeIds": ["emp_1"],
            "paymentMethod": "counterAgentContract",
            "sourceId": "agent_9",
            "totalAmount": 1500,
            "services": {
                "main": { "serviceName": "Wash", "price": 1500, "chemicalConsumption": 40 },
                "additional": []
            }
        }"#;

        let event: WashEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.payment_method, PaymentMethod::CounterAgentContract);
        assert_eq!(event.source_id.as_deref(), Some("agent_9"));
        assert_eq!(event.net_amount, 0.0);
        assert_eq!(event.services.main.chemical_consumption, 40.0);
    }

    #[test]
    fn test_unknown_payment_method_is_tolerated() {
        let event: WashEvent = serde_json::from_str(r#"{"paymentMethod": "barter"}"#).unwrap();
        assert_eq!(event.payment_method, PaymentMethod::Unknown);
        assert_eq!(event.payment_method.source_kind(), None);
    }

    #[test]
    fn test_scheme_type_field_name() {
        let scheme: SalaryScheme = serde_json::from_str(
            r#"{"id":"scheme_1","name":"Agg","type":"rate",
                "rateSource":{"type":"counterAgent","id":"agent_1"},
                "rates":[{"serviceName":"Wash","rate":100}]}"#,
        )
        .unwrap();
        assert_eq!(scheme.kind, SchemeKind::Rate);
        let source = scheme.rate_source.unwrap();
        assert_eq!(source.kind, SourceKind::CounterAgent);
        assert_eq!(scheme.rates[0].deduction, 0.0);
    }

    #[test]
    fn test_profile_drops_password() {
        let emp = Employee {
            id: "emp_1".to_string(),
            username: Some("ivan".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&EmployeeProfile::from(&emp)).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"username\":\"ivan\""));
    }

    #[test]
    fn test_empty_scheme_reference_is_absent() {
        let emp = Employee {
            salary_scheme_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(emp.scheme_id(), None);
    }

    #[test]
    fn test_credentials_require_both_values() {
        let emp = Employee {
            username: Some("ivan".to_string()),
            password: None,
            ..Default::default()
        };
        assert!(!emp.credentials_match("ivan", ""));
    }

    #[test]
    fn test_inventory_delta_within_stock() {
        let mut inv = Inventory {
            chemical_stock_grams: 500.0,
        };
        assert_eq!(inv.apply_delta(-120.0), 0.0);
        assert_eq!(inv.apply_delta(120.0), 0.0);
        assert_eq!(inv.chemical_stock_grams, 500.0);
    }

    #[test]
    fn test_inventory_decimal_delta_round_trip() {
        let mut inv = Inventory {
            chemical_stock_grams: 3777.9,
        };
        inv.apply_delta(-942.8);
        assert_eq!(inv.chemical_stock_grams, 2835.1);
        inv.apply_delta(942.8);
        assert_eq!(inv.chemical_stock_grams, 3777.9);

        let mut inv = Inventory {
            chemical_stock_grams: 0.1,
        };
        inv.apply_delta(0.2);
        inv.apply_delta(-0.2);
        assert_eq!(inv.chemical_stock_grams, 0.1);
    }

    #[test]
    fn test_inventory_clamp_reports_loss() {
        let mut inv = Inventory::default();
        let lost = inv.apply_delta(-75.0);
        assert_eq!(lost, 75.0);
        assert_eq!(inv.chemical_stock_grams, 0.0);
    }

    #[test]
    fn test_service_lines_order() {
        let services = WashServices {
            main: PriceListItem {
                service_name: "Wash".to_string(),
                ..Default::default()
            },
            additional: vec![PriceListItem {
                service_name: "Wax".to_string(),
                ..Default::default()
            }],
        };
        let names: Vec<_> = services.lines().map(|s| s.service_name.as_str()).collect();
        assert_eq!(names, vec!["Wash", "Wax"]);
    }
}
