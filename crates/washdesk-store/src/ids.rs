//! # Record Id Generation
//!
//! Ids look like `we_1714550000000_k3j9a0b`: a type prefix, the creation
//! time in unix milliseconds and seven random `[a-z0-9]` characters.
//! Salary schemes use `scheme_<millis>` with no suffix.

use chrono::Utc;
use uuid::Uuid;

pub const EMPLOYEE_PREFIX: &str = "emp";
pub const COUNTER_AGENT_PREFIX: &str = "agent";
pub const AGGREGATOR_PREFIX: &str = "agg";
pub const WASH_EVENT_PREFIX: &str = "we";
pub const EXPENSE_PREFIX: &str = "exp";
pub const EMPLOYEE_TRANSACTION_PREFIX: &str = "trans";
pub const CLIENT_TRANSACTION_PREFIX: &str = "ctrans";
pub const SALARY_SCHEME_PREFIX: &str = "scheme";

const SUFFIX_LEN: usize = 7;

/// `<prefix>_<unix millis>_<7 random chars>`
pub fn generate_id(prefix: &str) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}

/// `scheme_<unix millis>`
pub fn generate_scheme_id() -> String {
    format!("{}_{}", SALARY_SCHEME_PREFIX, Utc::now().timestamp_millis())
}

/// Keeps a caller-supplied id, or generates one when it is blank.
pub fn id_or_generate(id: &str, prefix: &str) -> String {
    if id.trim().is_empty() {
        generate_id(prefix)
    } else {
        id.to_string()
    }
}
