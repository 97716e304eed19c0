//! Data models for the Camp Engine.
//!
//! The `models` module defines the serialisable value types that flow
//! through payout and accounting calculations: coach contracts, the
//! fee sums a coach collected in a period, and the report structures
//! handed back to callers.  All of them are transient: they are built
//! per request from caller-supplied values and never persisted here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::jalali::MonthRange;
use crate::money;
use crate::time_slot;

/// How a coach is paid.  Travels on the wire as its snake_case name;
/// a name the engine does not recognise is kept in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractType {
    /// A fixed monthly salary.
    Salary,
    /// A share of the coach's eligible registration fees.
    #[default]
    Percentage,
    /// Fixed salary plus a share of eligible fees.
    Hybrid,
    /// Anything else.  Pays nothing.
    Unknown(String),
}

impl ContractType {
    pub fn wire_name(&self) -> &str {
        match self {
            ContractType::Salary => "salary",
            ContractType::Percentage => "percentage",
            ContractType::Hybrid => "hybrid",
            ContractType::Unknown(name) => name,
        }
    }

    /// Dari label shown in reports; unrecognised types show their own name.
    pub fn label(&self) -> &str {
        match self {
            ContractType::Salary => "حقوق ثابت",
            ContractType::Percentage => "درصدی",
            ContractType::Hybrid => "ترکیبی",
            ContractType::Unknown(name) => name,
        }
    }
}

impl From<String> for ContractType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "salary" => ContractType::Salary,
            "percentage" => ContractType::Percentage,
            "hybrid" => ContractType::Hybrid,
            _ => ContractType::Unknown(name),
        }
    }
}

impl From<ContractType> for String {
    fn from(contract_type: ContractType) -> Self {
        match contract_type {
            ContractType::Unknown(name) => name,
            known => known.wire_name().to_string(),
        }
    }
}

/// Which of a coach's collected fees count toward the percentage part
/// of their payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeCalculationSlots {
    #[default]
    All,
    /// Only fees from slots whose label classifies as morning/evening.
    MorningEvening,
    /// Only fees from slots flagged fee-counting for this coach.
    Custom,
}

/// Contract settings of a coach.  Every field is always present;
/// fields that do not apply to the contract type are simply ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachContract {
    pub contract_type: ContractType,
    /// Percent of eligible fees, nominally `0..=100`.
    pub percentage_rate: Decimal,
    pub monthly_salary: Decimal,
    pub fee_calculation_slots: FeeCalculationSlots,
}

/// One registration fee attributed to a coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationFee {
    pub fee_amount: Decimal,
    /// Label of the registration's time slot, if it has one.
    #[serde(default)]
    pub time_slot_label: Option<String>,
    /// Whether the coach/time-slot pairing is flagged fee-counting.
    #[serde(default)]
    pub counts_for_fee: bool,
}

/// A coach's collected fees for one period, pre-split by eligibility
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachFees {
    pub total: Decimal,
    pub morning_evening: Decimal,
    pub custom: Decimal,
    pub registration_count: u32,
}

impl CoachFees {
    pub fn from_registrations(registrations: &[RegistrationFee]) -> Self {
        let amounts = |keep: fn(&RegistrationFee) -> bool| {
            money::add(registrations.iter().filter(|r| keep(r)).map(|r| r.fee_amount))
        };
        Self {
            total: amounts(|_| true),
            morning_evening: amounts(|r| {
                r.time_slot_label
                    .as_deref()
                    .is_some_and(time_slot::is_morning_evening)
            }),
            custom: amounts(|r| r.counts_for_fee),
            registration_count: registrations.len() as u32,
        }
    }
}

/// Outcome of one payout calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutResult {
    pub eligible_fees: Decimal,
    pub calculated_payment: Decimal,
    pub breakdown_text: String,
}

/// A coach entering a monthly payout run.  Fees are either given as
/// pre-aggregated sums or as raw registrations to be classified here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachPayoutInput {
    pub coach_id: u64,
    pub name: String,
    #[serde(default)]
    pub contract: CoachContract,
    #[serde(default)]
    pub fees: Option<CoachFees>,
    #[serde(default)]
    pub registrations: Vec<RegistrationFee>,
}

impl CoachPayoutInput {
    pub fn collected_fees(&self) -> CoachFees {
        self.fees
            .unwrap_or_else(|| CoachFees::from_registrations(&self.registrations))
    }
}

/// Input to a monthly payout run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutRunInput {
    pub year: i32,
    pub month: u32,
    pub total_student_fees: Decimal,
    pub total_expenses: Decimal,
    pub coaches: Vec<CoachPayoutInput>,
}

/// One line of a payout report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachPayout {
    pub coach_id: u64,
    pub coach_name: String,
    pub contract_type: ContractType,
    pub contract_type_label: String,
    pub percentage_rate: Decimal,
    pub monthly_salary: Decimal,
    pub fee_calculation_slots: FeeCalculationSlots,
    pub total_fees_collected: Decimal,
    pub morning_evening_fees: Decimal,
    pub registration_count: u32,
    #[serde(flatten)]
    pub result: PayoutResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutReport {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub period: MonthRange,
    pub total_student_fees: Decimal,
    pub total_coach_payments: Decimal,
    pub total_expenses: Decimal,
    /// Fees minus coach payments minus expenses.
    pub camp_net_income: Decimal,
    /// Sorted by payment, largest first.
    pub payouts: Vec<CoachPayout>,
}

/// Externally aggregated sums for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub year: i32,
    pub month: u32,
    /// Registration fees recognised in the period.
    pub total_income: Decimal,
    #[serde(default)]
    pub income_count: u32,
    /// Payment records in the period, used to cross-check income.
    pub total_payments: Decimal,
    #[serde(default)]
    pub payment_count: u32,
    pub total_expenses: Decimal,
    #[serde(default)]
    pub expense_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetIncomeReport {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub period: MonthRange,
    pub total_income: Decimal,
    pub income_count: u32,
    pub total_expenses: Decimal,
    pub expense_count: u32,
    pub net_income: Decimal,
    pub total_payments: Decimal,
    pub payment_count: u32,
    pub income_discrepancy: Decimal,
    pub has_discrepancy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub amount: Decimal,
    pub category: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total: Decimal,
    pub rent_amount: Decimal,
    pub by_category: Vec<CategoryTotal>,
}
