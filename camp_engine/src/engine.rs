//! Accounting computation engine.
//!
//! The `engine` module turns externally aggregated monthly figures
//! into accounting reports: camp net income, owner net income after
//! coach payouts, and the cross-check between registration-based and
//! payment-based income.  A monthly payout run uses the [`rayon`]
//! crate to compute per-coach payouts across CPU cores; every payout
//! is a pure function of its inputs so no synchronisation is needed.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::jalali::{self, MonthRange};
use crate::models::{
    CategoryTotal, CoachPayout, ExpenseEntry, ExpenseSummary, NetIncomeReport, PayoutReport,
    PayoutRunInput, PeriodTotals,
};
use crate::money;
use crate::payout;

/// Expense category that is also reported on its own.
pub const RENT_CATEGORY: &str = "rent";

/// A monetary record stamped with a Jalali date string.
pub trait Dated {
    fn date(&self) -> Option<&str>;
    fn amount(&self) -> Decimal;
}

impl Dated for ExpenseEntry {
    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Validates a report period and returns its date range.
pub fn period_range(year: i32, month: u32) -> Result<MonthRange, EngineError> {
    if year == 0 || !(1..=12).contains(&month) {
        return Err(EngineError::InvalidPeriod { year, month });
    }
    Ok(jalali::month_date_range(year, month))
}

/// Camp-level net income.
pub fn net_income(total_income: Decimal, total_expenses: Decimal) -> Decimal {
    money::subtract(total_income, [total_expenses])
}

/// Owner-level net income, after coaches have been paid.
pub fn owner_net_income(
    total_fees: Decimal,
    total_coach_payments: Decimal,
    total_expenses: Decimal,
) -> Decimal {
    money::subtract(total_fees, [total_coach_payments, total_expenses])
}

/// Difference between two independently sourced income figures, and
/// whether it exceeds `tolerance`.
pub fn income_discrepancy(
    registration_income: Decimal,
    payment_income: Decimal,
    tolerance: Decimal,
) -> (Decimal, bool) {
    let difference = money::subtract(registration_income, [payment_income]);
    let flagged = !money::equals_within(registration_income, payment_income, tolerance);
    (difference, flagged)
}

/// Sums the entries dated inside `range`.  Undated entries are skipped.
pub fn period_total<T: Dated>(entries: &[T], range: &MonthRange) -> Decimal {
    money::add(
        entries
            .iter()
            .filter(|entry| entry.date().is_some_and(|date| range.contains(date)))
            .map(|entry| entry.amount()),
    )
}

pub fn net_income_report(
    totals: &PeriodTotals,
    tolerance: Decimal,
) -> Result<NetIncomeReport, EngineError> {
    let period = period_range(totals.year, totals.month)?;
    let total_income = money::round(totals.total_income);
    let total_payments = money::round(totals.total_payments);
    let total_expenses = money::round(totals.total_expenses);
    let (discrepancy, has_discrepancy) =
        income_discrepancy(total_income, total_payments, tolerance);
    if has_discrepancy {
        warn!(
            year = totals.year,
            month = totals.month,
            %total_income,
            %total_payments,
            "registration income does not match payment records"
        );
    }
    Ok(NetIncomeReport {
        year: totals.year,
        month: totals.month,
        month_name: jalali::month_name(totals.month).to_string(),
        period,
        total_income,
        income_count: totals.income_count,
        total_expenses,
        expense_count: totals.expense_count,
        net_income: net_income(total_income, total_expenses),
        total_payments,
        payment_count: totals.payment_count,
        income_discrepancy: discrepancy,
        has_discrepancy,
    })
}

/// Runs the monthly coach payout report.
pub fn run_payouts(input: PayoutRunInput) -> Result<PayoutReport, EngineError> {
    let period = period_range(input.year, input.month)?;

    let mut payouts: Vec<CoachPayout> = input
        .coaches
        .into_par_iter()
        .map(|coach| {
            let fees = coach.collected_fees();
            let result = payout::payout_for(&coach.contract, &fees);
            debug!(
                coach_id = coach.coach_id,
                payment = %result.calculated_payment,
                "computed coach payout"
            );
            CoachPayout {
                coach_id: coach.coach_id,
                coach_name: coach.name,
                contract_type_label: coach.contract.contract_type.label().to_string(),
                contract_type: coach.contract.contract_type,
                percentage_rate: coach.contract.percentage_rate,
                monthly_salary: coach.contract.monthly_salary,
                fee_calculation_slots: coach.contract.fee_calculation_slots,
                total_fees_collected: fees.total,
                morning_evening_fees: fees.morning_evening,
                registration_count: fees.registration_count,
                result,
            }
        })
        .collect();
    payouts.sort_by_key(|p| Reverse(p.result.calculated_payment));

    let total_student_fees = money::round(input.total_student_fees);
    let total_expenses = money::round(input.total_expenses);
    let total_coach_payments = money::add(payouts.iter().map(|p| p.result.calculated_payment));
    let camp_net_income = owner_net_income(total_student_fees, total_coach_payments, total_expenses);
    info!(
        year = input.year,
        month = input.month,
        coaches = payouts.len(),
        %total_coach_payments,
        %camp_net_income,
        "payout run complete"
    );

    Ok(PayoutReport {
        year: input.year,
        month: input.month,
        month_name: jalali::month_name(input.month).to_string(),
        period,
        total_student_fees,
        total_coach_payments,
        total_expenses,
        camp_net_income,
        payouts,
    })
}

/// Groups expenses by case-folded category.  When `range` is given,
/// only expenses dated inside it are counted.
pub fn expense_summary(expenses: &[ExpenseEntry], range: Option<&MonthRange>) -> ExpenseSummary {
    let mut groups: BTreeMap<String, (Vec<Decimal>, u32)> = BTreeMap::new();
    for expense in expenses {
        if let Some(range) = range {
            if !expense.date().is_some_and(|date| range.contains(date)) {
                continue;
            }
        }
        let entry = groups
            .entry(expense.category.trim().to_lowercase())
            .or_default();
        entry.0.push(expense.amount);
        entry.1 += 1;
    }

    let by_category: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, (amounts, count))| CategoryTotal {
            category,
            total: money::add(amounts),
            count,
        })
        .collect();
    let rent_amount = by_category
        .iter()
        .find(|c| c.category == RENT_CATEGORY)
        .map_or(Decimal::ZERO, |c| c.total);
    ExpenseSummary {
        total: money::add(by_category.iter().map(|c| c.total)),
        rent_amount,
        by_category,
    }
}
