//! Coach payout calculation.
//!
//! A payout is a single computation selected by the coach's
//! [`ContractType`]:
//!
//! * salary: the fixed monthly salary;
//! * percentage: `eligible_fees × rate%`;
//! * hybrid: salary plus `eligible_fees × rate%`;
//! * anything else: zero.
//!
//! Which fees are eligible is decided upstream by the coach's
//! [`FeeCalculationSlots`] policy; see [`eligible_fees`].

use rust_decimal::Decimal;

use crate::models::{CoachContract, CoachFees, ContractType, FeeCalculationSlots, PayoutResult};
use crate::money;

/// Picks the fee sum that counts toward the percentage part.
pub fn eligible_fees(policy: FeeCalculationSlots, fees: &CoachFees) -> Decimal {
    match policy {
        FeeCalculationSlots::All => fees.total,
        FeeCalculationSlots::MorningEvening => fees.morning_evening,
        FeeCalculationSlots::Custom => fees.custom,
    }
}

pub fn calculate_payment(contract: &CoachContract, eligible_fees: Decimal) -> Decimal {
    match &contract.contract_type {
        ContractType::Salary => money::round(contract.monthly_salary),
        ContractType::Percentage => money::percentage(eligible_fees, contract.percentage_rate),
        ContractType::Hybrid => money::add([
            contract.monthly_salary,
            money::percentage(eligible_fees, contract.percentage_rate),
        ]),
        ContractType::Unknown(_) => Decimal::ZERO,
    }
}

/// Human-readable formula for the payment, in whole currency units.
pub fn breakdown(contract: &CoachContract, eligible_fees: Decimal, payment: Decimal) -> String {
    let rate = contract.percentage_rate.normalize();
    match &contract.contract_type {
        ContractType::Salary => {
            format!("حقوق ثابت: {}", money::format(contract.monthly_salary))
        }
        ContractType::Percentage => format!(
            "{} × {}% = {}",
            money::format(eligible_fees),
            rate,
            money::format(payment)
        ),
        ContractType::Hybrid => {
            let share = money::percentage(eligible_fees, contract.percentage_rate);
            format!(
                "حقوق: {} + ({} × {}% = {}) = {}",
                money::format(contract.monthly_salary),
                money::format(eligible_fees),
                rate,
                money::format(share),
                money::format(payment)
            )
        }
        ContractType::Unknown(_) => String::new(),
    }
}

/// Computes a payout from fees that have already been filtered by the
/// coach's eligibility policy.
pub fn calculate_payout(contract: &CoachContract, eligible_fees: Decimal) -> PayoutResult {
    let eligible_fees = money::round(eligible_fees);
    let calculated_payment = calculate_payment(contract, eligible_fees);
    PayoutResult {
        eligible_fees,
        calculated_payment,
        breakdown_text: breakdown(contract, eligible_fees, calculated_payment),
    }
}

/// Applies the coach's eligibility policy to `fees` and computes the payout.
pub fn payout_for(contract: &CoachContract, fees: &CoachFees) -> PayoutResult {
    calculate_payout(contract, eligible_fees(contract.fee_calculation_slots, fees))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn contract(contract_type: ContractType, rate: Decimal, salary: Decimal) -> CoachContract {
        CoachContract {
            contract_type,
            percentage_rate: rate,
            monthly_salary: salary,
            fee_calculation_slots: FeeCalculationSlots::All,
        }
    }

    #[test]
    fn test_percentage_contract() {
        let c = contract(ContractType::Percentage, dec!(50), dec!(0));
        let result = calculate_payout(&c, dec!(100000));
        assert_eq!(result.calculated_payment, dec!(50000.0));
        assert_eq!(result.breakdown_text, "100,000 × 50% = 50,000");
    }

    #[test]
    fn test_salary_contract_ignores_fees() {
        let c = contract(ContractType::Salary, dec!(50), dec!(25000));
        let result = calculate_payout(&c, dec!(100000));
        assert_eq!(result.calculated_payment, dec!(25000.0));
        assert_eq!(calculate_payment(&c, Decimal::ZERO), dec!(25000));
        assert_eq!(result.breakdown_text, "حقوق ثابت: 25,000");
    }

    #[test]
    fn test_hybrid_contract() {
        let c = contract(ContractType::Hybrid, dec!(30), dec!(10000));
        let result = calculate_payout(&c, dec!(50000));
        assert_eq!(result.calculated_payment, dec!(25000.0));
        assert_eq!(result.breakdown_text, "حقوق: 10,000 + (50,000 × 30% = 15,000) = 25,000");
    }

    #[test]
    fn test_unknown_contract_pays_nothing() {
        let c = contract(ContractType::Unknown("commission".into()), dec!(50), dec!(25000));
        let result = calculate_payout(&c, dec!(100000));
        assert_eq!(result.calculated_payment, Decimal::ZERO);
        assert_eq!(result.breakdown_text, "");
    }

    #[test]
    fn test_edge_cases() {
        let pct = |rate, fees| {
            calculate_payment(&contract(ContractType::Percentage, rate, dec!(0)), fees)
        };
        assert_eq!(pct(dec!(0), dec!(100000)), dec!(0));
        assert_eq!(pct(dec!(100), dec!(50000)), dec!(50000));
        assert_eq!(pct(dec!(50), dec!(0)), dec!(0));
        assert_eq!(pct(dec!(50), dec!(-1000)), dec!(-500));
        assert_eq!(pct(dec!(33.5), dec!(10000)), dec!(3350));

        let large = pct(dec!(33.333333), dec!(999999999));
        assert!(large > Decimal::ZERO);
        assert!(large.scale() <= 2);

        let hybrid = |rate, salary, fees| {
            calculate_payment(&contract(ContractType::Hybrid, rate, salary), fees)
        };
        assert_eq!(hybrid(dec!(50), dec!(0), dec!(1000)), dec!(500));
        assert_eq!(hybrid(dec!(0), dec!(1000), dec!(5000)), dec!(1000));
    }

    #[test]
    fn test_default_contract_is_zero_rate_percentage() {
        let result = calculate_payout(&CoachContract::default(), dec!(1000));
        assert_eq!(result.calculated_payment, Decimal::ZERO);
    }

    #[test]
    fn test_breakdown_shows_fractional_rate() {
        let c = contract(ContractType::Percentage, dec!(33.50), dec!(0));
        let result = calculate_payout(&c, dec!(10000));
        assert_eq!(result.breakdown_text, "10,000 × 33.5% = 3,350");
    }

    #[test]
    fn test_eligibility_policy() {
        let fees = CoachFees {
            total: dec!(300000),
            morning_evening: dec!(200000),
            custom: dec!(50000),
            registration_count: 12,
        };
        assert_eq!(eligible_fees(FeeCalculationSlots::All, &fees), dec!(300000));
        assert_eq!(eligible_fees(FeeCalculationSlots::MorningEvening, &fees), dec!(200000));
        assert_eq!(eligible_fees(FeeCalculationSlots::Custom, &fees), dec!(50000));

        let c = CoachContract {
            contract_type: ContractType::Percentage,
            percentage_rate: dec!(50),
            monthly_salary: Decimal::ZERO,
            fee_calculation_slots: FeeCalculationSlots::MorningEvening,
        };
        let result = payout_for(&c, &fees);
        assert_eq!(result.eligible_fees, dec!(200000));
        assert_eq!(result.calculated_payment, dec!(100000));
    }
}
