use serde::Serialize;

use super::feeds::{total_debt_payments, trailing_summaries};
use super::types::{DebtSnapshot, MonthlySummary, PlannerConfig};

/// Minimum number of positive-income months before consistency is measured.
const MIN_CONSISTENCY_MONTHS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsCapacity {
    pub months_of_data: usize,
    pub avg_monthly_income: f64,
    pub avg_monthly_expenses: f64,
    pub avg_monthly_net: f64,
    pub total_debt_payments: f64,
    pub monthly_savings_capacity: f64,
    pub income_consistency: f64,
}

pub fn savings_capacity(
    summaries: &[MonthlySummary],
    config: &PlannerConfig,
    debts: &[DebtSnapshot],
) -> SavingsCapacity {
    let trailing = trailing_summaries(summaries);
    let months_of_data = trailing.len();

    let (avg_monthly_income, avg_monthly_expenses) = if months_of_data == 0 {
        (0.0, 0.0)
    } else {
        let n = months_of_data as f64;
        let income: f64 = trailing.iter().map(|s| s.total_income).sum();
        let expenses: f64 = trailing.iter().map(|s| s.total_expenses).sum();
        (income / n, expenses / n)
    };
    let avg_monthly_net = avg_monthly_income - avg_monthly_expenses;
    let total_debt_payments = total_debt_payments(debts);

    let monthly_savings_capacity = (avg_monthly_net
        + config.partner_monthly_savings
        + config.additional_monthly_savings
        + config.monthly_expense_cuts
        - total_debt_payments)
        .max(0.0);

    let incomes: Vec<f64> = trailing.iter().map(|s| s.total_income).collect();

    SavingsCapacity {
        months_of_data,
        avg_monthly_income,
        avg_monthly_expenses,
        avg_monthly_net,
        total_debt_payments,
        monthly_savings_capacity,
        income_consistency: income_consistency(&incomes),
    }
}

/// `1 - stdDev/mean` over the strictly positive incomes, floored at 0.
pub fn income_consistency(incomes: &[f64]) -> f64 {
    let positive: Vec<f64> = incomes.iter().copied().filter(|v| *v > 0.0).collect();
    if positive.len() < MIN_CONSISTENCY_MONTHS {
        return 0.0;
    }

    let n = positive.len() as f64;
    let mean = positive.iter().sum::<f64>() / n;
    let variance = positive.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    (1.0 - std_dev / mean).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn summaries(rows: &[(f64, f64)]) -> Vec<MonthlySummary> {
        rows.iter()
            .enumerate()
            .map(|(idx, (income, expenses))| MonthlySummary {
                month: NaiveDate::from_ymd_opt(2025, idx as u32 % 12 + 1, 1).expect("valid date"),
                total_income: *income,
                total_expenses: *expenses,
            })
            .collect()
    }

    fn debt(payment: Option<f64>, active: bool) -> DebtSnapshot {
        DebtSnapshot {
            id: "debt".to_string(),
            remaining_balance: 1_000.0,
            monthly_payment: payment,
            is_active: active,
        }
    }

    #[test]
    fn no_history_yields_zeroes() {
        let result = savings_capacity(&[], &PlannerConfig::default(), &[]);
        assert_eq!(result.months_of_data, 0);
        assert_approx(result.avg_monthly_income, 0.0);
        assert_approx(result.avg_monthly_net, 0.0);
        assert_approx(result.monthly_savings_capacity, 0.0);
        assert_approx(result.income_consistency, 0.0);
    }

    #[test]
    fn capacity_combines_net_adjustments_and_debt_service() {
        let history = summaries(&[(3_000.0, 2_000.0), (3_200.0, 2_400.0), (2_800.0, 1_600.0)]);
        let config = PlannerConfig {
            partner_monthly_savings: 300.0,
            additional_monthly_savings: 100.0,
            monthly_expense_cuts: 50.0,
            ..PlannerConfig::default()
        };
        let debts = vec![debt(Some(200.0), true), debt(None, true), debt(Some(900.0), false)];

        let result = savings_capacity(&history, &config, &debts);
        assert_eq!(result.months_of_data, 3);
        assert_approx(result.avg_monthly_income, 3_000.0);
        assert_approx(result.avg_monthly_expenses, 2_000.0);
        assert_approx(result.avg_monthly_net, 1_000.0);
        assert_approx(result.total_debt_payments, 200.0);
        assert_approx(result.monthly_savings_capacity, 1_250.0);
    }

    #[test]
    fn capacity_is_floored_at_zero() {
        let history = summaries(&[(1_000.0, 1_500.0)]);
        let debts = vec![debt(Some(100.0), true)];
        let result = savings_capacity(&history, &PlannerConfig::default(), &debts);
        assert_approx(result.avg_monthly_net, -500.0);
        assert_approx(result.monthly_savings_capacity, 0.0);
    }

    #[test]
    fn consistency_needs_three_positive_months() {
        assert_approx(income_consistency(&[2_000.0, 2_000.0]), 0.0);
        assert_approx(income_consistency(&[2_000.0, 0.0, 2_000.0, -10.0]), 0.0);
        assert_approx(income_consistency(&[2_000.0, 2_000.0, 2_000.0]), 1.0);
    }

    #[test]
    fn consistency_uses_coefficient_of_variation() {
        // mean 2000, population std dev 1000
        assert_approx(income_consistency(&[1_000.0, 3_000.0, 1_000.0, 3_000.0]), 0.5);
        // std dev larger than the mean floors at zero
        assert_approx(income_consistency(&[100.0, 100.0, 100.0, 10_000.0]), 0.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_capacity_and_consistency_stay_in_range(
            rows in proptest::collection::vec((0u32..20_000, 0u32..20_000), 0..14),
            partner in 0u32..2_000,
            payment in 0u32..3_000,
        ) {
            let rows: Vec<(f64, f64)> = rows
                .into_iter()
                .map(|(i, e)| (f64::from(i), f64::from(e)))
                .collect();
            let config = PlannerConfig {
                partner_monthly_savings: f64::from(partner),
                ..PlannerConfig::default()
            };
            let result = savings_capacity(
                &summaries(&rows),
                &config,
                &[debt(Some(f64::from(payment)), true)],
            );
            prop_assert!(result.months_of_data <= 12);
            prop_assert!(result.monthly_savings_capacity >= 0.0);
            prop_assert!(result.monthly_savings_capacity.is_finite());
            prop_assert!((0.0..=1.0).contains(&result.income_consistency));
        }
    }
}
