//! Read-only views over the snapshot feeds the surrounding application hands in.

use serde::Serialize;

use super::types::{AccountSnapshot, DebtSnapshot, MonthlySummary, SavingsGoal, non_negative};

pub const MAX_SUMMARY_MONTHS: usize = 12;

pub fn active_accounts(accounts: &[AccountSnapshot]) -> impl Iterator<Item = &AccountSnapshot> {
    accounts.iter().filter(|account| account.is_active)
}

/// Accounts owned by `entity_id`; `None` selects personal accounts.
pub fn accounts_for_entity<'a>(
    accounts: &'a [AccountSnapshot],
    entity_id: Option<&'a str>,
) -> impl Iterator<Item = &'a AccountSnapshot> {
    accounts
        .iter()
        .filter(move |account| account.entity_id.as_deref() == entity_id)
}

pub fn active_debts(debts: &[DebtSnapshot]) -> impl Iterator<Item = &DebtSnapshot> {
    debts.iter().filter(|debt| debt.is_active)
}

pub fn total_active_debt(debts: &[DebtSnapshot]) -> f64 {
    active_debts(debts)
        .map(|debt| non_negative(debt.remaining_balance))
        .sum()
}

pub fn total_debt_payments(debts: &[DebtSnapshot]) -> f64 {
    active_debts(debts)
        .map(|debt| non_negative(debt.monthly_payment.unwrap_or(0.0)))
        .sum()
}

/// The newest twelve summaries, oldest first.
pub fn trailing_summaries(summaries: &[MonthlySummary]) -> Vec<&MonthlySummary> {
    let mut sorted: Vec<&MonthlySummary> = summaries.iter().collect();
    sorted.sort_by_key(|summary| summary.month);
    let skip = sorted.len().saturating_sub(MAX_SUMMARY_MONTHS);
    sorted.into_iter().skip(skip).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTotals {
    pub current_amount: f64,
    pub target_amount: f64,
    pub progress_percent: f64,
}

pub fn savings_goal_totals(goals: &[SavingsGoal]) -> GoalTotals {
    let current_amount: f64 = goals.iter().map(|g| non_negative(g.current_amount)).sum();
    let target_amount: f64 = goals.iter().map(|g| non_negative(g.target_amount)).sum();
    let progress_percent = if target_amount > 0.0 {
        (current_amount / target_amount * 100.0).min(100.0)
    } else {
        0.0
    };
    GoalTotals {
        current_amount,
        target_amount,
        progress_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AccountKind;
    use chrono::NaiveDate;

    fn account(id: &str, entity: Option<&str>, active: bool) -> AccountSnapshot {
        AccountSnapshot {
            id: id.to_string(),
            entity_id: entity.map(str::to_string),
            kind: AccountKind::Current,
            balance: 100.0,
            is_active: active,
            ..AccountSnapshot::default()
        }
    }

    fn summary(year: i32, month: u32) -> MonthlySummary {
        MonthlySummary {
            month: NaiveDate::from_ymd_opt(year, month, 1).expect("valid date"),
            total_income: 1_000.0,
            total_expenses: 500.0,
        }
    }

    #[test]
    fn filters_accounts_by_owner_and_activity() {
        let accounts = vec![
            account("a", None, true),
            account("b", Some("ltd"), true),
            account("c", Some("ltd"), false),
        ];
        let personal: Vec<_> = accounts_for_entity(&accounts, None).map(|a| &a.id).collect();
        assert_eq!(personal, vec!["a"]);
        let company: Vec<_> = accounts_for_entity(&accounts, Some("ltd")).collect();
        assert_eq!(company.len(), 2);
        assert_eq!(active_accounts(&accounts).count(), 2);
    }

    #[test]
    fn debt_totals_ignore_inactive_and_missing_payments() {
        let debts = vec![
            DebtSnapshot {
                id: "loan".to_string(),
                remaining_balance: 4_000.0,
                monthly_payment: Some(150.0),
                is_active: true,
            },
            DebtSnapshot {
                id: "card".to_string(),
                remaining_balance: 1_000.0,
                monthly_payment: None,
                is_active: true,
            },
            DebtSnapshot {
                id: "old".to_string(),
                remaining_balance: 9_000.0,
                monthly_payment: Some(300.0),
                is_active: false,
            },
        ];
        assert_eq!(total_active_debt(&debts), 5_000.0);
        assert_eq!(total_debt_payments(&debts), 150.0);
    }

    #[test]
    fn trailing_summaries_keep_newest_twelve_in_order() {
        let mut summaries: Vec<MonthlySummary> = (1..=12).map(|m| summary(2025, m)).collect();
        summaries.push(summary(2026, 2));
        summaries.push(summary(2026, 1));

        let trailing = trailing_summaries(&summaries);
        assert_eq!(trailing.len(), 12);
        assert_eq!(trailing[0].month, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(trailing[11].month, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }

    #[test]
    fn goal_totals_floor_negative_amounts() {
        let goals = vec![
            SavingsGoal {
                current_amount: 6_000.0,
                target_amount: 10_000.0,
                deadline: None,
            },
            SavingsGoal {
                current_amount: -50.0,
                target_amount: 2_000.0,
                deadline: None,
            },
        ];
        let totals = savings_goal_totals(&goals);
        assert_eq!(totals.current_amount, 6_000.0);
        assert_eq!(totals.target_amount, 12_000.0);
        assert!((totals.progress_percent - 50.0).abs() < 1e-9);
        assert_eq!(savings_goal_totals(&[]).progress_percent, 0.0);
    }
}
