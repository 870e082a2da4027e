use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::format::money;
use super::types::{Investment, Milestone, MilestoneDate, MonthsAway};

/// Fifty years; beyond this a target is reported as unreachable.
pub const MAX_SOLVER_MONTHS: u32 = 600;
/// Allowance for legal, survey and lender fees on top of the deposit.
pub const FEE_BUFFER: f64 = 5_000.0;
pub const MILESTONE_PERCENTS: [f64; 4] = [5.0, 10.0, 15.0, 20.0];
const DAYS_PER_MONTH: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineSolveConfig {
    pub current_savings: f64,
    pub target: f64,
    pub monthly_savings_capacity: f64,
    pub max_months: u32,
}

impl TimelineSolveConfig {
    pub fn new(current_savings: f64, target: f64, monthly_savings_capacity: f64) -> Self {
        Self {
            current_savings,
            target,
            monthly_savings_capacity,
            max_months: MAX_SOLVER_MONTHS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSolveResult {
    pub months_away: MonthsAway,
    pub final_balance: f64,
    /// Pooled balance at the end of each simulated month.
    pub balances: Vec<f64>,
    pub message: String,
}

/// Fast estimate of the month at which pooled savings cross `target`.
///
/// Each investment's return is weighted by its share of the pooled, growing
/// balance instead of being simulated on its own, so results diverge from
/// [`super::projection::project_portfolio`] over long horizons.
pub fn approximate_months_to_target(
    config: TimelineSolveConfig,
    investments: &[Investment],
) -> TimelineSolveResult {
    let mut balance = config.current_savings;
    if balance >= config.target {
        return TimelineSolveResult {
            months_away: MonthsAway::Months(0),
            final_balance: balance,
            balances: Vec::new(),
            message: "Target already met.".to_string(),
        };
    }

    let mut balances = Vec::new();
    for month in 1..=config.max_months {
        balance += config.monthly_savings_capacity;
        for investment in investments {
            balance += investment.monthly_contribution
                + weighted_monthly_return(balance, investment);
        }
        balances.push(balance);

        if balance >= config.target {
            return TimelineSolveResult {
                months_away: MonthsAway::Months(month),
                final_balance: balance,
                balances,
                message: format!("Target of {} reached in month {month}.", money(config.target)),
            };
        }
    }

    TimelineSolveResult {
        months_away: MonthsAway::Unreachable,
        final_balance: balance,
        balances,
        message: format!(
            "Target of {} not reached within {} months.",
            money(config.target),
            config.max_months
        ),
    }
}

fn weighted_monthly_return(pooled_balance: f64, investment: &Investment) -> f64 {
    let weight = investment.current_value / pooled_balance.max(1.0);
    let value = pooled_balance * investment.monthly_rate() * weight;
    if value.is_finite() { value } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MilestoneConfig {
    pub target_price: f64,
    pub deposit_target: f64,
    pub current_savings: f64,
    pub monthly_savings_capacity: f64,
    pub today: NaiveDate,
}

/// Savings-only ladder: 5/10/15/20% of the price, then deposit plus fees.
///
/// A rung that is not yet met is `Unreachable` with an unknown date when
/// capacity is zero or the rung lies beyond [`MAX_SOLVER_MONTHS`]; a zero
/// month count is reserved for rungs already achieved.
pub fn milestone_ladder(config: MilestoneConfig) -> Vec<Milestone> {
    let mut milestones: Vec<Milestone> = MILESTONE_PERCENTS
        .iter()
        .map(|pct| {
            build_milestone(
                format!("{pct:.0}% deposit"),
                config.target_price * pct / 100.0,
                config,
            )
        })
        .collect();
    milestones.push(build_milestone(
        "Deposit + fees".to_string(),
        config.deposit_target + FEE_BUFFER,
        config,
    ));
    milestones
}

fn build_milestone(label: String, amount: f64, config: MilestoneConfig) -> Milestone {
    if config.current_savings >= amount {
        return Milestone {
            label,
            amount,
            months_away: MonthsAway::Months(0),
            date: MilestoneDate::Achieved,
            date_label: "Achieved".to_string(),
            done: true,
        };
    }

    let shortfall = amount - config.current_savings;
    let months = (shortfall / config.monthly_savings_capacity).ceil();
    if config.monthly_savings_capacity <= 0.0
        || !months.is_finite()
        || months > f64::from(MAX_SOLVER_MONTHS)
    {
        return Milestone {
            label,
            amount,
            months_away: MonthsAway::Unreachable,
            date: MilestoneDate::Unknown,
            date_label: "—".to_string(),
            done: false,
        };
    }

    let months = months as u32;
    let date = projected_date(config.today, months);
    Milestone {
        label,
        amount,
        months_away: MonthsAway::Months(months),
        date_label: date_label(date),
        date,
        done: false,
    }
}

/// Calendar-month approximation: thirty days per month.
pub fn projected_date(today: NaiveDate, months: u32) -> MilestoneDate {
    today
        .checked_add_days(Days::new(u64::from(months) * DAYS_PER_MONTH))
        .map(MilestoneDate::On)
        .unwrap_or(MilestoneDate::Unknown)
}

pub fn date_label(date: MilestoneDate) -> String {
    match date {
        MilestoneDate::Achieved => "Achieved".to_string(),
        MilestoneDate::On(day) => day.format("%b %Y").to_string(),
        MilestoneDate::Unknown => "—".to_string(),
    }
}
