use super::capacity::SavingsCapacity;
use super::format::{money, percent};
use super::types::{Factor, ReadinessResult};

/// Months of history needed before the top income-stability bands apply.
const STABILITY_FULL_MONTHS: usize = 6;
const INSUFFICIENT_HISTORY_SCORE: u32 = 3;
/// Added to average net income when sizing the emergency buffer.
const BUFFER_MONTHLY_ALLOWANCE: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessInputs {
    pub current_savings: f64,
    pub deposit_target: f64,
    pub capacity: SavingsCapacity,
    pub total_debt: f64,
    pub investment_total: f64,
}

pub fn score_readiness(inputs: &ReadinessInputs) -> ReadinessResult {
    let factors = vec![
        deposit_progress(inputs.current_savings, inputs.deposit_target),
        savings_rate(inputs.capacity.monthly_savings_capacity),
        debt_level(inputs.total_debt),
        income_stability(
            inputs.capacity.months_of_data,
            inputs.capacity.income_consistency,
        ),
        investment_buffer(inputs.investment_total, inputs.capacity.avg_monthly_net),
        deposit_buffer(inputs.current_savings, inputs.deposit_target),
    ];

    let total = factors.iter().map(|f| f.score).sum::<u32>().min(100);
    ReadinessResult {
        total,
        label: readiness_label(total).to_string(),
        factors,
    }
}

pub fn readiness_label(total: u32) -> &'static str {
    match total {
        80.. => "Ready to Buy",
        60..=79 => "Nearly Ready",
        40..=59 => "Making Progress",
        20..=39 => "Early Stage",
        _ => "Just Starting",
    }
}

fn factor(name: &str, score: u32, max: u32, detail: String) -> Factor {
    Factor {
        name: name.to_string(),
        score: score.min(max),
        max,
        detail,
    }
}

fn deposit_progress(current_savings: f64, deposit_target: f64) -> Factor {
    let progress = if deposit_target > 0.0 {
        (current_savings / deposit_target).clamp(0.0, 1.0)
    } else {
        0.0
    };
    factor(
        "Deposit progress",
        (progress * 25.0).round() as u32,
        25,
        format!(
            "{} saved of {} deposit ({})",
            money(current_savings),
            money(deposit_target),
            percent(progress * 100.0)
        ),
    )
}

fn savings_rate(capacity: f64) -> Factor {
    let score = if capacity > 500.0 {
        20
    } else if capacity > 200.0 {
        15
    } else if capacity > 0.0 {
        10
    } else {
        0
    };
    factor(
        "Monthly savings rate",
        score,
        20,
        format!("{} per month available to save", money(capacity)),
    )
}

fn debt_level(total_debt: f64) -> Factor {
    let score = if total_debt <= 0.0 {
        20
    } else if total_debt < 5_000.0 {
        15
    } else if total_debt < 15_000.0 {
        10
    } else if total_debt < 30_000.0 {
        5
    } else {
        0
    };
    let detail = if total_debt <= 0.0 {
        "No active debt".to_string()
    } else {
        format!("{} of active debt outstanding", money(total_debt))
    };
    factor("Debt level", score, 20, detail)
}

fn income_stability(months_of_data: usize, consistency: f64) -> Factor {
    let (score, detail) = if months_of_data < STABILITY_FULL_MONTHS {
        (
            INSUFFICIENT_HISTORY_SCORE,
            format!(
                "Only {months_of_data} month(s) of history; {STABILITY_FULL_MONTHS} needed for a full assessment"
            ),
        )
    } else {
        let score = if consistency > 0.8 {
            15
        } else if consistency > 0.5 {
            10
        } else {
            5
        };
        (
            score,
            format!(
                "Income consistency {} over {months_of_data} months",
                percent(consistency * 100.0)
            ),
        )
    };
    factor("Income stability", score, 15, detail)
}

fn investment_buffer(investment_total: f64, avg_monthly_net: f64) -> Factor {
    let months = emergency_months(investment_total, avg_monthly_net);
    let score = if months >= 6.0 {
        10
    } else if months >= 3.0 {
        7
    } else if months >= 1.0 {
        4
    } else {
        0
    };
    factor(
        "Investment buffer",
        score,
        10,
        format!(
            "{} invested, about {:.1} months of cover",
            money(investment_total),
            months
        ),
    )
}

pub fn emergency_months(investment_total: f64, avg_monthly_net: f64) -> f64 {
    if avg_monthly_net <= 0.0 {
        return 0.0;
    }
    let months = investment_total / (avg_monthly_net + BUFFER_MONTHLY_ALLOWANCE);
    if months.is_finite() { months.max(0.0) } else { 0.0 }
}

fn deposit_buffer(current_savings: f64, deposit_target: f64) -> Factor {
    let score = if current_savings > deposit_target * 1.1 {
        10
    } else if current_savings > deposit_target {
        7
    } else {
        3
    };
    let detail = if current_savings > deposit_target {
        format!(
            "{} above the deposit target",
            money(current_savings - deposit_target)
        )
    } else {
        format!(
            "{} short of the deposit target",
            money(deposit_target - current_savings)
        )
    };
    factor("Buffer above deposit", score, 10, detail)
}
