use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::capacity::{SavingsCapacity, savings_capacity};
use super::feeds::{GoalTotals, savings_goal_totals, total_active_debt};
use super::projection::{PortfolioProjection, project_portfolio};
use super::readiness::{ReadinessInputs, score_readiness};
use super::solver::{
    MilestoneConfig, TimelineSolveConfig, approximate_months_to_target, date_label,
    milestone_ladder, projected_date,
};
use super::strategy::analyze_entities;
use super::types::{
    AccountSnapshot, DebtSnapshot, EntityAnalysis, EntitySnapshot, Investment, Milestone,
    MilestoneDate, MonthlySummary, MonthsAway, PlannerConfig, ReadinessResult, SavingsGoal,
};

/// Everything the planner reads: user configuration plus the external feeds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanInput {
    pub config: PlannerConfig,
    pub investments: Vec<Investment>,
    pub accounts: Vec<AccountSnapshot>,
    pub entities: Vec<EntitySnapshot>,
    pub debts: Vec<DebtSnapshot>,
    /// Rows with an unreadable month are skipped.
    #[serde(deserialize_with = "super::lenient::skip_invalid")]
    pub monthly_summaries: Vec<MonthlySummary>,
    pub savings_goals: Vec<SavingsGoal>,
}

impl PlanInput {
    pub fn sanitized(&self) -> Self {
        Self {
            config: self.config.sanitized(),
            investments: self.investments.iter().map(Investment::sanitized).collect(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineAssessment {
    pub timeline_months: u32,
    pub months_to_deposit: MonthsAway,
    pub months_to_deposit_label: String,
    pub completion_date: MilestoneDate,
    pub completion_date_label: String,
    pub required_monthly_savings: f64,
    pub shortfall_per_month: f64,
    pub on_track: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub generated_on: NaiveDate,
    pub config: PlannerConfig,
    pub deposit_target: f64,
    pub current_savings: f64,
    pub goals: GoalTotals,
    pub total_debt: f64,
    pub capacity: SavingsCapacity,
    pub projection: PortfolioProjection,
    pub readiness: ReadinessResult,
    pub timeline: TimelineAssessment,
    pub milestones: Vec<Milestone>,
    pub entities: Vec<EntityAnalysis>,
}

pub fn build_plan(input: &PlanInput, today: NaiveDate) -> PlanReport {
    let input = input.sanitized();
    let config = &input.config;

    let deposit_target = config.deposit_target();
    let goals = savings_goal_totals(&input.savings_goals);
    let current_savings = goals.current_amount;
    let total_debt = total_active_debt(&input.debts);

    let capacity = savings_capacity(&input.monthly_summaries, config, &input.debts);
    let projection = project_portfolio(&input.investments, config.timeline_months);

    let readiness = score_readiness(&ReadinessInputs {
        current_savings,
        deposit_target,
        capacity,
        total_debt,
        investment_total: projection.total_current_value,
    });

    let solve = approximate_months_to_target(
        TimelineSolveConfig::new(
            current_savings,
            deposit_target,
            capacity.monthly_savings_capacity,
        ),
        &input.investments,
    );
    let timeline = assess_timeline(
        config,
        deposit_target,
        current_savings,
        capacity.monthly_savings_capacity,
        solve.months_away,
        today,
    );

    let milestones = milestone_ladder(MilestoneConfig {
        target_price: config.target_price,
        deposit_target,
        current_savings,
        monthly_savings_capacity: capacity.monthly_savings_capacity,
        today,
    });

    PlanReport {
        generated_on: today,
        config: config.clone(),
        deposit_target,
        current_savings,
        goals,
        total_debt,
        capacity,
        projection,
        readiness,
        timeline,
        milestones,
        entities: analyze_entities(&input.entities, &input.accounts),
    }
}

fn assess_timeline(
    config: &PlannerConfig,
    deposit_target: f64,
    current_savings: f64,
    monthly_savings_capacity: f64,
    months_to_deposit: MonthsAway,
    today: NaiveDate,
) -> TimelineAssessment {
    let remaining = (deposit_target - current_savings).max(0.0);
    let required_monthly_savings = remaining / f64::from(config.timeline_months.max(1));
    let completion_date = match months_to_deposit {
        MonthsAway::Months(0) => MilestoneDate::Achieved,
        MonthsAway::Months(m) => projected_date(today, m),
        MonthsAway::Unreachable => MilestoneDate::Unknown,
    };

    TimelineAssessment {
        timeline_months: config.timeline_months,
        months_to_deposit,
        months_to_deposit_label: months_to_deposit.describe(),
        completion_date,
        completion_date_label: date_label(completion_date),
        required_monthly_savings,
        shortfall_per_month: (required_monthly_savings - monthly_savings_capacity).max(0.0),
        on_track: months_to_deposit
            .months()
            .is_some_and(|m| m <= config.timeline_months),
    }
}
