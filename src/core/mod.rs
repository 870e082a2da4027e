mod capacity;
mod feeds;
mod format;
pub mod lenient;
mod plan;
mod projection;
mod readiness;
mod solver;
mod strategy;
mod types;

pub use capacity::{SavingsCapacity, income_consistency, savings_capacity};
pub use feeds::{
    GoalTotals, accounts_for_entity, active_accounts, active_debts, savings_goal_totals,
    total_active_debt, total_debt_payments, trailing_summaries,
};
pub use format::money;
pub use plan::{PlanInput, PlanReport, TimelineAssessment, build_plan};
pub use projection::{
    InvestmentProjection, PortfolioProjection, project_investment, project_portfolio,
};
pub use readiness::{ReadinessInputs, emergency_months, readiness_label, score_readiness};
pub use solver::{
    FEE_BUFFER, MAX_SOLVER_MONTHS, MilestoneConfig, TimelineSolveConfig, TimelineSolveResult,
    approximate_months_to_target, milestone_ladder,
};
pub use strategy::{EntityContext, RULES, StrategyRule, analyze_entities, analyze_entity};
pub use types::{
    AccountKind, AccountSnapshot, DebtSnapshot, EntityAnalysis, EntityKind, EntitySnapshot,
    Factor, Investment, InvestmentType, Milestone, MilestoneDate, MonthlySummary, MonthsAway,
    Owner, PlannerConfig, ReadinessResult, SavingsGoal, Strategy,
};
