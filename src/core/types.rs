use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::solver::MAX_SOLVER_MONTHS;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvestmentType {
    #[serde(alias = "cashIsa", alias = "cash_isa")]
    CashIsa,
    #[serde(alias = "stocksAndSharesIsa", alias = "stocks_and_shares_isa")]
    StocksAndSharesIsa,
    #[serde(alias = "savingsAccount", alias = "savings_account")]
    SavingsAccount,
    Pension,
    Stocks,
    Bonds,
    Crypto,
    #[serde(alias = "retainedProfit", alias = "retained_profit")]
    RetainedProfit,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    Partner,
    Company,
    #[default]
    #[serde(other)]
    Personal,
}

/// A single user-entered holding. Rates are annual percentages; the projector
/// converts them to monthly rates on the fly.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InvestmentType,
    pub owner: Owner,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub current_value: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub monthly_contribution: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub annual_return_rate_percent: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub dividend_yield_percent: f64,
    pub reinvest_dividends: bool,
}

impl Investment {
    pub fn monthly_rate(&self) -> f64 {
        self.annual_return_rate_percent / 100.0 / 12.0
    }

    pub fn monthly_dividend_rate(&self) -> f64 {
        self.dividend_yield_percent / 100.0 / 12.0
    }

    /// Clamps user input into the ranges the projector assumes.
    pub fn sanitized(&self) -> Self {
        Self {
            current_value: non_negative(self.current_value),
            monthly_contribution: non_negative(self.monthly_contribution),
            annual_return_rate_percent: finite_or_zero(self.annual_return_rate_percent)
                .clamp(-100.0, 100.0),
            dividend_yield_percent: non_negative(self.dividend_yield_percent),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlannerConfig {
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub target_price: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub deposit_percent: f64,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub timeline_months: u32,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub partner_income: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub partner_monthly_savings: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub additional_monthly_savings: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub monthly_expense_cuts: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            target_price: 300_000.0,
            deposit_percent: 10.0,
            timeline_months: 36,
            partner_income: 0.0,
            partner_monthly_savings: 0.0,
            additional_monthly_savings: 0.0,
            monthly_expense_cuts: 0.0,
        }
    }
}

impl PlannerConfig {
    pub fn deposit_target(&self) -> f64 {
        self.target_price * self.deposit_percent / 100.0
    }

    /// Clamps into usable ranges; the timeline is bounded by the solver horizon.
    pub fn sanitized(&self) -> Self {
        Self {
            target_price: non_negative(self.target_price),
            deposit_percent: finite_or_zero(self.deposit_percent).clamp(0.0, 100.0),
            timeline_months: self.timeline_months.clamp(1, MAX_SOLVER_MONTHS),
            partner_income: non_negative(self.partner_income),
            partner_monthly_savings: non_negative(self.partner_monthly_savings),
            additional_monthly_savings: non_negative(self.additional_monthly_savings),
            monthly_expense_cuts: non_negative(self.monthly_expense_cuts),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountKind {
    #[default]
    Current,
    Savings,
    #[serde(alias = "creditCard", alias = "credit_card")]
    CreditCard,
    Investment,
    Loan,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub id: String,
    pub name: String,
    /// `None` marks a personal account.
    pub entity_id: Option<String>,
    pub kind: AccountKind,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub balance: f64,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    #[serde(alias = "soleTrader", alias = "sole_trader")]
    SoleTrader,
    #[serde(alias = "limitedCompany", alias = "limited_company", alias = "ltd")]
    LimitedCompany,
    Llp,
    Partnership,
    /// Also absorbs unrecognised kinds, which are never treated as companies.
    #[default]
    #[serde(other)]
    Individual,
}

impl EntityKind {
    pub fn is_company(self) -> bool {
        matches!(self, EntityKind::LimitedCompany | EntityKind::Llp)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntitySnapshot {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    pub tax_regime: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DebtSnapshot {
    pub id: String,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub remaining_balance: f64,
    #[serde(deserialize_with = "lenient::optional_f64")]
    pub monthly_payment: Option<f64>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// First day of the calendar month.
    pub month: NaiveDate,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_income: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_expenses: f64,
}

impl MonthlySummary {
    pub fn net(&self) -> f64 {
        self.total_income - self.total_expenses
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavingsGoal {
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub current_amount: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub target_amount: f64,
    pub deadline: Option<NaiveDate>,
}

/// Whole months until a target is met, or an explicit "never" marker.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MonthsAway {
    Months(u32),
    Unreachable,
}

impl MonthsAway {
    pub fn months(self) -> Option<u32> {
        match self {
            MonthsAway::Months(m) => Some(m),
            MonthsAway::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, MonthsAway::Months(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Factor {
    pub name: String,
    pub score: u32,
    pub max: u32,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResult {
    pub total: u32,
    pub label: String,
    pub factors: Vec<Factor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub title: String,
    pub detail: String,
    pub impact: String,
    pub risk: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAnalysis {
    pub entity: EntitySnapshot,
    pub accounts: Vec<AccountSnapshot>,
    pub total_balance: f64,
    pub is_company: bool,
    pub strategies: Vec<Strategy>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MilestoneDate {
    Achieved,
    On(NaiveDate),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub label: String,
    pub amount: f64,
    pub months_away: MonthsAway,
    pub date: MilestoneDate,
    pub date_label: String,
    pub done: bool,
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

pub(crate) fn non_negative(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}
