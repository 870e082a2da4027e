use serde::Serialize;

use super::types::Investment;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentProjection {
    pub investment_id: String,
    pub monthly_balances: Vec<f64>,
    pub final_balance: f64,
    pub total_growth: f64,
    pub total_dividends: f64,
    pub total_contributions: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProjection {
    pub horizon_months: u32,
    pub total_current_value: f64,
    pub total_final_value: f64,
    pub total_growth: f64,
    pub total_dividends: f64,
    pub total_contributions: f64,
    pub trajectory: Vec<f64>,
    pub investments: Vec<InvestmentProjection>,
}

/// Month-by-month compound growth of one holding: growth on the opening
/// balance, then dividends on the post-growth balance, then the contribution.
pub fn project_investment(investment: &Investment, horizon_months: u32) -> InvestmentProjection {
    let monthly_rate = investment.monthly_rate();
    let monthly_dividend_rate = investment.monthly_dividend_rate();

    let mut balance = investment.current_value;
    let mut total_growth = 0.0;
    let mut total_dividends = 0.0;
    let mut monthly_balances = Vec::with_capacity(horizon_months as usize);

    for _ in 0..horizon_months {
        let growth = balance * monthly_rate;
        total_growth += growth;
        balance += growth;

        let dividend = balance * monthly_dividend_rate;
        total_dividends += dividend;
        if investment.reinvest_dividends {
            balance += dividend;
        }

        balance += investment.monthly_contribution;
        monthly_balances.push(balance);
    }

    InvestmentProjection {
        investment_id: investment.id.clone(),
        monthly_balances,
        final_balance: balance,
        total_growth,
        total_dividends,
        total_contributions: investment.monthly_contribution * f64::from(horizon_months),
    }
}

pub fn project_portfolio(investments: &[Investment], horizon_months: u32) -> PortfolioProjection {
    let mut result = PortfolioProjection {
        horizon_months,
        ..PortfolioProjection::default()
    };
    if investments.is_empty() {
        return result;
    }

    result.trajectory = vec![0.0; horizon_months as usize];
    for investment in investments {
        let projection = project_investment(investment, horizon_months);
        result.total_current_value += investment.current_value;
        result.total_final_value += projection.final_balance;
        result.total_growth += projection.total_growth;
        result.total_dividends += projection.total_dividends;
        result.total_contributions += projection.total_contributions;
        for (slot, balance) in result
            .trajectory
            .iter_mut()
            .zip(projection.monthly_balances.iter())
        {
            *slot += balance;
        }
        result.investments.push(projection);
    }
    result
}
