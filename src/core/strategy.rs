//! Rule table mapping an entity's pooled balance and legal form to candidate
//! deposit-funding strategies. Rules are evaluated in table order.

use super::feeds::accounts_for_entity;
use super::format::money;
use super::types::{AccountKind, AccountSnapshot, EntityAnalysis, EntitySnapshot, Strategy};

pub const DIVIDEND_EXTRACTION_THRESHOLD: f64 = 10_000.0;
pub const DIRECTORS_LOAN_THRESHOLD: f64 = 5_000.0;
pub const PERSONAL_ALLOCATION_THRESHOLD: f64 = 5_000.0;
/// Share of company cash assumed to survive corporation and dividend tax.
const NET_EXTRACTION_SHARE: f64 = 0.70;
const WRAPPER_GROWTH_RATE: f64 = 0.045;
const DIRECTORS_LOAN_REPAYMENT_MONTHS: u32 = 9;

/// What a rule sees about one entity.
#[derive(Debug, Clone, Copy)]
pub struct EntityContext<'a> {
    pub entity: &'a EntitySnapshot,
    pub total_balance: f64,
    pub is_company: bool,
}

pub struct StrategyRule {
    pub id: &'static str,
    pub applies: fn(&EntityContext<'_>) -> bool,
    pub build: fn(&EntityContext<'_>) -> Strategy,
}

pub const RULES: &[StrategyRule] = &[
    StrategyRule {
        id: "dividend-extraction",
        applies: company_above_dividend_threshold,
        build: dividend_extraction,
    },
    StrategyRule {
        id: "holding-vehicle",
        applies: is_company,
        build: holding_vehicle,
    },
    StrategyRule {
        id: "directors-loan",
        applies: company_above_loan_threshold,
        build: directors_loan,
    },
    StrategyRule {
        id: "salary-vs-dividends",
        applies: is_company,
        build: salary_vs_dividends,
    },
    StrategyRule {
        id: "personal-allocation",
        applies: personal_above_allocation_threshold,
        build: personal_allocation,
    },
];

fn is_company(ctx: &EntityContext<'_>) -> bool {
    ctx.is_company
}

fn company_above_dividend_threshold(ctx: &EntityContext<'_>) -> bool {
    ctx.is_company && ctx.total_balance > DIVIDEND_EXTRACTION_THRESHOLD
}

fn company_above_loan_threshold(ctx: &EntityContext<'_>) -> bool {
    ctx.is_company && ctx.total_balance > DIRECTORS_LOAN_THRESHOLD
}

fn personal_above_allocation_threshold(ctx: &EntityContext<'_>) -> bool {
    !ctx.is_company && ctx.total_balance > PERSONAL_ALLOCATION_THRESHOLD
}

pub fn analyze_entities(
    entities: &[EntitySnapshot],
    accounts: &[AccountSnapshot],
) -> Vec<EntityAnalysis> {
    entities
        .iter()
        .map(|entity| analyze_entity(entity, accounts))
        .collect()
}

pub fn analyze_entity(entity: &EntitySnapshot, accounts: &[AccountSnapshot]) -> EntityAnalysis {
    let linked: Vec<AccountSnapshot> = accounts_for_entity(accounts, Some(entity.id.as_str()))
        .filter(|account| account.is_active && account.kind != AccountKind::CreditCard)
        .cloned()
        .collect();
    let total_balance: f64 = linked
        .iter()
        .map(|account| account.balance)
        .filter(|balance| balance.is_finite())
        .sum();

    let ctx = EntityContext {
        entity,
        total_balance,
        is_company: entity.kind.is_company(),
    };
    let strategies = RULES
        .iter()
        .filter(|rule| (rule.applies)(&ctx))
        .map(|rule| (rule.build)(&ctx))
        .collect();

    EntityAnalysis {
        entity: entity.clone(),
        accounts: linked,
        total_balance,
        is_company: ctx.is_company,
        strategies,
    }
}

fn dividend_extraction(ctx: &EntityContext<'_>) -> Strategy {
    Strategy {
        title: "Dividend Extraction for Deposit".to_string(),
        detail: format!(
            "Declare dividends from {}'s retained profits and move the cash into personal savings earmarked for the deposit.",
            ctx.entity.name
        ),
        impact: format!(
            "Roughly {} of the {} balance could reach the deposit after setting aside a tax provision.",
            money(ctx.total_balance * NET_EXTRACTION_SHARE),
            money(ctx.total_balance)
        ),
        risk: "Large one-off dividends can push income into a higher band; spreading across tax years usually costs less.".to_string(),
    }
}

fn holding_vehicle(ctx: &EntityContext<'_>) -> Strategy {
    Strategy {
        title: "Purchase via a Holding Vehicle".to_string(),
        detail: format!(
            "Buy the property through {} or a dedicated property company instead of personally.",
            ctx.entity.name
        ),
        impact: "Mortgage interest is deductible as a business expense for a company, unlike the restricted relief available to individuals.".to_string(),
        risk: "Company mortgages carry higher rates and fees, and extracting rental profit later is taxed again.".to_string(),
    }
}

fn directors_loan(ctx: &EntityContext<'_>) -> Strategy {
    Strategy {
        title: "Director's Loan Advance".to_string(),
        detail: format!(
            "Draw an advance from {} against the director's loan account to bridge the deposit.",
            ctx.entity.name
        ),
        impact: format!(
            "Up to {} is available without an immediate income tax charge.",
            money(ctx.total_balance)
        ),
        risk: format!(
            "The loan must be repaid within {DIRECTORS_LOAN_REPAYMENT_MONTHS} months of the company year end or a temporary corporation tax charge applies; lenders may treat it as borrowed deposit."
        ),
    }
}

fn salary_vs_dividends(ctx: &EntityContext<'_>) -> Strategy {
    Strategy {
        title: "Salary vs Dividend Optimisation".to_string(),
        detail: format!(
            "Review the mix of salary and dividends drawn from {} for the years before applying for a mortgage.",
            ctx.entity.name
        ),
        impact: "A higher, steady salary is easier for lenders to evidence; dividends are cheaper in tax but usually need two years of accounts.".to_string(),
        risk: "Raising salary increases employer and employee national insurance costs.".to_string(),
    }
}

fn personal_allocation(ctx: &EntityContext<'_>) -> Strategy {
    let growth = ctx.total_balance * WRAPPER_GROWTH_RATE;
    Strategy {
        title: "Allocate to a Tax-Advantaged Savings Wrapper".to_string(),
        detail: format!(
            "Move spare cash held by {} into a first-home or cash ISA earmarked for the deposit.",
            ctx.entity.name
        ),
        impact: format!(
            "At 4.5% a year, {} would grow by about {} to {} in twelve months.",
            money(ctx.total_balance),
            money(growth),
            money(ctx.total_balance + growth)
        ),
        risk: "Annual subscription limits apply and some first-home wrappers charge a penalty on non-qualifying withdrawals.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EntityKind;

    fn entity(kind: EntityKind) -> EntitySnapshot {
        EntitySnapshot {
            id: "ent-1".to_string(),
            name: "Acme Ltd".to_string(),
            kind,
            tax_regime: "uk".to_string(),
        }
    }

    fn account(balance: f64, kind: AccountKind, active: bool) -> AccountSnapshot {
        AccountSnapshot {
            id: format!("acc-{balance}"),
            name: "Business current".to_string(),
            entity_id: Some("ent-1".to_string()),
            kind,
            balance,
            is_active: active,
        }
    }

    fn titles(analysis: &EntityAnalysis) -> Vec<&str> {
        analysis.strategies.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn aggregates_only_active_non_card_linked_accounts() {
        let mut personal = account(50_000.0, AccountKind::Savings, true);
        personal.entity_id = None;
        let accounts = vec![
            account(8_000.0, AccountKind::Current, true),
            account(2_500.0, AccountKind::Savings, true),
            account(-3_000.0, AccountKind::CreditCard, true),
            account(90_000.0, AccountKind::Savings, false),
            personal,
        ];
        let analysis = analyze_entity(&entity(EntityKind::LimitedCompany), &accounts);
        assert_eq!(analysis.accounts.len(), 2);
        assert!((analysis.total_balance - 10_500.0).abs() < 1e-9);
        assert!(analysis.is_company);
    }

    #[test]
    fn company_at_dividend_boundary_gets_structural_rules_only() {
        let accounts = vec![account(10_000.0, AccountKind::Current, true)];
        let analysis = analyze_entity(&entity(EntityKind::LimitedCompany), &accounts);
        assert_eq!(
            titles(&analysis),
            vec![
                "Purchase via a Holding Vehicle",
                "Director's Loan Advance",
                "Salary vs Dividend Optimisation"
            ]
        );
    }

    #[test]
    fn company_above_dividend_boundary_gets_extraction_first() {
        let accounts = vec![account(10_001.0, AccountKind::Current, true)];
        let analysis = analyze_entity(&entity(EntityKind::Llp), &accounts);
        assert_eq!(analysis.strategies.len(), 4);
        assert_eq!(analysis.strategies[0].title, "Dividend Extraction for Deposit");
        assert!(analysis.strategies[0].impact.contains("£7,001"));
    }

    #[test]
    fn small_company_still_gets_always_on_rules() {
        let analysis = analyze_entity(&entity(EntityKind::LimitedCompany), &[]);
        assert_eq!(
            titles(&analysis),
            vec!["Purchase via a Holding Vehicle", "Salary vs Dividend Optimisation"]
        );
        let directors = analyze_entity(
            &entity(EntityKind::LimitedCompany),
            &[account(5_001.0, AccountKind::Current, true)],
        );
        assert_eq!(directors.strategies[1].title, "Director's Loan Advance");
        assert!(directors.strategies[1].risk.contains("9 months"));
    }

    #[test]
    fn personal_allocation_boundary_is_strict() {
        for kind in [EntityKind::Individual, EntityKind::SoleTrader, EntityKind::Partnership] {
            let at = analyze_entity(&entity(kind), &[account(5_000.0, AccountKind::Savings, true)]);
            assert!(at.strategies.is_empty());
            assert!(!at.is_company);

            let above = analyze_entity(
                &entity(kind),
                &[account(5_001.0, AccountKind::Savings, true)],
            );
            assert_eq!(titles(&above), vec!["Allocate to a Tax-Advantaged Savings Wrapper"]);
        }
    }

    #[test]
    fn personal_allocation_projects_a_year_of_growth() {
        let analysis = analyze_entity(
            &entity(EntityKind::Individual),
            &[account(20_000.0, AccountKind::Savings, true)],
        );
        let impact = &analysis.strategies[0].impact;
        assert!(impact.contains("£900"), "{impact}");
        assert!(impact.contains("£20,900"), "{impact}");
    }

    #[test]
    fn every_rule_has_a_unique_id() {
        let mut ids: Vec<&str> = RULES.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), RULES.len());
    }

    #[test]
    fn analyzes_each_entity_in_order() {
        let mut other = entity(EntityKind::Individual);
        other.id = "ent-2".to_string();
        let analyses = analyze_entities(&[entity(EntityKind::LimitedCompany), other], &[]);
        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[1].entity.id, "ent-2");
        assert_eq!(analyses[1].total_balance, 0.0);
    }
}
