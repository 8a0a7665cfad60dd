//! Random group generation for benchmarks and CLI demos.
//!
//! Produces groups with a configurable number of members and expenses,
//! optionally sprinkling in expenses paid by people outside the group.

use crate::core::expense::Expense;
use crate::core::group::{Group, GroupError};
use crate::core::participant::ParticipantName;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random group.
#[derive(Debug, Clone)]
pub struct RandomGroupConfig {
    /// Number of members in the group.
    pub member_count: usize,
    /// Number of expenses to record.
    pub expense_count: usize,
    /// Smallest expense, in cents.
    pub min_cents: i64,
    /// Largest expense, in cents.
    pub max_cents: i64,
}

impl Default for RandomGroupConfig {
    fn default() -> Self {
        Self {
            member_count: 5,
            expense_count: 20,
            min_cents: 100,
            max_cents: 50_000,
        }
    }
}

/// Member names used by generated groups: `MEMBER-000`, `MEMBER-001`, ...
pub fn member_names(count: usize) -> Vec<ParticipantName> {
    (0..count)
        .map(|i| ParticipantName::new(format!("MEMBER-{:03}", i)))
        .collect()
}

/// Generate a group whose expenses are all paid by members.
pub fn generate_random_group(config: &RandomGroupConfig) -> Result<Group, GroupError> {
    let mut rng = rand::thread_rng();
    let members = member_names(config.member_count);
    let mut group = Group::new("Random group", members.clone())?;

    for n in 0..config.expense_count {
        let payer = members[rng.gen_range(0..members.len())].clone();
        let amount = random_amount(&mut rng, config);
        group.record_expense(payer, amount, format!("Expense #{}", n + 1))?;
    }

    log::debug!(
        "generated group with {} members and {} expenses",
        group.members().len(),
        group.expenses().len()
    );
    Ok(group)
}

/// Generate a raw expense list where roughly `stray_ratio` of the
/// expenses are paid by someone outside `members`. A ratio that is not a
/// finite number counts as zero.
pub fn generate_random_expenses(
    members: &[ParticipantName],
    config: &RandomGroupConfig,
    stray_ratio: f64,
) -> Vec<Expense> {
    let mut rng = rand::thread_rng();
    let mut expenses = Vec::with_capacity(config.expense_count);
    let stray_ratio = if stray_ratio.is_finite() {
        stray_ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };

    for n in 0..config.expense_count {
        let payer = if members.is_empty() || rng.gen_bool(stray_ratio) {
            ParticipantName::new("OUTSIDER")
        } else {
            members[rng.gen_range(0..members.len())].clone()
        };
        let amount = random_amount(&mut rng, config);
        if let Ok(expense) = Expense::new((n + 1).to_string(), payer, amount, "generated") {
            expenses.push(expense);
        }
    }
    expenses
}

fn random_amount(rng: &mut impl Rng, config: &RandomGroupConfig) -> Decimal {
    let lo = config.min_cents.max(0);
    let hi = config.max_cents.max(lo);
    Decimal::new(rng.gen_range(lo..=hi), 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::calculator::SettlementCalculator;
    use rust_decimal_macros::dec;

    #[test]
    fn test_random_group_generation() {
        let config = RandomGroupConfig {
            member_count: 4,
            expense_count: 12,
            ..Default::default()
        };
        let group = generate_random_group(&config).unwrap();
        assert_eq!(group.members().len(), 4);
        assert_eq!(group.expenses().len(), 12);
        for e in group.expenses() {
            assert!(e.amount() >= dec!(1) && e.amount() <= dec!(500));
        }
    }

    #[test]
    fn test_random_group_settles() {
        let config = RandomGroupConfig {
            member_count: 30,
            expense_count: 200,
            ..Default::default()
        };
        let group = generate_random_group(&config).unwrap();
        let calc = SettlementCalculator::default();
        let summary = group.settle(&calc);
        assert!(summary.balances().is_balanced(calc.config().tolerance));
        assert!(summary.instructions().len() < 30);
    }

    #[test]
    fn test_zero_members_is_an_error() {
        let config = RandomGroupConfig {
            member_count: 0,
            ..Default::default()
        };
        assert_eq!(
            generate_random_group(&config).unwrap_err(),
            GroupError::NoMembers
        );
    }

    #[test]
    fn test_stray_expenses() {
        let members = member_names(3);
        let config = RandomGroupConfig::default();
        let all_stray = generate_random_expenses(&members, &config, 1.0);
        assert_eq!(all_stray.len(), config.expense_count);
        assert!(all_stray.iter().all(|e| e.payer().as_str() == "OUTSIDER"));
    }

    #[test]
    fn test_non_finite_stray_ratio_counts_as_zero() {
        let members = member_names(3);
        let config = RandomGroupConfig::default();
        for ratio in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let expenses = generate_random_expenses(&members, &config, ratio);
            assert_eq!(expenses.len(), config.expense_count);
            assert!(expenses.iter().all(|e| members.contains(e.payer())));
        }
    }
}
