use crate::config::SettlementConfig;
use crate::core::balance::BalanceSheet;
use crate::core::expense::Expense;
use crate::core::participant::ParticipantName;
use crate::settlement::instruction::SettlementInstruction;
use crate::settlement::summary::SettlementSummary;
use rust_decimal::Decimal;

/// Turns a participant list and an expense log into balances and the
/// transfers that settle them.
///
/// The calculator is stateless apart from its configuration: every call
/// recomputes from the inputs, never mutates them, and never fails.
/// Expenses paid by someone outside the participant list are skipped.
#[derive(Debug, Clone, Default)]
pub struct SettlementCalculator {
    config: SettlementConfig,
}

impl SettlementCalculator {
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Paid totals, fair share and per-participant balances.
    pub fn compute_balances(
        &self,
        participants: &[ParticipantName],
        expenses: &[Expense],
    ) -> BalanceSheet {
        BalanceSheet::compute(participants, expenses)
    }

    /// Transfers that bring every participant back to the fair share.
    ///
    /// At most `debtors + creditors - 1` instructions are emitted.
    pub fn compute_settlements(
        &self,
        participants: &[ParticipantName],
        expenses: &[Expense],
    ) -> Vec<SettlementInstruction> {
        let sheet = self.compute_balances(participants, expenses);
        self.settle_balances(&sheet)
    }

    /// Greedy two-pointer match over an existing balance sheet.
    ///
    /// # Algorithm
    ///
    /// 1. Debtors (balance below zero) and creditors (balance above zero)
    ///    are listed in participant order; settled participants are left out.
    /// 2. The current debtor pays the current creditor
    ///    `min(debtor remaining, creditor remaining)`.
    /// 3. Whichever side is now within tolerance of zero advances to the
    ///    next entry (possibly both).
    /// 4. Stop once either list is exhausted.
    ///
    /// Every step drives at least one side to exactly zero, so the loop
    /// always terminates.
    pub fn settle_balances(&self, sheet: &BalanceSheet) -> Vec<SettlementInstruction> {
        let tolerance = self.config.effective_tolerance();
        let mut debtors = sheet.debtors(tolerance);
        let mut creditors = sheet.creditors(tolerance);

        let mut instructions =
            Vec::with_capacity((debtors.len() + creditors.len()).saturating_sub(1));
        let (mut i, mut j) = (0, 0);

        while i < debtors.len() && j < creditors.len() {
            let (debtor, owes) = debtors[i];
            let (creditor, owed) = creditors[j];
            let amount = owes.min(owed);

            log::trace!("{} pays {} to {}", debtor, amount, creditor);
            instructions.push(SettlementInstruction::new(
                debtor.clone(),
                creditor.clone(),
                amount,
            ));

            debtors[i].1 -= amount;
            creditors[j].1 -= amount;

            if debtors[i].1 <= tolerance {
                i += 1;
            }
            if creditors[j].1 <= tolerance {
                j += 1;
            }
        }

        log::debug!(
            "settled {} debtors against {} creditors in {} transfers",
            debtors.len(),
            creditors.len(),
            instructions.len()
        );
        instructions
    }

    /// Balances and settlement instructions together.
    pub fn summarize(
        &self,
        participants: &[ParticipantName],
        expenses: &[Expense],
    ) -> SettlementSummary {
        let balances = self.compute_balances(participants, expenses);
        let instructions = self.settle_balances(&balances);
        SettlementSummary::new(balances, instructions, self.config.clone())
    }
}

/// Settle with the default configuration.
///
/// # Examples
///
/// ```
/// use expense_settlement::core::expense::Expense;
/// use expense_settlement::core::participant::ParticipantName;
/// use expense_settlement::settlement::calculator::compute_settlements;
/// use rust_decimal_macros::dec;
///
/// let members = vec![ParticipantName::new("A"), ParticipantName::new("B")];
/// let expenses = vec![Expense::new("1", "A", dec!(100), "Hotel").unwrap()];
///
/// let transfers = compute_settlements(&members, &expenses);
/// assert_eq!(transfers.len(), 1);
/// assert_eq!(transfers[0].to_string(), "B gives 50.00 to A");
/// ```
pub fn compute_settlements(
    participants: &[ParticipantName],
    expenses: &[Expense],
) -> Vec<SettlementInstruction> {
    SettlementCalculator::default().compute_settlements(participants, expenses)
}

/// Sum of the amounts in a list of instructions.
pub fn total_transferred(instructions: &[SettlementInstruction]) -> Decimal {
    instructions.iter().map(|i| i.amount()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn names(list: &[&str]) -> Vec<ParticipantName> {
        list.iter().map(|n| ParticipantName::new(*n)).collect()
    }

    fn paid(entries: &[(&str, Decimal)]) -> Vec<Expense> {
        entries
            .iter()
            .enumerate()
            .map(|(i, (payer, amount))| {
                Expense::new((i + 1).to_string(), *payer, *amount, "test").unwrap()
            })
            .collect()
    }

    fn lines(instructions: &[SettlementInstruction]) -> Vec<String> {
        instructions.iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_two_people_one_payer() {
        let result = compute_settlements(&names(&["A", "B"]), &paid(&[("A", dec!(100))]));
        assert_eq!(lines(&result), vec!["B gives 50.00 to A"]);
        assert_eq!(result[0].amount(), dec!(50));
    }

    #[test]
    fn test_three_people_one_payer() {
        let result = compute_settlements(&names(&["A", "B", "C"]), &paid(&[("A", dec!(90))]));
        assert_eq!(
            lines(&result),
            vec!["B gives 30.00 to A", "C gives 30.00 to A"]
        );
    }

    #[test]
    fn test_equal_pair_is_settled() {
        let result = compute_settlements(
            &names(&["A", "B"]),
            &paid(&[("A", dec!(50)), ("B", dec!(50))]),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_group() {
        assert!(compute_settlements(&[], &[]).is_empty());
    }

    #[test]
    fn test_unknown_payer_yields_nothing() {
        let result = compute_settlements(&names(&["A", "B"]), &paid(&[("C", dec!(100))]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_equal_trio_is_settled() {
        let result = compute_settlements(
            &names(&["A", "B", "C"]),
            &paid(&[("A", dec!(30)), ("B", dec!(30)), ("C", dec!(30))]),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_split_debtor_across_creditors() {
        // Fair share 40: A +60, B +20, C -40, D -40.
        let result = compute_settlements(
            &names(&["A", "B", "C", "D"]),
            &paid(&[("A", dec!(100)), ("B", dec!(60))]),
        );
        assert_eq!(
            lines(&result),
            vec![
                "C gives 40.00 to A",
                "D gives 20.00 to A",
                "D gives 20.00 to B",
            ]
        );
    }

    #[test]
    fn test_thirds_terminate_cleanly() {
        let members = names(&["A", "B", "C"]);
        let result = compute_settlements(&members, &paid(&[("A", dec!(100))]));
        assert_eq!(
            lines(&result),
            vec!["B gives 33.33 to A", "C gives 33.33 to A"]
        );
        let diff = total_transferred(&result) - dec!(200) / dec!(3);
        assert!(diff.abs() <= dec!(0.000000001));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let members = names(&["A", "B"]);
        let expenses = paid(&[("A", dec!(10))]);
        let before = expenses.clone();
        let calc = SettlementCalculator::default();
        calc.compute_settlements(&members, &expenses);
        assert_eq!(expenses, before);
        assert_eq!(members, names(&["A", "B"]));
    }

    #[test]
    fn test_zero_tolerance_still_terminates() {
        let calc = SettlementCalculator::new(
            SettlementConfig::default().with_tolerance(Decimal::ZERO),
        );
        let result = calc.compute_settlements(
            &names(&["A", "B", "C", "D", "E", "F", "G"]),
            &paid(&[("A", dec!(100)), ("B", dec!(13.37)), ("C", dec!(0.01))]),
        );
        assert!(!result.is_empty());
        assert!(result.len() <= 6);
    }

    #[test]
    fn test_negative_tolerance_behaves_like_zero() {
        let calc = SettlementCalculator::new(
            SettlementConfig::default().with_tolerance(dec!(-1)),
        );
        let result = calc.compute_settlements(&names(&["A", "B"]), &paid(&[("A", dec!(100))]));
        assert_eq!(lines(&result), vec!["B gives 50.00 to A"]);

        let sheet = calc.compute_balances(
            &names(&["A", "B", "C"]),
            &paid(&[("A", dec!(30)), ("B", dec!(30)), ("C", dec!(30))]),
        );
        assert!(sheet.debtors(dec!(-1)).is_empty());
        assert!(sheet.creditors(dec!(-1)).is_empty());
        assert!(calc.settle_balances(&sheet).is_empty());
    }

    #[test]
    fn test_overflowing_expense_does_not_panic() {
        let members = names(&["A", "B"]);
        let expenses = paid(&[("A", Decimal::MAX), ("A", Decimal::MAX)]);
        let calc = SettlementCalculator::default();

        let sheet = calc.compute_balances(&members, &expenses);
        assert_eq!(sheet.total(), Decimal::MAX);
        assert_eq!(sheet.ignored_total(), Decimal::MAX);

        let result = calc.settle_balances(&sheet);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].debtor().as_str(), "B");
        assert_eq!(result[0].creditor().as_str(), "A");
        assert!(result[0].amount() <= Decimal::MAX / dec!(2));
    }

    #[test]
    fn test_summarize_matches_parts() {
        let members = names(&["A", "B", "C"]);
        let expenses = paid(&[("A", dec!(90))]);
        let calc = SettlementCalculator::default();
        let summary = calc.summarize(&members, &expenses);
        assert_eq!(summary.instructions(), calc.compute_settlements(&members, &expenses).as_slice());
        assert_eq!(summary.balances().fair_share(), dec!(30));
    }
}
