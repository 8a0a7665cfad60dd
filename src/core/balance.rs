use crate::core::expense::Expense;
use crate::core::participant::ParticipantName;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Paid total and balance of one participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantBalance {
    pub participant: ParticipantName,
    /// Sum of the expenses this participant paid for.
    pub paid: Decimal,
    /// `paid - fair_share`. Positive = owed money, negative = owes money.
    pub balance: Decimal,
}

/// Balances of every participant in a group, in participant order.
///
/// The sheet is derived data: it is rebuilt from the participant list
/// and expense log on every call and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheet {
    entries: Vec<ParticipantBalance>,
    /// Sum of attributable expenses.
    total: Decimal,
    /// What each participant should have contributed.
    fair_share: Decimal,
    /// Sum of expenses left out of the split: paid by a non-participant,
    /// or too large to add to the total. Not shared.
    ignored_total: Decimal,
}

impl BalanceSheet {
    /// Accumulate paid totals and derive every participant's balance.
    ///
    /// # Algorithm
    ///
    /// 1. Start every participant at zero paid.
    /// 2. Add each expense to its payer's total. Expenses paid by someone
    ///    who is not in `participants` are left out of the total, as is any
    ///    expense that would push the total past `Decimal::MAX`. Both kinds
    ///    are summed into `ignored_total`.
    /// 3. Fair share = total / participant count (zero for an empty group).
    /// 4. Balance = paid - fair share, in `participants` order.
    pub fn compute(participants: &[ParticipantName], expenses: &[Expense]) -> Self {
        let mut paid: HashMap<&ParticipantName, Decimal> = participants
            .iter()
            .map(|p| (p, Decimal::ZERO))
            .collect();
        let mut total = Decimal::ZERO;
        let mut ignored_total = Decimal::ZERO;

        for expense in expenses {
            let amount = expense.amount();
            match paid.get_mut(expense.payer()) {
                // Payer totals never exceed `total`, so checking it suffices.
                Some(payer_total) => match total.checked_add(amount) {
                    Some(new_total) => {
                        *payer_total += amount;
                        total = new_total;
                    }
                    None => {
                        log::warn!(
                            "skipping expense {}: adding {} overflows the group total",
                            expense.id(),
                            amount
                        );
                        ignored_total = ignored_total.saturating_add(amount);
                    }
                },
                None => {
                    log::debug!(
                        "skipping expense {} paid by non-participant {}",
                        expense.id(),
                        expense.payer()
                    );
                    ignored_total = ignored_total.saturating_add(amount);
                }
            }
        }

        let fair_share = if participants.is_empty() {
            Decimal::ZERO
        } else {
            total / Decimal::from(participants.len())
        };

        let entries = participants
            .iter()
            .map(|p| {
                let paid = paid.get(p).copied().unwrap_or(Decimal::ZERO);
                ParticipantBalance {
                    participant: p.clone(),
                    paid,
                    balance: paid - fair_share,
                }
            })
            .collect();

        Self {
            entries,
            total,
            fair_share,
            ignored_total,
        }
    }

    pub fn entries(&self) -> &[ParticipantBalance] {
        &self.entries
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn fair_share(&self) -> Decimal {
        self.fair_share
    }

    pub fn ignored_total(&self) -> Decimal {
        self.ignored_total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Balance of a participant, or `None` if they are not on the sheet.
    pub fn balance_of(&self, participant: &ParticipantName) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| &e.participant == participant)
            .map(|e| e.balance)
    }

    /// Participants who owe money, with the positive amount they owe.
    /// Balances within `tolerance` of zero count as settled; a negative
    /// tolerance counts as zero.
    pub fn debtors(&self, tolerance: Decimal) -> Vec<(&ParticipantName, Decimal)> {
        let tolerance = tolerance.max(Decimal::ZERO);
        self.entries
            .iter()
            .filter(|e| e.balance < -tolerance)
            .map(|e| (&e.participant, -e.balance))
            .collect()
    }

    /// Participants who are owed money, with the amount owed to them.
    pub fn creditors(&self, tolerance: Decimal) -> Vec<(&ParticipantName, Decimal)> {
        let tolerance = tolerance.max(Decimal::ZERO);
        self.entries
            .iter()
            .filter(|e| e.balance > tolerance)
            .map(|e| (&e.participant, e.balance))
            .collect()
    }

    /// Sum of all balances is zero, up to `tolerance`.
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        let sum: Decimal = self.entries.iter().map(|e| e.balance).sum();
        sum.abs() <= tolerance
    }

    /// Every balance is within `tolerance` of zero.
    pub fn is_settled(&self, tolerance: Decimal) -> bool {
        self.entries.iter().all(|e| e.balance.abs() <= tolerance)
    }

    /// Share of the attributable total paid by `participant`, in percent.
    pub fn paid_percent(&self, participant: &ParticipantName) -> f64 {
        if self.total == Decimal::ZERO {
            return 0.0;
        }
        self.entries
            .iter()
            .find(|e| &e.participant == participant)
            .and_then(|e| e.paid.checked_mul(Decimal::ONE_HUNDRED))
            .and_then(|scaled| (scaled / self.total).to_f64())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn names(list: &[&str]) -> Vec<ParticipantName> {
        list.iter().map(|n| ParticipantName::new(*n)).collect()
    }

    fn expense(id: &str, payer: &str, amount: Decimal) -> Expense {
        Expense::new(id, payer, amount, "test").unwrap()
    }

    #[test]
    fn test_single_payer() {
        let sheet = BalanceSheet::compute(
            &names(&["A", "B", "C"]),
            &[expense("1", "A", dec!(90))],
        );
        assert_eq!(sheet.total(), dec!(90));
        assert_eq!(sheet.fair_share(), dec!(30));
        assert_eq!(sheet.balance_of(&"A".into()), Some(dec!(60)));
        assert_eq!(sheet.balance_of(&"B".into()), Some(dec!(-30)));
        assert_eq!(sheet.balance_of(&"C".into()), Some(dec!(-30)));
        assert!(sheet.is_balanced(Decimal::ZERO));
    }

    #[test]
    fn test_entries_follow_participant_order() {
        let sheet = BalanceSheet::compute(
            &names(&["Zoe", "Ana", "Mo"]),
            &[expense("1", "Mo", dec!(30))],
        );
        let order: Vec<&str> = sheet
            .entries()
            .iter()
            .map(|e| e.participant.as_str())
            .collect();
        assert_eq!(order, vec!["Zoe", "Ana", "Mo"]);
    }

    #[test]
    fn test_unknown_payer_is_ignored() {
        let sheet = BalanceSheet::compute(
            &names(&["A", "B"]),
            &[expense("1", "C", dec!(100)), expense("2", "A", dec!(10))],
        );
        assert_eq!(sheet.total(), dec!(10));
        assert_eq!(sheet.ignored_total(), dec!(100));
        assert_eq!(sheet.fair_share(), dec!(5));
    }

    #[test]
    fn test_empty_group() {
        let sheet = BalanceSheet::compute(&[], &[expense("1", "A", dec!(10))]);
        assert!(sheet.is_empty());
        assert_eq!(sheet.fair_share(), Decimal::ZERO);
        assert!(sheet.is_settled(Decimal::ZERO));
    }

    #[test]
    fn test_debtors_and_creditors() {
        let sheet = BalanceSheet::compute(
            &names(&["A", "B", "C", "D"]),
            &[expense("1", "A", dec!(60)), expense("2", "D", dec!(20))],
        );
        // Fair share 20: A +40, B -20, C -20, D 0.
        let debtors: Vec<(&str, Decimal)> = sheet
            .debtors(Decimal::ZERO)
            .into_iter()
            .map(|(p, a)| (p.as_str(), a))
            .collect();
        assert_eq!(debtors, vec![("B", dec!(20)), ("C", dec!(20))]);
        let creditors = sheet.creditors(Decimal::ZERO);
        assert_eq!(creditors.len(), 1);
        assert_eq!(creditors[0].0.as_str(), "A");
        assert_eq!(creditors[0].1, dec!(40));
    }

    #[test]
    fn test_thirds_stay_within_tolerance() {
        let sheet = BalanceSheet::compute(
            &names(&["A", "B", "C"]),
            &[expense("1", "A", dec!(100))],
        );
        assert!(sheet.is_balanced(dec!(0.000000001)));
        assert!(!sheet.is_settled(dec!(0.000000001)));
    }

    #[test]
    fn test_overflowing_expense_is_set_aside() {
        let sheet = BalanceSheet::compute(
            &names(&["A", "B"]),
            &[
                expense("1", "A", Decimal::MAX),
                expense("2", "B", Decimal::MAX),
                expense("3", "B", dec!(0)),
            ],
        );
        assert_eq!(sheet.total(), Decimal::MAX);
        assert_eq!(sheet.ignored_total(), Decimal::MAX);
        assert_eq!(sheet.balance_of(&"B".into()), Some(-sheet.fair_share()));
        approx::assert_relative_eq!(sheet.paid_percent(&"A".into()), 0.0);
    }

    #[test]
    fn test_paid_percent() {
        let sheet = BalanceSheet::compute(
            &names(&["A", "B"]),
            &[expense("1", "A", dec!(75)), expense("2", "B", dec!(25))],
        );
        approx::assert_relative_eq!(sheet.paid_percent(&"A".into()), 75.0);
        approx::assert_relative_eq!(sheet.paid_percent(&"B".into()), 25.0);
        approx::assert_relative_eq!(sheet.paid_percent(&"Z".into()), 0.0);
    }
}
