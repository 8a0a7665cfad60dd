use crate::config::SettlementConfig;
use crate::core::balance::BalanceSheet;
use crate::settlement::instruction::SettlementInstruction;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Balances of a group together with the transfers that settle them.
#[derive(Debug, Clone, Serialize)]
pub struct SettlementSummary {
    balances: BalanceSheet,
    instructions: Vec<SettlementInstruction>,
    #[serde(skip)]
    config: SettlementConfig,
}

impl SettlementSummary {
    pub fn new(
        balances: BalanceSheet,
        instructions: Vec<SettlementInstruction>,
        config: SettlementConfig,
    ) -> Self {
        Self {
            balances,
            instructions,
            config,
        }
    }

    pub fn balances(&self) -> &BalanceSheet {
        &self.balances
    }

    pub fn instructions(&self) -> &[SettlementInstruction] {
        &self.instructions
    }

    /// Total money changing hands.
    pub fn total_transferred(&self) -> Decimal {
        self.instructions.iter().map(|i| i.amount()).sum()
    }

    /// No transfers are needed.
    pub fn is_settled_up(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction lines rendered with this summary's configuration.
    pub fn lines(&self) -> Vec<String> {
        self.instructions
            .iter()
            .map(|i| i.describe(&self.config))
            .collect()
    }
}

impl fmt::Display for SettlementSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_amount = |a: Decimal| self.config.format_amount(a);

        writeln!(f, "=== Balances ===")?;
        writeln!(f, "Total:       {}", fmt_amount(self.balances.total()))?;
        writeln!(f, "Fair share:  {}", fmt_amount(self.balances.fair_share()))?;
        if self.balances.ignored_total() > Decimal::ZERO {
            writeln!(
                f,
                "Unattributed: {}",
                fmt_amount(self.balances.ignored_total())
            )?;
        }
        for entry in self.balances.entries() {
            writeln!(
                f,
                "  {:<15} paid {:>12}  balance {:>12}",
                entry.participant.as_str(),
                fmt_amount(entry.paid),
                fmt_amount(entry.balance)
            )?;
        }

        writeln!(f, "\n=== Summary ===")?;
        if self.is_settled_up() {
            writeln!(f, "All settled up!")?;
        } else {
            for line in self.lines() {
                writeln!(f, "• {}", line)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SettlementConfig;
    use crate::core::expense::Expense;
    use crate::core::participant::ParticipantName;
    use crate::settlement::calculator::SettlementCalculator;
    use rust_decimal_macros::dec;

    fn members() -> Vec<ParticipantName> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    #[test]
    fn test_settled_up_rendering() {
        let expenses = vec![
            Expense::new("1", "A", dec!(10), "x").unwrap(),
            Expense::new("2", "B", dec!(10), "y").unwrap(),
            Expense::new("3", "C", dec!(10), "z").unwrap(),
        ];
        let summary = SettlementCalculator::default().summarize(&members(), &expenses);
        assert!(summary.is_settled_up());
        assert!(summary.to_string().contains("All settled up!"));
    }

    #[test]
    fn test_lines_use_currency_symbol() {
        let calc =
            SettlementCalculator::new(SettlementConfig::default().with_currency_symbol("₹"));
        let expenses = vec![Expense::new("1", "A", dec!(90), "Cab").unwrap()];
        let summary = calc.summarize(&members(), &expenses);
        assert_eq!(
            summary.lines(),
            vec!["B gives ₹30.00 to A", "C gives ₹30.00 to A"]
        );
        assert_eq!(summary.total_transferred(), dec!(60));
        let text = summary.to_string();
        assert!(text.contains("• B gives ₹30.00 to A"));
        assert!(text.contains("Fair share:  ₹30.00"));
    }

    #[test]
    fn test_unattributed_total_is_reported() {
        let expenses = vec![Expense::new("1", "Z", dec!(100), "Ghost").unwrap()];
        let summary = SettlementCalculator::default().summarize(&members(), &expenses);
        assert!(summary.is_settled_up());
        assert!(summary.to_string().contains("Unattributed: 100.00"));
    }

    #[test]
    fn test_serializes_without_config() {
        let expenses = vec![Expense::new("1", "A", dec!(90), "Cab").unwrap()];
        let summary = SettlementCalculator::default().summarize(&members(), &expenses);
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("balances").is_some());
        assert_eq!(value["instructions"].as_array().unwrap().len(), 2);
        assert!(value.get("config").is_none());
    }
}
