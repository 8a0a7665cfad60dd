use crate::config::SettlementConfig;
use crate::core::participant::ParticipantName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directive that one participant pay another to move both balances
/// toward zero.
///
/// The amount keeps full precision; it is only rounded when presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementInstruction {
    /// The debtor, who pays.
    #[serde(rename = "fromName")]
    from: ParticipantName,
    /// The creditor, who receives.
    #[serde(rename = "toName")]
    to: ParticipantName,
    amount: Decimal,
}

impl SettlementInstruction {
    pub fn new(from: ParticipantName, to: ParticipantName, amount: Decimal) -> Self {
        Self { from, to, amount }
    }

    pub fn debtor(&self) -> &ParticipantName {
        &self.from
    }

    pub fn creditor(&self) -> &ParticipantName {
        &self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Human-readable line, e.g. `"B gives ₹50.00 to A"`.
    pub fn describe(&self, config: &SettlementConfig) -> String {
        format!(
            "{} gives {} to {}",
            self.from,
            config.format_amount(self.amount),
            self.to
        )
    }
}

impl fmt::Display for SettlementInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe(&SettlementConfig::default()))
    }
}
