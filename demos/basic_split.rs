//! Basic expense split example.
//!
//! Walks through the common shapes of a shared bill: one payer, several
//! payers, an already-even group and an expense paid by an outsider.

use expense_settlement::core::expense::Expense;
use expense_settlement::core::participant::ParticipantName;
use expense_settlement::settlement::calculator::SettlementCalculator;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn scenario(title: &str, members: &[&str], paid: &[(&str, Decimal)]) {
    println!("━━━ {} ━━━\n", title);

    let members: Vec<ParticipantName> = members.iter().map(|m| ParticipantName::new(*m)).collect();
    let expenses: Vec<Expense> = paid
        .iter()
        .enumerate()
        .filter_map(|(i, (payer, amount))| {
            Expense::new((i + 1).to_string(), *payer, *amount, "shared").ok()
        })
        .collect();

    for e in &expenses {
        println!("  {}", e);
    }
    println!();

    let summary = SettlementCalculator::default().summarize(&members, &expenses);
    println!("{}", summary);
}

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  expense-settlement: Basic Split Example      ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    scenario("One payer, two members", &["A", "B"], &[("A", dec!(100))]);
    scenario("One payer, three members", &["A", "B", "C"], &[("A", dec!(90))]);
    scenario(
        "Everyone paid the same",
        &["A", "B", "C"],
        &[("A", dec!(30)), ("B", dec!(30)), ("C", dec!(30))],
    );
    scenario(
        "Payer outside the group",
        &["A", "B"],
        &[("C", dec!(100))],
    );
    scenario(
        "Thirds that do not divide evenly",
        &["A", "B", "C"],
        &[("A", dec!(100))],
    );
}
