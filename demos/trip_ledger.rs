//! Group lifecycle example.
//!
//! Creates a trip, records, edits and deletes expenses, and keeps the
//! group in a store between steps, recomputing the settlement each time.

use expense_settlement::config::SettlementConfig;
use expense_settlement::core::group::Group;
use expense_settlement::settlement::calculator::SettlementCalculator;
use expense_settlement::store::{GroupStore, MemoryStore};
use rust_decimal_macros::dec;

fn show(step: &str, group: &Group, calculator: &SettlementCalculator) {
    println!("━━━ {} ━━━\n", step);
    for e in group.expenses() {
        println!("  #{} {}", e.id(), e);
    }
    println!();
    println!("{}", group.settle(calculator));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let calculator = SettlementCalculator::new(SettlementConfig::default().with_currency_symbol("₹"));
    let mut store = MemoryStore::new();

    let mut trip = Group::new("Goa trip", ["Asha", "Ravi", "Meera"])?;
    store.insert_group(trip.clone())?;

    let villa = trip.record_expense("Asha", dec!(9000), "Villa")?.id().clone();
    trip.record_expense("Ravi", dec!(1500), "Scooters")?;
    let dinner = trip.record_expense("Meera", dec!(2400), "Seafood dinner")?.id().clone();
    store.upsert_group(trip.clone())?;
    show("After booking", &store.find_group(trip.id())?, &calculator);

    if let Err(e) = trip.record_expense("Kiran", dec!(500), "Drinks") {
        println!("Rejected: {}\n", e);
    }

    trip.edit_expense(&villa, "Asha", dec!(8100), "Villa (discounted)")?;
    store.upsert_group(trip.clone())?;
    show("After the discount", &store.find_group(trip.id())?, &calculator);

    trip.delete_expense(&dinner)?;
    store.upsert_group(trip.clone())?;
    show("Dinner refunded", &store.find_group(trip.id())?, &calculator);

    Ok(())
}
