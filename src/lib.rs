//! # expense-settlement
//!
//! Shared-expense balances and peer-to-peer settlement.
//!
//! Given the members of a group and the expenses each of them paid in
//! full, this engine computes everyone's balance against an equal share
//! and a short list of transfers that brings all balances to zero.
//!
//! ## Architecture
//!
//! - **core** — Participants, expenses, groups, balance sheets
//! - **settlement** — Greedy two-pointer settlement and summaries
//! - **config** — Tolerance and presentation settings
//! - **store** — Key-value style persistence of group lists
//! - **simulation** — Random group generation for benchmarks and demos

pub mod config;
pub mod core;
pub mod settlement;
pub mod simulation;
pub mod store;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::SettlementConfig;
    pub use crate::core::balance::{BalanceSheet, ParticipantBalance};
    pub use crate::core::expense::{Expense, ExpenseId, ExpenseLog};
    pub use crate::core::group::Group;
    pub use crate::core::participant::ParticipantName;
    pub use crate::settlement::calculator::{compute_settlements, SettlementCalculator};
    pub use crate::settlement::instruction::SettlementInstruction;
    pub use crate::settlement::summary::SettlementSummary;
    pub use crate::store::{GroupStore, JsonFileStore, MemoryStore};
}
