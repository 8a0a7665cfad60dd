//! Greedy settlement of group balances.

pub mod calculator;
pub mod instruction;
pub mod summary;
