//! Participants, expenses, groups and the balances derived from them.

pub mod balance;
pub mod expense;
pub mod group;
pub mod participant;
