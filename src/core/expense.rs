use crate::core::participant::ParticipantName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Identifier of an expense, unique within its group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors arising from building or editing expense records.
#[derive(Debug, Error, PartialEq)]
pub enum ExpenseError {
    #[error("expense amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("expense payer must not be empty")]
    MissingPayer,
    #[error("no expense with id {0}")]
    NotFound(ExpenseId),
    #[error("an expense with id {0} already exists")]
    DuplicateId(ExpenseId),
}

/// A record of money paid in full by one participant, to be shared
/// equally by everyone in the group.
///
/// Expenses are immutable apart from an explicit edit through
/// [`ExpenseLog::edit`]. Whether the payer actually belongs to a group is
/// not checked here; see [`crate::core::group::Group`] for that.
///
/// # Examples
///
/// ```
/// use expense_settlement::core::expense::Expense;
/// use rust_decimal_macros::dec;
///
/// let dinner = Expense::new("1", "Ana", dec!(84.50), "Dinner").unwrap();
/// assert_eq!(dinner.amount(), dec!(84.50));
/// assert!(Expense::new("2", "Ana", dec!(-1), "Refund").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExpenseRecord")]
pub struct Expense {
    id: ExpenseId,
    #[serde(rename = "paidBy")]
    payer: ParticipantName,
    amount: Decimal,
    description: String,
}

/// Wire shape of an expense before validation.
#[derive(Deserialize)]
struct ExpenseRecord {
    id: ExpenseId,
    #[serde(rename = "paidBy", alias = "payer")]
    payer: ParticipantName,
    amount: Decimal,
    #[serde(default)]
    description: String,
}

impl TryFrom<ExpenseRecord> for Expense {
    type Error = ExpenseError;

    fn try_from(record: ExpenseRecord) -> Result<Self, Self::Error> {
        Expense::new(record.id, record.payer, record.amount, record.description)
    }
}

impl Expense {
    /// Create an expense, rejecting negative amounts and blank payers.
    pub fn new(
        id: impl Into<ExpenseId>,
        payer: impl Into<ParticipantName>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<Self, ExpenseError> {
        let payer = payer.into();
        validate(&payer, amount)?;
        Ok(Self {
            id: id.into(),
            payer,
            amount,
            description: description.into(),
        })
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn payer(&self) -> &ParticipantName {
        &self.payer
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl From<String> for ExpenseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

fn validate(payer: &ParticipantName, amount: Decimal) -> Result<(), ExpenseError> {
    if amount < Decimal::ZERO {
        return Err(ExpenseError::NegativeAmount(amount));
    }
    if payer.as_str().is_empty() {
        return Err(ExpenseError::MissingPayer);
    }
    Ok(())
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} paid {} for {}", self.payer, self.amount, self.description)
    }
}

/// Ordered log of a group's expenses.
///
/// Serialized as a plain array. Deserializing rejects repeated ids, so a
/// stored log keeps the same uniqueness guarantee as [`ExpenseLog::add`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Expense>", into = "Vec<Expense>")]
pub struct ExpenseLog {
    expenses: Vec<Expense>,
}

impl TryFrom<Vec<Expense>> for ExpenseLog {
    type Error = ExpenseError;

    fn try_from(expenses: Vec<Expense>) -> Result<Self, Self::Error> {
        let mut log = Self::new();
        for expense in expenses {
            log.add(expense)?;
        }
        Ok(log)
    }
}

impl From<ExpenseLog> for Vec<Expense> {
    fn from(log: ExpenseLog) -> Self {
        log.expenses
    }
}

impl ExpenseLog {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
        }
    }

    /// Append an expense. Ids must be unique within the log.
    pub fn add(&mut self, expense: Expense) -> Result<(), ExpenseError> {
        if self.get(expense.id()).is_some() {
            return Err(ExpenseError::DuplicateId(expense.id().clone()));
        }
        self.expenses.push(expense);
        Ok(())
    }

    /// Replace payer, amount and description of an existing expense,
    /// keeping its id and position.
    pub fn edit(
        &mut self,
        id: &ExpenseId,
        payer: ParticipantName,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<&Expense, ExpenseError> {
        validate(&payer, amount)?;
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| ExpenseError::NotFound(id.clone()))?;
        expense.payer = payer;
        expense.amount = amount;
        expense.description = description.into();
        Ok(expense)
    }

    pub fn remove(&mut self, id: &ExpenseId) -> Result<Expense, ExpenseError> {
        let pos = self
            .expenses
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| ExpenseError::NotFound(id.clone()))?;
        Ok(self.expenses.remove(pos))
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Sum of every amount in the log, attributable or not. Saturates at
    /// `Decimal::MAX`.
    pub fn total(&self) -> Decimal {
        self.expenses
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount()))
    }

    /// Next free sequential id: one past the largest numeric id in the log.
    ///
    /// Non-numeric ids are skipped, so logs holding UUIDs still get `"1"`.
    /// Once the sequence is exhausted a random UUID is handed out instead.
    pub fn next_id(&self) -> ExpenseId {
        let max = self
            .expenses
            .iter()
            .filter_map(|e| e.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        match max.checked_add(1) {
            Some(next) => ExpenseId::new(next.to_string()),
            None => {
                log::warn!("sequential expense ids exhausted, falling back to a UUID");
                ExpenseId::new(Uuid::new_v4().to_string())
            }
        }
    }
}

impl FromIterator<Expense> for ExpenseLog {
    fn from_iter<T: IntoIterator<Item = Expense>>(iter: T) -> Self {
        Self {
            expenses: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ExpenseLog {
    type Item = &'a Expense;
    type IntoIter = std::slice::Iter<'a, Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.expenses.iter()
    }
}
