use crate::core::balance::BalanceSheet;
use crate::core::expense::{Expense, ExpenseError, ExpenseId, ExpenseLog};
use crate::core::participant::ParticipantName;
use crate::settlement::calculator::SettlementCalculator;
use crate::settlement::summary::SettlementSummary;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised when a group or one of its expenses fails validation.
///
/// The settlement engine itself never fails; these checks guard what gets
/// recorded in the first place.
#[derive(Debug, Error, PartialEq)]
pub enum GroupError {
    #[error("group name must not be empty")]
    EmptyName,
    #[error("a group needs at least one member")]
    NoMembers,
    #[error("member names must not be blank")]
    BlankMember,
    #[error("{0} is already a member of this group")]
    DuplicateMember(ParticipantName),
    #[error("{0} is not a member of this group")]
    UnknownPayer(ParticipantName),
    #[error("expense description must not be empty")]
    MissingDescription,
    #[error(transparent)]
    Expense(#[from] ExpenseError),
}

/// A named set of participants and the expenses they shared.
///
/// # Examples
///
/// ```
/// use expense_settlement::core::group::Group;
/// use expense_settlement::settlement::calculator::SettlementCalculator;
/// use rust_decimal_macros::dec;
///
/// let mut trip = Group::new("Lisbon", ["Ana", "Bo"]).unwrap();
/// trip.record_expense("Ana", dec!(100), "Apartment").unwrap();
///
/// let summary = trip.settle(&SettlementCalculator::default());
/// assert_eq!(summary.lines(), vec!["Bo gives 50.00 to Ana"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "GroupRecord")]
pub struct Group {
    id: Uuid,
    name: String,
    members: Vec<ParticipantName>,
    expenses: ExpenseLog,
    created_at: DateTime<Utc>,
}

/// Stored shape of a group before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupRecord {
    id: Uuid,
    name: String,
    members: Vec<ParticipantName>,
    #[serde(default)]
    expenses: ExpenseLog,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl TryFrom<GroupRecord> for Group {
    type Error = GroupError;

    fn try_from(record: GroupRecord) -> Result<Self, Self::Error> {
        let mut group = Group::with_id(record.id, record.name, record.members)?;
        group.expenses = record.expenses;
        group.created_at = record.created_at;
        Ok(group)
    }
}

impl Group {
    /// Create a group with a fresh id.
    ///
    /// The name is trimmed; member names are kept exactly as given but
    /// must be non-blank and unique.
    pub fn new<I, N>(name: impl AsRef<str>, members: I) -> Result<Self, GroupError>
    where
        I: IntoIterator<Item = N>,
        N: Into<ParticipantName>,
    {
        Self::with_id(Uuid::new_v4(), name, members)
    }

    /// Create a group with a specific id (useful for testing / determinism).
    pub fn with_id<I, N>(id: Uuid, name: impl AsRef<str>, members: I) -> Result<Self, GroupError>
    where
        I: IntoIterator<Item = N>,
        N: Into<ParticipantName>,
    {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(GroupError::EmptyName);
        }

        let mut group = Self {
            id,
            name: name.to_string(),
            members: Vec::new(),
            expenses: ExpenseLog::new(),
            created_at: Utc::now(),
        };
        for member in members {
            group.add_member(member)?;
        }
        if group.members.is_empty() {
            return Err(GroupError::NoMembers);
        }
        Ok(group)
    }

    pub fn add_member(&mut self, member: impl Into<ParticipantName>) -> Result<(), GroupError> {
        let member = member.into();
        if member.is_blank() {
            return Err(GroupError::BlankMember);
        }
        if self.is_member(&member) {
            return Err(GroupError::DuplicateMember(member));
        }
        self.members.push(member);
        Ok(())
    }

    pub fn is_member(&self, name: &ParticipantName) -> bool {
        self.members.contains(name)
    }

    /// Record a new expense under the next sequential id.
    pub fn record_expense(
        &mut self,
        payer: impl Into<ParticipantName>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<&Expense, GroupError> {
        let id = self.expenses.next_id();
        let expense = Expense::new(id.clone(), payer, amount, description)?;
        self.check_entry(expense.payer(), expense.description())?;
        self.expenses.add(expense)?;
        self.expenses
            .get(&id)
            .ok_or(GroupError::Expense(ExpenseError::NotFound(id)))
    }

    /// Change payer, amount and description of a recorded expense.
    pub fn edit_expense(
        &mut self,
        id: &ExpenseId,
        payer: impl Into<ParticipantName>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<&Expense, GroupError> {
        let payer = payer.into();
        let description = description.into();
        self.check_entry(&payer, &description)?;
        Ok(self.expenses.edit(id, payer, amount, description)?)
    }

    pub fn delete_expense(&mut self, id: &ExpenseId) -> Result<Expense, GroupError> {
        Ok(self.expenses.remove(id)?)
    }

    fn check_entry(&self, payer: &ParticipantName, description: &str) -> Result<(), GroupError> {
        if description.trim().is_empty() {
            return Err(GroupError::MissingDescription);
        }
        if !self.is_member(payer) {
            return Err(GroupError::UnknownPayer(payer.clone()));
        }
        Ok(())
    }

    pub fn balances(&self, calculator: &SettlementCalculator) -> BalanceSheet {
        calculator.compute_balances(&self.members, self.expenses.expenses())
    }

    pub fn settle(&self, calculator: &SettlementCalculator) -> SettlementSummary {
        calculator.summarize(&self.members, self.expenses.expenses())
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[ParticipantName] {
        &self.members
    }

    pub fn expenses(&self) -> &ExpenseLog {
        &self.expenses
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
