use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tallybook_core::{Entity, Money, TransactionId, ValueObject};

use crate::chart::ChartOfAccounts;

/// One posting within a transaction.
///
/// A well-formed line has exactly one of `debit`/`credit` non-zero. The UI
/// clears the opposite field on input, but the engine validates this
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Account name, resolved against the chart at validation time.
    pub account: String,
    pub debit: Money,
    pub credit: Money,
    pub description: String,
}

impl JournalLine {
    pub fn debit(
        account: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            debit: amount,
            credit: Money::ZERO,
            description: description.into(),
        }
    }

    pub fn credit(
        account: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            debit: Money::ZERO,
            credit: amount,
            description: description.into(),
        }
    }
}

impl ValueObject for JournalLine {}

/// Why a journal entry was rejected.
///
/// All of these are ordinary user-input states (an incomplete form), returned
/// to the caller and safely retryable after correction. A rejected post never
/// changes the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JournalError {
    #[error("unknown account: {0}")]
    UnknownAccount(String),

    #[error("invalid line for {account}: {reason}")]
    InvalidLine { account: String, reason: String },

    #[error("transaction is unbalanced (debits {debits}, credits {credits})")]
    Unbalanced { debits: Money, credits: Money },

    #[error("transaction has no lines")]
    EmptyTransaction,

    #[error("amount overflow while totalling lines")]
    AmountOverflow,
}

impl JournalError {
    fn invalid_line(line: &JournalLine, reason: &str) -> Self {
        Self::InvalidLine {
            account: line.account.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Validate a single posting against the chart.
pub fn validate_line(line: &JournalLine, chart: &ChartOfAccounts) -> Result<(), JournalError> {
    if !chart.contains(&line.account) {
        return Err(JournalError::UnknownAccount(line.account.clone()));
    }
    if line.debit.is_negative() || line.credit.is_negative() {
        return Err(JournalError::invalid_line(line, "amounts cannot be negative"));
    }
    match (line.debit.is_zero(), line.credit.is_zero()) {
        (true, true) => Err(JournalError::invalid_line(
            line,
            "either debit or credit must be non-zero",
        )),
        (false, false) => Err(JournalError::invalid_line(
            line,
            "debit and credit are mutually exclusive",
        )),
        _ => Ok(()),
    }
}

/// Validate a candidate transaction body; returns the balanced total.
///
/// Checks run in a fixed order so a form with several problems reports the
/// first one: empty body, then each line in order, then the balance law.
pub fn validate_lines(
    lines: &[JournalLine],
    chart: &ChartOfAccounts,
) -> Result<Money, JournalError> {
    if lines.is_empty() {
        return Err(JournalError::EmptyTransaction);
    }

    let mut debits = Money::ZERO;
    let mut credits = Money::ZERO;
    for line in lines {
        validate_line(line, chart)?;
        debits = debits
            .checked_add(line.debit)
            .ok_or(JournalError::AmountOverflow)?;
        credits = credits
            .checked_add(line.credit)
            .ok_or(JournalError::AmountOverflow)?;
    }

    if debits != credits {
        return Err(JournalError::Unbalanced { debits, credits });
    }

    // Per-line validation guarantees at least one non-zero amount by now.
    Ok(debits)
}

/// A journal entry under construction: the caller-held "draft" state.
///
/// Drafts are transient. They are never stored and carry no identity; one
/// becomes a [`Transaction`] only by passing `JournalStore::post`, and
/// discarding a draft is how a caller abandons an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalDraft {
    pub date: NaiveDate,
    /// Posting reference, e.g. "JE-001". Assigned by the store when `None`.
    pub reference: Option<String>,
    pub description: String,
    pub lines: Vec<JournalLine>,
}

impl JournalDraft {
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date,
            reference: None,
            description: description.into(),
            lines: Vec::new(),
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn line(mut self, line: JournalLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Remove a line by position (the entry form's delete button).
    pub fn remove_line(&mut self, index: usize) -> Option<JournalLine> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Advisory running totals for form feedback (saturating; the
    /// authoritative check happens at post time).
    pub fn totals(&self) -> (Money, Money) {
        self.lines.iter().fold(
            (Money::ZERO, Money::ZERO),
            |(debits, credits), line| {
                (
                    debits.saturating_add(line.debit),
                    credits.saturating_add(line.credit),
                )
            },
        )
    }

    /// The live balance check shown next to the post button: totals equal and
    /// non-zero.
    pub fn is_balanced(&self) -> bool {
        let (debits, credits) = self.totals();
        debits == credits && !debits.is_zero()
    }
}

/// A posted, immutable journal transaction.
///
/// Construction goes through `JournalStore::post`, which enforces the balance
/// law; there is no way to mutate lines afterwards. Amendment is a new
/// offsetting transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    date: NaiveDate,
    reference: String,
    description: String,
    lines: Vec<JournalLine>,
    total_debit: Money,
    total_credit: Money,
}

impl Transaction {
    pub(crate) fn new(
        id: TransactionId,
        date: NaiveDate,
        reference: String,
        description: String,
        lines: Vec<JournalLine>,
        total: Money,
    ) -> Self {
        Self {
            id,
            date,
            reference,
            description,
            lines,
            total_debit: total,
            total_credit: total,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn lines(&self) -> &[JournalLine] {
        &self.lines
    }

    pub fn total_debit(&self) -> Money {
        self.total_debit
    }

    pub fn total_credit(&self) -> Money {
        self.total_credit
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chart() -> ChartOfAccounts {
        ChartOfAccounts::standard()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date")
    }

    #[test]
    fn balanced_lines_validate_and_return_the_total() {
        let lines = vec![
            JournalLine::debit(
                "Cash and Cash Equivalents",
                Money::from_minor(5_000_000),
                "Initial capital investment",
            ),
            JournalLine::credit(
                "Owner's Equity",
                Money::from_minor(5_000_000),
                "Initial capital investment",
            ),
        ];

        let total = validate_lines(&lines, &chart()).unwrap();
        assert_eq!(total, Money::from_minor(5_000_000));
    }

    #[test]
    fn unbalanced_lines_are_rejected_with_both_totals() {
        let lines = vec![
            JournalLine::debit("Cash and Cash Equivalents", Money::from_minor(100), ""),
            JournalLine::credit("Sales Revenue", Money::from_minor(50), ""),
        ];

        let err = validate_lines(&lines, &chart()).unwrap_err();
        assert_eq!(
            err,
            JournalError::Unbalanced {
                debits: Money::from_minor(100),
                credits: Money::from_minor(50),
            }
        );
    }

    #[test]
    fn a_line_with_neither_side_set_is_invalid() {
        let line = JournalLine {
            account: "Cash and Cash Equivalents".to_string(),
            debit: Money::ZERO,
            credit: Money::ZERO,
            description: String::new(),
        };

        let err = validate_lines(std::slice::from_ref(&line), &chart()).unwrap_err();
        assert!(matches!(err, JournalError::InvalidLine { .. }));
    }

    #[test]
    fn a_line_with_both_sides_set_is_invalid() {
        let line = JournalLine {
            account: "Cash and Cash Equivalents".to_string(),
            debit: Money::from_minor(100),
            credit: Money::from_minor(100),
            description: String::new(),
        };

        let err = validate_line(&line, &chart()).unwrap_err();
        assert!(matches!(err, JournalError::InvalidLine { .. }));
    }

    #[test]
    fn negative_amounts_are_invalid() {
        let line = JournalLine::debit("Rent Expense", Money::from_minor(-500), "");
        let err = validate_line(&line, &chart()).unwrap_err();
        assert!(matches!(err, JournalError::InvalidLine { .. }));
    }

    #[test]
    fn unknown_accounts_are_reported_before_amount_problems() {
        let lines = vec![
            JournalLine::debit("Nonexistent Account", Money::from_minor(10), ""),
            JournalLine::credit("Cash and Cash Equivalents", Money::from_minor(10), ""),
        ];

        let err = validate_lines(&lines, &chart()).unwrap_err();
        assert_eq!(
            err,
            JournalError::UnknownAccount("Nonexistent Account".to_string())
        );
    }

    #[test]
    fn an_empty_body_is_its_own_error() {
        assert_eq!(
            validate_lines(&[], &chart()).unwrap_err(),
            JournalError::EmptyTransaction
        );
    }

    #[test]
    fn totalling_overflow_is_reported_not_wrapped() {
        let lines = vec![
            JournalLine::debit("Cash and Cash Equivalents", Money::from_minor(i64::MAX), ""),
            JournalLine::debit("Accounts Receivable", Money::from_minor(1), ""),
            JournalLine::credit("Sales Revenue", Money::from_minor(1), ""),
        ];

        assert_eq!(
            validate_lines(&lines, &chart()).unwrap_err(),
            JournalError::AmountOverflow
        );
    }

    #[test]
    fn draft_balance_check_matches_the_entry_form() {
        let mut draft = JournalDraft::new(date(), "Office supplies")
            .line(JournalLine::debit(
                "Office Supplies Expense",
                Money::from_minor(50_000),
                "Monthly office supplies",
            ));
        assert!(!draft.is_balanced());

        draft = draft.line(JournalLine::credit(
            "Cash and Cash Equivalents",
            Money::from_minor(50_000),
            "Monthly office supplies",
        ));
        assert!(draft.is_balanced());
        assert_eq!(
            draft.totals(),
            (Money::from_minor(50_000), Money::from_minor(50_000))
        );

        // An all-zero draft is never "balanced".
        assert!(!JournalDraft::new(date(), "empty").is_balanced());
    }

    #[test]
    fn removing_a_draft_line_by_position() {
        let mut draft = JournalDraft::new(date(), "fix-up")
            .line(JournalLine::debit("Rent Expense", Money::from_minor(1), "a"))
            .line(JournalLine::credit(
                "Cash and Cash Equivalents",
                Money::from_minor(1),
                "b",
            ));

        let removed = draft.remove_line(0).unwrap();
        assert_eq!(removed.account, "Rent Expense");
        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.remove_line(5), None);
    }

    proptest! {
        /// Property: validation accepts exactly the bodies whose debit and
        /// credit totals agree.
        #[test]
        fn validation_accepts_iff_totals_agree(
            debit_amount in 1i64..1_000_000i64,
            credit_amount in 1i64..1_000_000i64,
        ) {
            let lines = vec![
                JournalLine::debit("Cash and Cash Equivalents", Money::from_minor(debit_amount), ""),
                JournalLine::credit("Sales Revenue", Money::from_minor(credit_amount), ""),
            ];

            let result = validate_lines(&lines, &chart());
            if debit_amount == credit_amount {
                prop_assert_eq!(result, Ok(Money::from_minor(debit_amount)));
            } else {
                prop_assert_eq!(result, Err(JournalError::Unbalanced {
                    debits: Money::from_minor(debit_amount),
                    credits: Money::from_minor(credit_amount),
                }));
            }
        }
    }
}
