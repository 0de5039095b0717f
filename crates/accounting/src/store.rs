use serde::{Deserialize, Serialize};

use tallybook_core::TransactionId;

use crate::chart::{AccountKind, ChartOfAccounts};
use crate::journal::{validate_lines, JournalDraft, JournalError, Transaction};

/// Append-only store of posted transactions.
///
/// The store exclusively owns the canonical transaction list; views are
/// derived from `list()` and never maintained here. `post` takes `&mut self`,
/// so two posts cannot interleave within one session; that is the only
/// exclusion a single-threaded engine needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalStore {
    chart: ChartOfAccounts,
    transactions: Vec<Transaction>,
    next_sequence: u64,
}

/// Store-order filter over posted transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Case-insensitive substring, matched against the reference, the
    /// transaction description, and every line's account name and
    /// description.
    pub text: Option<String>,
    /// Keep transactions posting to at least one account of this kind.
    pub kind: Option<AccountKind>,
}

impl TransactionFilter {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn kind(kind: AccountKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: AccountKind) -> Self {
        self.kind = Some(kind);
        self
    }

    fn matches(&self, transaction: &Transaction, chart: &ChartOfAccounts) -> bool {
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let mut haystacks = [transaction.reference(), transaction.description()]
                .into_iter()
                .map(str::to_lowercase)
                .chain(transaction.lines().iter().flat_map(|line| {
                    [line.account.to_lowercase(), line.description.to_lowercase()]
                }));
            if !haystacks.any(|h| h.contains(&needle)) {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            let hits_kind = transaction
                .lines()
                .iter()
                .any(|line| chart.classify(&line.account) == Some(kind));
            if !hits_kind {
                return false;
            }
        }

        true
    }
}

impl JournalStore {
    /// A store over the given account registry, initially empty.
    pub fn new(chart: ChartOfAccounts) -> Self {
        Self {
            chart,
            transactions: Vec::new(),
            next_sequence: 1,
        }
    }

    pub fn chart(&self) -> &ChartOfAccounts {
        &self.chart
    }

    /// Validate and append a draft, atomically.
    ///
    /// The draft's lines are checked against the chart and the balance law
    /// before anything is written; on any `JournalError` the store is
    /// unchanged and the caller can correct and retry. A draft without a
    /// reference is assigned the next `JE-...` sequence number.
    pub fn post(&mut self, draft: JournalDraft) -> Result<&Transaction, JournalError> {
        let total = match validate_lines(&draft.lines, &self.chart) {
            Ok(total) => total,
            Err(err) => {
                tracing::warn!(error = %err, date = %draft.date, "journal entry rejected");
                return Err(err);
            }
        };

        let reference = match draft.reference {
            Some(reference) if !reference.trim().is_empty() => reference,
            _ => format!("JE-{:03}", self.next_sequence),
        };

        let transaction = Transaction::new(
            TransactionId::new(),
            draft.date,
            reference,
            draft.description,
            draft.lines,
            total,
        );

        tracing::debug!(
            reference = %transaction.reference(),
            total = %total,
            lines = transaction.lines().len(),
            "journal entry posted"
        );

        self.next_sequence += 1;
        self.transactions.push(transaction);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// All posted transactions in insertion (== chronological) order.
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions matching `filter`, in store order.
    pub fn find(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| filter.matches(t, &self.chart))
            .collect()
    }

    /// Look up a posted transaction by its reference.
    pub fn get(&self, reference: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.reference() == reference)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
