use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tallybook_core::{Entity, Money, TransactionId};

use crate::chart::{AccountKind, BalanceSide, ChartOfAccounts};
use crate::journal::{JournalError, Transaction};

/// Read-only ledger row: one (transaction, line) pair.
///
/// `balance` is the cumulative net of all lines for the same account up to
/// and including this one, in store order, signed by the account's normal
/// balance side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub transaction_id: TransactionId,
    pub date: NaiveDate,
    pub reference: String,
    pub account: String,
    pub kind: AccountKind,
    pub description: String,
    pub debit: Money,
    pub credit: Money,
    pub balance: Money,
}

/// Signed contribution of one posting to its account's balance.
fn signed_amount(
    debit: Money,
    credit: Money,
    side: BalanceSide,
) -> Result<Money, JournalError> {
    let delta = match side {
        BalanceSide::Debit => debit.checked_sub(credit),
        BalanceSide::Credit => credit.checked_sub(debit),
    };
    delta.ok_or(JournalError::AmountOverflow)
}

/// Project posted transactions into per-line ledger entries with running
/// balances.
///
/// A pure function of its inputs: recomputing over the same store slice
/// always yields the same view, so it can be called on every render. Fails
/// only if a line references an account outside `chart` (cannot happen for
/// transactions that came out of a `JournalStore` built on the same chart) or
/// if a running balance overflows.
pub fn build_ledger(
    transactions: &[Transaction],
    chart: &ChartOfAccounts,
) -> Result<Vec<LedgerEntry>, JournalError> {
    let mut balances: HashMap<String, Money> = HashMap::new();
    let mut entries = Vec::new();

    for transaction in transactions {
        for line in transaction.lines() {
            let kind = chart
                .classify(&line.account)
                .ok_or_else(|| JournalError::UnknownAccount(line.account.clone()))?;

            let delta = signed_amount(line.debit, line.credit, kind.normal_side())?;
            let balance = balances.entry(line.account.clone()).or_insert(Money::ZERO);
            *balance = balance
                .checked_add(delta)
                .ok_or(JournalError::AmountOverflow)?;

            entries.push(LedgerEntry {
                transaction_id: *transaction.id(),
                date: transaction.date(),
                reference: transaction.reference().to_string(),
                account: line.account.clone(),
                kind,
                description: line.description.clone(),
                debit: line.debit,
                credit: line.credit,
                balance: *balance,
            });
        }
    }

    Ok(entries)
}

/// Filter over derived ledger entries (the general-ledger screen filters at
/// this level rather than per transaction).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Case-insensitive substring over account, description and reference.
    pub text: Option<String>,
    pub kind: Option<AccountKind>,
}

impl EntryFilter {
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

    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let hit = entry.account.to_lowercase().contains(&needle)
                || entry.description.to_lowercase().contains(&needle)
                || entry.reference.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        match self.kind {
            Some(kind) => entry.kind == kind,
            None => true,
        }
    }
}

/// Keep the entries matching `filter`, preserving order.
pub fn filter_entries<'a>(
    entries: &'a [LedgerEntry],
    filter: &EntryFilter,
) -> Vec<&'a LedgerEntry> {
    entries.iter().filter(|e| filter.matches(e)).collect()
}

/// Debit/credit totals over a (possibly filtered) set of ledger entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub total_debit: Money,
    pub total_credit: Money,
}

impl LedgerTotals {
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }
}

/// Sum debits and credits across `entries`.
pub fn aggregate<'a>(
    entries: impl IntoIterator<Item = &'a LedgerEntry>,
) -> Result<LedgerTotals, JournalError> {
    let mut totals = LedgerTotals {
        total_debit: Money::ZERO,
        total_credit: Money::ZERO,
    };
    for entry in entries {
        totals.total_debit = totals
            .total_debit
            .checked_add(entry.debit)
            .ok_or(JournalError::AmountOverflow)?;
        totals.total_credit = totals
            .total_credit
            .checked_add(entry.credit)
            .ok_or(JournalError::AmountOverflow)?;
    }
    Ok(totals)
}

/// Net posted amount per account classification (overview breakdowns).
///
/// Each kind's total is signed by its normal balance side, so a healthy book
/// reports positive numbers across the board.
pub fn account_kind_summary(
    transactions: &[Transaction],
    chart: &ChartOfAccounts,
) -> Result<BTreeMap<AccountKind, Money>, JournalError> {
    let mut summary = BTreeMap::new();

    for transaction in transactions {
        for line in transaction.lines() {
            let kind = chart
                .classify(&line.account)
                .ok_or_else(|| JournalError::UnknownAccount(line.account.clone()))?;
            let delta = signed_amount(line.debit, line.credit, kind.normal_side())?;
            let total = summary.entry(kind).or_insert(Money::ZERO);
            *total = total
                .checked_add(delta)
                .ok_or(JournalError::AmountOverflow)?;
        }
    }

    Ok(summary)
}
