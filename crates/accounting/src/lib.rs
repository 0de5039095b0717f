//! Accounting module (double-entry journal/ledger engine).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. The UI
//! shell builds [`JournalDraft`]s and renders what the store and views
//! return.
//!
//! Layering (leaf first): [`ChartOfAccounts`] classifies accounts, the
//! validator in [`journal`] admits entries, [`JournalStore`] owns the
//! append-only posted list, and [`view`]/[`reports`] derive ledgers and
//! summaries from it.

pub mod chart;
pub mod journal;
pub mod reports;
pub mod store;
pub mod view;

pub use chart::{Account, AccountKind, BalanceSide, ChartOfAccounts};
pub use journal::{
    validate_line, validate_lines, JournalDraft, JournalError, JournalLine, Transaction,
};
pub use reports::{
    balance_sheet, income_statement, trial_balance, BalanceSheet, IncomeStatement, TrialBalance,
    TrialBalanceRow,
};
pub use store::{JournalStore, TransactionFilter};
pub use view::{
    account_kind_summary, aggregate, build_ledger, filter_entries, EntryFilter, LedgerEntry,
    LedgerTotals,
};
