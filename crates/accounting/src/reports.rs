//! In-memory financial summaries derived from posted transactions.
//!
//! These are aggregations over the ledger view, nothing more: no export, no
//! persistence, no period bookkeeping beyond what the caller filters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tallybook_core::Money;

use crate::chart::{AccountKind, ChartOfAccounts};
use crate::journal::{JournalError, Transaction};
use crate::view::{account_kind_summary, build_ledger, LedgerTotals};

/// Per-account closing position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account: String,
    pub kind: AccountKind,
    pub debits: Money,
    pub credits: Money,
    /// Closing balance on the account's normal side.
    pub balance: Money,
}

/// Trial balance: every posted-to account with its totals, plus the grand
/// totals whose equality is the book-level balance check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    /// Rows sorted by account name.
    pub rows: Vec<TrialBalanceRow>,
    pub totals: LedgerTotals,
}

pub fn trial_balance(
    transactions: &[Transaction],
    chart: &ChartOfAccounts,
) -> Result<TrialBalance, JournalError> {
    let entries = build_ledger(transactions, chart)?;

    let mut by_account: BTreeMap<String, TrialBalanceRow> = BTreeMap::new();
    let mut totals = LedgerTotals {
        total_debit: Money::ZERO,
        total_credit: Money::ZERO,
    };

    for entry in &entries {
        let row = by_account
            .entry(entry.account.clone())
            .or_insert_with(|| TrialBalanceRow {
                account: entry.account.clone(),
                kind: entry.kind,
                debits: Money::ZERO,
                credits: Money::ZERO,
                balance: Money::ZERO,
            });
        row.debits = row
            .debits
            .checked_add(entry.debit)
            .ok_or(JournalError::AmountOverflow)?;
        row.credits = row
            .credits
            .checked_add(entry.credit)
            .ok_or(JournalError::AmountOverflow)?;
        // Entries arrive in store order, so the last one seen per account
        // carries its closing running balance.
        row.balance = entry.balance;

        totals.total_debit = totals
            .total_debit
            .checked_add(entry.debit)
            .ok_or(JournalError::AmountOverflow)?;
        totals.total_credit = totals
            .total_credit
            .checked_add(entry.credit)
            .ok_or(JournalError::AmountOverflow)?;
    }

    Ok(TrialBalance {
        rows: by_account.into_values().collect(),
        totals,
    })
}

/// Revenue and expense totals with the resulting net profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub revenue: Money,
    pub expenses: Money,
    pub net_profit: Money,
}

pub fn income_statement(
    transactions: &[Transaction],
    chart: &ChartOfAccounts,
) -> Result<IncomeStatement, JournalError> {
    let summary = account_kind_summary(transactions, chart)?;
    let revenue = summary
        .get(&AccountKind::Revenue)
        .copied()
        .unwrap_or(Money::ZERO);
    let expenses = summary
        .get(&AccountKind::Expense)
        .copied()
        .unwrap_or(Money::ZERO);
    let net_profit = revenue
        .checked_sub(expenses)
        .ok_or(JournalError::AmountOverflow)?;

    Ok(IncomeStatement {
        revenue,
        expenses,
        net_profit,
    })
}

/// Balance-sheet positions derived from the posted book.
///
/// `retained_income` is the not-yet-closed net profit; the accounting
/// identity reads assets = liabilities + equity + retained income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub assets: Money,
    pub liabilities: Money,
    pub equity: Money,
    pub retained_income: Money,
}

impl BalanceSheet {
    /// The accounting identity, checked exactly (overflow counts as failure).
    pub fn is_balanced(&self) -> bool {
        self.liabilities
            .checked_add(self.equity)
            .and_then(|sum| sum.checked_add(self.retained_income))
            == Some(self.assets)
    }
}

pub fn balance_sheet(
    transactions: &[Transaction],
    chart: &ChartOfAccounts,
) -> Result<BalanceSheet, JournalError> {
    let summary = account_kind_summary(transactions, chart)?;
    let of = |kind: AccountKind| summary.get(&kind).copied().unwrap_or(Money::ZERO);

    let income = income_statement(transactions, chart)?;

    Ok(BalanceSheet {
        assets: of(AccountKind::Asset),
        liabilities: of(AccountKind::Liability),
        equity: of(AccountKind::Equity),
        retained_income: income.net_profit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{JournalDraft, JournalLine};
    use crate::store::JournalStore;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).expect("valid date")
    }

    /// Capital in, equipment bought, a credit sale, supplies paid in cash.
    fn active_store() -> JournalStore {
        let mut store = JournalStore::new(ChartOfAccounts::standard());
        let drafts = [
            JournalDraft::new(day(15), "Initial capital investment")
                .line(JournalLine::debit(
                    "Cash and Cash Equivalents",
                    Money::from_minor(5_000_000),
                    "Initial capital investment",
                ))
                .line(JournalLine::credit(
                    "Owner's Equity",
                    Money::from_minor(5_000_000),
                    "Initial capital investment",
                )),
            JournalDraft::new(day(16), "Purchase of office equipment")
                .line(JournalLine::debit(
                    "Office Equipment",
                    Money::from_minor(500_000),
                    "Purchase of office equipment",
                ))
                .line(JournalLine::credit(
                    "Cash and Cash Equivalents",
                    Money::from_minor(500_000),
                    "Purchase of office equipment",
                )),
            JournalDraft::new(day(17), "Sales on credit")
                .line(JournalLine::debit(
                    "Accounts Receivable",
                    Money::from_minor(800_000),
                    "Sales on credit",
                ))
                .line(JournalLine::credit(
                    "Sales Revenue",
                    Money::from_minor(800_000),
                    "Sales on credit",
                )),
            JournalDraft::new(day(18), "Monthly office supplies")
                .line(JournalLine::debit(
                    "Office Supplies Expense",
                    Money::from_minor(50_000),
                    "Monthly office supplies",
                ))
                .line(JournalLine::credit(
                    "Cash and Cash Equivalents",
                    Money::from_minor(50_000),
                    "Monthly office supplies",
                )),
        ];
        for draft in drafts {
            store.post(draft).unwrap();
        }
        store
    }

    #[test]
    fn trial_balance_rows_carry_closing_balances() {
        let store = active_store();
        let tb = trial_balance(store.list(), store.chart()).unwrap();

        assert!(tb.totals.is_balanced());
        assert_eq!(tb.totals.total_debit, Money::from_minor(6_350_000));

        let cash = tb
            .rows
            .iter()
            .find(|r| r.account == "Cash and Cash Equivalents")
            .unwrap();
        assert_eq!(cash.debits, Money::from_minor(5_000_000));
        assert_eq!(cash.credits, Money::from_minor(550_000));
        assert_eq!(cash.balance, Money::from_minor(4_450_000));

        // Sorted by account name.
        let names: Vec<&str> = tb.rows.iter().map(|r| r.account.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn income_statement_nets_revenue_against_expenses() {
        let store = active_store();
        let income = income_statement(store.list(), store.chart()).unwrap();

        assert_eq!(income.revenue, Money::from_minor(800_000));
        assert_eq!(income.expenses, Money::from_minor(50_000));
        assert_eq!(income.net_profit, Money::from_minor(750_000));
    }

    #[test]
    fn balance_sheet_identity_holds_for_any_posted_book() {
        let store = active_store();
        let sheet = balance_sheet(store.list(), store.chart()).unwrap();

        // Cash 44_500 + equipment 5_000 + receivable 8_000.
        assert_eq!(sheet.assets, Money::from_minor(5_750_000));
        assert_eq!(sheet.liabilities, Money::ZERO);
        assert_eq!(sheet.equity, Money::from_minor(5_000_000));
        assert_eq!(sheet.retained_income, Money::from_minor(750_000));
        assert!(sheet.is_balanced());
    }

    #[test]
    fn empty_book_reports_zeroes_everywhere() {
        let store = JournalStore::new(ChartOfAccounts::standard());

        let tb = trial_balance(store.list(), store.chart()).unwrap();
        assert!(tb.rows.is_empty());
        assert!(tb.totals.is_balanced());

        let income = income_statement(store.list(), store.chart()).unwrap();
        assert_eq!(income.net_profit, Money::ZERO);

        let sheet = balance_sheet(store.list(), store.chart()).unwrap();
        assert!(sheet.is_balanced());
    }
}
