use serde::{Deserialize, Serialize};

use tallybook_core::ValueObject;

/// High-level account kind (determines normal balance side).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

/// Which side increases an account's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceSide {
    Debit,
    Credit,
}

impl AccountKind {
    pub const ALL: [AccountKind; 5] = [
        AccountKind::Asset,
        AccountKind::Liability,
        AccountKind::Equity,
        AccountKind::Revenue,
        AccountKind::Expense,
    ];

    /// The side on which this kind's balance grows.
    pub const fn normal_side(self) -> BalanceSide {
        match self {
            AccountKind::Asset | AccountKind::Expense => BalanceSide::Debit,
            AccountKind::Liability | AccountKind::Equity | AccountKind::Revenue => {
                BalanceSide::Credit
            }
        }
    }
}

/// Account identity + classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    /// Unique within a chart, e.g. "Cash and Cash Equivalents".
    pub name: String,
    pub kind: AccountKind,
}

impl Account {
    pub fn new(name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl ValueObject for Account {}

/// The account registry: fixed configuration mapping names to classifications.
///
/// Supplied once at startup (by whatever loads configuration); the engine does
/// not create accounts at runtime. An unknown name is a validation error for
/// journal entries, never a panic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOfAccounts {
    accounts: Vec<Account>,
}

impl ChartOfAccounts {
    /// Build from configuration, preserving order. Duplicate names collapse to
    /// the last definition (the registry is trusted, fixed data).
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        let mut chart = Self {
            accounts: Vec::new(),
        };
        for account in accounts {
            match chart.accounts.iter_mut().find(|a| a.name == account.name) {
                Some(existing) => *existing = account,
                None => chart.accounts.push(account),
            }
        }
        chart
    }

    /// The standard small-business chart the product ships with.
    pub fn standard() -> Self {
        use AccountKind::*;
        Self::new([
            Account::new("Cash and Cash Equivalents", Asset),
            Account::new("Accounts Receivable", Asset),
            Account::new("Inventory", Asset),
            Account::new("Office Equipment", Asset),
            Account::new("Accounts Payable", Liability),
            Account::new("Short-term Debt", Liability),
            Account::new("Owner's Equity", Equity),
            Account::new("Retained Earnings", Equity),
            Account::new("Sales Revenue", Revenue),
            Account::new("Service Revenue", Revenue),
            Account::new("Office Supplies Expense", Expense),
            Account::new("Rent Expense", Expense),
            Account::new("Utilities Expense", Expense),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    /// Look up an account's classification by name.
    pub fn classify(&self, name: &str) -> Option<AccountKind> {
        self.get(name).map(|a| a.kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All accounts, in configuration order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
