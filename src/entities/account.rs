// 💳 Account Entity - bank account created from the account form
//
// Identity is a UUID assigned at creation. The account number is kept in
// full (validated 9-18 digits) and masked only for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::transaction::Transaction;
use crate::error::UnknownVariant;

// ============================================================================
// ACCOUNT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Current account (daily business transactions)
    #[default]
    Current,

    /// Savings account (interest-bearing)
    Savings,
}

impl AccountType {
    pub const NAMES: &'static [&'static str] = &["CURRENT", "SAVINGS"];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Current => "CURRENT",
            AccountType::Savings => "SAVINGS",
        }
    }

    /// Label shown in the type selector
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Current => "Current",
            AccountType::Savings => "Savings",
        }
    }
}

impl FromStr for AccountType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CURRENT" => Ok(AccountType::Current),
            "SAVINGS" => Ok(AccountType::Savings),
            other => Err(UnknownVariant::new(other, Self::NAMES)),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// Validated form values, not yet given an identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub account_number: String,
    pub bank_name: String,
    pub ifsc: String,
    pub account_type: AccountType,
    pub balance: f64,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Stable identity (UUID)
    pub id: String,

    /// Full account number, digits only
    pub account_number: String,

    pub bank_name: String,
    pub ifsc: String,
    pub account_type: AccountType,
    pub balance: f64,

    /// Selected by default for new transactions
    #[serde(default)]
    pub is_default: bool,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create new account entity with UUID
    pub fn create(new: NewAccount) -> Self {
        Account {
            id: uuid::Uuid::new_v4().to_string(),
            account_number: new.account_number,
            bank_name: new.bank_name,
            ifsc: new.ifsc,
            account_type: new.account_type,
            balance: new.balance,
            is_default: new.is_default,
            created_at: Utc::now(),
        }
    }

    /// Mask account number (show only last 4 digits)
    ///
    /// Example: "1234567890" → "*7890"
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.account_number.chars().collect();
        if digits.len() <= 4 {
            return self.account_number.clone();
        }
        let last4: String = digits[digits.len() - 4..].iter().collect();
        format!("*{}", last4)
    }

    pub fn is_overdrawn(&self) -> bool {
        self.balance < 0.0
    }
}

// ============================================================================
// ACCOUNT SUMMARY
// ============================================================================

/// Header figures of the account detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub account_number: String,
    pub bank_name: String,
    pub balance: f64,
    pub transaction_count: usize,
}

impl AccountSummary {
    /// Only transactions booked against this account are counted
    pub fn new(account: &Account, transactions: &[Transaction]) -> Self {
        AccountSummary {
            account_number: account.account_number.clone(),
            bank_name: account.bank_name.clone(),
            balance: account.balance,
            transaction_count: transactions
                .iter()
                .filter(|tx| tx.account_id == account.id)
                .count(),
        }
    }

    /// Look up `id` among `accounts`. `None` is the page's "not found".
    pub fn find(accounts: &[Account], transactions: &[Transaction], id: &str) -> Option<Self> {
        accounts
            .iter()
            .find(|a| a.id == id)
            .map(|account| AccountSummary::new(account, transactions))
    }

    pub fn title(&self) -> String {
        format!("A/C: {}", self.account_number)
    }

    pub fn bank_line(&self) -> String {
        format!("Bank: {}", self.bank_name)
    }

    /// Rupee amount with two decimals, e.g. `₹1500.00`
    pub fn balance_display(&self) -> String {
        format!("₹{:.2}", self.balance)
    }

    pub fn transactions_label(&self) -> String {
        format!("{} Transactions", self.transaction_count)
    }
}

impl fmt::Display for AccountSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        writeln!(f, "{}", self.bank_line())?;
        writeln!(f, "{}", self.balance_display())?;
        write!(f, "{}", self.transactions_label())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::transaction::{NewTransaction, TransactionType};
    use chrono::NaiveDate;

    fn sample_account() -> Account {
        Account::create(NewAccount {
            account_number: "123456789012".to_string(),
            bank_name: "State Bank of India".to_string(),
            ifsc: "SBIN0123456".to_string(),
            account_type: AccountType::Savings,
            balance: 1500.0,
            is_default: true,
        })
    }

    fn transaction_for(account_id: &str) -> Transaction {
        Transaction::create(NewTransaction {
            kind: TransactionType::Expense,
            amount: 120.5,
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            account_id: account_id.to_string(),
            category: "groceries".to_string(),
            is_recurring: false,
            recurring_interval: None,
        })
    }

    #[test]
    fn test_account_creation_assigns_uuid() {
        let a = sample_account();
        let b = sample_account();
        assert_eq!(a.id.len(), 36);
        assert_ne!(a.id, b.id);
        assert!(a.is_default);
        assert!(!a.is_overdrawn());
    }

    #[test]
    fn test_masked_number() {
        let account = sample_account();
        assert_eq!(account.masked_number(), "*9012");
    }

    #[test]
    fn test_account_type_parse() {
        assert_eq!("SAVINGS".parse::<AccountType>().unwrap(), AccountType::Savings);
        let err = "savings".parse::<AccountType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid enum value. Expected 'CURRENT' | 'SAVINGS', received 'savings'"
        );
        assert_eq!(AccountType::default(), AccountType::Current);
    }

    #[test]
    fn test_summary_counts_only_own_transactions() {
        let account = sample_account();
        let transactions = vec![
            transaction_for(&account.id),
            transaction_for(&account.id),
            transaction_for("other-account"),
        ];

        let summary = AccountSummary::new(&account, &transactions);
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.title(), "A/C: 123456789012");
        assert_eq!(summary.bank_line(), "Bank: State Bank of India");
        assert_eq!(summary.balance_display(), "₹1500.00");
        assert_eq!(summary.transactions_label(), "2 Transactions");
    }

    #[test]
    fn test_summary_find_missing_account() {
        let account = sample_account();
        let accounts = vec![account.clone()];
        assert!(AccountSummary::find(&accounts, &[], &account.id).is_some());
        assert!(AccountSummary::find(&accounts, &[], "missing").is_none());
    }

    #[test]
    fn test_balance_display_negative() {
        let mut account = sample_account();
        account.balance = -12.5;
        let summary = AccountSummary::new(&account, &[]);
        assert_eq!(summary.balance_display(), "₹-12.50");
        assert_eq!(summary.transactions_label(), "0 Transactions");
    }
}
