// Welth - Core Library
// Account entry for a personal-finance app: structured-code formatting,
// form validation, and the account detail figures. Used by the CLI and tests.

pub mod error;
pub mod grammar;    // Positional grammar tables (IFSC, account number)
pub mod formatter;  // Transform + keystroke gate over a grammar
pub mod schema;     // Declarative field rules for account / transaction payloads
pub mod form;       // Create-account form state
pub mod entities;   // Account / Transaction records

// Re-export commonly used types
pub use error::{Error, Result, UnknownVariant};
pub use grammar::{Case, CharClass, Grammar, GrammarKind, Segment, ACCOUNT_NUMBER, GRAMMARS, IFSC};
pub use formatter::{
    format, format_account_number, format_ifsc, is_keystroke_allowed, Key,
};
pub use schema::{
    validate_json, AccountInput, FieldSchema, RecordKind, Rule, Schema, TransactionInput,
    ValidationError, ValidationErrors, ValidationResult, ACCOUNT_SCHEMA, TRANSACTION_SCHEMA,
};
pub use form::{AccountField, AccountForm, KeyOutcome};
pub use entities::{
    Account, AccountSummary, AccountType, NewAccount, NewTransaction, RecurringInterval,
    Transaction, TransactionType,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
