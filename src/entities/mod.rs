// Entity Models
// Typed records produced by a successful schema validation.
//
// Each entity has:
// - Stable identity (UUID) assigned at creation
// - Wire names matching the form payloads (camelCase keys, SCREAMING enums)

pub mod account;
pub mod transaction;

pub use account::{Account, AccountSummary, AccountType, NewAccount};
pub use transaction::{NewTransaction, RecurringInterval, Transaction, TransactionType};
