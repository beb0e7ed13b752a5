// 📝 Account Form - state behind the "create account" drawer
//
// Owns the field values. Two hooks feed it:
//   - set_value(): the change handler (paste, autofill, programmatic set)
//   - key_down():  the keystroke interception hook, consulted before insertion
// submit() runs the account schema over the committed values.

use tracing::{debug, trace};

use crate::entities::{AccountType, NewAccount};
use crate::formatter::{format, is_keystroke_allowed, Key};
use crate::grammar::{Grammar, ACCOUNT_NUMBER, IFSC};
use crate::schema::{AccountInput, ValidationErrors, ValidationResult};

// ============================================================================
// FIELDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    AccountNumber,
    BankName,
    Ifsc,
    AccountType,
    Balance,
}

impl AccountField {
    pub const ALL: [AccountField; 5] = [
        AccountField::AccountNumber,
        AccountField::BankName,
        AccountField::Ifsc,
        AccountField::AccountType,
        AccountField::Balance,
    ];

    /// Payload key, also the `field` of validation issues
    pub fn key(&self) -> &'static str {
        match self {
            AccountField::AccountNumber => "name",
            AccountField::BankName => "bname",
            AccountField::Ifsc => "ifsc",
            AccountField::AccountType => "type",
            AccountField::Balance => "balance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountField::AccountNumber => "Account Number",
            AccountField::BankName => "Bank Name",
            AccountField::Ifsc => "IFSC Code",
            AccountField::AccountType => "Account Type",
            AccountField::Balance => "Initial Balance",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            AccountField::AccountNumber => "Enter 9-18 digit account number",
            AccountField::BankName => "Enter bank name",
            AccountField::Ifsc => "e.g., SBIN0123456",
            AccountField::AccountType => "Select type",
            AccountField::Balance => "0.00",
        }
    }

    /// Grammar shaping this field, if any
    pub fn grammar(&self) -> Option<&'static Grammar> {
        match self {
            AccountField::AccountNumber => Some(&ACCOUNT_NUMBER),
            AccountField::Ifsc => Some(&IFSC),
            _ => None,
        }
    }

    /// Input `maxLength`
    pub fn max_length(&self) -> Option<usize> {
        match self {
            AccountField::AccountNumber => Some(18),
            AccountField::Ifsc => Some(11),
            _ => None,
        }
    }
}

/// What became of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The gate rejected the key; value and cursor are unchanged
    Suppressed,
    /// The default action ran (possibly a no-op, e.g. typing into a full field)
    Applied { cursor: usize },
}

// ============================================================================
// FORM
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AccountForm {
    values: AccountInput,
    errors: ValidationErrors,
}

impl AccountForm {
    pub fn new() -> Self {
        AccountForm {
            values: AccountInput {
                account_type: AccountType::default().as_str().to_string(),
                ..AccountInput::default()
            },
            errors: ValidationErrors::new(),
        }
    }

    pub fn value(&self, field: AccountField) -> &str {
        match field {
            AccountField::AccountNumber => &self.values.name,
            AccountField::BankName => &self.values.bname,
            AccountField::Ifsc => &self.values.ifsc,
            AccountField::AccountType => &self.values.account_type,
            AccountField::Balance => &self.values.balance,
        }
    }

    fn slot(&mut self, field: AccountField) -> &mut String {
        match field {
            AccountField::AccountNumber => &mut self.values.name,
            AccountField::BankName => &mut self.values.bname,
            AccountField::Ifsc => &mut self.values.ifsc,
            AccountField::AccountType => &mut self.values.account_type,
            AccountField::Balance => &mut self.values.balance,
        }
    }

    /// Replace the field's value wholesale. Input longer than the field's
    /// cap is cut first, then the field's formatter runs.
    pub fn set_value(&mut self, field: AccountField, raw: &str) {
        let capped: String = match field.max_length() {
            Some(max) => raw.chars().take(max).collect(),
            None => raw.to_string(),
        };
        let value = match field.grammar() {
            Some(grammar) => format(grammar, &capped),
            None => capped,
        };
        *self.slot(field) = value;
    }

    pub fn set_account_type(&mut self, account_type: AccountType) {
        self.set_value(AccountField::AccountType, account_type.as_str());
    }

    pub fn is_default(&self) -> bool {
        self.values.is_default
    }

    pub fn set_default(&mut self, is_default: bool) {
        self.values.is_default = is_default;
    }

    /// Apply a key press at `cursor` (a character index).
    pub fn key_down(&mut self, field: AccountField, key: &Key, cursor: usize) -> KeyOutcome {
        let mut chars: Vec<char> = self.value(field).chars().collect();
        let cursor = cursor.min(chars.len());

        if let Some(grammar) = field.grammar() {
            if !is_keystroke_allowed(grammar, self.value(field), cursor, key) {
                trace!(field = field.key(), %key, cursor, "keystroke suppressed");
                return KeyOutcome::Suppressed;
            }
        }

        let cursor = match key {
            Key::Char(c) => {
                if field.max_length().is_some_and(|max| chars.len() >= max) {
                    return KeyOutcome::Applied { cursor };
                }
                chars.insert(cursor, *c);
                cursor + 1
            }
            Key::Backspace if cursor > 0 => {
                chars.remove(cursor - 1);
                cursor - 1
            }
            Key::Delete if cursor < chars.len() => {
                chars.remove(cursor);
                cursor
            }
            Key::ArrowLeft => return KeyOutcome::Applied { cursor: cursor.saturating_sub(1) },
            Key::ArrowRight => {
                return KeyOutcome::Applied {
                    cursor: (cursor + 1).min(chars.len()),
                }
            }
            _ => return KeyOutcome::Applied { cursor },
        };

        let edited: String = chars.into_iter().collect();
        self.set_value(field, &edited);
        KeyOutcome::Applied {
            cursor: cursor.min(self.value(field).chars().count()),
        }
    }

    /// Validate the committed values. Issues are kept for `error()`.
    pub fn submit(&mut self) -> ValidationResult<NewAccount> {
        match self.values.validate() {
            Ok(account) => {
                debug!(bank = %account.bank_name, "account form accepted");
                self.errors = ValidationErrors::new();
                Ok(account)
            }
            Err(errors) => {
                debug!(issues = errors.len(), "account form rejected");
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Message shown under `field` after the last submit
    pub fn error(&self, field: AccountField) -> Option<&str> {
        self.errors.first_for(field.key())
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn input(&self) -> &AccountInput {
        &self.values
    }

    pub fn reset(&mut self) {
        *self = AccountForm::new();
    }
}

impl Default for AccountForm {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut AccountForm, field: AccountField, text: &str) -> usize {
        let mut cursor = form.value(field).chars().count();
        for c in text.chars() {
            if let KeyOutcome::Applied { cursor: next } = form.key_down(field, &Key::Char(c), cursor) {
                cursor = next;
            }
        }
        cursor
    }

    #[test]
    fn test_defaults() {
        let form = AccountForm::new();
        assert_eq!(form.value(AccountField::AccountType), "CURRENT");
        assert_eq!(form.value(AccountField::Ifsc), "");
        assert!(!form.is_default());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_typing_ifsc_uppercases_and_gates() {
        let mut form = AccountForm::new();
        let cursor = type_text(&mut form, AccountField::Ifsc, "sbin50123456789");
        assert_eq!(form.value(AccountField::Ifsc), "SBIN0123456");
        assert_eq!(cursor, 11);
    }

    #[test]
    fn test_ifsc_gate_suppresses_wrong_class() {
        let mut form = AccountForm::new();
        form.set_value(AccountField::Ifsc, "SBIN");
        assert_eq!(
            form.key_down(AccountField::Ifsc, &Key::Char('5'), 4),
            KeyOutcome::Suppressed
        );
        assert_eq!(
            form.key_down(AccountField::Ifsc, &Key::Char('0'), 4),
            KeyOutcome::Applied { cursor: 5 }
        );
        assert_eq!(form.value(AccountField::Ifsc), "SBIN0");
    }

    #[test]
    fn test_account_number_capped_at_18() {
        let mut form = AccountForm::new();
        type_text(&mut form, AccountField::AccountNumber, "12345678901234567890");
        assert_eq!(form.value(AccountField::AccountNumber), "123456789012345678");
    }

    #[test]
    fn test_paste_is_cut_then_formatted() {
        let mut form = AccountForm::new();
        form.set_value(AccountField::AccountNumber, "12-34 56a78");
        assert_eq!(form.value(AccountField::AccountNumber), "12345678");

        form.set_value(AccountField::AccountNumber, "1234-5678-9012-3456-78");
        assert_eq!(form.value(AccountField::AccountNumber), "123456789012345");

        form.set_value(AccountField::Ifsc, "hdfc0001234 branch");
        assert_eq!(form.value(AccountField::Ifsc), "HDFC0001234");
    }

    #[test]
    fn test_backspace_delete_and_arrows() {
        let mut form = AccountForm::new();
        form.set_value(AccountField::Ifsc, "SBIN0");
        assert_eq!(
            form.key_down(AccountField::Ifsc, &Key::Backspace, 5),
            KeyOutcome::Applied { cursor: 4 }
        );
        assert_eq!(form.value(AccountField::Ifsc), "SBIN");

        assert_eq!(
            form.key_down(AccountField::Ifsc, &Key::Delete, 0),
            KeyOutcome::Applied { cursor: 0 }
        );
        assert_eq!(form.value(AccountField::Ifsc), "BIN");

        assert_eq!(
            form.key_down(AccountField::Ifsc, &Key::ArrowLeft, 0),
            KeyOutcome::Applied { cursor: 0 }
        );
        assert_eq!(
            form.key_down(AccountField::Ifsc, &Key::ArrowRight, 3),
            KeyOutcome::Applied { cursor: 3 }
        );
        assert_eq!(
            form.key_down(AccountField::Ifsc, &Key::Backspace, 0),
            KeyOutcome::Applied { cursor: 0 }
        );
        assert_eq!(form.value(AccountField::Ifsc), "BIN");
    }

    #[test]
    fn test_free_text_fields_take_any_key() {
        let mut form = AccountForm::new();
        type_text(&mut form, AccountField::BankName, "HDFC Bank");
        assert_eq!(form.value(AccountField::BankName), "HDFC Bank");
        assert_eq!(
            form.key_down(AccountField::BankName, &Key::parse("Tab"), 9),
            KeyOutcome::Applied { cursor: 9 }
        );
    }

    #[test]
    fn test_submit_reports_first_error_per_field() {
        let mut form = AccountForm::new();
        form.set_value(AccountField::AccountNumber, "1234");
        form.set_value(AccountField::Ifsc, "SBIN0");

        assert!(form.submit().is_err());
        assert_eq!(
            form.error(AccountField::AccountNumber),
            Some("Account number must be at least 9 digits")
        );
        assert_eq!(form.error(AccountField::BankName), Some("Bank name is required"));
        assert_eq!(
            form.error(AccountField::Ifsc),
            Some("IFSC code must be exactly 11 characters")
        );
        assert_eq!(form.error(AccountField::Balance), Some("Initial balance is required"));
        assert!(form.error(AccountField::AccountType).is_none());
    }

    #[test]
    fn test_submit_success_then_reset() {
        let mut form = AccountForm::new();
        form.set_value(AccountField::AccountNumber, "000123456789");
        form.set_value(AccountField::BankName, "State Bank of India");
        form.set_value(AccountField::Ifsc, "sbin0123456");
        form.set_value(AccountField::Balance, "2500");
        form.set_account_type(AccountType::Savings);
        form.set_default(true);

        let account = form.submit().unwrap();
        assert_eq!(account.account_number, "000123456789");
        assert_eq!(account.ifsc, "SBIN0123456");
        assert_eq!(account.account_type, AccountType::Savings);
        assert!(account.is_default);
        assert!(form.errors().is_empty());

        form.reset();
        assert_eq!(form, AccountForm::new());
    }

    #[test]
    fn test_field_metadata() {
        for field in AccountField::ALL {
            assert!(!field.label().is_empty());
            assert_eq!(field.grammar().is_some(), field.max_length().is_some());
        }
        assert_eq!(AccountField::Ifsc.placeholder(), "e.g., SBIN0123456");
    }
}
