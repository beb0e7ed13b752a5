// 📐 Shape Layer - Schema Validation
// Declarative per-field rule sets for the account and transaction forms.
// This is the authoritative check on a committed value; the formatter only
// shapes what gets typed.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::entities::{
    AccountType, NewAccount, NewTransaction, RecurringInterval, TransactionType,
};
use crate::error::{Error, UnknownVariant};

// `[0-9]` rather than `\d`: the regex crate's `\d` is Unicode-aware
static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));
static IFSC_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{4}0[0-9]{6}$").expect("valid regex"));

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every issue found in one pass, in schema field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{}", join_issues(.issues))]
pub struct ValidationErrors {
    issues: Vec<ValidationError>,
}

fn join_issues(issues: &[ValidationError]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationError) {
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.issues.iter()
    }

    /// First message for `field`, the one a form shows under the input
    pub fn first_for(&self, field: &str) -> Option<&str> {
        self.issues
            .iter()
            .find(|issue| issue.field == field)
            .map(|issue| issue.message.as_str())
    }

    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|issue| issue.field == field)
            .map(|issue| issue.message.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

pub type ValidationResult<T> = Result<T, ValidationErrors>;

// ============================================================================
// RULES
// ============================================================================

#[derive(Debug, Clone)]
pub enum Rule {
    /// Non-empty
    Required(&'static str),
    MinLength(usize, &'static str),
    MaxLength(usize, &'static str),
    Length(usize, &'static str),
    Pattern(&'static Lazy<Regex>, &'static str),
    /// Parses as a finite number. Empty values are left to `Required`/`MinLength`.
    Numeric(&'static str),
    OneOf(&'static [&'static str]),
}

impl Rule {
    /// Message when `value` breaks the rule
    pub fn check(&self, value: &str) -> Option<String> {
        let len = value.chars().count();
        let failed = match self {
            Rule::Required(_) => value.is_empty(),
            Rule::MinLength(min, _) => len < *min,
            Rule::MaxLength(max, _) => len > *max,
            Rule::Length(exact, _) => len != *exact,
            Rule::Pattern(regex, _) => !regex.is_match(value),
            Rule::Numeric(_) => {
                !value.is_empty()
                    && !value.trim().parse::<f64>().map_or(false, f64::is_finite)
            }
            Rule::OneOf(names) => !names.iter().any(|name| *name == value),
        };
        if !failed {
            return None;
        }
        Some(match self {
            Rule::Required(msg)
            | Rule::MinLength(_, msg)
            | Rule::MaxLength(_, msg)
            | Rule::Length(_, msg)
            | Rule::Pattern(_, msg)
            | Rule::Numeric(msg) => msg.to_string(),
            Rule::OneOf(names) => UnknownVariant::new(value, *names).to_string(),
        })
    }
}

// ============================================================================
// FIELD & SCHEMA
// ============================================================================

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    /// Absent values skip every rule
    pub optional: bool,
    pub rules: Vec<Rule>,
}

impl FieldSchema {
    pub fn new(name: &'static str) -> Self {
        FieldSchema {
            name,
            optional: false,
            rules: Vec::new(),
        }
    }

    /// Builder: mark optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Builder: add validation rule
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn check(&self, value: Option<&str>, issues: &mut ValidationErrors) {
        let value = match value {
            Some(v) => v,
            None if self.optional => return,
            None => "",
        };
        for rule in &self.rules {
            if let Some(message) = rule.check(value) {
                issues.push(ValidationError::new(self.name, message));
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    pub name: &'static str,
    fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Schema {
            name,
            fields: Vec::new(),
        }
    }

    /// Builder: add field
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Run the rules of field `name`. Unknown names are ignored.
    pub fn check(&self, name: &str, value: Option<&str>, issues: &mut ValidationErrors) {
        if let Some(field) = self.get(name) {
            field.check(value, issues);
        }
    }
}

pub static ACCOUNT_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new("account")
        .field(
            FieldSchema::new("name")
                .rule(Rule::Pattern(&DIGITS_ONLY, "Only numbers are allowed"))
                .rule(Rule::MinLength(9, "Account number must be at least 9 digits"))
                .rule(Rule::MaxLength(18, "Account number cannot exceed 18 digits")),
        )
        .field(FieldSchema::new("bname").rule(Rule::MinLength(1, "Bank name is required")))
        .field(
            FieldSchema::new("ifsc")
                .rule(Rule::Length(11, "IFSC code must be exactly 11 characters"))
                .rule(Rule::Pattern(
                    &IFSC_CODE,
                    "IFSC must start with 4 capital letters, followed by 0, and end with 6 digits",
                )),
        )
        .field(FieldSchema::new("type").rule(Rule::OneOf(AccountType::NAMES)))
        .field(
            FieldSchema::new("balance")
                .rule(Rule::MinLength(1, "Initial balance is required"))
                .rule(Rule::Numeric("Initial balance must be a number")),
        )
});

pub static TRANSACTION_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new("transaction")
        .field(FieldSchema::new("type").rule(Rule::OneOf(TransactionType::NAMES)))
        .field(
            FieldSchema::new("amount")
                .rule(Rule::MinLength(1, "Amount is required"))
                .rule(Rule::Numeric("Amount must be a number")),
        )
        .field(FieldSchema::new("description").optional())
        .field(FieldSchema::new("date").rule(Rule::Required("Date is required")))
        .field(FieldSchema::new("accountId").rule(Rule::MinLength(1, "Account is required")))
        .field(FieldSchema::new("category").rule(Rule::MinLength(1, "Category is required")))
        .field(
            FieldSchema::new("recurringInterval")
                .optional()
                .rule(Rule::OneOf(RecurringInterval::NAMES)),
        )
});

// ============================================================================
// FORM PAYLOADS
// ============================================================================

/// Raw account form values, as committed by the form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountInput {
    /// Account number
    pub name: String,
    /// Bank name
    pub bname: String,
    pub ifsc: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub balance: String,
    pub is_default: bool,
}

impl AccountInput {
    pub fn validate(&self) -> ValidationResult<NewAccount> {
        let schema = &*ACCOUNT_SCHEMA;
        let mut issues = ValidationErrors::new();
        schema.check("name", Some(&self.name), &mut issues);
        schema.check("bname", Some(&self.bname), &mut issues);
        schema.check("ifsc", Some(&self.ifsc), &mut issues);
        schema.check("type", Some(&self.account_type), &mut issues);
        schema.check("balance", Some(&self.balance), &mut issues);

        let account_type = self.account_type.parse::<AccountType>().ok();
        let balance = self.balance.trim().parse::<f64>().ok();

        match (account_type, balance) {
            (Some(account_type), Some(balance)) if issues.is_empty() => Ok(NewAccount {
                account_number: self.name.clone(),
                bank_name: self.bname.clone(),
                ifsc: self.ifsc.clone(),
                account_type,
                balance,
                is_default: self.is_default,
            }),
            _ => {
                debug!(schema = schema.name, issues = issues.len(), "validation failed");
                Err(issues)
            }
        }
    }
}

/// Raw transaction form values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub account_id: String,
    pub category: String,
    pub is_recurring: bool,
    pub recurring_interval: Option<String>,
}

impl TransactionInput {
    pub fn validate(&self) -> ValidationResult<NewTransaction> {
        let schema = &*TRANSACTION_SCHEMA;
        let mut issues = ValidationErrors::new();
        let date = self.date.map(|d| d.to_string());

        schema.check("type", Some(&self.kind), &mut issues);
        schema.check("amount", Some(&self.amount), &mut issues);
        schema.check("description", self.description.as_deref(), &mut issues);
        schema.check("date", date.as_deref(), &mut issues);
        schema.check("accountId", Some(&self.account_id), &mut issues);
        schema.check("category", Some(&self.category), &mut issues);
        schema.check("recurringInterval", self.recurring_interval.as_deref(), &mut issues);

        if self.is_recurring && self.recurring_interval.is_none() {
            issues.push(ValidationError::new(
                "recurringInterval",
                "Recurring interval is required for recurring transactions",
            ));
        }

        let kind = self.kind.parse::<TransactionType>().ok();
        let amount = self.amount.trim().parse::<f64>().ok();
        let interval = match self.recurring_interval.as_deref() {
            Some(name) => name.parse::<RecurringInterval>().ok().map(Some),
            None => Some(None),
        };

        match (kind, amount, self.date, interval) {
            (Some(kind), Some(amount), Some(date), Some(recurring_interval))
                if issues.is_empty() =>
            {
                Ok(NewTransaction {
                    kind,
                    amount,
                    description: self.description.clone(),
                    date,
                    account_id: self.account_id.clone(),
                    category: self.category.clone(),
                    is_recurring: self.is_recurring,
                    recurring_interval,
                })
            }
            _ => {
                debug!(schema = schema.name, issues = issues.len(), "validation failed");
                Err(issues)
            }
        }
    }
}

// ============================================================================
// JSON ENTRY POINT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Account,
    Transaction,
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "account" => Ok(RecordKind::Account),
            "transaction" => Ok(RecordKind::Transaction),
            other => Err(Error::UnknownRecord(other.to_string())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Account => f.write_str("account"),
            RecordKind::Transaction => f.write_str("transaction"),
        }
    }
}

/// Parse a JSON form payload and validate it, returning the typed record
/// re-serialized as JSON.
pub fn validate_json(kind: RecordKind, json: &str) -> crate::Result<serde_json::Value> {
    let value = match kind {
        RecordKind::Account => {
            let input: AccountInput = serde_json::from_str(json)?;
            serde_json::to_value(input.validate()?)?
        }
        RecordKind::Transaction => {
            let input: TransactionInput = serde_json::from_str(json)?;
            serde_json::to_value(input.validate()?)?
        }
    };
    Ok(value)
}

// ============================================================================
// TESTS
// ============================================================================
