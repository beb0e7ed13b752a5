// Crate-level errors

use thiserror::Error;

use crate::schema::ValidationErrors;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("unknown grammar '{0}' (expected 'ifsc' or 'account-number')")]
    UnknownGrammar(String),

    #[error("unknown record '{0}' (expected 'account' or 'transaction')")]
    UnknownRecord(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A string that is not one of an enum's wire names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid enum value. Expected {}, received '{value}'", expected_list(.expected))]
pub struct UnknownVariant {
    pub value: String,
    pub expected: &'static [&'static str],
}

impl UnknownVariant {
    pub fn new(value: impl Into<String>, expected: &'static [&'static str]) -> Self {
        UnknownVariant {
            value: value.into(),
            expected,
        }
    }
}

fn expected_list(expected: &[&str]) -> String {
    expected
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(" | ")
}
