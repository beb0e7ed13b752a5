//! End-to-end: type into the create-account form, submit, book a few
//! transactions and read the account header back.

use chrono::NaiveDate;
use welth::{
    Account, AccountField, AccountForm, AccountSummary, AccountType, Key, KeyOutcome,
    TransactionInput, Transaction,
};

fn press_keys(form: &mut AccountForm, field: AccountField, keys: impl IntoIterator<Item = Key>) {
    let mut cursor = form.value(field).chars().count();
    for key in keys {
        match form.key_down(field, &key, cursor) {
            KeyOutcome::Applied { cursor: next } => cursor = next,
            KeyOutcome::Suppressed => {}
        }
    }
}

fn type_text(form: &mut AccountForm, field: AccountField, text: &str) {
    press_keys(form, field, text.chars().map(Key::Char));
}

#[test]
fn create_account_and_summarize() {
    let mut form = AccountForm::new();

    type_text(&mut form, AccountField::AccountNumber, "9876-5432-1098");
    assert_eq!(form.value(AccountField::AccountNumber), "987654321098");

    type_text(&mut form, AccountField::Ifsc, "icic00004567");
    // second `0` lands in the digit segment
    assert_eq!(form.value(AccountField::Ifsc), "ICIC0000456");

    press_keys(&mut form, AccountField::Ifsc, [Key::Backspace, Key::parse("7")]);
    assert_eq!(form.value(AccountField::Ifsc), "ICIC0000457");

    form.set_value(AccountField::BankName, "ICICI Bank");
    form.set_value(AccountField::Balance, "10000.00");
    form.set_account_type(AccountType::Current);

    let account = Account::create(form.submit().expect("form should validate"));
    assert_eq!(account.account_type, AccountType::Current);

    let mut transactions = Vec::new();
    for (kind, amount) in [("INCOME", "5000"), ("EXPENSE", "1250.75")] {
        let input = TransactionInput {
            kind: kind.to_string(),
            amount: amount.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1),
            account_id: account.id.clone(),
            category: "general".to_string(),
            ..TransactionInput::default()
        };
        transactions.push(Transaction::create(input.validate().expect("valid transaction")));
    }

    let net: f64 = transactions.iter().map(Transaction::signed_amount).sum();
    assert_eq!(net, 3749.25);

    let summary = AccountSummary::find(std::slice::from_ref(&account), &transactions, &account.id)
        .expect("account exists");
    assert_eq!(
        summary.to_string(),
        "A/C: 987654321098\nBank: ICICI Bank\n₹10000.00\n2 Transactions"
    );
}

#[test]
fn rejected_submit_keeps_values() {
    let mut form = AccountForm::new();
    form.set_value(AccountField::Ifsc, "SBIN01");
    assert!(form.submit().is_err());
    assert_eq!(form.value(AccountField::Ifsc), "SBIN01");
    assert_eq!(
        form.error(AccountField::Ifsc),
        Some("IFSC code must be exactly 11 characters")
    );
}
