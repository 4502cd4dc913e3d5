use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use treasury_sim::core::account::AccountId;
use treasury_sim::core::currency::Currency;
use treasury_sim::core::transaction::TransactionStatus;
use treasury_sim::session::{StatusMessage, TreasurySession};
use treasury_sim::transfer::engine::TransferError;
use treasury_sim::transfer::form::{FormField, TransferRequest};
use treasury_sim::view::filter::FilterField;

fn balance(session: &TreasurySession, id: &str) -> Decimal {
    session.ledger().balance(&AccountId::new(id)).unwrap()
}

fn fill(session: &mut TreasurySession, from: &str, to: &str, amount: &str) {
    session.set_field(FormField::FromAccount, from);
    session.set_field(FormField::ToAccount, to);
    session.set_field(FormField::Amount, amount);
}

/// Mpesa_KES_1 -> Bank_USD_1, 100,000 KES at 0.0067.
#[test]
fn kes_to_usd_transfer_completes() {
    let mut session = TreasurySession::new();
    fill(&mut session, "1", "5", "100000");

    let tx = session.submit().unwrap();

    assert_eq!(balance(&session, "1"), dec!(2_400_000));
    assert_eq!(balance(&session, "5"), dec!(45_670));
    assert_eq!(tx.fx_rate(), dec!(0.0067));
    assert_eq!(tx.converted_amount(), dec!(670));
    assert_eq!(tx.status(), TransactionStatus::Completed);
    assert_eq!(tx.from_account(), "Mpesa_KES_1");
    assert_eq!(tx.to_account(), "Bank_USD_1");
    assert_eq!(tx.from_currency(), Currency::Kes);
    assert_eq!(tx.to_currency(), Currency::Usd);
}

#[test]
fn same_account_rejected_without_state_change() {
    let mut session = TreasurySession::new();
    let ledger_before = session.ledger().clone();
    fill(&mut session, "1", "1", "100");

    assert_eq!(session.submit().unwrap_err(), TransferError::SameAccount);
    assert_eq!(session.ledger(), &ledger_before);
    assert!(session.transactions().is_empty());
}

#[test]
fn overdraft_rejected_without_state_change() {
    let mut session = TreasurySession::new();
    let ledger_before = session.ledger().clone();
    fill(&mut session, "1", "2", "10000000");

    let err = session.submit().unwrap_err();
    assert!(matches!(
        err,
        TransferError::InsufficientBalance { balance, requested, .. }
            if balance == dec!(2_500_000) && requested == dec!(10_000_000)
    ));
    assert_eq!(session.ledger(), &ledger_before);
    assert!(session.transactions().is_empty());
    assert_eq!(session.form().amount, "10000000");
}

#[test]
fn scheduled_transfer_applies_immediately() {
    let mut session = TreasurySession::new();
    fill(&mut session, "6", "1", "1000");
    session.set_field(FormField::ScheduledDate, "2099-06-30");

    let tx = session.submit().unwrap();

    assert_eq!(tx.status(), TransactionStatus::Scheduled);
    assert_eq!(tx.scheduled_date(), Some("2099-06-30"));
    assert_eq!(balance(&session, "6"), dec!(119_000));
    assert_eq!(balance(&session, "1"), dec!(2_649_250));
    assert!(matches!(session.message(), Some(StatusMessage::Success(_))));
}

#[test]
fn currency_filter_returns_usd_side_transactions() {
    let mut session = TreasurySession::new();
    let requests = [
        TransferRequest::new("1", "5", "1000"),  // KES -> USD
        TransferRequest::new("2", "3", "500"),   // KES -> KES
        TransferRequest::new("8", "6", "20000"), // NGN -> USD
        TransferRequest::new("9", "10", "300"),  // NGN -> NGN
        TransferRequest::new("6", "4", "10"),    // USD -> KES
    ];
    for request in &requests {
        session.submit_request(request, Utc::now()).unwrap();
    }

    session.set_filter(FilterField::Currency, "USD").unwrap();
    let matched = session.filtered_transactions();

    let expected: Vec<_> = session
        .transactions()
        .iter()
        .filter(|tx| tx.from_currency() == Currency::Usd || tx.to_currency() == Currency::Usd)
        .map(|tx| tx.id())
        .collect();
    let got: Vec<_> = matched.iter().map(|tx| tx.id()).collect();
    assert_eq!(got, expected);
    assert_eq!(got.len(), 3);
}

#[test]
fn unsupported_pair_leaves_everything_untouched() {
    let mut session = TreasurySession::new();
    session
        .submit_request(&TransferRequest::new("1", "2", "10"), Utc::now())
        .unwrap();
    let ledger_before = session.ledger().clone();

    let err = session
        .submit_request(&TransferRequest::new("5", "8", "10"), Utc::now())
        .unwrap_err();

    assert_eq!(
        err,
        TransferError::UnsupportedCurrencyPair {
            from: Currency::Usd,
            to: Currency::Ngn
        }
    );
    assert_eq!(session.ledger(), &ledger_before);
    assert_eq!(session.transactions().len(), 1);
}

#[test]
fn history_is_newest_first_and_date_filtered() {
    let mut session = TreasurySession::new();
    let days = [1, 15, 28];
    for day in days {
        let at = Utc.with_ymd_and_hms(2024, 2, day, 12, 0, 0).unwrap();
        session
            .submit_request(&TransferRequest::new("3", "4", "100"), at)
            .unwrap();
    }

    let all: Vec<u32> = session
        .filtered_transactions()
        .iter()
        .map(|tx| chrono::Datelike::day(&tx.created_at()))
        .collect();
    assert_eq!(all, vec![28, 15, 1]);

    session.set_filter(FilterField::DateFrom, "2024-02-10").unwrap();
    session.set_filter(FilterField::DateTo, "2024-02-28").unwrap();
    let ranged: Vec<u32> = session
        .filtered_transactions()
        .iter()
        .map(|tx| chrono::Datelike::day(&tx.created_at()))
        .collect();
    assert_eq!(ranged, vec![28, 15]);
}

#[test]
fn totals_follow_transfers() {
    let mut session = TreasurySession::new();
    let before = session.currency_totals();
    session
        .submit_request(&TransferRequest::new("1", "5", "100000"), Utc::now())
        .unwrap();
    let after = session.currency_totals();

    assert_eq!(
        after.get(Currency::Kes).unwrap(),
        before.get(Currency::Kes).unwrap() - dec!(100_000)
    );
    assert_eq!(
        after.get(Currency::Usd).unwrap(),
        before.get(Currency::Usd).unwrap() + dec!(670)
    );
    assert_eq!(after.get(Currency::Ngn), before.get(Currency::Ngn));
}

/// Transactions serialize with string decimals and uppercase currencies.
#[test]
fn transaction_serializes_to_json() {
    let mut session = TreasurySession::new();
    fill(&mut session, "1", "5", "100000");
    session.set_field(FormField::Note, "Q1 sweep");
    let tx = session.submit().unwrap();

    let json = serde_json::to_value(&tx).unwrap();
    assert_eq!(json["from_account"], "Mpesa_KES_1");
    assert_eq!(json["from_currency"], "KES");
    assert_eq!(json["to_currency"], "USD");
    assert_eq!(json["status"], "Completed");
    assert_eq!(json["note"], "Q1 sweep");
    assert_eq!(json["id"], 1);
    assert!(json["amount"].is_string());
}

#[test]
fn replay_file_shape_deserializes() {
    let raw = r#"{
        "transfers": [
            { "from": "1", "to": "5", "amount": "100000" },
            { "from": "6", "to": "1", "amount": "50", "scheduled_date": "2099-01-01", "note": "fx" }
        ]
    }"#;

    #[derive(serde::Deserialize)]
    struct File {
        transfers: Vec<TransferRequest>,
    }

    let file: File = serde_json::from_str(raw).unwrap();
    assert_eq!(file.transfers.len(), 2);
    assert_eq!(file.transfers[1].scheduled_date.as_deref(), Some("2099-01-01"));

    let mut session = TreasurySession::new();
    for request in &file.transfers {
        session.submit_request(request, Utc::now()).unwrap();
    }
    assert_eq!(
        session.transactions().latest().unwrap().status(),
        TransactionStatus::Scheduled
    );
}

/// Empty optional fields in a replay entry mean "not supplied".
#[test]
fn replay_entry_with_empty_optionals_completes() {
    let request: TransferRequest = serde_json::from_str(
        r#"{ "from": "1", "to": "5", "amount": "100", "note": "", "scheduled_date": "" }"#,
    )
    .unwrap();

    let mut session = TreasurySession::new();
    let tx = session.submit_request(&request, Utc::now()).unwrap();

    assert_eq!(tx.status(), TransactionStatus::Completed);
    assert_eq!(tx.scheduled_date(), None);
    assert_eq!(tx.note(), None);
    assert_eq!(
        session.message(),
        Some(&StatusMessage::Success(
            "Transfer completed: KES 100.00 -> USD 0.67".to_string()
        ))
    );
}
