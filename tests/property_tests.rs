use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use treasury_sim::core::account::AccountId;
use treasury_sim::core::currency::FxRateTable;
use treasury_sim::core::ledger::Ledger;
use treasury_sim::session::TreasurySession;
use treasury_sim::transfer::engine::{TransferEngine, TransferError};
use treasury_sim::transfer::form::TransferRequest;
use treasury_sim::view::filter::{filter_transactions, Filters};

/// Pick a seed account id, occasionally an unknown one or an empty string.
fn arb_account_id() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => (1u32..=10).prop_map(|n| n.to_string()),
        1 => Just("404".to_string()),
        1 => Just(String::new()),
    ]
}

/// Mostly positive amounts with two decimals, plus some junk input.
fn arb_amount() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => (1u64..5_000_000_00u64).prop_map(|cents| Decimal::new(cents as i64, 2).to_string()),
        1 => Just("0".to_string()),
        1 => Just("abc".to_string()),
    ]
}

fn arb_request() -> impl Strategy<Value = TransferRequest> {
    (arb_account_id(), arb_account_id(), arb_amount(), any::<bool>()).prop_map(
        |(from, to, amount, scheduled)| {
            let request = TransferRequest::new(from, to, amount);
            if scheduled {
                request.with_scheduled_date("2099-01-01")
            } else {
                request
            }
        },
    )
}

/// A session with some history spread over several days.
fn arb_session() -> impl Strategy<Value = TreasurySession> {
    prop::collection::vec((arb_request(), 0i64..60), 0..40).prop_map(|entries| {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let mut session = TreasurySession::new();
        for (request, day) in entries {
            let _ = session.submit_request(&request, start + Duration::days(day));
        }
        session
    })
}

fn arb_filters() -> impl Strategy<Value = Filters> {
    (
        prop::sample::select(vec!["", "Mpesa", "USD", "Bank_", "_1", "Wallet"]),
        prop::sample::select(vec!["", "KES", "USD", "NGN"]),
        prop::option::of(0i64..60),
        prop::option::of(0i64..60),
    )
        .prop_map(|(account, currency, from, to)| {
            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().date_naive();
            let mut filters = Filters::new();
            filters.account = account.to_string();
            filters.currency = currency.parse().ok();
            filters.date_from = from.map(|d| base + Duration::days(d));
            filters.date_to = to.map(|d| base + Duration::days(d));
            filters
        })
}

proptest! {
    // ===================================================================
    // Balances move by exactly `amount` and `amount * rate`.
    // ===================================================================
    #[test]
    fn successful_transfer_moves_exact_amounts(request in arb_request()) {
        let mut session = TreasurySession::new();
        let from = AccountId::new(request.from.as_str());
        let to = AccountId::new(request.to.as_str());
        let from_before = session.ledger().balance(&from);
        let to_before = session.ledger().balance(&to);

        if let Ok(tx) = session.submit_request(&request, Utc::now()) {
            let from_after = session.ledger().balance(&from).unwrap();
            let to_after = session.ledger().balance(&to).unwrap();
            prop_assert_eq!(from_after, from_before.unwrap() - tx.amount());
            prop_assert_eq!(to_after, to_before.unwrap() + tx.amount() * tx.fx_rate());
            prop_assert_eq!(tx.converted_amount(), tx.amount() * tx.fx_rate());
            prop_assert!(from_after >= Decimal::ZERO);
        }
    }

    // ===================================================================
    // Validation is a pure function of state and request.
    // ===================================================================
    #[test]
    fn validation_is_idempotent(request in arb_request()) {
        let ledger = Ledger::seeded();
        let rates = FxRateTable::standard();
        let first = TransferEngine::validate(&ledger, &rates, &request);
        let second = TransferEngine::validate(&ledger, &rates, &request);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            first.as_ref().err().map(|e| e.to_string()),
            second.as_ref().err().map(|e| e.to_string())
        );
        prop_assert_eq!(&ledger, &Ledger::seeded());
    }

    // ===================================================================
    // Same-currency transfers never convert.
    // ===================================================================
    #[test]
    fn same_currency_rate_is_exactly_one(request in arb_request()) {
        let mut session = TreasurySession::new();
        if let Ok(tx) = session.submit_request(&request, Utc::now()) {
            if tx.from_currency() == tx.to_currency() {
                prop_assert_eq!(tx.fx_rate(), Decimal::ONE);
                prop_assert_eq!(tx.converted_amount(), tx.amount());
            } else {
                prop_assert_ne!(tx.fx_rate(), Decimal::ONE);
            }
        }
    }

    // ===================================================================
    // Any rejection leaves balances and history exactly as they were.
    // ===================================================================
    #[test]
    fn rejection_changes_nothing(mut session in arb_session(), request in arb_request()) {
        let ledger_before = session.ledger().clone();
        let log_len = session.transactions().len();
        let form_before = session.form().clone();

        if let Err(err) = session.submit_request(&request, Utc::now()) {
            prop_assert_eq!(session.ledger(), &ledger_before);
            prop_assert_eq!(session.transactions().len(), log_len);
            prop_assert_eq!(session.form(), &form_before);
            if let TransferError::UnsupportedCurrencyPair { from, to } = err {
                prop_assert!(!session.rates().is_supported(from, to));
            }
        }
    }

    // ===================================================================
    // Adding a filter field can only shrink the result.
    // ===================================================================
    #[test]
    fn filtering_is_monotonic(session in arb_session(), base in arb_filters(), extra in arb_filters()) {
        let log = session.transactions();
        let base_ids: Vec<_> = filter_transactions(log, &base).iter().map(|t| t.id()).collect();

        let mut narrowed = base.clone();
        if narrowed.account.is_empty() {
            narrowed.account = extra.account.clone();
        }
        if narrowed.currency.is_none() {
            narrowed.currency = extra.currency;
        }
        if narrowed.date_from.is_none() {
            narrowed.date_from = extra.date_from;
        }
        if narrowed.date_to.is_none() {
            narrowed.date_to = extra.date_to;
        }
        let narrowed_ids: Vec<_> = filter_transactions(log, &narrowed).iter().map(|t| t.id()).collect();

        prop_assert!(narrowed_ids.len() <= base_ids.len());
        for id in &narrowed_ids {
            prop_assert!(base_ids.contains(id));
        }
    }

    // ===================================================================
    // Filtered output keeps newest-first order.
    // ===================================================================
    #[test]
    fn filtered_history_keeps_log_order(session in arb_session(), filters in arb_filters()) {
        let ids: Vec<u64> = filter_transactions(session.transactions(), &filters)
            .iter()
            .map(|t| t.id().value())
            .collect();
        for pair in ids.windows(2) {
            prop_assert!(pair[0] > pair[1]);
        }
    }

    // ===================================================================
    // Balances never go negative, whatever is submitted.
    // ===================================================================
    #[test]
    fn balances_never_negative(session in arb_session()) {
        for account in session.accounts() {
            prop_assert!(account.balance() >= Decimal::ZERO);
        }
    }
}
