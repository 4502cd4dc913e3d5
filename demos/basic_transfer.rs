//! Walk through a few transfers on the demo accounts.
//!
//! Shows a cross-currency transfer, a rejected one, a scheduled one, and the
//! filtered history and totals that result.

use treasury_sim::session::TreasurySession;
use treasury_sim::transfer::form::FormField;
use treasury_sim::view::filter::FilterField;
use treasury_sim::view::format::format_amount;

fn main() {
    let mut session = TreasurySession::new();

    println!("{}", session.ledger());
    println!("{}", session.currency_totals());

    // --- Scenario 1: KES -> USD ---
    println!("━━━ Scenario 1: Mpesa_KES_1 -> Bank_USD_1 ━━━\n");
    session.set_field(FormField::FromAccount, "1");
    session.set_field(FormField::ToAccount, "5");
    session.set_field(FormField::Amount, "100000");
    session.set_field(FormField::Note, "Monthly sweep");
    let _ = session.submit();
    if let Some(message) = session.message() {
        println!("{}\n", message);
    }

    // --- Scenario 2: overdraft ---
    println!("━━━ Scenario 2: overdraft ━━━\n");
    session.set_field(FormField::FromAccount, "1");
    session.set_field(FormField::ToAccount, "2");
    session.set_field(FormField::Amount, "10000000");
    let _ = session.submit();
    if let Some(message) = session.message() {
        println!("{}", message);
    }
    println!("Form kept: amount = {}\n", session.form().amount);

    // --- Scenario 3: scheduled USD -> KES ---
    println!("━━━ Scenario 3: scheduled Bank_USD_2 -> Bank_KES_1 ━━━\n");
    session.set_field(FormField::FromAccount, "6");
    session.set_field(FormField::ToAccount, "3");
    session.set_field(FormField::Amount, "2500");
    session.set_field(FormField::ScheduledDate, "2099-12-31");
    let _ = session.submit();
    if let Some(message) = session.message() {
        println!("{}\n", message);
    }

    // --- History ---
    println!("━━━ History touching USD ━━━\n");
    if let Err(e) = session.set_filter(FilterField::Currency, "USD") {
        eprintln!("{}", e);
    }
    for tx in session.filtered_transactions() {
        println!(
            "  {} {:<10} {:<12} -> {:<12} {:>22} -> {:>22}",
            tx.id(),
            tx.status(),
            tx.from_account(),
            tx.to_account(),
            format_amount(tx.amount(), tx.from_currency()),
            format_amount(tx.converted_amount(), tx.to_currency())
        );
    }
    println!();
    println!("{}", session.currency_totals());
}
