//! treasury-sim CLI
//!
//! Drive the transfer simulator from the command line. Every invocation
//! starts from the seed accounts and an empty history.
//!
//! # Usage
//!
//! ```bash
//! # Show the demo accounts and the rate table
//! treasury-sim accounts
//! treasury-sim rates
//!
//! # Apply a batch of transfers and show the USD history
//! treasury-sim replay --input transfers.json --currency USD
//!
//! # Random traffic
//! treasury-sim simulate --transfers 200 --seed 7
//!
//! # Interactive form on stdin
//! treasury-sim shell
//! ```

use log::debug;
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;
use treasury_sim::core::transaction::Transaction;
use treasury_sim::session::TreasurySession;
use treasury_sim::simulation::random_transfers::{generate_requests, run_simulation, SimulationConfig};
use treasury_sim::transfer::form::{FormField, TransferRequest};
use treasury_sim::view::filter::FilterField;
use treasury_sim::view::format::format_amount;
use treasury_sim::view::totals::CurrencyTotals;

fn print_usage() {
    eprintln!(
        r#"treasury-sim — multi-currency treasury transfer simulator

USAGE:
    treasury-sim <COMMAND> [OPTIONS]

COMMANDS:
    accounts    List the demo accounts
    totals      Show balance totals per currency
    rates       Show the FX rate table
    replay      Apply a JSON batch of transfers, then show history and totals
    simulate    Submit random transfers and report the outcomes
    shell       Interactive transfer form on stdin
    help        Show this message

OPTIONS (accounts, totals, replay, simulate):
    --format <FORMAT>        Output format: text (default) or json

OPTIONS (replay):
    --input <FILE>           Path to JSON transfers file
    --account <TEXT>         Only history entries whose account name contains TEXT
    --currency <CCY>         Only history entries touching CCY
    --date-from <YYYY-MM-DD> Only history entries on or after this day
    --date-to <YYYY-MM-DD>   Only history entries on or before this day

OPTIONS (simulate):
    --transfers <N>          Number of submissions (default: 50)
    --scheduled-ratio <R>    Fraction with a scheduled date (default: 0.2)
    --seed <N>               RNG seed for reproducible runs

ENVIRONMENT:
    RUST_LOG                 Log level (default: warn)

EXAMPLES:
    treasury-sim accounts --format json
    treasury-sim replay --input transfers.json --currency USD
    treasury-sim simulate --transfers 200 --seed 7"#
    );
}

/// JSON schema for a replay file.
#[derive(serde::Deserialize)]
struct TransfersFile {
    transfers: Vec<TransferRequest>,
}

#[derive(Serialize)]
struct OutcomeOutput {
    request: TransferRequest,
    ok: bool,
    message: String,
}

#[derive(Serialize)]
struct ReplayOutput<'a> {
    outcomes: Vec<OutcomeOutput>,
    history: Vec<&'a Transaction>,
    totals: CurrencyTotals,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", msg);
    process::exit(1);
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(format!("serializing output: {}", e)),
    }
}

fn option_value(args: &[String], i: usize, flag: &str) -> String {
    args.get(i)
        .cloned()
        .unwrap_or_else(|| fail(format!("{} requires a value", flag)))
}

fn parse_format(args: &[String]) -> String {
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--format" => {
                i += 1;
                format = option_value(args, i, "--format");
            }
            other => fail(format!("Unknown option: {}", other)),
        }
        i += 1;
    }
    if format != "text" && format != "json" {
        fail(format!("--format requires 'text' or 'json', got '{}'", format));
    }
    format
}

fn print_history(history: &[&Transaction]) {
    if history.is_empty() {
        println!("No transactions.");
        return;
    }
    println!("=== Transaction History ===");
    for tx in history {
        println!(
            "  {}  {}  {:<10} {} -> {}",
            tx.id(),
            tx.created_at().format("%Y-%m-%d %H:%M:%S"),
            tx.status(),
            tx.from_account(),
            tx.to_account()
        );
        println!(
            "      {} -> {}  (rate {})",
            format_amount(tx.amount(), tx.from_currency()),
            format_amount(tx.converted_amount(), tx.to_currency()),
            tx.fx_rate()
        );
        if let Some(date) = tx.scheduled_date() {
            println!("      scheduled for {}", date);
        }
        if let Some(note) = tx.note() {
            println!("      note: {}", note);
        }
    }
}

fn cmd_accounts(args: &[String]) {
    let session = TreasurySession::new();
    if parse_format(args) == "json" {
        print_json(&session.accounts());
    } else {
        print!("{}", session.ledger());
    }
}

fn cmd_totals(args: &[String]) {
    let session = TreasurySession::new();
    if parse_format(args) == "json" {
        print_json(&session.currency_totals());
    } else {
        print!("{}", session.currency_totals());
    }
}

fn cmd_rates() {
    let session = TreasurySession::new();
    println!("=== FX Rates ===");
    for (pair, rate) in session.rates().pairs() {
        println!("  1 {} = {} {}", pair.base, rate, pair.quote);
    }
    println!("  (same-currency transfers use a rate of 1; other pairs are unsupported)");
}

fn cmd_replay(args: &[String]) {
    let mut session = TreasurySession::new();
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--input" => {
                i += 1;
                input_path = Some(option_value(args, i, flag));
            }
            "--format" => {
                i += 1;
                format = option_value(args, i, flag);
            }
            "--account" | "--currency" | "--date-from" | "--date-to" => {
                i += 1;
                let value = option_value(args, i, flag);
                let field: FilterField = flag
                    .trim_start_matches("--")
                    .parse()
                    .unwrap_or_else(|e| fail(e));
                session
                    .set_filter(field, &value)
                    .unwrap_or_else(|e| fail(e));
            }
            _ => fail(format!("Unknown option: {}", flag)),
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| fail("--input <FILE> is required"));
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));
    let file: TransfersFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "transfers": [
    {{ "from": "1", "to": "5", "amount": "100000", "note": "optional", "scheduled_date": "optional" }}
  ]
}}"#
        );
        fail(format!("parsing JSON: {}", e))
    });
    debug!("replaying {} transfers from {}", file.transfers.len(), path);

    let mut outcomes = Vec::with_capacity(file.transfers.len());
    for request in file.transfers {
        let ok = session.submit_request(&request, chrono::Utc::now()).is_ok();
        let message = session
            .message()
            .map(|m| m.text().to_string())
            .unwrap_or_default();
        outcomes.push(OutcomeOutput { request, ok, message });
    }

    if format == "json" {
        print_json(&ReplayOutput {
            outcomes,
            history: session.filtered_transactions(),
            totals: session.currency_totals(),
        });
    } else {
        println!("=== Outcomes ===");
        for (n, outcome) in outcomes.iter().enumerate() {
            let mark = if outcome.ok { "ok " } else { "ERR" };
            println!("  #{:<3} [{}] {}", n + 1, mark, outcome.message);
        }
        println!();
        print_history(&session.filtered_transactions());
        println!();
        print!("{}", session.ledger());
        println!();
        print!("{}", session.currency_totals());
    }
}

fn cmd_simulate(args: &[String]) {
    let mut config = SimulationConfig::default();
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--transfers" => {
                i += 1;
                config.transfers = option_value(args, i, flag)
                    .parse()
                    .unwrap_or_else(|_| fail("--transfers requires a number"));
            }
            "--scheduled-ratio" => {
                i += 1;
                config.scheduled_ratio = option_value(args, i, flag)
                    .parse::<f64>()
                    .ok()
                    .filter(|r| (0.0..=1.0).contains(r))
                    .unwrap_or_else(|| fail("--scheduled-ratio requires a number between 0 and 1"));
            }
            "--seed" => {
                i += 1;
                config.seed = Some(
                    option_value(args, i, flag)
                        .parse()
                        .unwrap_or_else(|_| fail("--seed requires a number")),
                );
            }
            "--format" => {
                i += 1;
                format = option_value(args, i, flag);
            }
            _ => fail(format!("Unknown option: {}", flag)),
        }
        i += 1;
    }

    let mut session = TreasurySession::new();
    let requests = generate_requests(session.accounts(), &config);
    let report = run_simulation(&mut session, &requests);

    if format == "json" {
        print_json(&report);
    } else {
        println!("{}", report);
        print!("{}", session.currency_totals());
    }
}

const SHELL_HELP: &str = "\
commands:
  set <from|to|amount|note|date> [value]   edit the transfer form (no value clears)
  form                                     show the transfer form
  quote                                    preview the current form
  submit                                   submit the current form
  filter <account|currency|date-from|date-to> [value]
  clear-filters                            remove every filter
  history                                  show filtered history
  accounts                                 show balances
  totals                                   show currency totals
  quit";

fn cmd_shell() {
    let mut session = TreasurySession::new();
    let stdin = io::stdin();
    println!("{}", SHELL_HELP);
    print!("> ");
    let _ = io::stdout().flush();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => fail(format!("reading stdin: {}", e)),
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let (name, value) = rest.trim().split_once(' ').unwrap_or((rest.trim(), ""));

        match command {
            "" => {}
            "set" => match name.parse::<FormField>() {
                Ok(field) => session.set_field(field, value.trim()),
                Err(e) => println!("{}", e),
            },
            "form" => {
                for field in [
                    FormField::FromAccount,
                    FormField::ToAccount,
                    FormField::Amount,
                    FormField::Note,
                    FormField::ScheduledDate,
                ] {
                    println!("  {:<7} {}", field, session.form().get(field));
                }
            }
            "quote" => match session.quote() {
                Ok(q) => println!(
                    "  {} -> {}  (rate {})",
                    format_amount(q.amount, q.from_currency),
                    format_amount(q.converted_amount, q.to_currency),
                    q.fx_rate
                ),
                Err(e) => println!("  {}", e),
            },
            "submit" => {
                let _ = session.submit();
                if let Some(message) = session.message() {
                    println!("  {}", message);
                }
            }
            "filter" => {
                let result = name
                    .parse::<FilterField>()
                    .and_then(|field| session.set_filter(field, value));
                if let Err(e) = result {
                    println!("  {}", e);
                }
            }
            "clear-filters" => session.clear_filters(),
            "history" => print_history(&session.filtered_transactions()),
            "accounts" => print!("{}", session.ledger()),
            "totals" => print!("{}", session.currency_totals()),
            "help" => println!("{}", SHELL_HELP),
            "quit" | "exit" => return,
            other => println!("unknown command '{}', try 'help'", other),
        }
        print!("> ");
        let _ = io::stdout().flush();
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "accounts" => cmd_accounts(rest),
        "totals" => cmd_totals(rest),
        "rates" => cmd_rates(),
        "replay" => cmd_replay(rest),
        "simulate" => cmd_simulate(rest),
        "shell" => cmd_shell(),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
