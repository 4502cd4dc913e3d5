//! Random transfer traffic for exercising a session.
//!
//! Generates form submissions over the session's accounts, including ones
//! that are expected to fail validation, and tallies the outcomes.

use crate::core::account::Account;
use crate::session::TreasurySession;
use crate::transfer::form::TransferRequest;
use chrono::{Duration, Utc};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Configuration for a random transfer run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of submissions to generate.
    pub transfers: usize,
    /// Smallest generated amount.
    pub min_amount: Decimal,
    /// Largest generated amount.
    pub max_amount: Decimal,
    /// Fraction of submissions that carry a scheduled date (0.0 to 1.0).
    /// Values outside that range are clamped; NaN counts as 0.0.
    pub scheduled_ratio: f64,
    /// RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            transfers: 50,
            min_amount: Decimal::from(10),
            max_amount: Decimal::from(500_000),
            scheduled_ratio: 0.2,
            seed: None,
        }
    }
}

/// Generate random transfer requests between the given accounts.
///
/// Source and destination are drawn independently, so some requests name
/// the same account twice or an unsupported currency pair.
pub fn generate_requests(accounts: &[Account], config: &SimulationConfig) -> Vec<TransferRequest> {
    if accounts.is_empty() {
        return Vec::new();
    }
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let min = config.min_amount.to_f64().unwrap_or(10.0);
    let max = config.max_amount.to_f64().unwrap_or(500_000.0);
    // NaN or out-of-range ratios would make gen_bool panic
    let scheduled_ratio = if config.scheduled_ratio.is_finite() {
        config.scheduled_ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let today = Utc::now().date_naive();

    (0..config.transfers)
        .map(|i| {
            let from = &accounts[rng.gen_range(0..accounts.len())];
            let to = &accounts[rng.gen_range(0..accounts.len())];

            let amount_f64 = if max > min { rng.gen_range(min..max) } else { min };
            let amount = Decimal::from_f64_retain(amount_f64)
                .unwrap_or(config.min_amount)
                .round_dp(2);

            let mut request =
                TransferRequest::new(from.id().as_str(), to.id().as_str(), amount.to_string())
                    .with_note(format!("simulated #{}", i + 1));
            if rng.gen_bool(scheduled_ratio) {
                let date = today + Duration::days(rng.gen_range(1..=30));
                request = request.with_scheduled_date(date.format("%Y-%m-%d").to_string());
            }
            request
        })
        .collect()
}

/// Outcome counts of a simulation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationReport {
    pub submitted: usize,
    pub completed: usize,
    pub scheduled: usize,
    /// Rejections keyed by error kind.
    pub rejected: BTreeMap<String, usize>,
}

impl SimulationReport {
    pub fn accepted(&self) -> usize {
        self.completed + self.scheduled
    }

    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simulation Report ===")?;
        writeln!(f, "Submitted:  {}", self.submitted)?;
        writeln!(f, "Completed:  {}", self.completed)?;
        writeln!(f, "Scheduled:  {}", self.scheduled)?;
        writeln!(f, "Rejected:   {}", self.rejected_total())?;
        for (kind, count) in &self.rejected {
            writeln!(f, "  {:<24} {}", kind, count)?;
        }
        Ok(())
    }
}

/// Submit every request through the session and count what happened.
pub fn run_simulation(session: &mut TreasurySession, requests: &[TransferRequest]) -> SimulationReport {
    let mut report = SimulationReport::default();
    for request in requests {
        report.submitted += 1;
        match session.submit_request(request, Utc::now()) {
            Ok(tx) if tx.scheduled_date().is_some() => report.scheduled += 1,
            Ok(_) => report.completed += 1,
            Err(err) => *report.rejected.entry(err.kind().to_string()).or_insert(0) += 1,
        }
    }
    info!(
        "simulation: {} submitted, {} accepted, {} rejected",
        report.submitted,
        report.accepted(),
        report.rejected_total()
    );
    report
}
