//! Appliance scheduler entry point: CLI wiring, logging and export.

use std::process::ExitCode;

use anyhow::{Context, bail};
use appliance_scheduler::cli::Args;
use appliance_scheduler::config::HouseholdConfig;
use appliance_scheduler::io::{export_csv, export_json};
use appliance_scheduler::plan::report::ScheduleReport;
use appliance_scheduler::plan::{Outcome, optimize_with_limits};
use clap::Parser;
use tracing::{error, info, warn};

/// Exit code for an infeasible plan.
const EXIT_INFEASIBLE: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level())
        .without_time()
        .compact()
        .init();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_household(args: &Args) -> anyhow::Result<HouseholdConfig> {
    let household = match &args.household {
        Some(path) => HouseholdConfig::from_path(path)?,
        None => HouseholdConfig::from_preset(&args.preset)?,
    };
    let errors = household.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        bail!("household has {} configuration error(s)", errors.len());
    }
    Ok(household)
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let household = load_household(args)?;
    let limits = args.apply_limits(household.search.limits());
    info!(
        devices = household.devices.len(),
        max_power = household.max_power,
        workers = limits.workers,
        "planning household"
    );

    let outcome = optimize_with_limits(
        &household.devices,
        &household.rates,
        household.max_power,
        &limits,
    )
    .context("pricing the candidate schedules")?;

    if let Some(path) = &args.json_out {
        export_json(&outcome, path)
            .with_context(|| format!("failed to write JSON to {}", path.display()))?;
        info!(path = %path.display(), "plan JSON written");
    }

    let code = match &outcome {
        Outcome::Scheduled(schedule) => {
            let report = ScheduleReport::from_schedule(
                &household.devices,
                &household.rates,
                schedule,
                household.max_power,
            );
            println!("{report}");
            if let Some(path) = &args.csv_out {
                export_csv(&report, path)
                    .with_context(|| format!("failed to write CSV to {}", path.display()))?;
                info!(path = %path.display(), "hourly plan written");
            }
            ExitCode::SUCCESS
        }
        Outcome::Infeasible(reason) => {
            warn!(%reason, "no feasible schedule");
            ExitCode::from(EXIT_INFEASIBLE)
        }
    };

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        use appliance_scheduler::api::{AppState, serve};

        let state = Arc::new(AppState::new(
            &household.devices,
            &household.rates,
            household.max_power,
            outcome,
        ));
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(serve(state, addr))
            .with_context(|| format!("API server on {addr} failed"))?;
    }

    Ok(code)
}
