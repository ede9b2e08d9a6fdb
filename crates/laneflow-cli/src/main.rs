//! Laneflow CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use laneflow::LaneflowError;
use laneflow_cli::{Args, error_adapter::to_reportables};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match laneflow_cli::run(&args) {
        Ok(()) => {
            info!(input = args.input, output = args.output; "Swimlane layout written");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::from(laneflow_cli::exit_status(&err))
        }
    }
}

/// Sets up env_logger; `RUST_LOG` module filters still apply on top of `--log-level`.
fn init_logging(level: &str) {
    let filter = level.parse::<LevelFilter>().ok();
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter.unwrap_or(LevelFilter::Warn))
        .init();

    if filter.is_none() {
        warn!(requested = level; "Unknown log level, falling back to warn");
    }
}

fn report(err: &LaneflowError) {
    let reporter = miette::GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        if reporter.render_report(&mut rendered, &reportable).is_err() {
            rendered = reportable.to_string();
        }
        error!("{rendered}");
    }
}
