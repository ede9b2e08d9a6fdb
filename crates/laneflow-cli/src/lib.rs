//! Laneflow CLI library
//!
//! This module contains the core CLI logic for the Laneflow layout tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use laneflow::{
    LaneflowError, WorkflowLayouter, config::LayoutEngine, document::DocumentFormat,
};

/// Run the Laneflow CLI application
///
/// This function reads the input workflow, computes its swimlane layout and
/// writes the positioned nodes, edges and bands to the output file as JSON.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `LaneflowError` for:
/// - File I/O errors
/// - Configuration loading errors or an unknown `--engine`
/// - Workflow document errors
/// - JSON export errors
pub fn run(args: &Args) -> Result<(), LaneflowError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing workflow"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(engine) = &args.engine {
        let engine = engine
            .parse::<LayoutEngine>()
            .map_err(|err| LaneflowError::Config(format!("{err}: `{engine}`")))?;
        info!(engine:% = engine; "Overriding layout engine");
        app_config.layout_mut().set_engine(engine);
    }

    let source = fs::read_to_string(&args.input)?;
    let format = DocumentFormat::from_path(&args.input);

    let layouter = WorkflowLayouter::new(app_config);
    let workflow = layouter.parse(&source, format)?;
    let layout = layouter.layout(&workflow);
    let json = layouter.to_json(&layout)?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}

/// Process exit status for a failed run.
///
/// Bad input (the workflow document or the configuration) exits with 2, anything
/// else with 1.
pub fn exit_status(err: &LaneflowError) -> u8 {
    match err {
        LaneflowError::Document { .. } | LaneflowError::Config(_) => 2,
        LaneflowError::Io(_) | LaneflowError::Layout(_) | LaneflowError::Export(_) => 1,
    }
}
