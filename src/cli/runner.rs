use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use coordclean::io::writers::write_report;
use coordclean::{CleaningParams, clean_csv_to_path, process_directory_to_path};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("coordclean={level}")))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Config file values first, then explicit CLI flags on top
fn resolve_params(args: &CliArgs) -> Result<CleaningParams, AppError> {
    let mut params = match &args.config {
        Some(path) => CleaningParams::from_json_file(path)?,
        None => CleaningParams::default(),
    };
    if let Some(checks) = &args.checks {
        params.checks = checks.clone();
    }
    if let Some(mode) = args.equal_mode {
        params.equal_mode = mode;
    }
    if args.flags {
        params.emit_flags = true;
    }
    params.validate()?;
    Ok(params)
}

fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    params: &CleaningParams,
    report_path: Option<&Path>,
) -> Result<(), AppError> {
    info!("Starting batch cleaning from directory: {:?}", input_dir);
    info!("Output directory: {:?}", output_dir);

    let report = process_directory_to_path(input_dir, output_dir, params, true)?;

    info!("Processed: {}", report.processed);
    info!("Skipped: {}", report.skipped);
    info!("Errors: {}", report.errors);

    if let Some(path) = report_path {
        write_report(&report, path)?;
    }
    if report.errors > 0 {
        return Err(AppError::BatchFailures {
            errors: report.errors,
        });
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    init_logging(args.verbose);

    let input = args.input.clone().ok_or(AppError::MissingArgument {
        arg: "<INPUT>".to_string(),
    })?;
    let output = args.output.clone().ok_or(AppError::MissingArgument {
        arg: "<OUTPUT>".to_string(),
    })?;
    let params = resolve_params(&args)?;

    if args.batch {
        return run_batch(&input, &output, &params, args.report.as_deref());
    }

    let report = clean_csv_to_path(&input, &output, &params)?;
    info!("Successfully cleaned: {:?} -> {:?}", input, output);

    if let Some(path) = args.report.as_deref() {
        write_report(&report, path)?;
    }
    Ok(())
}
