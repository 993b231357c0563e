//! Command implementation.

use embedh::ConvertReport;
use tracing::error;

use crate::cli::{Cli, EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal::Spinner;

/// Run the conversion described by the CLI flags.
pub fn run_command(cli: &Cli) -> i32 {
    let options = cli.convert_options();

    // Resolve up front so the default output path can be named after it.
    let symbol = match options.resolve_symbol(&cli.input) {
        Ok(symbol) => symbol,
        Err(e) => {
            error!(error = %e, "cannot name the array");
            return EXIT_FAILURE;
        }
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| symbol.default_output_path());
    let options = options.with_symbol(symbol);

    let spinner =
        (!cli.silent).then(|| Spinner::new(format!("Converting {}", cli.input.display())));

    let convert = || embedh::convert_with_options(&cli.input, &output, &options);
    let result = match &spinner {
        Some(spinner) => spinner.suspend(convert),
        None => convert(),
    };

    match result {
        Ok(report) => {
            if let Some(spinner) = &spinner {
                spinner.finish_with_success(&summary(&report));
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            if let Some(spinner) = &spinner {
                spinner.finish_with_failure("conversion failed");
            }
            error!(error = %e, "conversion failed");
            EXIT_FAILURE
        }
    }
}

fn summary(report: &ConvertReport) -> String {
    format!(
        "{} -> {} ({} bytes as {}[], {})",
        report.input.display(),
        report.output.display(),
        report.bytes,
        report.symbol,
        report.symbol.len_name()
    )
}
