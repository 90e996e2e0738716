//! photo-organizer CLI: copy images from --source-dir into --dest-dir/YEAR/MONTH.

use anyhow::Result;
use clap::Parser;
use photo_organizer::engine::arg_parser::Cli;
use photo_organizer::engine::handle_run;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> Result<ExitCode> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    let (report, opts) = handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    if opts.fail_on_error && !report.is_clean() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
