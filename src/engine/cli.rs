//! CLI command handler: merge settings file and flags, run the pipeline, report.

use anyhow::{Context, Result};
use kdam::Animation;
use log::{debug, info};

use crate::engine::Capabilities;
use crate::engine::arg_parser::Cli;
use crate::engine::progress::{ProgressBarConfig, create_progress_bar};
use crate::events::Event;
use crate::pipeline::{collect_report, log_report_summary, run_pipeline};
use crate::utils::organizer_toml::{apply_file_to_opts, load_organizer_toml};
use crate::utils::{log_event, setup_logging};
use crate::{Opts, OrganizeOpts, Report};

/// Defaults, then `.photo-organizer.toml` in the destination dir, then flags.
fn setup_opts(cli: &Cli) -> Result<Opts> {
    let file = load_organizer_toml(&cli.dest_dir);

    let file_verbose = file
        .as_ref()
        .ok()
        .and_then(|f| f.as_ref())
        .and_then(|f| f.settings.verbose);
    setup_logging(cli.verbose.or(file_verbose).unwrap_or(false));

    let mut opts = Opts::default();
    if let Some(file) = file? {
        apply_file_to_opts(&file, &mut opts);
    }
    if let Some(n) = cli.num_workers {
        opts.organize.num_workers = n;
    }
    if !cli.extensions.is_empty() {
        opts.organize.extensions = cli.extensions.clone();
    }
    if let Some(max) = cli.max_collisions {
        opts.organize.max_collision_index = max;
    }
    if let Some(f) = cli.follow_links {
        opts.organize.follow_links = f;
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    if let Some(p) = cli.progress {
        opts.progress = p;
    }
    opts.json = cli.json;
    opts.fail_on_error = cli.fail_on_error;

    if opts.organize.num_workers == 0 {
        anyhow::bail!("num-workers must be a positive integer");
    }
    Ok(opts)
}

/// Run one organize pass. Returns the report and the resolved options.
pub fn handle_run(cli: &Cli) -> Result<(Report, Opts)> {
    let opts = setup_opts(cli)?;
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    info!(
        "starting: source {} destination {}",
        cli.source_dir.display(),
        cli.dest_dir.display()
    );

    let handles = run_pipeline(
        &cli.source_dir,
        &cli.dest_dir,
        &OrganizeOpts::from(&opts),
        Capabilities::default(),
    )?;
    let bar = opts
        .progress
        .then(|| create_progress_bar(ProgressBarConfig::new(0, "Copying", Animation::Classic)));
    let show_progress = bar.is_some();
    let report = collect_report(
        handles,
        |event: &Event| log_event(event, show_progress),
        bar.as_ref(),
    )?;

    if bar.is_some() {
        eprintln!();
    }
    log_report_summary(&report);
    if opts.json {
        let json = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{json}");
    }
    Ok((report, opts))
}
