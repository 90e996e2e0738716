use anyhow::{Result, bail};
use log::debug;
use std::path::Path;
use std::sync::Arc;

use crate::engine::capabilities::Capabilities;
use crate::engine::progress::{ProgressBar, set_bar_total, update_progress_bar};
use crate::engine::resolver::ClaimRegistry;
use crate::engine::tools::validate_roots;
use crate::events::Event;
use crate::pipeline;
use crate::pipeline::context::{PipelineContext, Update, WorkerShared};
use crate::utils::config::PATH_CHANNEL_CAP;
use crate::utils::fd_limit::effective_workers;
use crate::{OrganizeOpts, Report};

/// Validate roots and start walk + copy workers. Returns handles; caller drains `update_rx`
/// and must join `walk_handle` and `worker_handles` when done (see [`collect_report`]).
pub fn run_pipeline(
    source: &Path,
    dest: &Path,
    opts: &OrganizeOpts,
    caps: Capabilities,
) -> Result<pipeline::PipelineHandles> {
    let (source, dest) = validate_roots(source, dest)?;
    let num_workers = effective_workers(opts.num_workers);
    debug!(
        "organizing {} -> {} with {} workers",
        source.display(),
        dest.display(),
        num_workers
    );

    let channels = pipeline::create_pipeline_channels(PATH_CHANNEL_CAP);
    let ctx = PipelineContext::new(&source, &dest, opts);
    let shared = Arc::new(WorkerShared {
        dest_root: dest,
        caps,
        claims: ClaimRegistry::new(),
        max_collision_index: opts.max_collision_index,
    });

    let walk_handle = pipeline::spawn_walk_thread(
        channels.path_tx,
        channels.path_count_tx,
        channels.update_tx.clone(),
        ctx,
    );
    let worker_handles =
        pipeline::spawn_copy_workers(channels.path_rx, &channels.update_tx, &shared, num_workers);

    // Dropping the last sender closes the channel once the walk and all workers are done.
    drop(channels.update_tx);

    Ok(pipeline::PipelineHandles {
        update_rx: channels.update_rx,
        path_count_rx: channels.path_count_rx,
        walk_handle,
        worker_handles,
    })
}

/// Drain updates into a [`Report`], handing every event to `on_event`, then join all threads.
/// Walk errors land in [`Report::walk_errors`]. Fails only if a thread panicked or a queued
/// file produced no outcome.
pub fn collect_report<F>(
    handles: pipeline::PipelineHandles,
    mut on_event: F,
    bar: Option<&ProgressBar>,
) -> Result<Report>
where
    F: FnMut(&Event),
{
    let pipeline::PipelineHandles {
        update_rx,
        path_count_rx,
        walk_handle,
        worker_handles,
    } = handles;

    let mut report = Report::default();
    let mut total_known = false;
    while let Ok(update) = update_rx.recv() {
        match update {
            Update::Event(event) => {
                report.record_event(&event);
                on_event(&event);
            }
            Update::Done(processed) => {
                processed.events.iter().for_each(&mut on_event);
                report.record(&processed);
                if let Some(bar) = bar {
                    update_progress_bar(bar, 1);
                }
            }
        }
        if let (Some(bar), false) = (bar, total_known)
            && let Ok(total) = path_count_rx.try_recv()
        {
            set_bar_total(bar, total);
            total_known = true;
        }
    }
    debug!(
        "collector: channel closed, {} outcomes",
        report.processed()
    );
    // The walk sends its count before dropping its update sender, so it is waiting here
    // when the last update arrived before it.
    if let (Some(bar), false) = (bar, total_known)
        && let Ok(total) = path_count_rx.recv()
    {
        set_bar_total(bar, total);
    }

    report.discovered = walk_handle
        .join()
        .map_err(|_| anyhow::anyhow!("walk thread panicked"))?;
    for h in worker_handles {
        h.join()
            .map_err(|_| anyhow::anyhow!("copy worker panicked"))?;
    }

    if report.processed() != report.discovered {
        bail!(
            "{} files were queued but {} produced an outcome",
            report.discovered,
            report.processed()
        );
    }
    Ok(report)
}
