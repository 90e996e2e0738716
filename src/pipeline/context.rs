//! Pipeline context: shared data passed into the walk thread and the copy workers.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::engine::capabilities::Capabilities;
use crate::engine::resolver::ClaimRegistry;
use crate::events::Event;
use crate::{OrganizeOpts, Processed};

/// What the walk thread needs: where to walk, what to keep, what to leave out.
pub struct PipelineContext {
    pub source_root: PathBuf,
    /// Skipped during the walk so a run never ingests its own output.
    pub dest_root: PathBuf,
    /// Lowercased, no dot.
    pub extensions: Vec<String>,
    pub follow_links: bool,
}

impl PipelineContext {
    pub fn new(source_root: &Path, dest_root: &Path, opts: &OrganizeOpts) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            dest_root: dest_root.to_path_buf(),
            extensions: opts
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            follow_links: opts.follow_links,
        }
    }
}

/// Shared by every copy worker for the whole run.
pub struct WorkerShared {
    pub dest_root: PathBuf,
    pub caps: Capabilities,
    pub claims: ClaimRegistry,
    pub max_collision_index: u32,
}

/// Messages from the walk and the workers to the collector.
#[derive(Debug)]
pub enum Update {
    /// Walk-level event (skips, walk errors).
    Event(Event),
    /// One finished file.
    Done(Processed),
}

/// Handles returned by [`run_pipeline`](super::run_pipeline): receive updates and join when done.
/// `path_count_rx` receives the number of queued files once the walk finishes.
pub struct PipelineHandles {
    pub update_rx: Receiver<Update>,
    pub path_count_rx: Receiver<usize>,
    pub walk_handle: JoinHandle<usize>,
    pub worker_handles: Vec<JoinHandle<()>>,
}

/// Channels for the pipeline. Walk thread gets path_tx, path_count_tx and a clone of update_tx;
/// workers get path_rx and update_tx.
pub struct PipelineChannels {
    pub path_tx: Sender<PathBuf>,
    pub path_rx: Receiver<PathBuf>,
    pub update_tx: Sender<Update>,
    pub update_rx: Receiver<Update>,
    pub path_count_tx: Sender<usize>,
    pub path_count_rx: Receiver<usize>,
}

pub fn create_pipeline_channels(channel_cap: usize) -> PipelineChannels {
    let (path_tx, path_rx) = bounded::<PathBuf>(channel_cap);
    let (update_tx, update_rx) = bounded::<Update>(channel_cap);
    let (path_count_tx, path_count_rx) = bounded::<usize>(1);
    PipelineChannels {
        path_tx,
        path_rx,
        update_tx,
        update_rx,
        path_count_tx,
        path_count_rx,
    }
}

pub type SharedWorkerState = Arc<WorkerShared>;
