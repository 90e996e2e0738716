use crossbeam_channel::{Receiver, Sender};
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::engine::copy::{CopyContext, process_file};

use super::context::{SharedWorkerState, Update};

/// Single copy worker: pull paths from path_rx until the queue closes, send one update per path.
fn copy_worker_loop(
    worker: usize,
    path_rx: Receiver<PathBuf>,
    update_tx: Sender<Update>,
    shared: SharedWorkerState,
) {
    let ctx = CopyContext {
        dest_root: &shared.dest_root,
        caps: &shared.caps,
        claims: &shared.claims,
        max_collision_index: shared.max_collision_index,
    };
    let mut handled = 0_usize;
    while let Ok(source) = path_rx.recv() {
        let processed = process_file(&source, &ctx);
        handled += 1;
        if update_tx.send(Update::Done(processed)).is_err() {
            break;
        }
    }
    debug!("worker {} done after {} files", worker, handled);
}

/// Spawn `num_workers` copy workers. Caller must drop its own update sender after this so the
/// collector sees the channel close once every worker exits.
pub fn spawn_copy_workers(
    path_rx: Receiver<PathBuf>,
    update_tx: &Sender<Update>,
    shared: &SharedWorkerState,
    num_workers: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_workers)
        .map(|worker| {
            let path_rx = path_rx.clone();
            let update_tx = update_tx.clone();
            let shared = Arc::clone(shared);
            thread::spawn(move || copy_worker_loop(worker, path_rx, update_tx, shared))
        })
        .collect()
}
