//! Walk loop: consumes walk results, queues image files on path_tx and reports skips as events.

use crossbeam_channel::Sender;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crate::engine::tools::has_image_extension;
use crate::events::Event;

use super::context::{PipelineContext, Update};

/// One result from a directory walk.
pub enum WalkOutcome {
    File(PathBuf),
    Dir(PathBuf),
    Err { msg: String, path: Option<PathBuf> },
}

/// Convert a walkdir result into [`WalkOutcome`].
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) if entry.file_type().is_dir() => WalkOutcome::Dir(entry.into_path()),
        Ok(entry) => WalkOutcome::File(entry.into_path()),
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

fn walkdir_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkOutcome>> {
    let dest_root = ctx.dest_root.clone();
    Box::new(
        walkdir::WalkDir::new(&ctx.source_root)
            .follow_links(ctx.follow_links)
            .sort_by_file_name()
            .into_iter()
            // Never descend into the destination when it lives under the source.
            .filter_entry(move |e| e.path() != dest_root)
            .map(to_outcome_walkdir),
    )
}

pub fn spawn_walk_thread(
    path_tx: Sender<PathBuf>,
    path_count_tx: Sender<usize>,
    update_tx: Sender<Update>,
    ctx: PipelineContext,
) -> JoinHandle<usize> {
    thread::spawn(move || {
        let iter = walkdir_iter(&ctx);
        run_walk_loop(path_tx, path_count_tx, update_tx, &ctx, iter)
    })
}

/// Classify a non-directory path by extension alone: `Ok(())` to queue it, `Err(event)` to skip it.
pub fn classify_file(path: &Path, extensions: &[String]) -> Result<(), Event> {
    if has_image_extension(path, extensions) {
        return Ok(());
    }
    Err(Event::ExtensionSkipped {
        path: path.to_path_buf(),
        extension: path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default(),
    })
}

/// Run the walk loop: queue image files on `path_tx`, send skip/error events on `update_tx`.
/// Sends the queued count on `path_count_tx` and drops `path_tx` when done, which closes the queue.
/// Walk errors are reported and never stop the walk. Returns the count of paths queued.
pub fn run_walk_loop<I>(
    path_tx: Sender<PathBuf>,
    path_count_tx: Sender<usize>,
    update_tx: Sender<Update>,
    ctx: &PipelineContext,
    iter: I,
) -> usize
where
    I: Iterator<Item = WalkOutcome>,
{
    let mut count = 0_usize;
    for outcome in iter {
        let event = match outcome {
            WalkOutcome::Dir(path) => {
                if path == ctx.source_root {
                    continue;
                }
                Event::DirSkipped { path }
            }
            WalkOutcome::File(path) => match classify_file(&path, &ctx.extensions) {
                Ok(()) => {
                    if path_tx.send(path).is_err() {
                        break;
                    }
                    count += 1;
                    continue;
                }
                Err(event) => event,
            },
            WalkOutcome::Err { msg, path } => Event::WalkError { path, message: msg },
        };
        let _ = update_tx.send(Update::Event(event));
    }
    let _ = path_count_tx.send(count);
    drop(path_tx);
    count
}
