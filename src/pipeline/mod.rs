//! Pipeline components: context, walk loop, copy workers, collection and summary.

pub mod context;
pub mod orchestrator;
pub mod summary;
pub mod walk;
pub mod workers;

pub use context::{
    PipelineChannels, PipelineContext, PipelineHandles, SharedWorkerState, Update, WorkerShared,
    create_pipeline_channels,
};
pub use orchestrator::{collect_report, run_pipeline};
pub use summary::log_report_summary;
pub use walk::{WalkOutcome, classify_file, run_walk_loop, spawn_walk_thread, to_outcome_walkdir};
pub use workers::spawn_copy_workers;
