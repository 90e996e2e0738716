pub mod config;
pub mod fd_limit;
pub mod logger;
pub(crate) mod organizer_toml;

pub use config::*;
pub use fd_limit::{FDS_PER_WORKER, effective_workers, max_open_fds, max_workers_by_fd_limit};
pub use logger::{PROGRESS_EVENT_LEVEL, event_passes, log_event, setup_logging};
