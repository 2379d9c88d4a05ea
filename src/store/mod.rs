pub mod atomic;
pub mod progress_store;
pub mod study_log_store;

pub use progress_store::{ProgressStore, StoreState};
pub use study_log_store::StudyLogStore;
