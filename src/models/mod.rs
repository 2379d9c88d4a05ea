pub mod catalog;
pub mod mastery;
pub mod review_session;
pub mod review_state;
pub mod scheduler;
pub mod sm2;
pub mod stats;
pub mod study_log;

pub use catalog::{Catalog, VocabItem};
pub use mastery::{MasteryLevel, mastery_level};
pub use review_session::ReviewSession;
pub use review_state::{ItemId, Progress, ReviewState};
pub use scheduler::{due_items, grade};
pub use stats::{CategoryStats, Stats};
pub use study_log::StudyLog;
