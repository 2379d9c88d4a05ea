pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;

pub use config::SrsConfig;
pub use error::{Error, Result};
pub use models::{
    Catalog, ItemId, MasteryLevel, Progress, ReviewSession, ReviewState, Stats, StudyLog,
    VocabItem, due_items, grade, mastery_level,
};
pub use store::{ProgressStore, StoreState, StudyLogStore};
