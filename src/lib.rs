pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod repository;

pub use config::SchedulerConfig;
pub use database::{KeyValueStore, MemoryStore, SqliteStore};
pub use error::{Result, SrsError};
pub use models::{Clock, ManualClock, Rating, ReviewMap, ReviewState, Scheduler, SystemClock};
pub use repository::{Repository, SubscriptionId};
