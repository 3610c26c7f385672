pub mod clock;
pub mod rating;
pub mod review_state;
pub mod sm2;

pub use clock::{Clock, ManualClock, SystemClock};
pub use rating::Rating;
pub use review_state::{ReviewMap, ReviewState};
pub use sm2::Scheduler;
