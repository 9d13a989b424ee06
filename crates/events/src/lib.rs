//! In-process change notification: the event bus and the activity-log
//! persistence subscriber.

pub mod bus;
pub mod persistence;

pub use bus::{ChangeEvent, EventBus};
pub use persistence::ActivityPersistence;
