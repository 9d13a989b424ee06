//! Real-time change notification.
//!
//! The [`ChangeBroadcaster`] subscribes to the event bus and pushes every
//! change to connected WebSocket clients.

pub mod broadcaster;

pub use broadcaster::ChangeBroadcaster;
