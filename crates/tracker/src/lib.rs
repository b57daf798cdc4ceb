//! Client-side tracking pipeline: session persistence, bot filtering, and
//! batched at-least-once delivery.

pub mod config;
pub mod flusher;
pub mod queue;
pub mod store;
pub mod tracker;
pub mod transport;
pub mod ua;

pub use config::{DeliveryMode, TrackerConfig};
pub use flusher::{Flusher, FlushTrigger};
pub use queue::DeliveryQueue;
pub use store::{JsonFileStore, MemoryStore, SessionStore};
pub use tracker::Tracker;
pub use transport::{HttpTransport, Transport};
pub use ua::UaCapture;
