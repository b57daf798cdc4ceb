//! Core types, bot classification, and session model for footfall.

pub mod classifier;
pub mod env;
pub mod error;
pub mod limits;
pub mod row;
pub mod session;

pub use classifier::{classify, BotReason, SoftSignal, BOT_UA_TOKENS};
pub use env::{ClientEnv, Screen};
pub use error::{Error, Result};
pub use row::{OutboundRow, RowBatch, ROW_FIELDS};
pub use session::{PointerKind, SessionEvent, SessionRecord, UaProfile};
