//! # parley-sync
//!
//! The channel state synchronizer: reconciles the in-memory store against
//! a pull path (one-shot backlog hydration per channel) and a push path
//! (the server's real-time event stream), while translating user intents
//! into outbound wire events.
//!
//! All state mutation happens on one logical thread: the session event
//! loop in [`session`], which feeds the [`SyncEngine`] from typed mpsc
//! channels.

pub mod engine;
pub mod fetch;
pub mod session;
pub mod view;

mod error;

pub use engine::{FetchOutcome, SyncEngine};
pub use error::SyncError;
pub use fetch::HistorySource;
pub use session::{spawn_session, UiIntent};
pub use view::{ChannelView, NullView};
