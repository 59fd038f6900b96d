//! # parley-store
//!
//! The in-memory model of the chat session: the static channel directory,
//! the live per-channel history with unread bookkeeping, and the presence
//! set.  This crate is the single mutable shared resource of the system;
//! everything mutates it through the typed operations here and never by
//! reaching into fields.
//!
//! The store is synchronous and single-threaded by design: the sync engine
//! owns it and drives every mutation from one event loop.

pub mod directory;
pub mod presence;
pub mod state;

pub use directory::ChannelDirectory;
pub use presence::PresenceSet;
pub use state::{AppendEffect, ChannelStore};
