//! # parley-shared
//!
//! Domain types and the wire protocol shared between the channel store,
//! the sync engine, and the client shell.  Everything here is plain data:
//! no I/O, no async, no UI.

pub mod constants;
pub mod protocol;
pub mod types;

mod error;

pub use error::ParleyError;
pub use protocol::{ClientEvent, HistoryResponse, PresenceStatus, ServerEvent};
pub use types::{ChannelId, GroupInfo, Message};
