/// Channel id that always exists and is the active channel at startup.
pub const LOBBY_CHANNEL: &str = "lobby";

/// Reserved sender identity for server-originated notices.
pub const SYSTEM_SENDER: &str = "system";

/// Bounded capacity for the session command / event channels.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// How long the presentation layer keeps a transient error notice visible
/// before clearing it.  The core only signals; the timer belongs to the
/// presentation adapter.
pub const ERROR_NOTICE_SECS: u64 = 3;
