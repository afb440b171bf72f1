/// Core error type for the bot.
///
/// The adapter crate maps its transport-specific errors into this type so the
/// dispatch loop can handle failures consistently (fatal at startup vs
/// contained per event).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("malformed membership event: {0}")]
    MalformedEvent(String),

    #[error("ban command failed: {0}")]
    Ban(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
