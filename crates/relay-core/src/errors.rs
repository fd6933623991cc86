/// Core error type for the relay.
///
/// Adapter crates map their transport errors into this type so the relay
/// service can tell an authorization failure apart from everything else.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
