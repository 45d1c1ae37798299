use thiserror::Error;

#[derive(Error, Debug)]
pub enum KbotError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Session store error: {0}")]
    Store(String),

    #[error("Localization error: {0}")]
    Locales(String),

    #[error("Knowledge base error: {0}")]
    Resolver(String),

    #[error("Handler error: {0}")]
    Handler(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported by the chat platform client, classified at the client
/// boundary so the rest of the pipeline never inspects message strings.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The platform rejected a response to a query that had already expired
    /// before the bot answered it. A benign race, not a failure.
    #[error("Stale query: {0}")]
    StaleQuery(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl KbotError {
    /// True for the one error class the global filter drops without logging.
    pub fn is_stale_query(&self) -> bool {
        matches!(self, Self::Platform(PlatformError::StaleQuery(_)))
    }
}

pub type Result<T> = std::result::Result<T, KbotError>;
