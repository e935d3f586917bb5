/// Configuration failures detected before any remote call is made.
///
/// Missing credentials are a fatal startup error: no seeding run is
/// attempted and nothing is written to the store.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("Environment variable {name} is invalid: {message}")]
    InvalidVar {
        name: &'static str,
        message: String,
    },
}
