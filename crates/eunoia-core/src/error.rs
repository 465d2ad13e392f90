use thiserror::Error;

/// Errors raised while parsing names and configuration.
///
/// Generation and animation never fail; only textual input does.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown density `{0}` (expected low, medium or high)")]
    UnknownDensity(String),
    #[error("unknown colour variant `{0}` (expected purple, blue, gold, teal or mixed)")]
    UnknownColorVariant(String),
    #[error("unknown theme `{0}` (expected light or dark)")]
    UnknownTheme(String),
    #[error("unknown service `{0}`")]
    UnknownService(String),
    #[error("invalid site configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
