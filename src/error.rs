use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bot operations
#[derive(Error, Debug, Diagnostic)]
pub enum BotError {
    #[error("Configuration error")]
    #[diagnostic(help("Check your configuration file and environment variables"))]
    Config(#[from] ConfigError),

    #[error("Market API error")]
    #[diagnostic(help("Check that the MarketHunt API is reachable"))]
    Market(#[from] MarketError),

    #[error("Discord error")]
    #[diagnostic(help("Check Discord bot token and permissions"))]
    Discord(#[from] DiscordError),
}

/// Configuration errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Configuration file not found at {path}")]
    #[diagnostic(
        code(markethunt::config::not_found),
        help("Create a config file or use environment variables")
    )]
    NotFound { path: String },

    #[error("Failed to parse configuration")]
    #[diagnostic(
        code(markethunt::config::parse_failed),
        help("Check TOML syntax and field types")
    )]
    ParseFailed {
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration")]
    #[diagnostic(
        code(markethunt::config::invalid),
        help("Check configuration format and required fields")
    )]
    Invalid { field: String, reason: String },
}

/// Errors from the MarketHunt API client
#[derive(Error, Debug, Diagnostic)]
pub enum MarketError {
    #[error("Failed to build HTTP client")]
    #[diagnostic(code(markethunt::market::client_build))]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed")]
    #[diagnostic(
        code(markethunt::market::request_failed),
        help("Check network connectivity and the configured API base URL")
    )]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned status {status}")]
    #[diagnostic(
        code(markethunt::market::bad_status),
        help("The upstream API rejected the request; it may be down or the endpoint changed")
    )]
    BadStatus { url: String, status: u16 },

    #[error("Failed to decode response from {url}")]
    #[diagnostic(
        code(markethunt::market::invalid_response),
        help("The upstream API returned a body that doesn't match the expected shape")
    )]
    InvalidResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Discord-specific errors
#[derive(Error, Debug, Diagnostic)]
pub enum DiscordError {
    #[error("Discord bot token not configured")]
    #[diagnostic(
        code(markethunt::discord::no_token),
        help("Set DISCORD_TOKEN in .env or config file")
    )]
    NoToken,

    #[error("Failed to connect to Discord")]
    #[diagnostic(
        code(markethunt::discord::connection_failed),
        help("Check bot token and network connection")
    )]
    ConnectionFailed {
        #[source]
        source: serenity::Error,
    },
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, BotError>;
