//! Error types for Mailsweep.

/// Top-level error type for a sweep run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("Traversal error: {0}")]
    Traversal(#[from] TraversalError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Credential acquisition errors.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Failed to read credentials from the terminal: {0}")]
    Prompt(#[from] std::io::Error),
}

/// Errors surfaced by the browser-automation driver.
///
/// The four variants mirror the failure kinds the traversal engine cares
/// about: `NotFound` is an expected-absence signal (never conflated with a
/// transport failure), `Stale` is the retryable re-render race, and
/// `SessionNotCreated` means no browser session could be established at all.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Element not found: {selector}")]
    NotFound { selector: String },

    #[error("Stale element reference: {0}")]
    Stale(String),

    #[error("WebDriver session could not be created: {0}")]
    SessionNotCreated(String),

    #[error("WebDriver request failed: {0}")]
    Other(String),
}

/// Mailbox traversal errors.
#[derive(Debug, thiserror::Error)]
pub enum TraversalError {
    #[error("Folder page address {url:?} does not end in an integer page segment")]
    MalformedAddress { url: String },

    #[error("No folder row matching {name:?} was found")]
    FolderNotFound { name: String },

    #[error("Message row carries no {attr:?} attribute")]
    RowKeyMissing { attr: String },

    #[error("Gave up after {attempts} consecutive stale-reference retries")]
    StaleRetriesExhausted { attempts: u32 },
}
