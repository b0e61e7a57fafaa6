//! Error types, one enum per external collaborator.
//!
//! None of these reach the visitor: location and weather failures become the
//! seasonal fallback, and contact failures become a status message.

/// A configuration value could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A value was present but did not parse.
    #[error("invalid {key}: {message}")]
    Invalid { key: String, message: String },

    /// Some, but not all, of the contact backend ids were set.
    #[error("incomplete contact config: {0} is not set")]
    IncompleteContact(&'static str),
}

/// The visitor's position could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    /// The visitor refused the permission prompt.
    #[error("geolocation permission denied")]
    Denied,

    /// The browser has no geolocation, or could not get a fix.
    #[error("geolocation unavailable: {0}")]
    Unavailable(String),

    /// No answer within the configured wait.
    #[error("geolocation timed out after {0} ms")]
    Timeout(u32),
}

/// The weather lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeatherError {
    /// The HTTP request could not be sent or its body not read.
    #[error("weather request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status.
    #[error("weather response error: status {status}")]
    Status { status: u16 },

    /// The response body was not the expected JSON.
    #[error("weather response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// The contact message could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    /// The HTTP request could not be sent or its body not read.
    #[error("contact request failed: {0}")]
    Request(String),

    /// The contact backend answered with a non-success status.
    #[error("contact backend error: status {status}: {body}")]
    Status { status: u16, body: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// A contact form field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("please fill in your {0}")]
    Missing(&'static str),

    #[error("please enter a valid email address")]
    InvalidEmail,
}
