use reqwest::StatusCode;

/// Error type for the folio-rs crate.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum FolioError {
    /// The platform answered with a non-success status code.
    ///
    /// The response body is kept in `message` but left out of the display text, as it may hold
    /// personal data.
    #[error("HTTP {status} returned by {url}")]
    #[diagnostic(code(folio_rs::error::FolioError::Http))]
    Http {
        /// The status code exactly as returned by the platform.
        status: StatusCode,
        /// The requested URL, without query string.
        url: String,
        /// The response body, as text.
        message: String,
    },

    /// The request failed before a response was received.
    #[error(transparent)]
    #[diagnostic(code(folio_rs::error::FolioError::Transport))]
    Transport(#[from] reqwest::Error),

    /// A success response did not contain the expected JSON.
    #[error(transparent)]
    #[diagnostic(code(folio_rs::error::FolioError::Decode))]
    Decode(#[from] serde_json::Error),

    /// A success response was valid JSON but lacked a required field.
    #[error("Unexpected response: {0}")]
    #[diagnostic(code(folio_rs::error::FolioError::UnexpectedResponse))]
    UnexpectedResponse(String),

    /// The login response did not carry an `x-okapi-token` header.
    #[error("The login response did not contain a session token.")]
    #[diagnostic(code(folio_rs::error::FolioError::MissingToken))]
    MissingToken,

    /// The client holds no session token.
    #[error("The client is not authenticated.")]
    #[diagnostic(code(folio_rs::error::FolioError::NotAuthenticated))]
    NotAuthenticated,

    /// A required environment variable is not set.
    #[error("Environment variable {0} is not set.")]
    #[diagnostic(
        code(folio_rs::error::FolioError::MissingEnv),
        help("set it in the environment or in a .env file")
    )]
    MissingEnv(&'static str),

    /// The base URL cannot carry path segments.
    #[error("The Okapi URL cannot be used as a base URL.")]
    #[diagnostic(code(folio_rs::error::FolioError::InvalidBaseUrl))]
    InvalidBaseUrl,

    /// An invalid header value has been provided.
    #[error(transparent)]
    #[diagnostic(code(folio_rs::error::FolioError::InvalidHeaderValue))]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    /// Url parsing error.
    #[error(transparent)]
    #[diagnostic(code(folio_rs::error::FolioError::UrlParseError))]
    UrlParseError(#[from] url::ParseError),

    /// Reading or writing a local file failed.
    #[error(transparent)]
    #[diagnostic(code(folio_rs::error::FolioError::Io))]
    Io(#[from] std::io::Error),
}

/// Broad category of a [`FolioError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The platform returned a non-success status.
    Http,
    /// No response was received.
    Transport,
    /// The response could not be interpreted.
    Decode,
    /// The session could not be established or is missing.
    Authentication,
    /// The client was configured with invalid values.
    Configuration,
    /// Local file system failure.
    Io,
}

impl FolioError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FolioError::Http { .. } => ErrorKind::Http,
            FolioError::Transport(_) => ErrorKind::Transport,
            FolioError::Decode(_) | FolioError::UnexpectedResponse(_) => ErrorKind::Decode,
            FolioError::MissingToken | FolioError::NotAuthenticated => ErrorKind::Authentication,
            FolioError::MissingEnv(_)
            | FolioError::InvalidBaseUrl
            | FolioError::InvalidHeaderValue(_)
            | FolioError::UrlParseError(_) => ErrorKind::Configuration,
            FolioError::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns the HTTP status code, if the platform answered with an error status.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FolioError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
