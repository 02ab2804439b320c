use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Parameter `{key}` is given more than once.")]
    DuplicateParameter { key: String },
    #[error("Parameter `{key}` cannot be rendered as a string: {reason}.")]
    InvalidParameter { key: String, reason: &'static str },

    #[error("Endpoint `{endpoint}` must not carry a query string or fragment.")]
    InvalidEndpoint { endpoint: String },
    #[error("`{method}` is not a valid HTTP method.")]
    InvalidMethod { method: String },
    #[error("Endpoint URL is invalid: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "reqwest")]
    #[error("Reqwest Error: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "reqwest")]
    #[error("Endpoint responded with HTTP status {status}.")]
    Status { status: u16, body: String },
}

/// Problems with the credentials or settings handed to the signer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Credential `{0}` is missing or empty.")]
    MissingSecret(&'static str),

    #[error("Couldn't read settings file `{path}`.")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
