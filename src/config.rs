//! Credentials and fetcher settings, passed explicitly to their consumers.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const TWITTER_API_URL: &str = "https://api.twitter.com";
pub const TWITTER_STREAM_API_URL: &str = "https://stream.twitter.com";

/// OAuth consumer and access-token credentials.
///
/// Deserializes from the settings file layout:
/// `{"consumer_key", "consumer_secret", "access_token_key", "access_token_secret"}`.
/// The access-token pair may be left out (or empty) to sign without a token.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    #[serde(default)]
    pub access_token_key: String,
    #[serde(default)]
    pub access_token_secret: String,
}

impl Credentials {
    /// Consumer credentials only, for requests made before a token is issued.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token_key: String::new(),
            access_token_secret: String::new(),
        }
    }

    pub fn with_token(
        mut self,
        access_token_key: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        self.access_token_key = access_token_key.into();
        self.access_token_secret = access_token_secret.into();
        self
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Checks that the consumer pair is present and that the access-token
    /// pair is either complete or absent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.consumer_key.is_empty() {
            return Err(ConfigError::MissingSecret("consumer_key"));
        }
        if self.consumer_secret.is_empty() {
            return Err(ConfigError::MissingSecret("consumer_secret"));
        }
        match (
            self.access_token_key.is_empty(),
            self.access_token_secret.is_empty(),
        ) {
            (false, true) => Err(ConfigError::MissingSecret("access_token_secret")),
            (true, false) => Err(ConfigError::MissingSecret("access_token_key")),
            _ => Ok(()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        Some(self.access_token_key.as_str()).filter(|t| !t.is_empty())
    }

    pub fn token_secret(&self) -> Option<&str> {
        Some(self.access_token_secret.as_str()).filter(|s| !s.is_empty())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token_key", &self.access_token_key)
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

/// Where and how the fetcher talks to the API.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetcherConfig {
    /// Base URL of the REST API.
    pub api_url: String,
    /// Base URL of the streaming API.
    pub stream_url: String,
    /// Whole-request timeout in seconds; none for open-ended streams.
    pub timeout_secs: Option<u64>,
    pub verbose: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfig {
            api_url: TWITTER_API_URL.to_string(),
            stream_url: TWITTER_STREAM_API_URL.to_string(),
            timeout_secs: None,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_reader() {
        let json = r#"{
            "consumer_key": "ck",
            "consumer_secret": "cs",
            "access_token_key": "tk",
            "access_token_secret": "ts"
        }"#;
        let creds = Credentials::from_reader(json.as_bytes()).unwrap();
        assert_eq!(creds, Credentials::new("ck", "cs").with_token("tk", "ts"));
        assert!(creds.validate().is_ok());
        assert_eq!(creds.token(), Some("tk"));
        assert_eq!(creds.token_secret(), Some("ts"));
    }

    #[test]
    fn test_token_is_optional() {
        let json = r#"{"consumer_key": "ck", "consumer_secret": "cs"}"#;
        let creds = Credentials::from_reader(json.as_bytes()).unwrap();
        assert!(creds.validate().is_ok());
        assert_eq!(creds.token(), None);
        assert_eq!(creds.token_secret(), None);
    }

    #[test]
    fn test_from_reader_rejects_bad_json() {
        assert!(matches!(
            Credentials::from_reader(&b"{\"consumer_key\": 1}"[..]),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_file_missing() {
        let path = std::env::temp_dir().join("twsign-no-such-settings.json");
        match Credentials::from_json_file(&path) {
            Err(ConfigError::Read { path: p, .. }) => {
                assert!(p.ends_with("twsign-no-such-settings.json"))
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            Credentials::new("", "cs").validate(),
            Err(ConfigError::MissingSecret("consumer_key"))
        ));
        assert!(matches!(
            Credentials::new("ck", "").validate(),
            Err(ConfigError::MissingSecret("consumer_secret"))
        ));
        assert!(matches!(
            Credentials::new("ck", "cs").with_token("tk", "").validate(),
            Err(ConfigError::MissingSecret("access_token_secret"))
        ));
        assert!(matches!(
            Credentials::new("ck", "cs").with_token("", "ts").validate(),
            Err(ConfigError::MissingSecret("access_token_key"))
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("ck", "very-secret").with_token("tk", "also-secret");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("ck"));
        assert!(!printed.contains("very-secret"));
        assert!(!printed.contains("also-secret"));
    }

    #[test]
    fn test_fetcher_config_defaults() {
        let config: FetcherConfig = serde_json::from_str(r#"{"timeout_secs": 30}"#).unwrap();
        assert_eq!(config.api_url, TWITTER_API_URL);
        assert_eq!(config.stream_url, TWITTER_STREAM_API_URL);
        assert_eq!(config.timeout_secs, Some(30));
        assert!(!config.verbose);
    }
}
