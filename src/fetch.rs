//! Search and streaming-filter requests against the Twitter API.

use std::path::Path;

use tracing::debug;
#[cfg(feature = "reqwest")]
use tracing::{info, warn};

use crate::builder::RequestDescriptor;
use crate::config::{Credentials, FetcherConfig};
use crate::error::Result;
#[cfg(feature = "reqwest")]
use crate::error::Error;
use crate::v1::{RequestSigner, SignedRequest};

const TWITTER_SEARCH: &str = "/1.1/search/tweets.json";
const TWITTER_STR_STATUS_FILTER: &str = "/1.1/statuses/filter.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Search,
    StreamFilter,
}

impl Command {
    /// Whether the command is served by the streaming API.
    pub fn is_streaming(self) -> bool {
        match self {
            Command::Search => false,
            Command::StreamFilter => true,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Command::Search => TWITTER_SEARCH,
            Command::StreamFilter => TWITTER_STR_STATUS_FILTER,
        }
    }
}

/// Bounding boxes for the `locations` parameter, `sw_lon,sw_lat,ne_lon,ne_lat`.
pub struct Locations;

impl Locations {
    pub const NORTHAMPTONSHIRE: &'static str = "-1.386293,51.985165,-0.282167,52.650010";
    pub const LONDON: &'static str = "-0.567680,51.277729,0.289254,51.701847";
}

pub struct DataFetcher {
    signer: RequestSigner,
    config: FetcherConfig,
    #[cfg(feature = "reqwest")]
    client: reqwest::blocking::Client,
}

impl DataFetcher {
    pub fn new(signer: RequestSigner, config: FetcherConfig) -> Result<Self> {
        #[cfg(feature = "reqwest")]
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout_secs.map(std::time::Duration::from_secs))
            .connection_verbose(config.verbose)
            .build()?;

        Ok(DataFetcher {
            signer,
            config,
            #[cfg(feature = "reqwest")]
            client,
        })
    }

    /// Reads credentials from a JSON settings file and uses default endpoints.
    pub fn from_settings_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let credentials = Credentials::from_json_file(path)?;
        Self::new(RequestSigner::new(credentials)?, FetcherConfig::default())
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    pub fn endpoint(&self, command: Command) -> String {
        let base = if command.is_streaming() {
            &self.config.stream_url
        } else {
            &self.config.api_url
        };
        format!("{}{}", base.trim_end_matches('/'), command.path())
    }

    /// An empty GET request for `command`; add its parameters before signing.
    pub fn request<'a>(&self, command: Command) -> Result<RequestDescriptor<'a>> {
        RequestDescriptor::get(self.endpoint(command))
    }

    pub fn sign(&self, request: &RequestDescriptor<'_>) -> Result<SignedRequest> {
        self.signer.sign_request(request)
    }

    /// The `curl` invocation that performs `signed`.
    pub fn curl_cmdline(&self, signed: &SignedRequest) -> Vec<String> {
        let mut cmd = vec![
            "curl".to_string(),
            "--get".to_string(),
            signed.endpoint().to_string(),
            "--data".to_string(),
            signed.encoded_query(),
            "--header".to_string(),
            format!("Authorization: {}", signed.authorization_header()),
        ];
        if let Some(timeout) = self.config.timeout_secs {
            cmd.push("--max-time".to_string());
            cmd.push(timeout.to_string());
        }
        if self.config.verbose {
            cmd.push("--verbose".to_string());
        }
        debug!(cmdline = %cmd.join(" "), "curl command line");
        cmd
    }
}

#[cfg(feature = "reqwest")]
impl DataFetcher {
    fn send(&self, signed: &SignedRequest) -> Result<reqwest::blocking::Response> {
        info!(method = signed.method(), endpoint = signed.endpoint(), "requesting");
        let method = reqwest::Method::from_bytes(signed.method().as_bytes()).map_err(|_| {
            Error::InvalidMethod {
                method: signed.method().to_string(),
            }
        })?;
        let response = self
            .client
            .request(method, signed.url())
            .header(reqwest::header::AUTHORIZATION, signed.authorization_header())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|e| {
                warn!(error = %e, "couldn't read the body of a rejected request");
                String::new()
            });
            warn!(status = status.as_u16(), %body, "request rejected");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Performs the request and returns the whole response body.
    pub fn fetch_data(&self, signed: &SignedRequest) -> Result<String> {
        Ok(self.send(signed)?.text()?)
    }

    /// Performs the request and copies the body into `out` as it arrives.
    ///
    /// # Returns
    /// number of bytes written.
    pub fn download_data<W: std::io::Write + ?Sized>(
        &self,
        signed: &SignedRequest,
        out: &mut W,
    ) -> Result<u64> {
        let mut response = self.send(signed)?;
        let written = response.copy_to(out)?;
        out.flush()?;
        debug!(written, "download finished");
        Ok(written)
    }
}
