use tracing::debug;

use crate::builder::RequestDescriptor;
use crate::config::Credentials;
use crate::error::Result;
use crate::util;
use crate::v1::{self, values::*};

/// Nonce and timestamp of one signing call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureContext {
    pub nonce: String,
    pub timestamp: i64,
}

impl SignatureContext {
    pub fn new(nonce: impl Into<String>, timestamp: i64) -> Self {
        SignatureContext {
            nonce: nonce.into(),
            timestamp,
        }
    }

    /// Fresh nonce, current time.
    pub fn generate() -> Self {
        SignatureContext {
            nonce: v1::generate_nonce(),
            timestamp: v1::current_timestamp(),
        }
    }
}

/// Contents signed with OAuth1a.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
    method: String,
    endpoint: String,
    signature: String,
    oauth_params: Vec<(&'static str, String)>,
    parameters: Vec<(String, String)>,
}

impl SignedRequest {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The percent-encoded signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The `oauth_*` fields that took part in the signature, sorted by key.
    pub fn oauth_params(&self) -> &[(&'static str, String)] {
        &self.oauth_params
    }

    /// Rendered request parameters, in insertion order.
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// Value of the `Authorization` header.
    ///
    /// `OAuth oauth_consumer_key="…", oauth_nonce="…", oauth_signature="…", …`
    pub fn authorization_header(&self) -> String {
        let mut fields = self
            .oauth_params
            .iter()
            .map(|(k, v)| (*k, util::quote_plus(v)))
            .collect::<Vec<(&str, String)>>();
        fields.push((OAUTH_PARAM_KEY_SIGNATURE, self.signature.clone()));
        fields.sort();
        let fields = fields
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, v))
            .collect::<Vec<String>>()
            .join(", ");
        format!("{} {}", OAUTH_HEADER, fields)
    }

    /// The request parameters as a form-encoded query string.
    pub fn encoded_query(&self) -> String {
        self.parameters
            .iter()
            .map(|(k, v)| format!("{}={}", util::quote_plus(k), util::quote_plus(v)))
            .collect::<Vec<String>>()
            .join("&")
    }

    /// Endpoint with the encoded query appended, if there is one.
    pub fn url(&self) -> String {
        if self.parameters.is_empty() {
            self.endpoint.clone()
        } else {
            format!("{}?{}", self.endpoint, self.encoded_query())
        }
    }
}

/// Signs requests with one set of credentials.
#[derive(Clone, Debug)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Fails when the credentials are incomplete; see [`Credentials::validate`].
    pub fn new(credentials: Credentials) -> Result<Self> {
        credentials.validate()?;
        Ok(RequestSigner { credentials })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Signs with a fresh nonce and the current time.
    pub fn sign_request(&self, request: &RequestDescriptor<'_>) -> Result<SignedRequest> {
        self.sign_request_with(request, SignatureContext::generate())
    }

    /// Signs with a caller supplied nonce and timestamp.
    pub fn sign_request_with(
        &self,
        request: &RequestDescriptor<'_>,
        context: SignatureContext,
    ) -> Result<SignedRequest> {
        let parameters = request.render_parameters()?;
        let oauth_params = self.build_basic_params(context);
        debug!(
            method = request.method(),
            endpoint = request.endpoint(),
            ?parameters,
            "signing request"
        );

        let all_params = oauth_params
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .chain(parameters.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        let signature = v1::sign(
            request.method(),
            request.endpoint(),
            &self.credentials.consumer_secret,
            self.credentials.token_secret(),
            all_params,
        )?;

        Ok(SignedRequest {
            method: request.method().to_string(),
            endpoint: request.endpoint().to_string(),
            signature,
            oauth_params,
            parameters,
        })
    }

    fn build_basic_params(&self, context: SignatureContext) -> Vec<(&'static str, String)> {
        let mut params = vec![
            (
                OAUTH_PARAM_KEY_CONSUMER_KEY,
                self.credentials.consumer_key.clone(),
            ),
            (OAUTH_PARAM_KEY_NONCE, context.nonce),
            (
                OAUTH_PARAM_KEY_SIGNATURE_METHOD,
                SignatureMethod::HmacSha1.as_str().to_string(),
            ),
            (OAUTH_PARAM_KEY_TIMESTAMP, context.timestamp.to_string()),
            (OAUTH_PARAM_KEY_VERSION, OAUTH_VALUE_VERSION.to_string()),
        ];
        // no token yet: no oauth_token field either
        if let Some(token) = self.credentials.token() {
            params.push((OAUTH_PARAM_KEY_TOKEN, token.to_string()));
        }
        params.sort();
        params
    }
}
