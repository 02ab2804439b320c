pub mod signer;
pub mod values;

pub use signer::{RequestSigner, SignatureContext, SignedRequest};
pub use values::SignatureMethod;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ConfigError, Error, Result};
use crate::util;

type HmacSha1 = Hmac<Sha1>;

/// Generates a nonce: random bytes, base64 encoded, with every non-word
/// character stripped. Only `[A-Za-z0-9_]` remain.
pub fn generate_nonce() -> String {
    let bytes = [*Uuid::new_v4().as_bytes(), *Uuid::new_v4().as_bytes()].concat();
    STANDARD
        .encode(&bytes)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Seconds since the Unix epoch.
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Builds the signature base string `METHOD&url&params`.
///
/// Parameters are sorted by key and joined verbatim as `key=value` before the
/// whole string is encoded, then `%28`, `%29` and `%2C` are escaped once more.
pub fn signature_base_string<I, K, V>(method: &str, endpoint: &str, parameters: I) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    util::check_endpoint(endpoint)?;

    // alphabetic sort by key
    let mut params = parameters.into_iter().collect::<Vec<(K, V)>>();
    params.sort_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()));
    if let Some(pair) = params
        .windows(2)
        .find(|pair| pair[0].0.as_ref() == pair[1].0.as_ref())
    {
        return Err(Error::DuplicateParameter {
            key: pair[0].0.as_ref().to_string(),
        });
    }

    let param_str = params
        .iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
        .collect::<Vec<String>>()
        .join("&");
    let base_str = format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        util::quote_plus(endpoint),
        util::quote_plus(&param_str)
    );
    Ok(util::double_escape_reserved(&base_str))
}

/// Builds the HMAC key `consumer_secret&token_secret`, each part encoded.
///
/// Without a token secret the key keeps its trailing `&`.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> Result<String> {
    if consumer_secret.is_empty() {
        return Err(ConfigError::MissingSecret("consumer_secret").into());
    }
    Ok(format!(
        "{}&{}",
        util::quote_plus(consumer_secret),
        util::quote_plus(token_secret.unwrap_or(""))
    ))
}

/// Computes the OAuth 1.0a HMAC-SHA1 signature of one request.
///
/// # Parameters
/// - method: HTTP method, ex)"GET", "POST".
/// - endpoint: base URL, no query string or fragment.
/// - consumer_secret: consumer secret key, must not be empty.
/// - token_secret: access token secret, `None` before a token is issued.
/// - parameters: every `oauth_*` field and every request field, unencoded.
/// # Returns
/// the percent-encoded base64 signature.
pub fn sign<I, K, V>(
    method: &str,
    endpoint: &str,
    consumer_secret: &str,
    token_secret: Option<&str>,
    parameters: I,
) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let sign_key = signing_key(consumer_secret, token_secret)?;
    let base_str = signature_base_string(method, endpoint, parameters)?;
    debug!(base_string = %base_str, "built signature base string");

    // NOTE: HMAC takes keys of any length, so this never fails.
    let mut mac = HmacSha1::new_from_slice(sign_key.as_bytes())
        .expect("SHA-1 accepts any size of keys.");
    mac.update(base_str.as_bytes());
    let hash = mac.finalize().into_bytes();
    let encoded = STANDARD.encode(hash);
    let signature = util::quote_plus(encoded.trim_end_matches('\n'));
    debug!(%signature, "signed request");
    Ok(signature)
}
