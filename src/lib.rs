//! OAuth 1.0a (HMAC-SHA1) request signing for the Twitter REST and streaming
//! APIs, plus the search/filter request plumbing built on it.

pub mod builder;
pub mod config;
pub mod error;
pub mod fetch;
pub mod parameters;
pub mod v1;

mod util;

pub use builder::RequestDescriptor;
pub use config::{Credentials, FetcherConfig};
pub use error::{ConfigError, Error, Result};
pub use fetch::{Command, DataFetcher, Locations};
pub use parameters::ParamValue;
pub use v1::{RequestSigner, SignatureContext, SignedRequest};
