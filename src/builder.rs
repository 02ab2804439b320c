use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::parameters::ParamValue;
use crate::util;

/// One HTTP request to be signed: method, bare endpoint and its parameters.
///
/// Parameters are kept in insertion order and stringified only when the
/// request is signed, so rendering failures surface from the signer.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor<'a> {
    method: String,
    endpoint: String,
    parameters: Vec<(Cow<'a, str>, ParamValue<'a>)>,
}

impl<'a> RequestDescriptor<'a> {
    /// # Parameters
    /// - method: HTTP method, ex)"GET", "POST". Upper-cased here.
    /// - endpoint: absolute URL without query string or fragment.
    pub fn new(method: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        url::Url::parse(&endpoint)?;
        util::check_endpoint(&endpoint)?;
        Ok(RequestDescriptor {
            method: method.into().to_ascii_uppercase(),
            endpoint,
            parameters: Vec::new(),
        })
    }

    pub fn get(endpoint: impl Into<String>) -> Result<Self> {
        Self::new("GET", endpoint)
    }

    /// Builds a descriptor from a full URL; its query pairs become parameters.
    pub fn from_url(method: impl Into<String>, url: &url::Url) -> Result<Self> {
        let (endpoint, queries) = util::url_to_endpoint_and_queries(url);
        let mut descriptor = Self::new(method, endpoint)?;
        for (k, v) in queries {
            descriptor.param(k, v);
        }
        Ok(descriptor)
    }

    pub fn param<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<Cow<'a, str>>,
        V: Into<ParamValue<'a>>,
    {
        self.parameters.push((key.into(), value.into()));
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn param_opt<K, V>(&mut self, key: K, value: Option<V>) -> &mut Self
    where
        K: Into<Cow<'a, str>>,
        V: Into<ParamValue<'a>>,
    {
        if let Some(value) = value {
            self.param(key, value);
        }
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Stringifies every parameter, in insertion order.
    ///
    /// Fails on a value without a string form or on a repeated key.
    pub fn render_parameters(&self) -> Result<Vec<(String, String)>> {
        let mut rendered: Vec<(String, String)> = Vec::with_capacity(self.parameters.len());
        for (key, value) in &self.parameters {
            if rendered.iter().any(|(k, _)| k == key) {
                return Err(Error::DuplicateParameter {
                    key: key.to_string(),
                });
            }
            let value = value.clone().render(key)?;
            rendered.push((key.to_string(), value.into_owned()));
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_normalizes_method() {
        let req = RequestDescriptor::new("get", "https://api.example.com/1.1/search").unwrap();
        assert_eq!(req.method(), "GET");
        assert_eq!(req.endpoint(), "https://api.example.com/1.1/search");
        assert!(req.is_empty());
    }

    #[test]
    fn test_new_rejects_bad_endpoints() {
        assert!(matches!(
            RequestDescriptor::get("not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            RequestDescriptor::get("https://api.example.com/search?q=1"),
            Err(Error::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_render_parameters() {
        let mut req = RequestDescriptor::get("https://api.example.com/1.1/search").unwrap();
        req.param("track", "india")
            .param("include_entities", true)
            .param("count", 25i64)
            .param_opt("since_id", None::<u64>)
            .param_opt("max_id", Some(565_686_632_033_300_481u64));
        assert_eq!(req.len(), 4);
        assert_eq!(
            req.render_parameters().unwrap(),
            vec![
                ("track".to_string(), "india".to_string()),
                ("include_entities".to_string(), "true".to_string()),
                ("count".to_string(), "25".to_string()),
                ("max_id".to_string(), "565686632033300481".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_rejects_duplicates() {
        let mut req = RequestDescriptor::get("https://api.example.com/1.1/search").unwrap();
        req.param("q", "a").param("q", "b");
        match req.render_parameters() {
            Err(Error::DuplicateParameter { key }) => assert_eq!(key, "q"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_from_url() {
        let url = url::Url::parse("https://api.example.com/1.1/search?q=a%2Cb&count=5").unwrap();
        let req = RequestDescriptor::from_url("GET", &url).unwrap();
        assert_eq!(req.endpoint(), "https://api.example.com/1.1/search");
        assert_eq!(
            req.render_parameters().unwrap(),
            vec![
                ("q".to_string(), "a,b".to_string()),
                ("count".to_string(), "5".to_string()),
            ]
        );
    }
}
