use percent_encoding::{utf8_percent_encode, AsciiSet};

use crate::error::{Error, Result};

// application/x-www-form-urlencoded, as Twitter's signature generator does it:
// * ALPHA, DIGIT, '-', '.', '_' are not encoded.
// * All other characters are encoded, '~' included.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

// Twitter's own signature generator escapes these a second time.
const DOUBLE_ESCAPED: [(&str, &str); 3] = [("%28", "%2528"), ("%2C", "%252C"), ("%29", "%2529")];

/// Form style percent encoding: only ALPHA, DIGIT and `-._` pass, a space
/// becomes `+`.
pub fn quote_plus(input: &str) -> String {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS)
        .map(|chunk| if chunk == "%20" { "+" } else { chunk })
        .collect()
}

/// Rewrites `%28`, `%2C` and `%29` in an already encoded string into
/// `%2528`, `%252C` and `%2529`.
pub fn double_escape_reserved(encoded: &str) -> String {
    DOUBLE_ESCAPED
        .iter()
        .fold(encoded.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Rejects endpoints that carry a query string or fragment.
pub fn check_endpoint(endpoint: &str) -> Result<()> {
    if endpoint.contains('?') || endpoint.contains('#') {
        return Err(Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
        });
    }
    Ok(())
}

/// Splits a URL into its bare endpoint and its decoded query pairs.
pub fn url_to_endpoint_and_queries(url: &url::Url) -> (String, Vec<(String, String)>) {
    let queries = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let mut endpoint = url.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    (endpoint.into(), queries)
}

#[test]
fn test_quote_plus() {
    assert_eq!(quote_plus("a b"), "a+b");
    assert_eq!(quote_plus("a+b"), "a%2Bb");
    assert_eq!(quote_plus("-._"), "-._");
    assert_eq!(quote_plus("~user"), "%7Euser");
    assert_eq!(quote_plus("a,b(c)"), "a%2Cb%28c%29");
    assert_eq!(quote_plus("https://x.y/z"), "https%3A%2F%2Fx.y%2Fz");
    assert_eq!(quote_plus("%20"), "%2520");
    assert_eq!(quote_plus("テ"), "%E3%83%86");
    assert_eq!(quote_plus(""), "");
}

#[test]
fn test_double_escape_reserved() {
    assert_eq!(
        double_escape_reserved("q%3Da%2Cb%28c%29"),
        "q%3Da%252Cb%2528c%2529"
    );
    // applying twice must not touch the already escaped sequences
    let once = double_escape_reserved("%28%29%2C");
    assert_eq!(once, "%2528%2529%252C");
    assert_eq!(double_escape_reserved(&once), once);
    assert_eq!(double_escape_reserved("%2B%3D"), "%2B%3D");
}

#[test]
fn test_check_endpoint() {
    assert!(check_endpoint("https://api.example.com/1.1/search").is_ok());
    assert!(check_endpoint("https://api.example.com/1.1/search?q=1").is_err());
    assert!(check_endpoint("https://api.example.com/1.1/search#top").is_err());
}

#[test]
fn test_url_to_endpoint_and_queries() {
    let u = url::Url::parse("https://example.com/1.1/search.json?q=a%2Cb+c&count=25#frag")
        .unwrap();
    let (endpoint, queries) = url_to_endpoint_and_queries(&u);
    assert_eq!(endpoint, "https://example.com/1.1/search.json");
    assert_eq!(
        queries,
        vec![
            ("q".to_string(), "a,b c".to_string()),
            ("count".to_string(), "25".to_string())
        ]
    );
    let n = "https://example.com/";
    let (endpoint, queries) = url_to_endpoint_and_queries(&url::Url::parse(n).unwrap());
    assert_eq!(endpoint, n);
    assert_eq!(queries.len(), 0);
}
