use std::borrow::Cow;

use crate::error::{Error, Result};

/// A request parameter before it is stringified for signing.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue<'a> {
    StringValue(Cow<'a, str>),
    IntValue(i64),
    UIntValue(u64),
    FloatValue(f64),
    BoolValue(bool),
}

impl<'a> From<&'a str> for ParamValue<'a> {
    fn from(s: &'a str) -> Self {
        ParamValue::StringValue(s.into())
    }
}

impl From<String> for ParamValue<'_> {
    fn from(s: String) -> Self {
        ParamValue::StringValue(s.into())
    }
}

impl<'a> From<Cow<'a, str>> for ParamValue<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        ParamValue::StringValue(s)
    }
}

impl From<i64> for ParamValue<'_> {
    fn from(n: i64) -> Self {
        ParamValue::IntValue(n)
    }
}

impl From<i32> for ParamValue<'_> {
    fn from(n: i32) -> Self {
        ParamValue::IntValue(n.into())
    }
}

// tweet ids overflow i64 in principle, so keep the unsigned form.
impl From<u64> for ParamValue<'_> {
    fn from(n: u64) -> Self {
        ParamValue::UIntValue(n)
    }
}

impl From<u32> for ParamValue<'_> {
    fn from(n: u32) -> Self {
        ParamValue::UIntValue(n.into())
    }
}

impl From<f64> for ParamValue<'_> {
    fn from(n: f64) -> Self {
        ParamValue::FloatValue(n)
    }
}

impl From<bool> for ParamValue<'_> {
    fn from(b: bool) -> Self {
        ParamValue::BoolValue(b)
    }
}

impl<'a> ParamValue<'a> {
    /// Renders the value the way it is signed and sent.
    ///
    /// Booleans become `true`/`false`. Non-finite floats have no textual form
    /// the server accepts and are rejected.
    pub fn render(self, key: &str) -> Result<Cow<'a, str>> {
        match self {
            ParamValue::StringValue(s) => Ok(s),
            ParamValue::IntValue(n) => Ok(Cow::Owned(n.to_string())),
            ParamValue::UIntValue(n) => Ok(Cow::Owned(n.to_string())),
            ParamValue::FloatValue(n) if n.is_finite() => Ok(Cow::Owned(n.to_string())),
            ParamValue::FloatValue(_) => Err(Error::InvalidParameter {
                key: key.to_string(),
                reason: "number is not finite",
            }),
            ParamValue::BoolValue(b) => Ok(Cow::Borrowed(if b { "true" } else { "false" })),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bool_coercion() {
        assert_eq!(ParamValue::from(true).render("k").unwrap(), "true");
        assert_eq!(ParamValue::from(false).render("k").unwrap(), "false");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(ParamValue::from(25i64).render("count").unwrap(), "25");
        assert_eq!(
            ParamValue::from(565_686_632_033_300_481u64)
                .render("since_id")
                .unwrap(),
            "565686632033300481"
        );
        assert_eq!(ParamValue::from(-1.5).render("x").unwrap(), "-1.5");
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        match ParamValue::from(f64::NAN).render("lat") {
            Err(Error::InvalidParameter { key, .. }) => assert_eq!(key, "lat"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(ParamValue::from(f64::INFINITY).render("lat").is_err());
    }

    #[test]
    fn test_strings_pass_verbatim() {
        assert_eq!(
            ParamValue::from("a,b(c) d").render("q").unwrap(),
            "a,b(c) d"
        );
        assert_eq!(
            ParamValue::from(String::from("india")).render("track").unwrap(),
            "india"
        );
    }
}
