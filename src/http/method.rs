use std::fmt;
use std::str::FromStr;

/// An HTTP method.
///
/// The set is closed: a transport-reported token outside it is rejected
/// when the request view is built, never mapped to a catch-all variant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Trace,
    Connect,
    Patch,
}

impl Method {
    /// The canonical token for this method.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
            Method::Patch => "PATCH",
        }
    }

    /// Whether requests with this method carry a body.
    ///
    /// Only these methods have their body drained at construction time;
    /// for all others the exchange's stream is dropped unread.
    pub fn has_request_body(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl FromStr for Method {
    type Err = InvalidMethod;

    /// Matches the token exactly; method tokens are case-sensitive, so
    /// `get` is not `GET`.
    fn from_str(token: &str) -> Result<Method, InvalidMethod> {
        match token {
            "GET" => Ok(Method::Get),
            "PUT" => Ok(Method::Put),
            "POST" => Ok(Method::Post),
            "DELETE" => Ok(Method::Delete),
            "OPTIONS" => Ok(Method::Options),
            "HEAD" => Ok(Method::Head),
            "TRACE" => Ok(Method::Trace),
            "CONNECT" => Ok(Method::Connect),
            "PATCH" => Ok(Method::Patch),
            _ => Err(InvalidMethod(())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a method token is outside the supported set.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InvalidMethod(());

impl fmt::Display for InvalidMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unsupported HTTP method")
    }
}

impl std::error::Error for InvalidMethod {}
