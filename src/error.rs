use std::error::Error as StdError;
use std::{fmt, io};

use crate::http::ByteStr;

/// Error building a [`Request`](crate::Request) from an exchange.
///
/// Construction either yields a fully-initialized view or one of these;
/// no partially-built request is ever handed to a handler.
#[derive(Debug)]
pub enum RequestError {
    /// The transport reported a method token outside the supported set.
    UnsupportedMethod(ByteStr),
    /// Draining the request body failed.
    BodyRead(io::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::UnsupportedMethod(token) => {
                write!(f, "unsupported HTTP method '{}'", token)
            }
            RequestError::BodyRead(err) => write!(f, "failed to read request body: {}", err),
        }
    }
}

impl StdError for RequestError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            RequestError::UnsupportedMethod(_) => None,
            RequestError::BodyRead(err) => Some(err),
        }
    }
}

/// Error returned by the body accessors of a [`Request`](crate::Request).
#[derive(Debug)]
pub enum BodyError {
    /// The request method does not carry a body, so none was captured.
    Unavailable,
    /// The captured body is not valid JSON.
    #[cfg(feature = "json")]
    MalformedJson(serde_json::Error),
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyError::Unavailable => f.write_str("no body was captured for this request"),
            #[cfg(feature = "json")]
            BodyError::MalformedJson(err) => write!(f, "malformed JSON body: {}", err),
        }
    }
}

impl StdError for BodyError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            BodyError::Unavailable => None,
            #[cfg(feature = "json")]
            BodyError::MalformedJson(err) => Some(err),
        }
    }
}
