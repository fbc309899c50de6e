use std::fmt;

use mime::Mime;

use super::ByteStr;

/// The value of a `Content-Type` header.
///
/// Construction keeps the raw value untouched; the media-type grammar
/// is applied on demand by [`mime`](ContentType::mime), and a value the
/// grammar rejects still round-trips through [`as_str`](ContentType::as_str).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentType {
    value: ByteStr,
}

impl ContentType {
    pub fn new(value: impl Into<ByteStr>) -> ContentType {
        ContentType {
            value: value.into(),
        }
    }

    /// The raw header value.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The value parsed as a media type.
    pub fn mime(&self) -> Result<Mime, mime::FromStrError> {
        self.value.parse()
    }

    /// Whether this content type describes a JSON payload, either
    /// directly (`application/json`) or by suffix (`application/vnd.api+json`).
    pub fn is_json(&self) -> bool {
        match self.mime() {
            Ok(mime) => mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON),
            Err(_) => false,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
