use std::fmt;
use std::io::{self, Read};
use std::net::SocketAddr;

use bytes::Bytes;

use crate::http::{ByteStr, Headers, Uri};

/// One inbound HTTP exchange, as handed over by the transport layer.
///
/// The transport has already parsed the request line and headers; the
/// body may still be attached to the wire and can be drained exactly
/// once.
pub struct Exchange {
    method: ByteStr,
    uri: Uri,
    headers: Headers,
    remote_addr: Option<SocketAddr>,
    body: BodyStream,
}

impl Exchange {
    pub fn builder() -> ExchangeBuilder {
        ExchangeBuilder::new()
    }

    /// The raw method token as the transport reported it.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }

    /// Splits the exchange into its head and its body stream.
    pub fn into_parts(self) -> (Parts, BodyStream) {
        (
            Parts {
                method: self.method,
                uri: self.uri,
                headers: self.headers,
                remote_addr: self.remote_addr,
            },
            self.body,
        )
    }
}

/// The head of an [`Exchange`], split from its body stream.
pub struct Parts {
    /// The raw method token.
    pub method: ByteStr,
    /// The request URI.
    pub uri: Uri,
    /// Headers in received order.
    pub headers: Headers,
    /// The remote peer, when the transport knows one.
    pub remote_addr: Option<SocketAddr>,
}

/// Builder for an [`Exchange`].
///
/// Defaults to `GET /` with no headers, no peer address and an empty
/// body. URI parse failures are deferred to [`build`](ExchangeBuilder::build).
pub struct ExchangeBuilder {
    method: ByteStr,
    uri: Result<Uri, ::http::Error>,
    headers: Headers,
    remote_addr: Option<SocketAddr>,
    body: BodyStream,
}

impl ExchangeBuilder {
    pub fn new() -> ExchangeBuilder {
        ExchangeBuilder {
            method: ByteStr::from_static("GET"),
            uri: Ok(Uri::from_static("/")),
            headers: Headers::new(),
            remote_addr: None,
            body: BodyStream::empty(),
        }
    }

    /// Sets the raw method token.
    ///
    /// The token is not validated here; resolving it against the
    /// supported method set happens when the request view is built.
    pub fn method(mut self, method: impl Into<ByteStr>) -> Self {
        self.method = method.into();
        self
    }

    pub fn uri<U>(mut self, uri: U) -> Self
    where
        Uri: TryFrom<U>,
        <Uri as TryFrom<U>>::Error: Into<::http::Error>,
    {
        self.uri = Uri::try_from(uri).map_err(Into::into);
        self
    }

    /// Appends a header, keeping any previously added values.
    pub fn header(mut self, name: impl Into<ByteStr>, value: impl Into<ByteStr>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn remote_addr(mut self, addr: SocketAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    pub fn body(mut self, body: BodyStream) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Result<Exchange, ::http::Error> {
        Ok(Exchange {
            method: self.method,
            uri: self.uri?,
            headers: self.headers,
            remote_addr: self.remote_addr,
            body: self.body,
        })
    }
}

impl Default for ExchangeBuilder {
    fn default() -> ExchangeBuilder {
        ExchangeBuilder::new()
    }
}

/// The body of an exchange: a blocking byte source drained at most once.
pub struct BodyStream {
    kind: BodyKind,
}

enum BodyKind {
    Stream(Box<dyn Read + Send>),
    Once(Bytes),
    Empty,
}

impl BodyStream {
    /// A body backed by a live transport stream.
    pub fn stream(read: impl Read + Send + 'static) -> BodyStream {
        BodyStream {
            kind: BodyKind::Stream(Box::new(read)),
        }
    }

    /// A body already buffered in memory.
    pub fn once(bytes: impl Into<Bytes>) -> BodyStream {
        BodyStream {
            kind: BodyKind::Once(bytes.into()),
        }
    }

    /// The empty body.
    pub fn empty() -> BodyStream {
        BodyStream {
            kind: BodyKind::Empty,
        }
    }

    /// Drains the remaining bytes, consuming the stream.
    ///
    /// Taking `self` by value is what makes the body readable at most
    /// once; a second read does not exist to go wrong.
    pub fn read_all(self) -> io::Result<Bytes> {
        match self.kind {
            BodyKind::Stream(mut read) => {
                let mut buf = Vec::new();
                read.read_to_end(&mut buf)?;
                Ok(buf.into())
            }
            BodyKind::Once(bytes) => Ok(bytes),
            BodyKind::Empty => Ok(Bytes::new()),
        }
    }
}

impl Default for BodyStream {
    fn default() -> BodyStream {
        BodyStream::empty()
    }
}

impl fmt::Debug for BodyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyStream").finish()
    }
}
