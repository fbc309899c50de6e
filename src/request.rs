use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use bytes::Bytes;

use crate::attributes::Attributes;
use crate::error::{BodyError, RequestError};
use crate::exchange::Exchange;
use crate::http::{ContentType, Cookie, Header, Headers, Method, QueryParam, Uri};
use crate::route::RouteConfig;

#[cfg(feature = "json")]
use serde::de::DeserializeOwned;

/// A typed view over one inbound HTTP exchange.
///
/// Built once per exchange by the transport layer and handed down the
/// handler chain. Every accessor is idempotent: the body is captured at
/// construction and never re-read, and everything else is derived from
/// already-materialized state. The view is single-owner; it must not be
/// shared across concurrently running handlers.
pub struct Request<'r> {
    route: &'r RouteConfig,
    method: Method,
    uri: Uri,
    headers: Headers,
    remote_addr: Option<SocketAddr>,
    raw_body: Option<Bytes>,
    attributes: Attributes,
}

impl<'r> Request<'r> {
    /// Builds the view, resolving the method and capturing the body.
    ///
    /// The method token is resolved against the closed [`Method`] set
    /// first; only body-carrying methods then drain the exchange's body
    /// stream. Either failure aborts construction.
    pub fn new(route: &'r RouteConfig, exchange: Exchange) -> Result<Request<'r>, RequestError> {
        let (parts, body) = exchange.into_parts();

        let method = match parts.method.as_str().parse::<Method>() {
            Ok(method) => method,
            Err(_) => {
                log::debug!("rejecting exchange with method token '{}'", parts.method);
                return Err(RequestError::UnsupportedMethod(parts.method));
            }
        };

        let raw_body = if method.has_request_body() {
            let bytes = body.read_all().map_err(RequestError::BodyRead)?;
            log::trace!("captured {} byte body for {} {}", bytes.len(), method, parts.uri);
            Some(bytes)
        } else {
            // Non-body methods drop the stream unread.
            None
        };

        Ok(Request {
            route,
            method,
            uri: parts.uri,
            headers: parts.headers,
            remote_addr: parts.remote_addr,
            raw_body,
            attributes: Attributes::new(),
        })
    }

    /// The request method, resolved once at construction.
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// The path component of the request URI.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// The host named by the request URI.
    ///
    /// Only absolute-form URIs carry one; the origin-form URIs that
    /// servers usually see yield `None`.
    pub fn host(&self) -> Option<&str> {
        self.uri.host()
    }

    /// The remote peer's IP address, when the transport exposed one.
    ///
    /// Absence is an expected outcome (unix-socket transports, test
    /// exchanges), never an error.
    pub fn ip(&self) -> Option<IpAddr> {
        self.remote_addr.map(|addr| addr.ip())
    }

    /// The raw body captured at construction.
    ///
    /// Fails with [`BodyError::Unavailable`] when the method does not
    /// carry a body; that state is illegal to ask about, not an empty
    /// buffer.
    pub fn raw_body(&self) -> Result<&Bytes, BodyError> {
        self.raw_body.as_ref().ok_or(BodyError::Unavailable)
    }

    /// The body decoded as UTF-8.
    ///
    /// Invalid sequences are replaced rather than rejected; the only
    /// failure is a method that never carried a body.
    pub fn body(&self) -> Result<Cow<'_, str>, BodyError> {
        self.raw_body().map(|bytes| String::from_utf8_lossy(bytes))
    }

    /// The body parsed as a JSON value.
    #[cfg(feature = "json")]
    pub fn body_as_json(&self) -> Result<serde_json::Value, BodyError> {
        serde_json::from_str(&self.body()?).map_err(BodyError::MalformedJson)
    }

    /// Deserializes the body into a `T`.
    #[cfg(feature = "json")]
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BodyError> {
        serde_json::from_str(&self.body()?).map_err(BodyError::MalformedJson)
    }

    /// Every header as it appeared on the wire.
    ///
    /// Multi-valued names flatten into one entry per value; name order
    /// and per-name value order are both preserved.
    pub fn headers(&self) -> Vec<Header> {
        self.headers
            .iter()
            .map(|(name, value)| Header::new(name.clone(), value.clone()))
            .collect()
    }

    /// The headers whose name is exactly `name`.
    ///
    /// The comparison is byte-exact; casing is expected to be settled by
    /// the transport before the exchange reaches this crate.
    pub fn headers_named(&self, name: &str) -> Vec<Header> {
        self.headers
            .iter()
            .filter(|(n, _)| n.as_str() == name)
            .map(|(n, value)| Header::new(n.clone(), value.clone()))
            .collect()
    }

    /// The first header named exactly `name`.
    pub fn first_header(&self, name: &str) -> Option<Header> {
        self.headers
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(n, value)| Header::new(n.clone(), value.clone()))
    }

    /// The content type, from the first `Content-Type` header.
    pub fn content_type(&self) -> Option<ContentType> {
        self.headers
            .first("Content-Type")
            .map(|value| ContentType::new(value.clone()))
    }

    /// All query parameters, in source order with duplicates kept.
    pub fn query_params(&self) -> Vec<QueryParam> {
        self.uri
            .query()
            .map(QueryParam::parse_query)
            .unwrap_or_default()
    }

    /// The query parameters whose key is exactly `key`.
    pub fn query_params_named(&self, key: &str) -> Vec<QueryParam> {
        self.query_params()
            .into_iter()
            .filter(|param| param.key() == key)
            .collect()
    }

    /// The first query parameter with key `key`.
    pub fn first_query_param(&self, key: &str) -> Option<QueryParam> {
        self.query_params()
            .into_iter()
            .find(|param| param.key() == key)
    }

    /// The path segment for the route parameter `name`.
    ///
    /// Absent when the route does not define `name`, or when this
    /// request's path has fewer segments than the configured index
    /// (a route shaped for a longer path than what actually arrived).
    pub fn route_param(&self, name: &str) -> Option<&str> {
        let index = self.route.param_index(name)?;

        let mut segments: Vec<&str> = self.uri.path().split('/').collect();
        while segments.last() == Some(&"") {
            segments.pop();
        }

        segments.get(index).copied()
    }

    /// All cookies sent with the request.
    ///
    /// Every `Cookie` header is parsed; results concatenate in
    /// header-encounter order, then within-header order.
    pub fn cookies(&self) -> Vec<Cookie> {
        self.headers
            .get("Cookie")
            .flat_map(|value| Cookie::parse_header(value))
            .collect()
    }

    /// Stores a request-scoped attribute; the last write for a name
    /// wins.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Any + Send) {
        self.attributes.set(name, value);
    }

    /// Whether an attribute is stored under `name`.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.has(name)
    }

    /// The attribute stored under `name`, if present with type `T`.
    pub fn attribute<T: Any>(&self, name: &str) -> Option<&T> {
        self.attributes.get(name)
    }

    /// Drops the attribute under `name`; `true` when something was
    /// removed.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        self.attributes.remove(name)
    }
}

impl fmt::Debug for Request<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}
