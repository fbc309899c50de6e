//! A typed, query-able view over one inbound HTTP exchange.
//!
//! A transport layer hands this crate an already-negotiated exchange:
//! method token, URI, ordered headers, an optional peer address and a
//! body stream readable exactly once. [`Request::new`] turns it into an
//! immutable accessor object for handler code, plus a mutable
//! request-scoped attribute bag for passing state between handlers.

mod attributes;
mod error;
mod exchange;
mod request;
mod route;

pub mod http;

pub use attributes::Attributes;
pub use error::{BodyError, RequestError};
pub use exchange::{BodyStream, Exchange, ExchangeBuilder, Parts};
pub use request::Request;
pub use route::RouteConfig;
