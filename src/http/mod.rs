mod bytestr;
mod content_type;
mod cookie;
mod header;
mod method;
mod query;

pub use bytestr::ByteStr;
pub use content_type::ContentType;
pub use cookie::Cookie;
pub use header::{Header, Headers, Iter, Values};
pub use method::{InvalidMethod, Method};
pub use query::QueryParam;

pub use ::http::Uri;
pub use bytes::Bytes;
