use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use bytes::Bytes;

/// An immutable UTF-8 string backed by [`Bytes`].
///
/// The header, query and cookie accessors hand out owned pairs on every
/// call; backing them with `Bytes` makes those clones reference bumps
/// instead of allocations.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ByteStr(Bytes);

impl ByteStr {
    pub fn from_static(str: &'static str) -> ByteStr {
        ByteStr(Bytes::from_static(str.as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        self
    }
}

impl std::ops::Deref for ByteStr {
    type Target = str;

    fn deref(&self) -> &str {
        // SAFETY: every constructor starts from `str`
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }
}

// Must agree with the `Borrow<str>` impl, so hash as `str`, not as a
// raw byte slice.
impl Hash for ByteStr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl AsRef<str> for ByteStr {
    fn as_ref(&self) -> &str {
        self
    }
}

impl Borrow<str> for ByteStr {
    fn borrow(&self) -> &str {
        self
    }
}

impl PartialEq<str> for ByteStr {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<ByteStr> for str {
    fn eq(&self, other: &ByteStr) -> bool {
        self == other.as_str()
    }
}

impl From<String> for ByteStr {
    fn from(string: String) -> ByteStr {
        ByteStr(string.into())
    }
}

impl From<&str> for ByteStr {
    fn from(str: &str) -> ByteStr {
        ByteStr(str.to_owned().into())
    }
}

impl fmt::Debug for ByteStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for ByteStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}
