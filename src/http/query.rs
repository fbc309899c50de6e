use super::ByteStr;

/// One key/value pair from the raw query string.
///
/// Both halves are exactly as they appeared on the wire; no
/// percent-decoding happens at this layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryParam {
    key: ByteStr,
    value: ByteStr,
}

impl QueryParam {
    pub fn new(key: impl Into<ByteStr>, value: impl Into<ByteStr>) -> QueryParam {
        QueryParam {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Splits a raw query string into its parameters.
    ///
    /// Tokens are `&`-separated and split on `=`; a token that does not
    /// yield exactly a key and a value (no `=`, or a second `=`) is
    /// dropped rather than reported. Duplicate keys and token order are
    /// preserved.
    pub fn parse_query(query: &str) -> Vec<QueryParam> {
        query
            .split('&')
            .filter_map(|token| {
                let (key, value) = token.split_once('=')?;
                if value.contains('=') {
                    return None;
                }
                Some(QueryParam::new(key, value))
            })
            .collect()
    }
}
