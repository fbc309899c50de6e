use super::ByteStr;

/// A cookie sent by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cookie {
    name: ByteStr,
    value: ByteStr,
}

impl Cookie {
    pub fn new(name: impl Into<ByteStr>, value: impl Into<ByteStr>) -> Cookie {
        Cookie {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Parses the value of one `Cookie` header into its cookies.
    ///
    /// Pairs are `;`-separated; a pair without `=` or without a name is
    /// dropped. Cookie values may themselves contain `=`, so only the
    /// first occurrence splits.
    pub fn parse_header(header: &str) -> Vec<Cookie> {
        header
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                if name.is_empty() {
                    return None;
                }
                Some(Cookie::new(name, value))
            })
            .collect()
    }
}
