use std::{fmt, iter, mem, slice};

use indexmap::map::{self, IndexMap};

use super::ByteStr;

/// A name/value pair as received from the transport.
///
/// Clones are cheap; both halves are reference-counted slices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    name: ByteStr,
    value: ByteStr,
}

impl Header {
    pub fn new(name: impl Into<ByteStr>, value: impl Into<ByteStr>) -> Header {
        Header {
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
}

/// An insertion-ordered header multimap.
///
/// Names appear in first-occurrence order; a repeated name keeps every
/// value in received order. Lookup is byte-exact: a transport that wants
/// case-insensitive names must normalize them before inserting.
#[derive(Default)]
pub struct Headers {
    map: IndexMap<ByteStr, HeaderValue>,
}

impl Headers {
    pub fn new() -> Headers {
        Headers {
            map: IndexMap::new(),
        }
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Adds a value under `name`, keeping any existing ones.
    pub fn append(&mut self, name: impl Into<ByteStr>, value: impl Into<ByteStr>) {
        match self.map.entry(name.into()) {
            map::Entry::Occupied(mut entry) => entry.get_mut().push(value.into()),
            map::Entry::Vacant(entry) => {
                entry.insert(HeaderValue::One(value.into()));
            }
        }
    }

    /// Sets `name` to exactly one value, dropping any existing ones.
    /// Returns whether previous values were replaced.
    pub fn insert(&mut self, name: impl Into<ByteStr>, value: impl Into<ByteStr>) -> bool {
        self.map
            .insert(name.into(), HeaderValue::One(value.into()))
            .is_some()
    }

    /// The values under `name`, in received order.
    pub fn get(&self, name: &str) -> Values<'_> {
        self.map
            .get(name)
            .map(HeaderValue::values)
            .unwrap_or(Values {
                kind: ValuesKind::None,
            })
    }

    /// The first value under `name`.
    pub fn first(&self, name: &str) -> Option<&ByteStr> {
        self.get(name).next()
    }

    /// Flattens the map into `(name, value)` pairs: names in
    /// first-occurrence order, values under one name in received order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            map: self.map.iter(),
            current: None,
        }
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

enum HeaderValue {
    One(ByteStr),
    Many(Vec<ByteStr>),
}

impl HeaderValue {
    fn push(&mut self, value: ByteStr) {
        match self {
            HeaderValue::One(first) => {
                let first = mem::take(first);
                *self = HeaderValue::Many(vec![first, value]);
            }
            HeaderValue::Many(values) => values.push(value),
        }
    }

    fn values(&self) -> Values<'_> {
        let kind = match self {
            HeaderValue::One(value) => ValuesKind::One(iter::once(value)),
            HeaderValue::Many(values) => ValuesKind::Many(values.iter()),
        };

        Values { kind }
    }
}

impl fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}

/// Iterator over the values of one header name.
pub struct Values<'a> {
    kind: ValuesKind<'a>,
}

enum ValuesKind<'a> {
    None,
    One(iter::Once<&'a ByteStr>),
    Many(slice::Iter<'a, ByteStr>),
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a ByteStr;

    fn next(&mut self) -> Option<&'a ByteStr> {
        match self.kind {
            ValuesKind::None => None,
            ValuesKind::One(ref mut one) => one.next(),
            ValuesKind::Many(ref mut many) => many.next(),
        }
    }
}

/// Flattening iterator over every `(name, value)` pair.
pub struct Iter<'a> {
    map: map::Iter<'a, ByteStr, HeaderValue>,
    current: Option<(&'a ByteStr, Values<'a>)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a ByteStr, &'a ByteStr);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((name, ref mut values)) = self.current {
                if let Some(value) = values.next() {
                    return Some((name, value));
                }

                self.current = None;
            }

            let (name, values) = self.map.next()?;
            self.current = Some((name, values.values()));
        }
    }
}
