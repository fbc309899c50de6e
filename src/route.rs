use std::collections::HashMap;

/// Positional parameter configuration for one matched route.
///
/// Maps a path-parameter name to a fixed index into the slash-split
/// request path. Indices count the split as-is, so with a leading `/`
/// the first real segment sits at index 1.
#[derive(Clone, Debug, Default)]
pub struct RouteConfig {
    params: HashMap<String, usize>,
}

impl RouteConfig {
    pub fn new() -> RouteConfig {
        RouteConfig {
            params: HashMap::new(),
        }
    }

    /// Registers `name` at `index`.
    pub fn param(mut self, name: impl Into<String>, index: usize) -> Self {
        self.params.insert(name.into(), index);
        self
    }

    /// Derives the configuration from a `:name` path template.
    ///
    /// `/users/:id/posts/:post` maps `id` to 2 and `post` to 4.
    pub fn from_template(template: &str) -> RouteConfig {
        let mut config = RouteConfig::new();
        for (index, segment) in template.split('/').enumerate() {
            if let Some(name) = segment.strip_prefix(':') {
                config.params.insert(name.to_owned(), index);
            }
        }
        config
    }

    /// The configured index for `name`, if any.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.get(name).copied()
    }
}
