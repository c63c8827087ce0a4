/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedResponse<V> {
    /// The key is present. `None` means an explicit null was cached.
    Found(Option<V>),
    NotFound,
}

impl<V> CachedResponse<V> {
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The cached value, flattening explicit nulls and misses together.
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Found(value) => value,
            Self::NotFound => None,
        }
    }
}

impl<V> From<Option<Option<V>>> for CachedResponse<V> {
    fn from(lookup: Option<Option<V>>) -> Self {
        lookup.map_or(Self::NotFound, Self::Found)
    }
}
