//! Path parameter storage.
//!
//! Path parameters are always single-valued. Routes rarely carry more than a
//! handful of them, so they are kept inline in a small vector.

use smallvec::SmallVec;

/// Maximum number of parameters stored inline (stack allocated).
const INLINE_PARAMS: usize = 4;

/// Path parameters produced by a route match.
///
/// Lookups are case-sensitive and each name holds one value; inserting an
/// existing name replaces its value.
///
/// # Example
///
/// ```rust
/// use bindery_extract::Params;
///
/// let mut params = Params::new();
/// params.insert("userId", "123");
/// params.insert("userId", "456");
///
/// assert_eq!(params.get("userId"), Some("456"));
/// assert_eq!(params.get("userid"), None);
/// assert_eq!(params.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.inner.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.inner.push((name, value)),
        }
    }

    /// Returns the value for a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_new() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let mut params = Params::new();
        params.insert("id", "123");
        params.insert("name", "alice");

        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.get("name"), Some("alice"));
        assert_eq!(params.get("unknown"), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut params = Params::new();
        params.insert("id", "1");
        params.insert("id", "2");

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("id"), Some("2"));
    }

    #[test]
    fn test_case_sensitive() {
        let params: Params = [("Id", "1")].into_iter().collect();
        assert_eq!(params.get("id"), None);
        assert_eq!(params.get("Id"), Some("1"));
    }

    #[test]
    fn test_iter_keeps_order() {
        let params: Params = [("b", "2"), ("a", "1")].into_iter().collect();
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("b", "2"), ("a", "1")]);
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let params: Params = (0..10).map(|i| (format!("p{i}"), i.to_string())).collect();
        assert_eq!(params.len(), 10);
        assert_eq!(params.get("p9"), Some("9"));
    }
}
