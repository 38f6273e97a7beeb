//! Single- and multi-valued views of query parameters and headers.

use std::collections::HashMap;

/// A key-value source that may repeat keys.
///
/// The same logical data is exposed twice: a single-valued view and a
/// multi-valued view. When built from occurrences with [`push`](Self::push),
/// the single view holds the **last** occurrence and the multi view holds all
/// of them in order. Gateways that deliver both views precomputed can hand
/// them over with [`from_maps`](Self::from_maps); no consistency between the
/// two is assumed when a key repeats.
///
/// Keys are matched case-sensitively.
///
/// # Example
///
/// ```rust
/// use bindery_extract::MultiValues;
///
/// let mut query = MultiValues::new();
/// query.push("terms", "a");
/// query.push("terms", "b");
///
/// assert_eq!(query.get("terms"), Some("b"));
/// assert_eq!(query.get_all("terms"), Some(&["a".to_string(), "b".to_string()][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultiValues {
    single: HashMap<String, String>,
    multi: HashMap<String, Vec<String>>,
}

impl MultiValues {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source from precomputed single and multi views.
    #[must_use]
    pub fn from_maps(single: HashMap<String, String>, multi: HashMap<String, Vec<String>>) -> Self {
        Self { single, multi }
    }

    /// Records one occurrence of `name`.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        self.multi
            .entry(name.clone())
            .or_default()
            .push(value.clone());
        self.single.insert(name, value);
    }

    /// Sets the single-valued view for `name` only.
    pub fn insert_single(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.single.insert(name.into(), value.into());
    }

    /// Sets the multi-valued view for `name` only.
    pub fn insert_multi(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.multi.insert(name.into(), values);
    }

    /// Returns the single-valued view of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.single.get(name).map(String::as_str)
    }

    /// Returns the multi-valued view of `name`.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.multi.get(name).map(Vec::as_slice)
    }

    /// Returns true if either view knows `name`.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.single.contains_key(name) || self.multi.contains_key(name)
    }

    /// Returns true if both views are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.single.is_empty() && self.multi.is_empty()
    }

    /// Returns the single-valued view.
    #[must_use]
    pub fn single(&self) -> &HashMap<String, String> {
        &self.single
    }

    /// Returns the multi-valued view.
    #[must_use]
    pub fn multi(&self) -> &HashMap<String, Vec<String>> {
        &self.multi
    }
}
