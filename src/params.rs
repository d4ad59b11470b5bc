/// An ordered collection of query parameters for a request
///
/// Values are form-encoded when the request is built, so CQL queries containing quotes, spaces
/// or `=` can be passed as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    inner: Vec<(String, String)>,
}

impl Parameters {
    /// Creates a new empty collection of parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing an earlier value for the same key
    pub fn param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        let key = key.into();
        let value = value.to_string();
        match self.inner.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.inner.push((key, value)),
        }
        self
    }

    /// Sets the CQL `query` parameter
    pub fn query(self, cql: &str) -> Self {
        self.param("query", cql)
    }

    /// Sets the `limit` parameter
    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit)
    }

    /// Adds multiple parameters to the collection
    pub fn extend<I, K, V>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        for (k, v) in iter {
            self = self.param(k, v);
        }
        self
    }

    /// Returns the value of a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the parameters as key/value pairs, in insertion order
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.inner
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Parameters::new().extend(iter)
    }
}

// Implement From for arrays to support the collection! macro
impl<const N: usize> From<[(&str, &str); N]> for Parameters {
    fn from(arr: [(&str, &str); N]) -> Self {
        arr.into_iter().collect()
    }
}

/// Escapes a value for use inside a double-quoted CQL term.
pub fn escape_cql(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '*' | '?' | '^') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_values_replace_earlier_ones() {
        let params = Parameters::new().limit(10).query("title=x").limit(25);

        assert_eq!(params.get("limit"), Some("25"));
        assert_eq!(
            params.as_pairs(),
            &[
                ("limit".to_string(), "25".to_string()),
                ("query".to_string(), "title=x".to_string()),
            ]
        );
    }

    #[test]
    fn builds_from_collection_macro() {
        let params: Parameters = crate::collection! { "idType" => "INSTANCE" };

        assert_eq!(params.get("idType"), Some("INSTANCE"));
    }

    #[test]
    fn escapes_cql_specials() {
        assert_eq!(escape_cql(r#"a"b\c*"#), r#"a\"b\\c\*"#);
    }
}
