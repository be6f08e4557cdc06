//! Query parameters produced from criteria values.

use crate::errors::{CriteriaError, Result};
use std::fmt;

/// One named query parameter holding one or more formatted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    name: String,
    values: Vec<String>,
}

impl QueryParam {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, vec![value.into()])
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The single value of this parameter.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::MultiValuedParameter`] when the parameter does not hold
    /// exactly one value. Reading an `in` list this way is a caller bug, never truncated.
    pub fn value(&self) -> Result<&str> {
        match self.values.as_slice() {
            [value] => Ok(value),
            values => Err(CriteriaError::MultiValuedParameter {
                name: self.name.clone(),
                count: values.len(),
            }),
        }
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// All values joined by `,`.
    #[must_use]
    pub fn joined(&self) -> String {
        self.values.join(",")
    }

    #[must_use]
    pub fn is_multi_valued(&self) -> bool {
        self.values.len() > 1
    }
}

/// Ordered multimap of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<QueryParam>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, param: QueryParam) {
        self.params.push(param);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueryParam> {
        self.params.iter()
    }

    /// The first parameter with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryParam> {
        self.params.iter().find(|param| param.name == name)
    }

    /// Every parameter with the given name, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a QueryParam> + 'a {
        self.params.iter().filter(move |param| param.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(QueryParam::name)
    }

    /// Render as a form-urlencoded query string, multi-valued parameters joined by `,`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for param in &self.params {
            serializer.append_pair(&param.name, &param.joined());
        }
        serializer.finish()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl Extend<QueryParam> for QueryParams {
    fn extend<I: IntoIterator<Item = QueryParam>>(&mut self, iter: I) {
        self.params.extend(iter);
    }
}

impl FromIterator<QueryParam> for QueryParams {
    fn from_iter<I: IntoIterator<Item = QueryParam>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for QueryParams {
    type Item = QueryParam;
    type IntoIter = std::vec::IntoIter<QueryParam>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = &'a QueryParam;
    type IntoIter = std::slice::Iter<'a, QueryParam>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value_read() {
        let param = QueryParam::single("name.equals", "bob");
        assert_eq!(param.value().unwrap(), "bob");
        assert!(!param.is_multi_valued());
    }

    #[test]
    fn test_multi_value_single_read_fails() {
        let param = QueryParam::new("id.in", vec!["1".into(), "2".into()]);
        assert_eq!(
            param.value(),
            Err(CriteriaError::MultiValuedParameter {
                name: "id.in".into(),
                count: 2
            })
        );
        assert_eq!(param.values(), ["1", "2"]);
        assert_eq!(param.joined(), "1,2");
    }

    #[test]
    fn test_empty_value_list_single_read_fails() {
        let param = QueryParam::new("id.in", Vec::new());
        assert!(param.value().is_err());
        assert_eq!(param.joined(), "");
    }

    #[test]
    fn test_query_string_is_encoded_in_order() {
        let params: QueryParams = [
            QueryParam::single("name.contains", "a b&c"),
            QueryParam::new("id.in", vec!["1".into(), "2".into()]),
        ]
        .into_iter()
        .collect();

        assert_eq!(params.to_query_string(), "name.contains=a+b%26c&id.in=1%2C2");
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["name.contains", "id.in"]);
    }

    #[test]
    fn test_get_all_keeps_duplicates() {
        let mut params = QueryParams::new();
        params.push(QueryParam::single("tag", "a"));
        params.push(QueryParam::single("tag", "b"));
        assert_eq!(params.get("tag").unwrap().value().unwrap(), "a");
        assert_eq!(params.get_all("tag").count(), 2);
        assert_eq!(params.len(), 2);
    }
}
