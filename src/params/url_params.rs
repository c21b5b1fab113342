use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

/// Value of a query parameter; repeated keys collapse into `Multiple`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ParamValue {
    /// First value, which is what single-valued lookups like `width` use.
    #[must_use]
    pub fn first(&self) -> &str {
        match self {
            Self::Single(value) => value,
            Self::Multiple(values) => values.first().map_or("", String::as_str),
        }
    }

    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => vec![value.as_str()],
            Self::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

/// Query parameters in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlParams {
    entries: IndexMap<String, ParamValue>,
}

impl UrlParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, turning the key into a list when it is already present.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.entries.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(ParamValue::Single(value));
            }
            Entry::Occupied(mut slot) => {
                let current = slot.get_mut();
                *current = match std::mem::replace(current, ParamValue::Multiple(Vec::new())) {
                    ParamValue::Single(existing) => ParamValue::Multiple(vec![existing, value]),
                    ParamValue::Multiple(mut values) => {
                        values.push(value);
                        ParamValue::Multiple(values)
                    }
                };
            }
        }
    }

    /// Replaces every value of `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(ParamValue::first)
    }

    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .get(key)
            .map(ParamValue::values)
            .unwrap_or_default()
    }

    /// Parses a positive integer parameter, ignoring missing or malformed values.
    #[must_use]
    pub fn parse_u32(&self, key: &str) -> Option<u32> {
        self.get(key)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|value| *value > 0)
    }

    /// Serializes as `key=value` pairs in insertion order, without a leading `?`.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in &self.entries {
            for value in value.values() {
                pairs.push(format!("{key}={value}"));
            }
        }
        pairs.join("&")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for UrlParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

/// Parses the query part of `href`.
///
/// Everything after the first `?` up to an optional `#` fragment is split on
/// `&`; a segment without `=` maps to an empty value. Values are kept as
/// written, without percent-decoding.
#[must_use]
pub fn get_url_params(href: &str) -> UrlParams {
    let mut params = UrlParams::new();
    let Some((_, query)) = href.split_once('?') else {
        return params;
    };
    let query = query.split_once('#').map_or(query, |(query, _)| query);

    for segment in query.split('&').filter(|segment| !segment.is_empty()) {
        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        params.append(key, value);
    }
    params
}

/// Serializes params back into a query string starting with `?`.
///
/// Keys are sorted; list values become repeated `key=value` pairs.
#[must_use]
pub fn build_url_string_from_url_params(params: &UrlParams) -> String {
    let mut keys: Vec<&String> = params.entries.keys().collect();
    keys.sort();

    let mut pairs = Vec::new();
    for key in keys {
        for value in params.entries[key].values() {
            pairs.push(format!("{key}={value}"));
        }
    }
    format!("?{}", pairs.join("&"))
}
