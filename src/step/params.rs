//! Ordered step parameters.
//!
//! Declared `with:` inputs and `env:` entries are kept as an ordered
//! association list rather than a map. Equality is order-sensitive: the
//! same pairs in a different order are a different parameter list unless
//! both sides are [`normalized`](StepParams::normalized) first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single `key=value` step parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepParam {
    /// Parameter name as declared in the workflow.
    pub key: String,

    /// Parameter value.
    pub value: String,
}

impl StepParam {
    /// Create a parameter.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for StepParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Ordered list of step parameters.
///
/// # Example
///
/// ```
/// use workflow_fixtures::step::StepParams;
///
/// let a: StepParams = [("token", "***"), ("ref", "main")].into_iter().collect();
/// let b: StepParams = [("ref", "main"), ("token", "***")].into_iter().collect();
///
/// assert_ne!(a, b);
/// assert_eq!(a.normalized(), b.normalized());
/// assert_eq!(a.get("ref"), Some("main"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepParams(Vec<StepParam>);

impl StepParams {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a parameter, keeping declaration order.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(StepParam::new(key, value));
    }

    /// Value of the first parameter with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Iterate parameters in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, StepParam> {
        self.0.iter()
    }

    /// Parameter keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|p| p.key.as_str())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy sorted by key (stable for equal keys).
    pub fn normalized(&self) -> Self {
        let mut params = self.0.clone();
        params.sort_by(|a, b| a.key.cmp(&b.key));
        Self(params)
    }
}

impl<K, V> FromIterator<(K, V)> for StepParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| StepParam::new(key, value))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a StepParams {
    type Item = &'a StepParam;
    type IntoIter = std::slice::Iter<'a, StepParam>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for StepParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, param) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, "]")
    }
}
