//! Label tuples identifying one series under a metric.

/// Ordered `(key, value)` pairs distinguishing one series from another under
/// the same metric name. Pairs are sorted by key at construction so equal
/// tuples compare equal regardless of call-site order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelSet {
    pairs: Vec<(String, String)>,
}

impl LabelSet {
    pub fn new(labels: &[(&str, &str)]) -> Self {
        let mut pairs: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        pairs.sort();
        Self { pairs }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether this tuple carries exactly the given schema keys.
    pub fn matches_keys(&self, keys: &[String]) -> bool {
        let mut sorted: Vec<&String> = keys.iter().collect();
        sorted.sort();
        self.pairs.len() == sorted.len()
            && self.pairs.iter().zip(sorted).all(|((k, _), want)| k == want)
    }

    /// Render as `k1="v1",k2="v2"` with escaped values.
    pub fn render(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Helper to escape label values for text exposition.
pub(crate) fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}
