//! Insertion-ordered token → replacement mapping.

use indexmap::IndexMap;

/// Mapping from placeholder token to replacement text.
///
/// Substitutions are applied in insertion order, since one token may be a
/// substring of another. Inserting an existing token replaces its value and
/// keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaceholderMap {
    entries: IndexMap<String, String>,
}

impl PlaceholderMap {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert or update a token. Returns the previous value when the token existed.
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(token.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in application order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether any token occurs in `text`
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.entries
            .keys()
            .any(|k| !k.is_empty() && text.contains(k.as_str()))
    }

    /// Replace every token in `text`, one token at a time in map order.
    ///
    /// A replacement value that itself contains a later token is rewritten
    /// again by that later token.
    #[must_use = "returns the substituted text"]
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (token, value) in self.entries.iter() {
            if !token.is_empty() && out.contains(token.as_str()) {
                out = out.replace(token.as_str(), value);
            }
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlaceholderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position_on_update() {
        let mut map = PlaceholderMap::new();
        map.insert("{{A}}", "1");
        map.insert("{{B}}", "2");
        assert_eq!(map.insert("{{A}}", "3"), Some("1".to_string()));
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["{{A}}", "{{B}}"]);
        assert_eq!(map.get("{{A}}"), Some("3"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_update_keeps_application_order() {
        // a value may carry a later token, so "{{X}}" has to stay ahead of "{{Y}}"
        let mut map: PlaceholderMap = [("{{X}}", "{{Y}}"), ("{{Y}}", "y")].into_iter().collect();
        assert_eq!(map.apply("{{X}}"), "y");
        map.insert("{{X}}", "{{Y}}!");
        assert_eq!(map.apply("{{X}}"), "y!");
    }

    #[test]
    fn test_apply_in_insertion_order() {
        // "{{TANGGAL}}" is a substring of "{{TANGGAL_PELAKSANAAN}}"
        let map: PlaceholderMap = [
            ("{{TANGGAL_PELAKSANAAN}}", "1 Mei"),
            ("{{TANGGAL}}", "30 April"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            map.apply("{{TANGGAL_PELAKSANAAN}} / {{TANGGAL}}"),
            "1 Mei / 30 April"
        );
    }

    #[test]
    fn test_apply_replaces_every_occurrence() {
        let map: PlaceholderMap = [("{{KOTA}}", "Jakarta")].into_iter().collect();
        assert_eq!(map.apply("{{KOTA}}, {{KOTA}}"), "Jakarta, Jakarta");
    }

    #[test]
    fn test_matches() {
        let map: PlaceholderMap = [("{{KOTA}}", "Jakarta")].into_iter().collect();
        assert!(map.matches("Di {{KOTA}}"));
        assert!(!map.matches("Di Bandung"));
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let map: PlaceholderMap = [("", "x")].into_iter().collect();
        assert!(!map.matches("anything"));
        assert_eq!(map.apply("anything"), "anything");
    }
}
