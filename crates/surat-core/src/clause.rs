//! Clause lists ("menimbang", "dasar hukum") and the style chosen for them.

use serde::{Deserialize, Serialize};

/// Clause field as it arrives from the caller: one string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClauseInput {
    Single(String),
    Many(Vec<String>),
}

impl Default for ClauseInput {
    #[inline]
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// Ordered clause texts for one list slot.
///
/// A clause may contain `\n`; it is rendered as a line break inside the
/// clause's paragraph, never as a new paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClauseList {
    items: Vec<String>,
}

impl ClauseList {
    #[inline]
    #[must_use]
    pub const fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    #[inline]
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply `f` to every clause, keeping order.
    #[must_use = "returns the transformed clause list"]
    pub fn map(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            items: self.items.iter().map(|item| f(item.as_str())).collect(),
        }
    }
}

impl From<ClauseInput> for ClauseList {
    fn from(input: ClauseInput) -> Self {
        match input {
            ClauseInput::Single(text) => Self::new(vec![text]),
            ClauseInput::Many(items) => Self::new(items),
        }
    }
}

impl From<Vec<String>> for ClauseList {
    #[inline]
    fn from(items: Vec<String>) -> Self {
        Self::new(items)
    }
}

/// Style names a template offers for one list slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotStyle {
    /// Placeholder token marking the slot inside a table cell
    pub token: String,
    /// Style for a list with exactly one clause
    pub plain_style: String,
    /// Style for a list with two or more clauses
    pub numbered_style: String,
}

impl SlotStyle {
    pub fn new(
        token: impl Into<String>,
        plain_style: impl Into<String>,
        numbered_style: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            plain_style: plain_style.into(),
            numbered_style: numbered_style.into(),
        }
    }

    /// Style name for a list of `count` clauses: one → plain, otherwise numbered.
    #[inline]
    #[must_use = "returns the style name for the list"]
    pub fn style_for(&self, count: usize) -> &str {
        if count == 1 {
            &self.plain_style
        } else {
            &self.numbered_style
        }
    }
}
