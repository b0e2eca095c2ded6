//! Ordered context tags attached to a task.

use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free list of free-text tags.
///
/// Tags are trimmed; blank tags and repeats are dropped while the first
/// occurrence keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ContextTags(Vec<String>);

impl ContextTags {
    /// Creates an empty tag list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the tags in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns true when no tags are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S> FromIterator<S> for ContextTags
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags: Vec<String> = Vec::new();
        for tag in iter {
            let raw: String = tag.into();
            let trimmed = raw.trim();
            if trimmed.is_empty() || tags.iter().any(|existing| existing == trimmed) {
                continue;
            }
            tags.push(trimmed.to_owned());
        }
        Self(tags)
    }
}

impl From<Vec<String>> for ContextTags {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<ContextTags> for Vec<String> {
    fn from(tags: ContextTags) -> Self {
        tags.0
    }
}
