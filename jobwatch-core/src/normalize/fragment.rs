//! Structural query interface over a candidate element
//!
//! The normalizer never sees markup directly. It asks a [`Fragment`] for nodes
//! playing a structural role ([`Hint`]) and receives owned [`Node`] snapshots,
//! so any document representation (parsed HTML, JSON, test fixtures) can be
//! plugged in.

use thiserror::Error;

/// Structural role of a node inside a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hint {
    /// Heading-like element
    Heading,
    /// Element tagged as a title
    TitleTagged,
    /// Anchor tagged as a project link
    ProjectLink,
    /// Anchor pointing at a listing detail page
    DetailLink,
    /// Price, budget or amount element
    Price,
    /// Paragraph or description element
    Description,
    /// Skill tag or badge
    Tag,
    /// Location, country or flag element
    Location,
}

/// Owned snapshot of a matched node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub text: String,
    pub attributes: Vec<(String, String)>,
}

impl Node {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Value of the first attribute named `name`
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Failure while reading a candidate's sub-structure
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector for {hint:?}: {message}")]
    Selector { hint: Hint, message: String },

    #[error("malformed candidate: {0}")]
    Malformed(String),
}

/// A candidate element that can be queried by structural role
pub trait Fragment {
    /// All nodes playing `hint`, in document order
    fn find_all(&self, hint: Hint) -> Result<Vec<Node>, ExtractError>;

    /// First node of the earliest hint in `hints` that matches anything
    fn find_first(&self, hints: &[Hint]) -> Result<Option<Node>, ExtractError> {
        for hint in hints {
            if let Some(node) = self.find_all(*hint)?.into_iter().next() {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<(Hint, Node)>);

    impl Fragment for Fixed {
        fn find_all(&self, hint: Hint) -> Result<Vec<Node>, ExtractError> {
            Ok(self
                .0
                .iter()
                .filter(|(h, _)| *h == hint)
                .map(|(_, node)| node.clone())
                .collect())
        }
    }

    #[test]
    fn test_find_first_respects_hint_order() {
        let fragment = Fixed(vec![
            (Hint::ProjectLink, Node::new("link")),
            (Hint::TitleTagged, Node::new("tagged")),
        ]);

        let node = fragment
            .find_first(&[Hint::Heading, Hint::TitleTagged, Hint::ProjectLink])
            .unwrap();
        assert_eq!(node, Some(Node::new("tagged")));
    }

    #[test]
    fn test_node_attr_lookup() {
        let node = Node::new("").with_attr("alt", "flag Chile").with_attr("alt", "ignored");
        assert_eq!(node.attr("alt"), Some("flag Chile"));
        assert_eq!(node.attr("href"), None);
    }
}
