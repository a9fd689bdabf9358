#![forbid(unsafe_code)]

//! Element identifiers and the host-environment lookup seam.
//!
//! The host framework names each updated region with an opaque string key.
//! [`ElementResolver`] is the only coupling point to the host: it maps such a
//! key to a live element handle, or `None` when the element no longer exists
//! (replaced again, removed from the page, or never rendered).
//!
//! # Edge Cases
//!
//! | Case | Behavior |
//! |------|----------|
//! | Unknown identifier | `resolve` returns `None` |
//! | Identifier resolved twice in one cycle | Each lookup is independent |
//! | Empty identifier string | Treated like any other key |

use std::collections::HashMap;
use std::fmt;

/// Opaque string key identifying one updated UI element.
///
/// Supplied by the host framework; never interpreted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    /// Create an identifier from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host-environment lookup from element identifier to live element handle.
///
/// Implemented by the embedding application over whatever it uses to track
/// live elements. A miss means "element not present" and is never an error.
pub trait ElementResolver {
    /// Handle type for a live UI element.
    type Element;

    /// Resolve an identifier to its live element, if it still exists.
    fn resolve(&self, id: &ElementId) -> Option<Self::Element>;
}

/// Map-backed resolver for hosts that track live elements in-process.
#[derive(Debug, Clone)]
pub struct MapResolver<E> {
    elements: HashMap<ElementId, E>,
}

impl<E> Default for MapResolver<E> {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }
}

impl<E: Clone> MapResolver<E> {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the element for an identifier.
    ///
    /// Returns the previous element, if any.
    pub fn insert(&mut self, id: impl Into<ElementId>, element: E) -> Option<E> {
        self.elements.insert(id.into(), element)
    }

    /// Remove the element for an identifier.
    pub fn remove(&mut self, id: &ElementId) -> Option<E> {
        self.elements.remove(id)
    }

    /// Number of tracked elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if no elements are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<E: Clone> ElementResolver for MapResolver<E> {
    type Element = E;

    fn resolve(&self, id: &ElementId) -> Option<E> {
        self.elements.get(id).cloned()
    }
}
