use crate::errors::{BackendError, BackendResult};
use std::fmt;
use std::str::FromStr;

/// Slash separated address of a single document, e.g. `users/u-1` or
/// `groups/g-1/messages/m-9`.
///
/// Documents live at an even number of segments; odd counts name a
/// collection and are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// Address a document directly inside a top-level collection.
    ///
    /// # Errors
    /// Returns [`BackendError::InvalidDocumentPath`] when either part is empty
    /// or contains a `/`.
    pub fn new(collection: &str, id: &str) -> BackendResult<Self> {
        format!("{collection}/{id}").parse()
    }

    /// Address a document in a subcollection of this one.
    ///
    /// # Errors
    /// Same rules as [`DocumentPath::new`].
    pub fn child(&self, collection: &str, id: &str) -> BackendResult<Self> {
        format!("{self}/{collection}/{id}").parse()
    }

    /// The document id (last segment).
    #[must_use]
    pub fn id(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// The collection the document belongs to.
    #[must_use]
    pub fn collection(&self) -> &str {
        self.segments
            .len()
            .checked_sub(2)
            .and_then(|index| self.segments.get(index))
            .map_or("", String::as_str)
    }
}

impl FromStr for DocumentPath {
    type Err = BackendError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim_matches('/');
        let segments: Vec<String> = trimmed.split('/').map(str::to_string).collect();
        if trimmed.is_empty()
            || segments.iter().any(String::is_empty)
            || !segments.len().is_multiple_of(2)
        {
            return Err(BackendError::invalid_path(value));
        }
        Ok(Self { segments })
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}
