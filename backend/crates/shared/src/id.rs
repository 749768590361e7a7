//! Common ID Types
//!
//! Type-safe wrappers for the store-allocated integer IDs.
//! On the wire every ID travels as its decimal string.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type PostId = Id<markers::Post>;
///
/// let id: PostId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert!("-1".parse::<PostId>().is_err());
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

/// Rejected textual ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("ID is empty")]
    Empty,
    #[error("ID is not an integer")]
    NotInteger,
    #[error("ID is negative")]
    Negative,
}

impl<T> Id<T> {
    /// Wrap a value read from the store
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying integer
    pub const fn get(&self) -> i64 {
        self.value
    }

    /// Parse a non-empty, non-negative decimal ID
    pub fn parse(raw: &str) -> Result<Self, IdParseError> {
        if raw.is_empty() {
            return Err(IdParseError::Empty);
        }
        let value: i64 = raw.parse().map_err(|_| IdParseError::NotInteger)?;
        if value < 0 {
            return Err(IdParseError::Negative);
        }
        Ok(Self::new(value))
    }
}

// Manual impls: derives would put bounds on the marker type.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.value)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for blog post IDs
    pub struct Post;

    /// Marker for comment IDs
    pub struct Comment;

    /// Marker for tag IDs
    pub struct Tag;
}

/// Type aliases for common IDs
pub type PostId = Id<markers::Post>;
pub type CommentId = Id<markers::Comment>;
pub type TagId = Id<markers::Tag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_zero_and_positive() {
        assert_eq!(PostId::parse("0").unwrap().get(), 0);
        assert_eq!(PostId::parse("1337").unwrap().get(), 1337);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(PostId::parse(""), Err(IdParseError::Empty));
        assert_eq!(PostId::parse("abc"), Err(IdParseError::NotInteger));
        assert_eq!(PostId::parse("1.5"), Err(IdParseError::NotInteger));
        assert_eq!(PostId::parse("-3"), Err(IdParseError::Negative));
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let id = CommentId::new(17);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"17\"");
    }

    #[test]
    fn test_ordering_follows_value() {
        let mut ids = vec![TagId::new(3), TagId::new(1), TagId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![TagId::new(1), TagId::new(2), TagId::new(3)]);
    }
}
