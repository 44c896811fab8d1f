//! Identifier types for users and resources.
//!
//! The engine is generic over identifiers and only needs equality and
//! ordering; these newtypes are what the CLI and the tests use.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered platform participant (or the operator).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(pub String);

/// A piece of content that can be upvoted and viewed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_id() {
        assert_eq!(UserId::new("alice").to_string(), "alice");
        assert_eq!(ResourceId::from("post-1").to_string(), "post-1");
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&UserId::new("bob")).unwrap();
        assert_eq!(json, "\"bob\"");
        let back: ResourceId = serde_json::from_str("\"r\"").unwrap();
        assert_eq!(back, ResourceId::new("r"));
    }

    #[test]
    fn ordering_follows_string() {
        assert!(UserId::new("a") < UserId::new("b"));
    }
}
