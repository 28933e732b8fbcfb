//! Businesses

use std::fmt;

use serde::{Deserialize, Serialize};

/// Business identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(pub u32);

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A business a purchase can be made at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Business {
    /// Business id
    pub id: BusinessId,

    /// Display name
    pub name: String,
}

impl Business {
    /// Create a new business.
    pub fn new(id: BusinessId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
