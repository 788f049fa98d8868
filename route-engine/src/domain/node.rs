//! Node identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque node identifier.
///
/// Nodes own no state inside the engine; searches only use them as keys.
///
/// # Examples
///
/// ```
/// use route_engine::domain::NodeId;
///
/// let karachi = NodeId(1);
/// assert_eq!(karachi.get(), 1);
/// assert_eq!(karachi.to_string(), "1");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Returns the raw identifier.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
