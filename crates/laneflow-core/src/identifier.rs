//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type used for actor and step identifiers, and the
//! [`NodeId`] type which names every node of a layout graph, including the synthetic
//! start and end nodes.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Efficient identifier type using string interning
///
/// Actor and step identifiers arrive as arbitrary strings (database keys, slugs, UUIDs).
/// Interning them makes the identifier `Copy` and cheap to hash, which matters because
/// the layout pipeline keys several lookup tables by it.
///
/// # Examples
///
/// ```
/// use laneflow_core::identifier::Id;
///
/// let clerk = Id::new("clerk");
/// let step: Id = "s1".into();
///
/// assert_eq!(clerk, "clerk");
/// assert_ne!(clerk, step);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        let symbol = interner().get_or_intern(name);
        Self(symbol)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{str_value}")
    }
}

impl std::str::FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

/// Identifier of a node in a layout graph.
///
/// The synthetic boundary nodes are separate variants rather than reserved strings,
/// so inside a graph no caller-supplied step identifier can collide with them.
/// `Display` gives the default output names; a graph whose steps already use those
/// names writes the boundaries out under suffixed ones.
///
/// # Examples
///
/// ```
/// use laneflow_core::identifier::{Id, NodeId};
///
/// let step = NodeId::Step(Id::new("__start__"));
/// assert_ne!(step, NodeId::Start);
/// assert_eq!(NodeId::Start.to_string(), "__start__");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// The synthetic node anchoring the top of the diagram
    Start,
    /// The synthetic node anchoring the bottom of the diagram
    End,
    /// A caller-supplied step
    Step(Id),
}

impl NodeId {
    /// Returns the step identifier, or `None` for the boundary nodes
    pub fn step(self) -> Option<Id> {
        match self {
            NodeId::Step(id) => Some(id),
            NodeId::Start | NodeId::End => None,
        }
    }

    /// Returns true for the synthetic start and end nodes
    pub fn is_boundary(self) -> bool {
        matches!(self, NodeId::Start | NodeId::End)
    }
}

impl From<Id> for NodeId {
    fn from(id: Id) -> Self {
        NodeId::Step(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Start => write!(f, "__start__"),
            NodeId::End => write!(f, "__end__"),
            NodeId::Step(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("s1");
        let id2 = Id::new("s1");
        let id3 = Id::new("s2");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "s1");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "test_string".into();
        let id2 = Id::new("test_string");

        assert_eq!(id1, id2);
        assert_eq!(id1, "test_string");
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let id1 = Id::new("key1");
        let id2 = Id::new("key1");
        let id3 = Id::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("Receive request");

        assert!(id == "Receive request");
        assert!(id != "Receive");

        let empty = Id::new("");
        assert!(empty == "");
    }

    #[test]
    fn test_serde_round_trip_as_plain_string() {
        let id = Id::new("a-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"a-42\"");

        let back: Id = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_boundary_ids_never_collide_with_steps() {
        let lookalike = NodeId::Step(Id::new("__end__"));

        assert_ne!(lookalike, NodeId::End);
        assert!(NodeId::End.is_boundary());
        assert!(!lookalike.is_boundary());
        assert_eq!(lookalike.step(), Some(Id::new("__end__")));
        assert_eq!(NodeId::Start.step(), None);
    }

    #[test]
    fn test_node_id_serializes_as_string() {
        let json = serde_json::to_string(&vec![
            NodeId::Start,
            NodeId::Step(Id::new("s1")),
            NodeId::End,
        ])
        .unwrap();
        assert_eq!(json, r#"["__start__","s1","__end__"]"#);
    }
}
