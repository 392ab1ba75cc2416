use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a theory record.
///
/// Uniqueness is assumed rather than enforced; lookups resolve to the first
/// record carrying a given id.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TheoryId(pub i64);

impl fmt::Display for TheoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TheoryId {
    fn from(value: i64) -> Self {
        TheoryId(value)
    }
}

/// Who a theory is attributed to.
///
/// The library stores either a single name or a list of co-authors; both
/// shapes survive a load/export cycle unchanged.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Theorists {
    One(String),
    Many(Vec<String>),
}

impl Theorists {
    /// Individual theorist names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Theorists::One(name) => vec![name.as_str()],
            Theorists::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theory_id_is_transparent_integer() {
        let id = TheoryId(37);
        let serialized = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized, "37");
        let parsed: TheoryId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, id);
        assert_eq!(id.to_string(), "37");
    }

    #[test]
    fn theorists_accepts_single_and_list_forms() {
        let one: Theorists = serde_json::from_str("\"Jean Piaget\"").unwrap();
        assert_eq!(one, Theorists::One("Jean Piaget".to_string()));
        assert_eq!(one.names(), vec!["Jean Piaget"]);

        let many: Theorists = serde_json::from_str("[\"Lave\", \"Wenger\"]").unwrap();
        assert_eq!(many.names(), vec!["Lave", "Wenger"]);
        assert_eq!(
            serde_json::to_string(&many).unwrap(),
            "[\"Lave\",\"Wenger\"]"
        );
    }
}
