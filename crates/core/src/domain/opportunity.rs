use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Which content stream an opportunity was summarized from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Homelab,
    Work,
}

impl Category {
    pub fn prefix(self) -> char {
        match self {
            Self::Homelab => 'H',
            Self::Work => 'W',
        }
    }

    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'H' => Some(Self::Homelab),
            'W' => Some(Self::Work),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Homelab => "homelab",
            Self::Work => "work",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OpportunityIdError {
    #[error("opportunity id is empty")]
    Empty,
    #[error("unknown opportunity prefix `{0}` (expected H or W)")]
    UnknownPrefix(char),
    #[error("opportunity id `{0}` must be a prefix followed by digits")]
    InvalidSequence(String),
}

/// `<Category><digits>`. Extraction assigns `1, 2, ...` by position; ids read
/// from a reply keep their digits exactly as typed, so `H01` is not `H1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpportunityId {
    category: Category,
    digits: String,
}

impl OpportunityId {
    pub fn new(category: Category, sequence: u32) -> Self {
        Self { category, digits: sequence.to_string() }
    }

    /// `None` unless `digits` is a non-empty run of ASCII digits.
    pub fn from_digits(category: Category, digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        Some(Self { category, digits: digits.to_owned() })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    fn significant_digits(&self) -> &str {
        let trimmed = self.digits.trim_start_matches('0');
        if trimmed.is_empty() {
            "0"
        } else {
            trimmed
        }
    }
}

/// Category first, then numeric value of any length, then the literal digits
/// so that `H01` and `H1` stay distinct keys.
impl Ord for OpportunityId {
    fn cmp(&self, other: &Self) -> Ordering {
        let (left, right) = (self.significant_digits(), other.significant_digits());
        self.category
            .cmp(&other.category)
            .then_with(|| left.len().cmp(&right.len()))
            .then_with(|| left.cmp(right))
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for OpportunityId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.category.prefix(), self.digits)
    }
}

impl FromStr for OpportunityId {
    type Err = OpportunityIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let mut chars = trimmed.chars();
        let prefix = chars.next().ok_or(OpportunityIdError::Empty)?;
        let category =
            Category::from_prefix(prefix).ok_or(OpportunityIdError::UnknownPrefix(prefix))?;

        Self::from_digits(category, chars.as_str())
            .ok_or_else(|| OpportunityIdError::InvalidSequence(trimmed.to_owned()))
    }
}

impl Serialize for OpportunityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OpportunityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One actionable item lifted out of an agent's digest output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub title: String,
    pub full_text: String,
    pub relevance: String,
    pub signal: String,
    pub next_steps: String,
}

/// Opportunities keyed by id; iteration yields homelab entries before work
/// entries, each in extraction order.
pub type OpportunityMap = BTreeMap<OpportunityId, Opportunity>;

#[cfg(test)]
mod tests {
    use super::{Category, Opportunity, OpportunityId, OpportunityIdError, OpportunityMap};

    #[test]
    fn parses_ids_case_insensitively() {
        let id: OpportunityId = "w12".parse().expect("parse id");
        assert_eq!(id.category(), Category::Work);
        assert_eq!(id.digits(), "12");
        assert_eq!(id.to_string(), "W12");
        assert_eq!(id, OpportunityId::new(Category::Work, 12));
    }

    #[test]
    fn keeps_digits_as_typed() {
        let padded: OpportunityId = "H007".parse().expect("parse padded id");
        assert_eq!(padded.to_string(), "H007");
        assert_ne!(padded, OpportunityId::new(Category::Homelab, 7));

        let wide: OpportunityId = "h4294967296".parse().expect("parse wide id");
        assert_eq!(wide.to_string(), "H4294967296");
    }

    #[test]
    fn rejects_malformed_ids() {
        assert_eq!("".parse::<OpportunityId>(), Err(OpportunityIdError::Empty));
        assert_eq!("X1".parse::<OpportunityId>(), Err(OpportunityIdError::UnknownPrefix('X')));
        assert!(matches!(
            "H".parse::<OpportunityId>(),
            Err(OpportunityIdError::InvalidSequence(_))
        ));
        assert!(matches!(
            "H1a".parse::<OpportunityId>(),
            Err(OpportunityIdError::InvalidSequence(_))
        ));
    }

    #[test]
    fn map_orders_numerically_within_category_and_homelab_first() {
        let mut map = OpportunityMap::new();
        for raw in ["W1", "H10", "H2", "W2", "H1", "H01", "H99999999999"] {
            map.insert(raw.parse().expect("id"), Opportunity::default());
        }

        let keys = map.keys().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(keys, vec!["H01", "H1", "H2", "H10", "H99999999999", "W1", "W2"]);
    }

    #[test]
    fn serializes_ids_as_json_object_keys() {
        let mut map = OpportunityMap::new();
        map.insert(
            OpportunityId::new(Category::Homelab, 1),
            Opportunity { title: "Local LLM".to_owned(), ..Opportunity::default() },
        );

        let json = serde_json::to_value(&map).expect("serialize");
        assert_eq!(json["H1"]["title"], "Local LLM");
        assert_eq!(json["H1"]["next_steps"], "");

        let decoded: OpportunityMap = serde_json::from_value(json).expect("deserialize");
        assert_eq!(decoded, map);
    }
}
