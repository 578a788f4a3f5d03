//! Search history wire types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ranking mode of a search.
///
/// Gates which form fields are relevant (see [`crate::state::FormFilterState`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Full-text keyword search.
    #[default]
    Fts,
    /// Vector similarity search.
    Semantic,
    /// Hybrid ranking fusing keyword and semantic results.
    ReciprocalRankFusion,
}

impl SearchStrategy {
    /// All strategies in selector order.
    pub const ALL: [SearchStrategy; 3] = [
        SearchStrategy::Fts,
        SearchStrategy::Semantic,
        SearchStrategy::ReciprocalRankFusion,
    ];

    /// Wire name, as sent in the `strategy` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStrategy::Fts => "Fts",
            SearchStrategy::Semantic => "Semantic",
            SearchStrategy::ReciprocalRankFusion => "ReciprocalRankFusion",
        }
    }

    /// Next strategy in selector order, wrapping.
    pub fn next(self) -> Self {
        match self {
            SearchStrategy::Fts => SearchStrategy::Semantic,
            SearchStrategy::Semantic => SearchStrategy::ReciprocalRankFusion,
            SearchStrategy::ReciprocalRankFusion => SearchStrategy::Fts,
        }
    }

    /// Previous strategy in selector order, wrapping.
    pub fn prev(self) -> Self {
        match self {
            SearchStrategy::Fts => SearchStrategy::ReciprocalRankFusion,
            SearchStrategy::Semantic => SearchStrategy::Fts,
            SearchStrategy::ReciprocalRankFusion => SearchStrategy::Semantic,
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a supported search strategy")]
pub struct UnknownStrategy(pub String);

impl FromStr for SearchStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Sex filter radio selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sex {
    /// Undefined: no filter.
    #[default]
    U,
    /// Female.
    F,
    /// Male.
    M,
}

impl Sex {
    /// Radio options in display order.
    pub const ALL: [Sex; 3] = [Sex::U, Sex::F, Sex::M];

    /// Wire name, as sent in the `sexo` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::U => "U",
            Sex::F => "F",
            Sex::M => "M",
        }
    }

    /// Radio label.
    pub fn label(&self) -> &'static str {
        match self {
            Sex::U => "No definido",
            Sex::F => "F",
            Sex::M => "M",
        }
    }

    /// Next radio option, wrapping.
    pub fn next(self) -> Self {
        match self {
            Sex::U => Sex::F,
            Sex::F => Sex::M,
            Sex::M => Sex::U,
        }
    }

    /// Previous radio option, wrapping.
    pub fn prev(self) -> Self {
        match self {
            Sex::U => Sex::M,
            Sex::F => Sex::U,
            Sex::M => Sex::F,
        }
    }
}

impl FromStr for Sex {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" => Ok(Sex::U),
            "F" => Ok(Sex::F),
            "M" => Ok(Sex::M),
            _ => Err(()),
        }
    }
}

/// One persisted past search, as returned by `GET /historial`.
///
/// Identity is the query text: deletion is keyed by [`HistoryEntry::query`].
/// Every field other than `query` is optional on the wire, since older
/// backends only send `{ id, query }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Numeric row id, informational only.
    #[serde(default)]
    pub id: Option<u64>,

    /// Query text; also the delete key.
    pub query: String,

    /// Ranking strategy used.
    #[serde(default)]
    pub strategy: SearchStrategy,

    /// Structured filters rendered as text (`"edad > 30,sexo = F"`).
    #[serde(default)]
    pub filters: Option<String>,

    /// Keyword weight.
    #[serde(default)]
    pub peso_fts: f32,

    /// Semantic weight.
    #[serde(default)]
    pub peso_semantic: f32,

    /// Neighbor count (`k`).
    #[serde(default)]
    pub neighbors: u64,

    /// Raw timestamp as sent by the backend.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HistoryEntry {
    /// Entry carrying only a query, as older backends send it.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: None,
            query: query.into(),
            strategy: SearchStrategy::default(),
            filters: None,
            peso_fts: 0.0,
            peso_semantic: 0.0,
            neighbors: 0,
            timestamp: None,
        }
    }

    /// Parse the timestamp, accepting both ISO (`T`) and SQLite (space) forms.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_round_trips_through_wire_name() {
        for strategy in SearchStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<SearchStrategy>(), Ok(strategy));
        }
    }

    #[test]
    fn strategy_rejects_unknown_names() {
        assert!("rrf".parse::<SearchStrategy>().is_err());
    }

    #[test]
    fn strategy_cycle_visits_every_variant() {
        let mut s = SearchStrategy::Fts;
        s = s.next();
        assert_eq!(s, SearchStrategy::Semantic);
        s = s.next();
        assert_eq!(s, SearchStrategy::ReciprocalRankFusion);
        assert_eq!(s.next(), SearchStrategy::Fts);
        assert_eq!(SearchStrategy::Fts.prev(), SearchStrategy::ReciprocalRankFusion);
    }

    #[test]
    fn minimal_entry_deserializes_with_defaults() {
        let entry: HistoryEntry = serde_json::from_str(r#"{"id": 3, "query": "dolor"}"#).unwrap();
        assert_eq!(entry.query, "dolor");
        assert_eq!(entry.id, Some(3));
        assert_eq!(entry.strategy, SearchStrategy::Fts);
        assert_eq!(entry.filters, None);
    }

    #[test]
    fn full_entry_deserializes() {
        let json = r#"{
            "id": 1,
            "query": "fiebre",
            "strategy": "ReciprocalRankFusion",
            "filters": "edad > 30",
            "peso_fts": 40.0,
            "peso_semantic": 60.0,
            "neighbors": 25,
            "timestamp": "2024-05-01 10:30:00"
        }"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.strategy, SearchStrategy::ReciprocalRankFusion);
        assert_eq!(entry.neighbors, 25);
        assert!(entry.parsed_timestamp().is_some());
    }

    #[test]
    fn iso_timestamp_parses() {
        let mut entry = HistoryEntry::new("q");
        entry.timestamp = Some("2024-05-01T10:30:00".to_string());
        assert!(entry.parsed_timestamp().is_some());
    }

    #[test]
    fn sex_parses_wire_names() {
        assert_eq!("F".parse::<Sex>(), Ok(Sex::F));
        assert!("X".parse::<Sex>().is_err());
    }
}
