use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

/// A document whose title mentions a drug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub title: String,
    /// `YYYY-MM-DD`, or `null` when the source date is absent.
    pub date: Option<String>,
    pub journal: String,
}

/// Drug name → mentions, keyed in vocabulary order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MentionGraph {
    entries: IndexMap<String, Vec<Mention>>,
}

impl MentionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a drug and its mentions. Returns `false` and leaves the graph
    /// untouched when the drug is already present.
    pub fn insert(&mut self, drug: impl Into<String>, mentions: Vec<Mention>) -> bool {
        match self.entries.entry(drug.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(mentions);
                true
            }
        }
    }

    pub fn contains(&self, drug: &str) -> bool {
        self.entries.contains_key(drug)
    }

    pub fn get(&self, drug: &str) -> Option<&[Mention]> {
        self.entries.get(drug).map(Vec::as_slice)
    }

    pub fn drugs(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Mention])> {
        self.entries
            .iter()
            .map(|(name, mentions)| (name.as_str(), mentions.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_mentions(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(title: &str, date: Option<&str>, journal: &str) -> Mention {
        Mention {
            title: title.to_string(),
            date: date.map(str::to_string),
            journal: journal.to_string(),
        }
    }

    #[test]
    fn test_serialize_keeps_insertion_order() {
        let mut graph = MentionGraph::new();
        graph.insert("ZETA", vec![]);
        graph.insert("ALPHA", vec![mention("t", Some("2020-01-01"), "j")]);

        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(
            json,
            r#"{"ZETA":[],"ALPHA":[{"title":"t","date":"2020-01-01","journal":"j"}]}"#
        );
    }

    #[test]
    fn test_null_date_serializes_as_null() {
        let mut graph = MentionGraph::new();
        graph.insert("A", vec![mention("t", None, "j")]);
        let json = serde_json::to_string(&graph).unwrap();
        assert!(json.contains(r#""date":null"#));
    }

    #[test]
    fn test_deserialize_keeps_file_order() {
        let json = r#"{"b": [], "a": [{"title": "x", "date": null, "journal": "j"}]}"#;
        let graph: MentionGraph = serde_json::from_str(json).unwrap();
        let drugs: Vec<&str> = graph.drugs().collect();
        assert_eq!(drugs, vec!["b", "a"]);
        assert_eq!(graph.get("a").unwrap()[0].date, None);
        assert_eq!(graph.total_mentions(), 1);
    }

    #[test]
    fn test_insert_keeps_first_position() {
        let mut graph = MentionGraph::new();
        assert!(graph.insert("A", vec![]));
        assert!(graph.insert("B", vec![]));
        assert!(!graph.insert("A", vec![mention("t", None, "j")]));
        assert_eq!(graph.len(), 2);
        assert!(graph.get("A").unwrap().is_empty());
    }

    #[test]
    fn test_large_vocabulary_keeps_order() {
        let mut graph = MentionGraph::new();
        for i in (0..10_000).rev() {
            assert!(graph.insert(format!("DRUG{i}"), vec![]));
        }
        assert!(!graph.insert("DRUG5000", vec![mention("t", None, "j")]));
        assert_eq!(graph.len(), 10_000);
        assert_eq!(graph.drugs().next(), Some("DRUG9999"));
        assert_eq!(graph.drugs().last(), Some("DRUG0"));
        assert!(graph.get("DRUG5000").unwrap().is_empty());

        let json = serde_json::to_string(&graph).unwrap();
        let reread: MentionGraph = serde_json::from_str(&json).unwrap();
        assert!(reread.drugs().eq(graph.drugs()));
    }
}
