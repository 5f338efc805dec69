use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::MentionGraph;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugSummary {
    pub drug: String,
    pub mentions: usize,
    /// Distinct journals citing the drug, alphabetical.
    pub journals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    /// In graph (vocabulary) order.
    pub drugs: Vec<DrugSummary>,
    pub total_mentions: usize,
    /// Journals citing the most distinct drugs; ties are all listed.
    pub top_journals: Vec<String>,
    pub top_journal_drug_count: usize,
}

pub fn summarize(graph: &MentionGraph) -> GraphSummary {
    let mut drugs_by_journal: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut drugs = Vec::with_capacity(graph.len());

    for (drug, mentions) in graph.iter() {
        let journals: BTreeSet<&str> = mentions
            .iter()
            .map(|m| m.journal.as_str())
            .filter(|j| !j.trim().is_empty())
            .collect();
        for journal in &journals {
            drugs_by_journal.entry(*journal).or_default().insert(drug);
        }
        drugs.push(DrugSummary {
            drug: drug.to_string(),
            mentions: mentions.len(),
            journals: journals.into_iter().map(str::to_string).collect(),
        });
    }

    let top_journal_drug_count = drugs_by_journal
        .values()
        .map(BTreeSet::len)
        .max()
        .unwrap_or(0);
    let top_journals = drugs_by_journal
        .iter()
        .filter(|(_, cited)| top_journal_drug_count > 0 && cited.len() == top_journal_drug_count)
        .map(|(journal, _)| journal.to_string())
        .collect();

    GraphSummary {
        drugs,
        total_mentions: graph.total_mentions(),
        top_journals,
        top_journal_drug_count,
    }
}
