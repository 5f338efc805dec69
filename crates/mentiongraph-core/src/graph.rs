use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::matcher::{JournalSource, find_mentions};
use crate::models::{Corpus, Mention, MentionGraph};

/// Runs the matcher over a drug vocabulary and assembles the mention graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    journal_source: JournalSource,
    parallel: bool,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal_source(mut self, journal_source: JournalSource) -> Self {
        self.journal_source = journal_source;
        self
    }

    /// Match drugs on the rayon pool. Keys still come out in vocabulary order.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build<S: AsRef<str> + Sync>(
        &self,
        vocabulary: &[S],
        articles: &Corpus,
        trials: &Corpus,
    ) -> Result<MentionGraph> {
        let match_drug = |drug: &S| -> Result<Vec<Mention>> {
            let mentions = find_mentions(drug.as_ref(), articles, trials, self.journal_source)?;
            debug!("{}: {} mentions", drug.as_ref(), mentions.len());
            Ok(mentions)
        };

        // Indexed collect keeps vocabulary order whatever the completion order.
        let results: Vec<Vec<Mention>> = if self.parallel {
            vocabulary.par_iter().map(match_drug).collect::<Result<_>>()?
        } else {
            vocabulary.iter().map(match_drug).collect::<Result<_>>()?
        };

        let mut graph = MentionGraph::new();
        for (drug, mentions) in vocabulary.iter().zip(results) {
            if !graph.insert(drug.as_ref(), mentions) {
                warn!("duplicate drug '{}' in vocabulary, keeping first entry", drug.as_ref());
            }
        }

        info!(
            "built graph: {} drugs, {} mentions",
            graph.len(),
            graph.total_mentions()
        );
        Ok(graph)
    }
}
