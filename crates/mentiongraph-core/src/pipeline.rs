//! End-to-end run: load → repair → unify → normalize → sanitize → match.

use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::io::{read_csv_table, read_json_table, read_vocabulary, write_graph};
use crate::models::{Corpus, JOURNAL_FIELD, MentionGraph, Table};
use crate::repair::{DocumentRepair, TrailingSeparatorRepair, repair_file};
use crate::sanitize::sanitize_columns;
use crate::unify::unify;

/// Raw inputs of one run, as loaded from disk.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub articles_tabular: Table,
    pub articles_document: Table,
    pub trials: Table,
    pub vocabulary: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    pub articles: usize,
    pub trials: usize,
    pub drugs: usize,
    pub drugs_with_mentions: usize,
    pub mentions: usize,
    pub repaired_document_store: bool,
    pub duration_ms: u128,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub graph: MentionGraph,
    pub stats: PipelineStats,
}

pub struct Pipeline {
    config: PipelineConfig,
    repair: Box<dyn DocumentRepair>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            repair: Box::new(TrailingSeparatorRepair::new()),
        }
    }

    /// Swap the document-store repair step.
    pub fn with_repair(mut self, repair: impl DocumentRepair + 'static) -> Self {
        self.repair = Box::new(repair);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Read every input file. The document store is repaired in place first.
    /// Returns the tables and whether the document store was rewritten.
    pub fn load(&self) -> Result<(SourceTables, bool)> {
        let json_path = self.config.pubmed_json_path();
        let repaired = repair_file(&json_path, self.repair.as_ref())?;

        let sources = SourceTables {
            articles_tabular: read_csv_table(&self.config.pubmed_csv_path())?,
            articles_document: read_json_table(&json_path)?,
            trials: read_csv_table(&self.config.clinical_trials_path())?,
            vocabulary: read_vocabulary(&self.config.drugs_path(), &self.config.inputs.drug_field)?,
        };
        info!(
            "loaded {} + {} articles, {} trials, {} drugs",
            sources.articles_tabular.len(),
            sources.articles_document.len(),
            sources.trials.len(),
            sources.vocabulary.len()
        );
        Ok((sources, repaired))
    }

    /// Normalize both corpora into typed records. No file access.
    pub fn prepare(&self, sources: &SourceTables) -> Result<(Corpus, Corpus)> {
        let mut articles = unify(&sources.articles_tabular, &sources.articles_document)?;
        let mut trials = sources.trials.clone();

        let normalizer = self.config.date_normalizer();
        let date_field = self.config.dates.field.as_str();
        normalizer.normalize_column(&mut articles, date_field)?;
        normalizer.normalize_column(&mut trials, date_field)?;

        sanitize_columns(&mut articles, &as_strs(&self.config.sanitize.article_fields))?;
        sanitize_columns(&mut trials, &as_strs(&self.config.sanitize.trial_fields))?;

        let matching = &self.config.matching;
        let articles = Corpus::from_columns(
            &articles,
            &matching.article_title_field,
            date_field,
            JOURNAL_FIELD,
        )?;
        let trials =
            Corpus::from_columns(&trials, &matching.trial_title_field, date_field, JOURNAL_FIELD)?;
        info!(
            "prepared {} articles and {} trials",
            articles.len(),
            trials.len()
        );
        Ok((articles, trials))
    }

    /// Run every in-memory stage over already-loaded sources.
    pub fn process(&self, sources: &SourceTables) -> Result<MentionGraph> {
        let (articles, trials) = self.prepare(sources)?;
        self.config
            .graph_builder()
            .build(&sources.vocabulary, &articles, &trials)
    }

    pub fn run(&self) -> Result<PipelineOutput> {
        let start = Instant::now();
        let (sources, repaired) = self.load()?;
        let graph = self.process(&sources)?;

        let stats = PipelineStats {
            articles: sources.articles_tabular.len() + sources.articles_document.len(),
            trials: sources.trials.len(),
            drugs: graph.len(),
            drugs_with_mentions: graph.iter().filter(|(_, m)| !m.is_empty()).count(),
            mentions: graph.total_mentions(),
            repaired_document_store: repaired,
            duration_ms: start.elapsed().as_millis(),
        };
        Ok(PipelineOutput { graph, stats })
    }

    /// [`Pipeline::run`], then write the graph to the configured path.
    pub fn run_and_write(&self) -> Result<PipelineOutput> {
        let output = self.run()?;
        let path = self.config.graph_path();
        write_graph(&path, &output.graph, self.config.output.indent)?;
        info!("graph written to {}", path.display());
        Ok(output)
    }
}

fn as_strs(fields: &[String]) -> Vec<&str> {
    fields.iter().map(String::as_str).collect()
}
