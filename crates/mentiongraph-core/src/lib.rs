//! mentiongraph core: repair, unify, normalize and sanitize article and
//! clinical-trial records, then build the per-drug mention graph.

pub mod config;
pub mod dates;
pub mod error;
pub mod graph;
pub mod io;
pub mod matcher;
pub mod models;
pub mod pipeline;
pub mod repair;
pub mod sanitize;
pub mod summary;
pub mod unify;

pub use config::PipelineConfig;
pub use dates::DateNormalizer;
pub use error::{MentionGraphError, Result};
pub use graph::GraphBuilder;
pub use matcher::{JournalSource, find_mentions};
pub use models::*;
pub use pipeline::{Pipeline, PipelineOutput, PipelineStats, SourceTables};
pub use repair::{DocumentRepair, TrailingSeparatorRepair, repair_file};
pub use sanitize::{sanitize_columns, sanitize_text};
pub use summary::{GraphSummary, summarize};
pub use unify::unify;
