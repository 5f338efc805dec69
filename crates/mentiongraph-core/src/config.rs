use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dates::{DEFAULT_DATE_FORMATS, DateNormalizer};
use crate::error::{MentionGraphError, Result};
use crate::graph::GraphBuilder;
use crate::matcher::JournalSource;

/// Root pipeline configuration, loaded from `~/.config/mentiongraph/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub inputs: InputsConfig,
    pub output: OutputConfig,
    pub dates: DatesConfig,
    pub sanitize: SanitizeConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    pub data_dir: PathBuf,
    pub clinical_trials: PathBuf,
    pub drugs: PathBuf,
    pub pubmed_csv: PathBuf,
    pub pubmed_json: PathBuf,
    pub drug_field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub graph_path: PathBuf,
    pub indent: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatesConfig {
    pub field: String,
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeConfig {
    pub article_fields: Vec<String>,
    pub trial_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub article_title_field: String,
    pub trial_title_field: String,
    pub journal_source: JournalSource,
    pub parallel: bool,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            clinical_trials: PathBuf::from("clinical_trials.csv"),
            drugs: PathBuf::from("drugs.csv"),
            pubmed_csv: PathBuf::from("pubmed.csv"),
            pubmed_json: PathBuf::from("pubmed.json"),
            drug_field: "drug".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            graph_path: PathBuf::from("graph.json"),
            indent: 4,
        }
    }
}

impl Default for DatesConfig {
    fn default() -> Self {
        Self {
            field: "date".to_string(),
            formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            article_fields: vec!["title".to_string(), "journal".to_string()],
            trial_fields: vec!["scientific_title".to_string(), "journal".to_string()],
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            article_title_field: "title".to_string(),
            trial_title_field: "scientific_title".to_string(),
            journal_source: JournalSource::ArticleRow,
            parallel: false,
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl PipelineConfig {
    /// Standard config file path: `~/.config/mentiongraph/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("MENTIONGRAPH_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("mentiongraph")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dates.formats.is_empty() {
            return Err(MentionGraphError::Config(
                "dates.formats must list at least one format".to_string(),
            ));
        }
        let fields = [
            ("dates.field", &self.dates.field),
            ("inputs.drug_field", &self.inputs.drug_field),
            ("matching.article_title_field", &self.matching.article_title_field),
            ("matching.trial_title_field", &self.matching.trial_title_field),
        ];
        for (key, value) in fields {
            if value.trim().is_empty() {
                return Err(MentionGraphError::Config(format!("{key} must not be empty")));
            }
        }
        let mut sanitized = self
            .sanitize
            .article_fields
            .iter()
            .chain(&self.sanitize.trial_fields);
        if sanitized.any(|f| f.trim().is_empty()) {
            return Err(MentionGraphError::Config(
                "sanitize fields must not be empty".to_string(),
            ));
        }
        // Sanitizing runs after date normalization and would turn dates back into text.
        let mut sanitized = self
            .sanitize
            .article_fields
            .iter()
            .chain(&self.sanitize.trial_fields);
        if sanitized.any(|f| *f == self.dates.field) {
            return Err(MentionGraphError::Config(format!(
                "dates.field '{}' must not be listed in sanitize fields",
                self.dates.field
            )));
        }
        Ok(())
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.inputs.data_dir = dir;
    }

    // ─── Derived paths ─────────────────────────────────────

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.inputs.data_dir.join(path)
        }
    }

    pub fn clinical_trials_path(&self) -> PathBuf {
        self.resolve(&self.inputs.clinical_trials)
    }

    pub fn drugs_path(&self) -> PathBuf {
        self.resolve(&self.inputs.drugs)
    }

    pub fn pubmed_csv_path(&self) -> PathBuf {
        self.resolve(&self.inputs.pubmed_csv)
    }

    pub fn pubmed_json_path(&self) -> PathBuf {
        self.resolve(&self.inputs.pubmed_json)
    }

    pub fn graph_path(&self) -> PathBuf {
        self.resolve(&self.output.graph_path)
    }

    // ─── Stage builders ────────────────────────────────────

    pub fn date_normalizer(&self) -> DateNormalizer {
        DateNormalizer::with_formats(self.dates.formats.iter().cloned())
    }

    pub fn graph_builder(&self) -> GraphBuilder {
        GraphBuilder::new()
            .with_journal_source(self.matching.journal_source)
            .parallel(self.matching.parallel)
    }
}
