use thiserror::Error;

/// All errors that can occur in mentiongraph-core.
#[derive(Debug, Error)]
pub enum MentionGraphError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Shape mismatch: missing columns {missing:?}, unexpected columns {unexpected:?}")]
    ShapeMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Unparseable date in column '{field}' at row {row}: {value:?}")]
    UnparseableDate {
        field: String,
        row: usize,
        value: String,
    },

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("No row {row} in {corpus} corpus")]
    MissingRow { corpus: &'static str, row: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, MentionGraphError>;
