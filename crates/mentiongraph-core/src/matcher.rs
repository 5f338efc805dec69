//! Case-insensitive drug mention detection over article and trial titles.

use serde::{Deserialize, Serialize};

use crate::error::{MentionGraphError, Result};
use crate::models::{Corpus, DATE_FORMAT, Mention, Record};

/// Where a mention's journal is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalSource {
    /// Always read the journal from the article corpus at the matching
    /// record's row index, even for trial matches.
    ///
    /// This reproduces the reference pipeline's output, where trial mentions
    /// carry the journal of whichever article shares their row position. It
    /// is most likely a defect upstream and is kept only for output
    /// compatibility.
    #[default]
    ArticleRow,
    /// Read the journal from the matching record itself.
    OwnRecord,
}

impl std::fmt::Display for JournalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JournalSource::ArticleRow => "article_row",
            JournalSource::OwnRecord => "own_record",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for JournalSource {
    type Err = MentionGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "article_row" => Ok(Self::ArticleRow),
            "own_record" => Ok(Self::OwnRecord),
            other => Err(MentionGraphError::Config(format!(
                "unknown journal source: {other}"
            ))),
        }
    }
}

/// All mentions of `drug`: article matches in row order, then trial matches
/// in row order.
pub fn find_mentions(
    drug: &str,
    articles: &Corpus,
    trials: &Corpus,
    journal_source: JournalSource,
) -> Result<Vec<Mention>> {
    let needle = drug.to_lowercase();
    let mut matches = Vec::new();

    for record in articles {
        if title_contains(record, &needle) {
            matches.push(to_mention(record, &record.journal));
        }
    }

    for record in trials {
        if title_contains(record, &needle) {
            let journal = match journal_source {
                JournalSource::OwnRecord => &record.journal,
                JournalSource::ArticleRow => {
                    &articles
                        .get(record.row_index)
                        .ok_or(MentionGraphError::MissingRow {
                            corpus: "article",
                            row: record.row_index,
                        })?
                        .journal
                }
            };
            matches.push(to_mention(record, journal));
        }
    }

    Ok(matches)
}

/// Whether the record's title contains the lowercased `needle`. Missing
/// titles never match.
fn title_contains(record: &Record, needle: &str) -> bool {
    record
        .title
        .as_deref()
        .is_some_and(|title| title.to_lowercase().contains(needle))
}

fn to_mention(record: &Record, journal: &str) -> Mention {
    Mention {
        title: record.title.clone().unwrap_or_default(),
        date: record.date.map(|date| date.format(DATE_FORMAT).to_string()),
        journal: journal.to_string(),
    }
}
