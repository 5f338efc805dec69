//! Repair of document-store exports before they are parsed.
//!
//! The upstream export leaves a dangling separator on the line before the
//! closing array marker. The fix is line-local and is not a validator: it
//! looks at exactly one line and never re-parses the result.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{MentionGraphError, Result};

/// Turns raw document text into parseable text.
pub trait DocumentRepair {
    fn repair(&self, raw: &str) -> Result<String>;
}

/// Strips a trailing separator from the second-to-last line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingSeparatorRepair {
    separator: char,
}

impl Default for TrailingSeparatorRepair {
    fn default() -> Self {
        Self { separator: ',' }
    }
}

impl TrailingSeparatorRepair {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }
}

impl DocumentRepair for TrailingSeparatorRepair {
    fn repair(&self, raw: &str) -> Result<String> {
        let lines: Vec<&str> = raw.split_inclusive('\n').collect();
        if lines.len() < 2 {
            return Err(MentionGraphError::MalformedInput(format!(
                "expected at least two lines, found {}",
                lines.len()
            )));
        }

        let target = lines.len() - 2;
        let Some(stripped) = lines[target].trim_end().strip_suffix(self.separator) else {
            return Ok(raw.to_string());
        };
        let fixed = format!("{}\n", stripped.trim_end());

        let mut out = String::with_capacity(raw.len());
        for (idx, line) in lines.iter().enumerate() {
            if idx == target {
                out.push_str(&fixed);
            } else {
                out.push_str(line);
            }
        }
        Ok(out)
    }
}

/// Repair the file at `path` in place. Returns `true` when it was rewritten.
pub fn repair_file(path: &Path, repair: &dyn DocumentRepair) -> Result<bool> {
    let raw = fs::read_to_string(path)?;
    let repaired = repair.repair(&raw)?;
    if repaired == raw {
        debug!("{} needs no repair", path.display());
        return Ok(false);
    }

    fs::write(path, repaired)?;
    warn!("removed trailing separator from {}", path.display());
    Ok(true)
}
