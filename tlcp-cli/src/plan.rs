//! Rendering of `--dry-run` output

use serde::Serialize;
use std::path::PathBuf;
use tlcp_expand::ConfigVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Text,
    Json,
}

impl PlanFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(PlanFormat::Text),
            "json" => Some(PlanFormat::Json),
            _ => None,
        }
    }
}

/// A configuration that would be written
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    pub source: PathBuf,
    pub file: PathBuf,
    #[serde(flatten)]
    pub variant: ConfigVariant,
}

/// Everything a dry run would write, in processing order
#[derive(Debug, Clone, Default)]
pub struct Plan {
    entries: Vec<PlanEntry>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the variants of one source, to be written under `destination_root`
    pub fn extend(&mut self, source: PathBuf, destination_root: PathBuf, variants: Vec<ConfigVariant>) {
        for variant in variants {
            self.entries.push(PlanEntry {
                source: source.clone(),
                file: destination_root.join(variant.relative_path()),
                variant,
            });
        }
    }

    pub fn render(&self, format: PlanFormat) -> Result<String, serde_json::Error> {
        match format {
            PlanFormat::Text => Ok(self
                .entries
                .iter()
                .map(|entry| format!("{}\n", entry.file.display()))
                .collect()),
            PlanFormat::Json => {
                let mut json = serde_json::to_string_pretty(&self.entries)?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}
