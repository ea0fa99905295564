//! Configuration variants and the text rope they carry
//!
//!     A [ConfigVariant] is one concrete output unit: a generated name, an output
//!     sub-path and the configuration text. Variants concatenate component-wise
//!     (names and text append, paths extend) with [ConfigVariant::identity] as the
//!     neutral element. Every expansion rule is expressed with this operation.
//!
//!     Cross products copy each prefix once per suffix, so text is kept as a rope of
//!     shared chunks. Concatenating two variants clones chunk pointers; the text is
//!     only rendered when a variant is written out.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Add;
use std::path::PathBuf;
use std::sync::Arc;

/// Separator between name segments. Family and option names may not contain it.
pub const NAME_SEPARATOR: char = '_';

/// Extension of generated configuration files
pub const CONFIG_EXTENSION: &str = "cfg";

/// Append-only text made of shared chunks
#[derive(Debug, Clone, Default)]
pub struct Text {
    chunks: Vec<Arc<str>>,
}

impl Text {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Concatenate two texts without copying their contents
    pub fn concat(&self, other: &Text) -> Text {
        let mut chunks = Vec::with_capacity(self.chunks.len() + other.chunks.len());
        chunks.extend(self.chunks.iter().cloned());
        chunks.extend(other.chunks.iter().cloned());
        Text { chunks }
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.len());
        for chunk in &self.chunks {
            out.push_str(chunk);
        }
        out
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        if text.is_empty() {
            return Text::new();
        }
        Text {
            chunks: vec![Arc::from(text)],
        }
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Text::from(text.as_str())
    }
}

// Equality is over the rendered bytes, not the chunking.
impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .chunks
                .iter()
                .flat_map(|chunk| chunk.bytes())
                .eq(other.chunks.iter().flat_map(|chunk| chunk.bytes()))
    }
}

impl Eq for Text {}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.chunks {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One fully expanded configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigVariant {
    pub name: String,
    pub path: Vec<String>,
    pub text: Text,
}

impl ConfigVariant {
    pub fn new(name: impl Into<String>, path: Vec<String>, text: impl Into<Text>) -> Self {
        Self {
            name: name.into(),
            path,
            text: text.into(),
        }
    }

    /// The neutral element: empty name, empty path, empty text
    pub fn identity() -> Self {
        Self::default()
    }

    /// A variant contributing only text
    pub fn from_text(text: impl Into<Text>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Component-wise concatenation
    pub fn concat(&self, other: &ConfigVariant) -> ConfigVariant {
        let mut name = String::with_capacity(self.name.len() + other.name.len());
        name.push_str(&self.name);
        name.push_str(&other.name);

        let mut path = Vec::with_capacity(self.path.len() + other.path.len());
        path.extend(self.path.iter().cloned());
        path.extend(other.path.iter().cloned());

        ConfigVariant {
            name,
            path,
            text: self.text.concat(&other.text),
        }
    }

    /// Prepend a name segment, joining with `_` only if the name is non-empty
    pub fn with_name_prefix(mut self, prefix: &str) -> Self {
        self.name = if self.name.is_empty() {
            prefix.to_string()
        } else {
            format!("{}{}{}", prefix, NAME_SEPARATOR, self.name)
        };
        self
    }

    /// Prepend a directory segment to the output path
    pub fn with_path_prefix(mut self, segment: &str) -> Self {
        self.path.insert(0, segment.to_string());
        self
    }

    /// `<name>.cfg`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, CONFIG_EXTENSION)
    }

    /// Location of the generated file relative to the base name's output directory
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.path.iter().collect();
        path.push(self.file_name());
        path
    }
}

impl Add for &ConfigVariant {
    type Output = ConfigVariant;

    fn add(self, other: &ConfigVariant) -> ConfigVariant {
        self.concat(other)
    }
}

/// Cross product of two variant lists, combining pairs by concatenation
///
/// The result is ordered by (left index, right index).
pub fn cross(left: &[ConfigVariant], right: &[ConfigVariant]) -> Vec<ConfigVariant> {
    let mut out = Vec::with_capacity(left.len() * right.len());
    for prefix in left {
        for suffix in right {
            out.push(prefix + suffix);
        }
    }
    out
}
