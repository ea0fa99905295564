//! Per-file processing: read, parse, expand and materialize one source
//!
//! Every failure here is scoped to the file being processed. The caller reports it
//! and moves on to the next source.

use crate::discovery::{base_name, source_dir};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tlcp_expand::{expand, ConfigVariant, ExpandError, MaterializeError, MaterializeReport, Materializer};
use tlcp_parser::tlcp::{DocumentLoader, LoaderError, Position, SyntaxError};
use tracing::{debug, info};

/// A source file and where its output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub dir: PathBuf,
    pub base_name: String,
}

impl SourceFile {
    /// `None` when stripping `extension` leaves an empty name
    pub fn new(path: PathBuf, extension: &str) -> Option<Self> {
        let base_name = base_name(&path, extension)?;
        let dir = source_dir(&path);
        Some(Self {
            path,
            dir,
            base_name,
        })
    }

    /// `<dir>/<models_dir>`
    pub fn output_root(&self, models_dir: &str) -> PathBuf {
        self.dir.join(models_dir)
    }
}

#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot derive a model name from the file name")]
    EmptyName,
    #[error(transparent)]
    Read(LoaderError),
    #[error("{} syntax error(s)", .0.len())]
    Syntax(Vec<(Position, SyntaxError)>),
    #[error("{1}")]
    Validation(Position, ExpandError),
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

impl FileError {
    /// One diagnostic line per problem, prefixed with the source path
    pub fn diagnostics(&self, path: &Path) -> Vec<String> {
        let path = path.display();
        match self {
            FileError::Syntax(errors) => errors
                .iter()
                .map(|(position, error)| format!("{}:{}: error: {}", path, position, error))
                .collect(),
            FileError::Validation(position, error) => {
                vec![format!("{}:{}: error: {}", path, position, error)]
            }
            other => vec![format!("{}: error: {}", path, other)],
        }
    }
}

/// Read, parse and expand a source file
///
/// Nothing is written. Errors carry line:column positions resolved against the source.
pub fn expand_file(source: &SourceFile) -> Result<Vec<ConfigVariant>, FileError> {
    let loader = DocumentLoader::from_path(&source.path).map_err(FileError::Read)?;
    let location = loader.location();

    let document = loader.parse().map_err(|err| match err {
        LoaderError::Syntax(errors) => FileError::Syntax(
            errors
                .into_iter()
                .map(|error| (error.position(&location), error))
                .collect(),
        ),
        other => FileError::Read(other),
    })?;

    let variants = expand(&document, &source.base_name).map_err(|error| {
        FileError::Validation(location.byte_to_position(error.span().start), error)
    })?;
    debug!(path = %source.path.display(), variants = variants.len(), "expanded");
    Ok(variants)
}

/// Expand a source file and write its configurations under `<dir>/<models_dir>`
pub fn process_file(
    source: &SourceFile,
    materializer: &Materializer,
    models_dir: &str,
) -> Result<MaterializeReport, FileError> {
    let variants = expand_file(source)?;
    let report = materializer.materialize(
        &variants,
        &source.dir,
        &source.output_root(models_dir),
        &source.base_name,
    )?;
    info!(
        path = %source.path.display(),
        configs = report.configs.len(),
        "processed"
    );
    Ok(report)
}
