//! Writing expanded variants to disk
//!
//! Layout for a source `<dir>/<base>.meta.cfg` with output root `<dir>/tlcp_models`:
//!
//!     tlcp_models/<base>/<path...>/<name>.cfg
//!     tlcp_models/<base>/<path...>/<name>.tla      (companions only)
//!     tlcp_models/<base>/<path...>/*.tla           (auxiliary copies, companions only)
//!
//! The `<base>` directory is removed before anything is written so files from an
//! earlier run with more variants do not linger. A symlinked `<base>` is left alone.
//!
//! A variant named after the base module gets no stub: the stub would extend itself,
//! so the copied base module is kept instead.

use crate::variant::ConfigVariant;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Extension of companion module stubs
pub const STUB_EXTENSION: &str = "tla";

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("cannot {action} '{path}': {source}", path = .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MaterializeError {
    fn io<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> Self + 'a {
        move |source| MaterializeError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Companion file policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Write a `<name>.tla` stub per configuration and copy auxiliary files
    pub companions: bool,
    /// Extension (without the dot) of source-directory files copied next to each
    /// configuration
    pub auxiliary_extension: String,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            companions: false,
            auxiliary_extension: STUB_EXTENSION.to_string(),
        }
    }
}

/// Files written by one [Materializer::materialize] call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub configs: Vec<PathBuf>,
    pub stubs: Vec<PathBuf>,
    pub copies: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct Materializer {
    options: MaterializeOptions,
}

impl Materializer {
    pub fn new(options: MaterializeOptions) -> Self {
        Self { options }
    }

    /// Write `variants` under `output_root/base_name`
    ///
    /// `base_name` is also the module companion stubs extend.
    pub fn materialize(
        &self,
        variants: &[ConfigVariant],
        source_dir: &Path,
        output_root: &Path,
        base_name: &str,
    ) -> Result<MaterializeReport, MaterializeError> {
        let destination_root = output_root.join(base_name);
        if remove_generated(&destination_root)? {
            debug!(path = %destination_root.display(), "removed stale output");
        }
        fs::create_dir_all(&destination_root)
            .map_err(MaterializeError::io("create directory", &destination_root))?;

        let auxiliaries = if self.options.companions {
            auxiliary_files(source_dir, &self.options.auxiliary_extension)?
        } else {
            Vec::new()
        };

        let mut report = MaterializeReport::default();
        let mut prepared = BTreeSet::new();
        let mut written = BTreeSet::new();
        for variant in variants {
            let dir = variant
                .path
                .iter()
                .fold(destination_root.clone(), |dir, segment| dir.join(segment));
            fs::create_dir_all(&dir).map_err(MaterializeError::io("create directory", &dir))?;

            let config = dir.join(variant.file_name());
            fs::write(&config, variant.text.render())
                .map_err(MaterializeError::io("write", &config))?;
            let fresh = written.insert(config.clone());
            if fresh {
                report.configs.push(config);
            } else {
                warn!(
                    path = %config.display(),
                    "overwrote the configuration of an earlier variant with the same name"
                );
            }

            if !self.options.companions {
                continue;
            }

            // Copies go first so a stub always wins over a same-named auxiliary file.
            if prepared.insert(dir.clone()) {
                for auxiliary in &auxiliaries {
                    let Some(file_name) = auxiliary.file_name() else {
                        continue;
                    };
                    let target = dir.join(file_name);
                    fs::copy(auxiliary, &target).map_err(MaterializeError::io("copy to", &target))?;
                    report.copies.push(target);
                }
            }

            if !fresh {
                continue;
            }
            if variant.name == base_name {
                debug!(module = base_name, "no stub for the base module");
                continue;
            }

            let stub = dir.join(format!("{}.{}", variant.name, STUB_EXTENSION));
            fs::write(&stub, companion_stub(&variant.name, base_name))
                .map_err(MaterializeError::io("write", &stub))?;
            report.stubs.push(stub);
        }

        info!(
            base_name,
            configs = report.configs.len(),
            stubs = report.stubs.len(),
            copies = report.copies.len(),
            "materialized"
        );
        Ok(report)
    }
}

/// Text of the TLA+ module generated next to `<module>.cfg`
pub fn companion_stub(module: &str, extend_module: &str) -> String {
    format!(
        "---- MODULE {} ----\n\nEXTENDS {}, TLC\n\n====\n",
        module, extend_module
    )
}

/// Recursively remove a generated directory
///
/// Returns whether anything was removed. Missing paths and symbolic links are left
/// untouched.
pub fn remove_generated(path: &Path) -> Result<bool, MaterializeError> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => {
            fs::remove_dir_all(path).map_err(MaterializeError::io("remove", path))?;
            Ok(true)
        }
        Ok(_) => Ok(false),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(MaterializeError::Io {
            action: "inspect",
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

/// Regular files directly inside `dir` with the given extension, sorted by path
fn auxiliary_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, MaterializeError> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(MaterializeError::io("list", dir))? {
        let path = entry.map_err(MaterializeError::io("list", dir))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
