//! Turning command-line inputs into the list of sources to process

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Invalid command-line input. These abort the run before anything is processed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("File '{0}' not found.")]
    FileNotFound(String),
    #[error("'{0}' is not a file.")]
    NotAFile(String),
    #[error("File '{0}' is not a {1} file.")]
    WrongExtension(String, String),
    #[error("Directory '{0}' not found.")]
    DirectoryNotFound(String),
    #[error("'{0}' is not a directory.")]
    NotADirectory(String),
    #[error("cannot list '{0}': {1}")]
    Unreadable(String, String),
    #[error("Found no {0} files.")]
    NoSources(String),
}

/// Validate the inputs and return the sources to process, in order
///
/// In directory mode every file directly inside each directory whose name ends with
/// `extension` is collected, sorted per directory.
pub fn collect_sources(
    inputs: &[String],
    directories: bool,
    extension: &str,
) -> Result<Vec<PathBuf>, ArgumentError> {
    if !directories {
        for input in inputs {
            let path = Path::new(input);
            if !path.exists() {
                return Err(ArgumentError::FileNotFound(input.clone()));
            }
            if !path.is_file() {
                return Err(ArgumentError::NotAFile(input.clone()));
            }
            if !input.ends_with(extension) {
                return Err(ArgumentError::WrongExtension(
                    input.clone(),
                    extension.to_string(),
                ));
            }
        }
        return Ok(inputs.iter().map(PathBuf::from).collect());
    }

    for input in inputs {
        let path = Path::new(input);
        if !path.exists() {
            return Err(ArgumentError::DirectoryNotFound(input.clone()));
        }
        if !path.is_dir() {
            return Err(ArgumentError::NotADirectory(input.clone()));
        }
    }

    let mut sources = Vec::new();
    for input in inputs {
        let entries = fs::read_dir(input)
            .map_err(|e| ArgumentError::Unreadable(input.clone(), e.to_string()))?;
        let mut found: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_extension(path, extension))
            .collect();
        found.sort();
        sources.extend(found);
    }

    if sources.is_empty() {
        return Err(ArgumentError::NoSources(extension.to_string()));
    }
    Ok(sources)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(extension) && name.len() > extension.len())
}

/// File name with `extension` stripped
pub fn base_name(path: &Path, extension: &str) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.strip_suffix(extension)
        .filter(|base| !base.is_empty())
        .map(str::to_string)
}

/// Directory holding `path`, `.` for bare file names
pub fn source_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXT: &str = ".meta.cfg";

    fn touch(path: &Path) {
        fs::write(path, "").expect("write");
    }

    fn display(path: &Path) -> String {
        path.display().to_string()
    }

    #[test]
    fn test_files_are_validated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = dir.path().join("a.meta.cfg");
        let wrong = dir.path().join("a.cfg");
        touch(&good);
        touch(&wrong);

        assert_eq!(
            collect_sources(&[display(&good)], false, EXT),
            Ok(vec![good.clone()])
        );
        assert_eq!(
            collect_sources(&[display(&wrong)], false, EXT),
            Err(ArgumentError::WrongExtension(display(&wrong), EXT.to_string()))
        );
        assert_eq!(
            collect_sources(&[display(dir.path())], false, EXT),
            Err(ArgumentError::NotAFile(display(dir.path())))
        );
        assert!(matches!(
            collect_sources(&["missing.meta.cfg".to_string()], false, EXT),
            Err(ArgumentError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_directories_are_scanned() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(&dir.path().join("b.meta.cfg"));
        touch(&dir.path().join("a.meta.cfg"));
        touch(&dir.path().join("plain.cfg"));
        fs::create_dir(dir.path().join("nested")).expect("mkdir");
        touch(&dir.path().join("nested").join("c.meta.cfg"));

        assert_eq!(
            collect_sources(&[display(dir.path())], true, EXT),
            Ok(vec![
                dir.path().join("a.meta.cfg"),
                dir.path().join("b.meta.cfg")
            ])
        );
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(
            collect_sources(&[display(dir.path())], true, EXT),
            Err(ArgumentError::NoSources(EXT.to_string()))
        );
    }

    #[test]
    fn test_directory_mode_rejects_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("a.meta.cfg");
        touch(&file);
        assert_eq!(
            collect_sources(&[display(&file)], true, EXT),
            Err(ArgumentError::NotADirectory(display(&file)))
        );
    }

    #[test]
    fn test_base_name_and_source_dir() {
        assert_eq!(
            base_name(Path::new("models/queue.meta.cfg"), EXT),
            Some("queue".to_string())
        );
        assert_eq!(base_name(Path::new(".meta.cfg"), EXT), None);
        assert_eq!(source_dir(Path::new("queue.meta.cfg")), PathBuf::from("."));
        assert_eq!(
            source_dir(Path::new("models/queue.meta.cfg")),
            PathBuf::from("models")
        );
    }
}
