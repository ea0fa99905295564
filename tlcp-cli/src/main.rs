//! Command-line interface for tlcp
//!
//! Expands `.meta.cfg` templates into one TLC `.cfg` per variant.
//!
//! Usage:
//!   tlcp `<file>...`                 - Expand the given files
//!   tlcp -d `<dir>...`               - Expand every .meta.cfg directly inside the directories
//!   tlcp --dry-run [-f json] `<file>` - Print what would be generated
//!
//! Exit status is 0 on success, 1 if any file failed and 2 for invalid arguments.
//! Set `TLCP_LOG` (e.g. `TLCP_LOG=debug`) to see what the tool is doing.

mod cli;
mod discovery;
mod pipeline;
mod plan;

use pipeline::{expand_file, process_file, FileError, SourceFile};
use plan::{Plan, PlanFormat};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;
use tlcp_config::{ConfigError, Loader, TlcpConfig};
use tlcp_expand::materialize::remove_generated;
use tlcp_expand::Materializer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const EXIT_FILE_FAILED: u8 = 1;
const EXIT_BAD_ARGUMENTS: u8 = 2;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TLCP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let matches = cli::build_command().get_matches();

    let config = match load_config(
        matches.get_one::<String>("config"),
        matches.get_flag("companions"),
    ) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: invalid configuration: {}", err);
            return ExitCode::from(EXIT_BAD_ARGUMENTS);
        }
    };

    let inputs: Vec<String> = matches
        .get_many::<String>("files")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let extension = config.input.extension.as_str();

    let paths = match discovery::collect_sources(&inputs, matches.get_flag("directory"), extension) {
        Ok(paths) => paths,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(EXIT_BAD_ARGUMENTS);
        }
    };

    let mut failed = 0usize;
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        match SourceFile::new(path.clone(), extension) {
            Some(source) => sources.push(source),
            None => {
                report(&path, &FileError::EmptyName);
                failed += 1;
            }
        }
    }

    if matches.get_flag("dry-run") {
        let format = matches
            .get_one::<String>("format")
            .and_then(|name| PlanFormat::from_name(name))
            .unwrap_or(PlanFormat::Text);
        failed += dry_run(&sources, &config, format);
    } else {
        if matches.get_flag("cleanup") {
            failed += cleanup(&sources, &config.output.models_dir);
        }
        failed += generate(&sources, &config);
    }

    if failed > 0 {
        warn!(failed, "some files could not be processed");
        ExitCode::from(EXIT_FILE_FAILED)
    } else {
        ExitCode::SUCCESS
    }
}

fn load_config(path: Option<&String>, companions: bool) -> Result<TlcpConfig, ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    if companions {
        loader = loader.enable_companions()?;
    }
    loader.build()
}

fn report(path: &std::path::Path, error: &FileError) {
    for line in error.diagnostics(path) {
        eprintln!("{}", line);
    }
}

/// Remove the models folder of every distinct source directory
///
/// Returns the number of folders that could not be removed.
fn cleanup(sources: &[SourceFile], models_dir: &str) -> usize {
    let roots: BTreeSet<PathBuf> = sources
        .iter()
        .map(|source| source.output_root(models_dir))
        .collect();

    let mut failed = 0;
    for root in roots {
        match remove_generated(&root) {
            Ok(true) => info!(path = %root.display(), "removed models folder"),
            Ok(false) => {}
            Err(err) => {
                eprintln!("{}: error: {}", root.display(), err);
                failed += 1;
            }
        }
    }
    failed
}

fn generate(sources: &[SourceFile], config: &TlcpConfig) -> usize {
    let materializer = Materializer::new(config.materialize_options());
    let mut failed = 0;
    for source in sources {
        if let Err(err) = process_file(source, &materializer, &config.output.models_dir) {
            report(&source.path, &err);
            failed += 1;
        }
    }
    failed
}

fn dry_run(sources: &[SourceFile], config: &TlcpConfig, format: PlanFormat) -> usize {
    let mut plan = Plan::new();
    let mut failed = 0;
    for source in sources {
        match expand_file(source) {
            Ok(variants) => plan.extend(
                source.path.clone(),
                source
                    .output_root(&config.output.models_dir)
                    .join(&source.base_name),
                variants,
            ),
            Err(err) => {
                report(&source.path, &err);
                failed += 1;
            }
        }
    }

    match plan.render(format) {
        Ok(rendered) => print!("{}", rendered),
        Err(err) => {
            eprintln!("error: cannot render plan: {}", err);
            failed += 1;
        }
    }
    failed
}
