// Command definition shared by the binary and build.rs (shell completions).

use clap::{Arg, ArgAction, Command, ValueHint};

pub fn build_command() -> Command {
    Command::new("tlcp")
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            "A preprocessor for TLC configuration files. \
             Converts .meta.cfg files to TLC .cfg files.",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .help("The .meta.cfg file(s), or directories containing them if -d is used")
                .required(true)
                .num_args(1..)
                .value_hint(ValueHint::AnyPath),
        )
        .arg(
            Arg::new("directory")
                .long("directory")
                .short('d')
                .help("Process all .meta.cfg files in the given directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("cleanup")
                .long("cleanup")
                .short('c')
                .help("Remove the generated models folder of every source directory before generating")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("companions")
                .long("companions")
                .help("Write a .tla module next to every generated .cfg and copy auxiliary modules")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("TOML configuration layered over the built-in defaults")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Print the configurations that would be generated instead of writing them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format for --dry-run")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
}
