//! Command-line interface for frontlab
//! Analyzes a source file with one of the built-in grammars and prints diagnostics,
//! quads and the recursive-descent trace.
//!
//! Usage:
//!   frontlab `<path>` --grammar `<grammar>` [--format `<format>`] [--config `<file>`] [--no-trace]
//!   frontlab --list-grammars
//!
//! Exit status is 0 for a clean analysis, 2 when the analysis reported diagnostics and
//! 1 when the file or the configuration could not be used.

use clap::{Arg, ArgAction, Command};
use frontlab::frontlab::config::{FrontlabConfig, Loader};
use frontlab::frontlab::error::FrontlabError;
use frontlab::frontlab::processor::{available_formats, process_file, OutputFormat};
use frontlab::{AnalysisOptions, Grammar};

fn main() {
    let matches = Command::new("frontlab")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Lexing, recursive-descent parsing with recovery, and quadruple emission")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the source file to analyze")
                .required_unless_present("list-grammars")
                .index(1),
        )
        .arg(
            Arg::new("grammar")
                .long("grammar")
                .short('g')
                .help("Grammar to analyze with: statement, expression or record")
                .required_unless_present("list-grammars"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help(format!(
                    "Output format ({}); defaults to the configured format",
                    available_formats().join(", ")
                )),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("no-trace")
                .long("no-trace")
                .help("Do not record the recursive-descent trace")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-grammars")
                .long("list-grammars")
                .help("List the available grammars")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-grammars") {
        handle_list_grammars_command();
        return;
    }

    let path = matches.get_one::<String>("path").cloned().unwrap_or_default();
    let grammar = matches.get_one::<String>("grammar").cloned().unwrap_or_default();
    let format = matches.get_one::<String>("format").cloned();
    let config = matches.get_one::<String>("config").cloned();
    let no_trace = matches.get_flag("no-trace");

    match handle_analyze_command(&path, &grammar, format.as_deref(), config.as_deref(), no_trace)
    {
        Ok(clean) => {
            if !clean {
                std::process::exit(2);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Analyze one file; returns whether the analysis was free of diagnostics.
fn handle_analyze_command(
    path: &str,
    grammar: &str,
    format: Option<&str>,
    config_path: Option<&str>,
    no_trace: bool,
) -> Result<bool, FrontlabError> {
    let grammar: Grammar = grammar.parse()?;
    let config = load_config(config_path, no_trace)?;
    let format = match format {
        Some(name) => name.parse::<OutputFormat>()?,
        None => config.output.format,
    };
    let options = AnalysisOptions::from(&config);

    let (analysis, output) = process_file(path, grammar, format, &options)?;
    println!("{}", output);
    Ok(analysis.diagnostics().is_empty())
}

fn load_config(path: Option<&str>, no_trace: bool) -> Result<FrontlabConfig, FrontlabError> {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    if no_trace {
        loader = loader.set_override("trace.enabled", false)?;
    }
    Ok(loader.build()?)
}

fn handle_list_grammars_command() {
    println!("Available grammars:\n");
    for grammar in Grammar::ALL {
        println!("  {}", grammar);
        println!("    {}", grammar.description());
    }
}
