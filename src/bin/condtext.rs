//! Command-line interface for condtext
//! Runs a document through the directive preprocessor, or shows how it was parsed.
//!
//! Usage:
//!   condtext [PATH] [-D SYMBOL]... [--config FILE] [--format text|treeviz|json]
//!
//! Reads stdin when PATH is absent or `-`. The transformed text goes to stdout; diagnostics and
//! logs go to stderr. Configuration layers, lowest first: built-in defaults, `condtext.toml` in
//! the working directory (if present), the `--config` file. `-D` symbols add to the configured
//! ones.

use clap::{Arg, ArgAction, Command};
use condtext::condtext::config::{CondtextConfig, Loader};
use condtext::condtext::formats::{to_json_str, to_treeviz_str_with_linum};
use condtext::{DefinedSymbols, Preprocessor};
use std::io::Read;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

fn main() {
    let matches = Command::new("condtext")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keep or drop text regions selected by comment directives")
        .arg(
            Arg::new("path")
                .help("Document to process; stdin when absent or '-'")
                .index(1),
        )
        .arg(
            Arg::new("define")
                .long("define")
                .short('D')
                .value_name("SYMBOL")
                .help("Define a symbol (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: the transformed text, or the parsed directive tree")
                .value_parser(["text", "treeviz", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("show-linum")
                .long("show-linum")
                .help("Prefix treeviz nodes with their source line")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = load_config(matches.get_one::<String>("config")).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    init_logging(&config.logging.level);

    let path = matches.get_one::<String>("path").map(String::as_str);
    let source = read_source(path).unwrap_or_else(|e| {
        eprintln!("Error reading input: {}", e);
        std::process::exit(1);
    });

    let mut symbols = config.symbols();
    if let Some(defines) = matches.get_many::<String>("define") {
        symbols.extend(defines.cloned());
    }
    warn_invalid_symbols(&symbols);

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let show_linum = matches.get_flag("show-linum");
    handle_format(&config, &source, &symbols, format, show_linum);
}

fn load_config(path: Option<&String>) -> Result<CondtextConfig, config::ConfigError> {
    let mut loader = Loader::new().with_optional_file("condtext.toml");
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader.build()
}

/// Logs go to stderr; `RUST_LOG` wins over the configured level
fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if let Err(e) = Registry::default()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

fn read_source(path: Option<&str>) -> std::io::Result<String> {
    match path {
        None | Some("-") => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
        Some(path) => std::fs::read_to_string(path),
    }
}

fn warn_invalid_symbols(symbols: &DefinedSymbols) {
    for name in symbols.invalid_names() {
        tracing::warn!(symbol = name, "symbol can never appear in a condition");
    }
}

fn handle_format(
    config: &CondtextConfig,
    source: &str,
    symbols: &DefinedSymbols,
    format: &str,
    show_linum: bool,
) {
    let preprocessor = Preprocessor::new(config.options());

    let output = match format {
        "treeviz" => to_treeviz_str_with_linum(&parse_or_exit(&preprocessor, source), show_linum),
        "json" => {
            let mut json = to_json_str(&parse_or_exit(&preprocessor, source)).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            json.push('\n');
            json
        }
        _ => {
            let processed = preprocessor.process(source, symbols).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            for diagnostic in &processed.diagnostics {
                eprintln!("{}", diagnostic);
            }
            processed.text
        }
    };

    print!("{}", output);
}

fn parse_or_exit(preprocessor: &Preprocessor, source: &str) -> condtext::condtext::ast::Document {
    preprocessor.parse(source).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}
