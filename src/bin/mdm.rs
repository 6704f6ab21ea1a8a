//! mdm CLI - literal macro substitution for markdown files

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use mdmacros::{
    diagnostics::{check_document, check_table, format_diagnostics, CheckResult},
    expand_with_warnings, HostConfig, MacroError, MacroTable, SubstitutionWarning, MACROS_KEY,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "mdm")]
#[command(version)]
#[command(about = "Substitute user-defined macros in markdown text", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Configuration file holding the macro table (yaml, toml or json)
    #[arg(short, long)]
    config: Option<String>,

    /// Configuration key naming the macro table entry
    #[arg(short, long, default_value = MACROS_KEY)]
    key: String,

    /// Extra macro definition TOKEN=TEXT (repeatable, applied after the
    /// config file)
    #[arg(short, long = "macro", value_name = "TOKEN=TEXT")]
    r#macro: Vec<String>,

    /// Check mode - diagnose the table and document without substituting
    #[arg(long)]
    check: bool,

    /// Use colored output (for diagnostics)
    #[arg(long, default_value_t = true)]
    color: bool,

    /// Strict mode: exit with error if any substitution warnings occur
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Diagnose a macro table and how it applies to a document
    Check {
        /// Input file to check against (stdin if not provided)
        input: Option<String>,

        /// Configuration file holding the macro table
        #[arg(short, long)]
        config: Option<String>,

        /// Configuration key naming the macro table entry
        #[arg(short, long, default_value = MACROS_KEY)]
        key: String,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd);
    }

    // Read input
    let input = match cli.input_file {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    // Build the macro table from the config file plus -m definitions
    let table = match build_table(cli.config.as_deref(), &cli.key, &cli.r#macro) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    // If check mode, analyze and report issues
    if cli.check {
        let mut result = check_table(&table);
        result.merge(check_document(&input, &table));
        println!("{}", format_diagnostics(&result, cli.color));

        if result.has_errors() {
            std::process::exit(1);
        }
        return Ok(());
    }

    if let Err(e) = table.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    let output = expand_with_warnings(&input, &table);

    // Print warnings to stderr (unless quiet mode)
    if !cli.quiet && output.has_warnings() {
        print_warnings_to_stderr(&output.warnings, cli.color);
    }

    // Check strict mode
    if cli.strict && output.has_warnings() {
        eprintln!(
            "Error: {} substitution warning(s) in strict mode",
            output.warnings.len()
        );
        std::process::exit(1);
    }

    // Output
    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            write!(file, "{}", output.content)?;
            if output.has_warnings() {
                eprintln!(
                    "⚠ Output written to: {} ({} warning(s))",
                    path,
                    output.warnings.len()
                );
            } else {
                eprintln!("✓ Output written to: {}", path);
            }
        }
        None => {
            print!("{}", output.content);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> io::Result<()> {
    match cmd {
        Commands::Check {
            input,
            config,
            key,
            no_color,
        } => {
            let content = match input {
                Some(path) => fs::read_to_string(&path)?,
                None => {
                    let mut buffer = String::new();
                    io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };

            let table = match build_table(config.as_deref(), &key, &[]) {
                Ok(table) => table,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(2);
                }
            };

            let mut result: CheckResult = check_table(&table);
            result.merge(check_document(&content, &table));
            println!("{}", format_diagnostics(&result, !no_color));

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Info => {
            println!("mdm - literal macro substitution for markdown");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Features:");
            println!("  ✓ Literal token substitution (no regex, no grammar)");
            println!("  ✓ Overlap-aware scanning");
            println!("  ✓ Shift-safe descending-offset replacement");
            println!("  ✓ Macro table diagnostics");
            println!("  ✓ YAML / TOML / JSON configuration files");
            println!();
            println!(
                "Configuration: the '{}' entry names the config entry that",
                MACROS_KEY
            );
            println!("holds the macro table (override with --key).");
            println!();
        }
    }

    Ok(())
}

/// Load the config file (if any) and apply -m TOKEN=TEXT definitions
#[cfg(feature = "cli")]
fn build_table(
    config: Option<&str>,
    key: &str,
    definitions: &[String],
) -> Result<MacroTable, MacroError> {
    let mut table = match config {
        Some(path) => HostConfig::load(path)?
            .macro_table_at(key)?
            .unwrap_or_default(),
        None => MacroTable::new(),
    };

    for definition in definitions {
        let Some((token, replacement)) = definition.split_once('=') else {
            return Err(MacroError::config(format!(
                "macro definition '{}' is not of the form TOKEN=TEXT",
                definition
            )));
        };
        table.insert(token, replacement);
    }

    Ok(table)
}

/// Print substitution warnings to stderr with optional color coding
#[cfg(feature = "cli")]
fn print_warnings_to_stderr(warnings: &[SubstitutionWarning], use_color: bool) {
    eprintln!();
    eprintln!(
        "{}Substitution Warnings ({}):{}",
        if use_color { "\x1b[33m" } else { "" },
        warnings.len(),
        if use_color { "\x1b[0m" } else { "" }
    );
    eprintln!();

    for warning in warnings {
        if use_color {
            eprintln!("  \x1b[33m{}\x1b[0m", warning);
        } else {
            eprintln!("  {}", warning);
        }
    }
    eprintln!();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install mdmacros --features cli");
    eprintln!("  mdm [OPTIONS] [INPUT_FILE]");
}
