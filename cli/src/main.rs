//! pagepack CLI - text and Markdown to Pages bundle conversion
//!
//! A command-line tool for producing deterministic Pages '09 bundles.

use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use pagepack::{ConvertOptions, Converter, SourceFormat};
use std::path::PathBuf;

/// Deterministic text and Markdown to Pages bundle conversion
#[derive(Parser)]
#[command(
    name = "pagepack",
    version,
    about = "Convert text and Markdown files to Pages bundles",
    long_about = "pagepack - Deterministic Pages '09 bundle generator.\n\n\
                  Converts plain text and Markdown files to .pages archives whose bytes \
                  depend only on the input."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single file to a Pages bundle
    Convert {
        /// Input file path (.txt, .md, ...)
        input: PathBuf,

        /// Output bundle path (default: input with .pages extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert every matching file in a directory tree
    Batch {
        /// Input directory
        input: PathBuf,

        /// Output directory (mirrors the input tree)
        output: PathBuf,

        /// Glob selecting input files, relative to the input directory
        #[arg(short, long, default_value = pagepack::convert::DEFAULT_PATTERN)]
        pattern: String,

        /// Print the batch report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the content fingerprint of an existing file
    Verify {
        /// File to fingerprint
        file: PathBuf,
    },

    /// Show the parsed block model of a source file as JSON
    Blocks {
        /// Input file path
        input: PathBuf,

        /// Print the document text instead of JSON
        #[arg(long)]
        text: bool,
    },

    /// List the members of a bundle
    Inspect {
        /// Bundle path
        bundle: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Convert { input, output } => {
            let output = output.unwrap_or_else(|| input.with_extension("pages"));
            let converter = Converter::new(ConvertOptions::default());

            let fingerprint = converter.convert_file(&input, &output)?;

            println!(
                "{} Converted {} → {}",
                "✓".green().bold(),
                input.display(),
                output.display()
            );
            println!("{}: {}", "Output hash".bold(), fingerprint);
        }

        Commands::Batch {
            input,
            output,
            pattern,
            json,
        } => {
            let converter = Converter::new(ConvertOptions::default().with_pattern(pattern));

            let pb = create_spinner(&format!(
                "Converting {} → {}...",
                input.display(),
                output.display()
            ));
            let report = converter.batch_convert(&input, &output);
            pb.finish_and_clear();

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!(
                "{} Converted {} files",
                "✓".green().bold(),
                report.converted
            );
            for failure in report.failures() {
                println!(
                    "{} {}: {}",
                    "✗".red().bold(),
                    failure.input.display(),
                    failure.error.as_deref().unwrap_or("unknown error")
                );
            }
        }

        Commands::Verify { file } => {
            let fingerprint = pagepack::fingerprint_file(&file)?;
            println!("{}: {}", "File hash".bold(), fingerprint);
        }

        Commands::Blocks { input, text } => {
            let content = pagepack::reader::read_text(&input)?;
            let format = SourceFormat::from_path(&input);
            let blocks = pagepack::parse::parse(&content, format);

            if text {
                println!("{}", pagepack::model::plain_text(&blocks));
            } else {
                println!("{}", serde_json::to_string_pretty(&blocks)?);
            }
        }

        Commands::Inspect { bundle } => {
            let members = pagepack::bundle::list_members(&bundle)?;

            println!("{}", "Bundle Members".cyan().bold());
            println!("{}", "─".repeat(40));
            for name in &members {
                println!("{}", name);
            }
            println!("{}", "─".repeat(40));

            let xml = pagepack::bundle::read_member(&bundle, pagepack::model::INDEX_XML_PATH)?;
            let paragraphs = pagepack::render::read_paragraphs(&String::from_utf8_lossy(&xml))?;
            println!("{}: {}", "Paragraphs".bold(), paragraphs.len());
            println!(
                "{}: {}",
                "Fingerprint".bold(),
                pagepack::fingerprint_file(&bundle)?
            );
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "pagepack".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Deterministic text and Markdown to Pages bundle conversion");
    println!();
    println!("Supported inputs: plain text, Markdown (.md, .markdown)");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
