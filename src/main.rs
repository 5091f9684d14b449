//! Arbor CLI - format, compact, and query XML documents.
//!
//! This is the main entry point for the arbor command-line application.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use arbor_xml::{Document, Options};

/// Arbor - XML formatting and query tool
#[derive(Parser)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reformat an XML file with tab indentation
    Format {
        /// Input XML file
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Strip indentation and newlines from an XML file
    Compact {
        /// Input XML file
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Look up an element by dotted key path and print its value
    Get {
        /// Input XML file
        input: PathBuf,

        /// Key path below the root, e.g. "settings.video.width"
        path: String,

        /// Print this attribute of the matched element instead of its value
        #[arg(short, long)]
        attr: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Format { input, output } => cmd_format(&input, output.as_deref(), false),
        Commands::Compact { input, output } => cmd_format(&input, output.as_deref(), true),
        Commands::Get { input, path, attr } => cmd_get(&input, &path, attr.as_deref()),
    }
}

fn cmd_format(input: &Path, output: Option<&Path>, compact: bool) -> Result<()> {
    let doc = parse_file(input)?;

    let xml = if compact { doc.xml_compact() } else { doc.xml() };

    match output {
        Some(path) => {
            fs::write(path, xml).context("Failed to write output file")?;
        }
        None => println!("{}", xml),
    }

    Ok(())
}

fn cmd_get(input: &Path, path: &str, attr: Option<&str>) -> Result<()> {
    let doc = parse_file(input)?;
    let root = doc.root().context("Document has no root element")?;

    let Some(id) = doc.get_path(root, path) else {
        anyhow::bail!("No element at path '{}'", path);
    };

    match attr {
        Some(name) => {
            let value = doc
                .element(id)
                .attr(name)
                .with_context(|| format!("Element has no attribute '{}'", name))?;
            println!("{}", value);
        }
        None => println!("{}", doc.element(id).string()),
    }

    Ok(())
}

fn parse_file(input: &Path) -> Result<Document> {
    let data = fs::read(input).context("Failed to read input file")?;
    Document::parse_bytes(&data, Options::strict())
        .with_context(|| format!("Failed to parse {}", input.display()))
}
