use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strata::cli;
use strata::error::StrataResult;

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Hierarchical spreadsheet ↔ YAML converter")]
#[command(long_about = "Strata - Structural spreadsheet conversion

Infers implicit tree structure from leveled sheet headers (一級/二級 or
Level 1/Level 2), builds an ordered YAML document, and round-trips documents
back to workbooks.

COMMANDS:
  import  - Workbook or delimited text to YAML
  export  - YAML document to workbook (.xlsx)
  tree    - Print the render tree for a document
  check   - Validate that documents parse

EXAMPLES:
  strata import features.xlsx                 # → features.yaml
  strata import data.csv -o data.yaml
  strata export model.yaml -o model.xlsx
  strata tree model.yaml --depth 2
  strata check model.yaml other.yaml")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Convert a workbook (or delimited text) to a YAML document.

Each sheet becomes a top-level key. Sheets whose headers carry level markers
(一級, 二級, ... or Level 1, Level 2, ...) are built into a nested mapping;
other sheets fall back to one mapping per row, keyed by the header row.

Delimited text (.csv, .tsv, .txt) is treated as a single implicit sheet
named after the file stem.")]
    /// Convert a workbook or delimited text to YAML
    Import {
        /// Path to .xlsx, .xlsm, .csv, .tsv or .txt input
        input: PathBuf,

        /// Output YAML path (defaults to the input with a .yaml extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show per-sheet progress
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Convert a YAML document to an .xlsx workbook.

A root mapping with container values splits into one sheet per top-level
key; anything else lands on a single 'Sheet1'. Nested mappings flatten into
dot-joined columns (parent.child); arrays are written as comma-joined cells
and are not reconstructable from the sheet.")]
    /// Convert a YAML document to a workbook
    Export {
        /// Path to YAML document
        input: PathBuf,

        /// Output .xlsx path (defaults to the input with an .xlsx extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show progress steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the render tree for a document
    Tree {
        /// Path to YAML document
        file: PathBuf,

        /// Maximum depth to print
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Validate that documents parse
    Check {
        /// Path to YAML document(s) to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> StrataResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            input,
            output,
            verbose,
        } => cli::import(input, output, verbose),

        Commands::Export {
            input,
            output,
            verbose,
        } => cli::export(input, output, verbose),

        Commands::Tree { file, depth } => cli::tree(file, depth),

        Commands::Check { files } => cli::check(files),
    }
}
