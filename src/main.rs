//! # e-Szigno extractor CLI (`es3x`)
//!
//! The `es3x` binary lists and extracts files embedded in e-Szigno `.es3`
//! signed-document containers.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `es3x ls <file>` | List embedded documents (date, size, MIME, filename) |
//! | `es3x extract <file>` | Decode embedded documents into an output directory |
//!
//! ## Examples
//!
//! ```bash
//! # List the contents of a dossier
//! es3x ls contract.es3
//!
//! # Same listing as JSON, for scripting
//! es3x ls contract.es3 --json
//!
//! # Extract all embedded files into ./out
//! es3x extract contract.es3 -o out
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use eszigno_extract::{extract_cmd, list};

/// e-Szigno dossier extractor — list and recover files embedded in `.es3`
/// signed-document containers.
#[derive(Parser)]
#[command(
    name = "es3x",
    about = "List and extract files embedded in e-Szigno .es3 dossiers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List the documents embedded in a dossier.
    ///
    /// Prints one row per document: creation date, original size, MIME type
    /// and the filename extraction would use.
    Ls {
        /// Path to the `.es3` input file.
        input_file: PathBuf,

        /// Emit the listing as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Extract embedded documents to files.
    ///
    /// Decodes every document's payload (reversing its transform chain) and
    /// writes the original bytes to `<output-directory>/<filename>`. A
    /// document that fails to decode is reported and skipped; the command
    /// exits nonzero if any document failed.
    Extract {
        /// Path to the `.es3` input file.
        input_file: PathBuf,

        /// Output directory (default: current directory).
        #[arg(short = 'o', long, default_value = ".")]
        output_directory: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ls { input_file, json } => {
            list::run_ls(&input_file, json)?;
        }
        Commands::Extract {
            input_file,
            output_directory,
        } => {
            extract_cmd::run_extract(&input_file, &output_directory)?;
        }
    }

    Ok(())
}
