use clap::Parser;
use std::path::PathBuf;

const USAGE_EXAMPLES: &str = "\
Examples:
  doc2md document.pdf                  Convert a PDF next to the original
  doc2md document.docx -o output.md    Choose the output file
  doc2md --batch input_folder/         Convert every supported file in a folder
  doc2md --batch input/ -o output/     Mirror the folder tree under output/";

/// Convert PDF, Office, HTML and text documents to Markdown
#[derive(Parser, Debug)]
#[command(name = "doc2md", version, about, after_help = USAGE_EXAMPLES)]
pub struct Cli {
    /// Input file, or input directory together with --batch
    #[arg(required_unless_present = "list_formats")]
    pub input: Option<PathBuf>,

    /// Output file (single-file mode) or output directory (batch mode).
    /// Defaults to the input path with a `.md` extension, or the input directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Recursively convert every supported file under the input directory
    #[arg(long, default_value_t = false)]
    pub batch: bool,

    /// Print the supported file extensions and exit
    #[arg(long, default_value_t = false)]
    pub list_formats: bool,

    /// Log debug details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
