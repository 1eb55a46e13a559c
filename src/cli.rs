use crate::constants::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdf-squeeze",
    about = "A batch PDF compression tool with adaptive image recompression",
    long_about = "pdf-squeeze compresses PDF files with a lossless structure pass and, when a \
                  size target is given, an adaptive pass that progressively lowers the quality \
                  of embedded images until the file fits. The batch command processes a whole \
                  directory and reports per-file success and failure without stopping on a \
                  bad file.",
    version,
    after_help = "EXAMPLES:\n  \
    pdf-squeeze batch\n  \
    pdf-squeeze batch ./scans ./compressed --max-size-kb 300 -r\n  \
    pdf-squeeze compress report.pdf report-small.pdf\n  \
    pdf-squeeze info report.pdf"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short = 'q', long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Show per-step detail")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress every PDF in a directory",
        long_about = "Scan the input path for PDF files, compress each one, and write the \
                      results to the output directory under the same base filename. One bad \
                      file never aborts the batch; failures are listed in the final summary."
    )]
    Batch {
        #[arg(
            default_value = DEFAULT_INPUT_DIR,
            help = "Input directory, file, or glob pattern",
            long_help = "Input can be a directory path, a single file, or a glob expression. \
                         Defaults to the ./input_pdfs convention."
        )]
        input: String,

        #[arg(
            default_value = DEFAULT_OUTPUT_DIR,
            help = "Output directory (created if missing)"
        )]
        output: PathBuf,

        #[arg(
            short = 'm',
            long,
            help = "Adaptive size target in KB",
            long_help = "When set, files still above this size after the lossless pass get \
                         their embedded images re-encoded as JPEG at decreasing quality \
                         (80 down to 20) until the target is met or quality runs out."
        )]
        max_size_kb: Option<u64>,

        #[arg(
            short = 'j',
            long,
            help = "Number of parallel threads (default: auto)",
            long_help = "Number of threads for parallel batch processing. \
                         If not specified, uses number of CPU cores."
        )]
        threads: Option<usize>,

        #[arg(short = 'r', long, help = "Process subdirectories recursively")]
        recursive: bool,
    },

    #[command(
        about = "Compress a single PDF file",
        long_about = "Compress one PDF with the same pipeline the batch command uses: a \
                      lossless structure pass, then optional adaptive image recompression. \
                      The output is never larger than the input."
    )]
    Compress {
        #[arg(help = "Input PDF file path")]
        input: PathBuf,

        #[arg(help = "Output PDF file path")]
        output: PathBuf,

        #[arg(short = 'm', long, help = "Adaptive size target in KB")]
        max_size_kb: Option<u64>,
    },

    #[command(
        about = "Display information about a PDF file",
        long_about = "Analyze a PDF and report its version, page and object counts, embedded \
                      image count, file size, and compression suggestions."
    )]
    Info {
        #[arg(help = "PDF file path to analyze")]
        input: PathBuf,
    },
}
