use clap::Parser;
use pdf_squeeze::batch::batch_compress_pdfs;
use pdf_squeeze::cli::{Args, Commands};
use pdf_squeeze::compress::{compress_pdf, CompressionOptions};
use pdf_squeeze::error::Result;
use pdf_squeeze::info::{get_pdf_info, print_detailed_info};
use pdf_squeeze::logger::{set_verbosity, Verbosity};
use rayon::ThreadPoolBuilder;
use std::path::Path;

fn main() -> Result<()> {
    let args = Args::parse();

    set_verbosity(if args.quiet {
        Verbosity::Quiet
    } else if args.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    });

    match args.command {
        Commands::Batch {
            input,
            output,
            max_size_kb,
            threads,
            recursive,
        } => {
            setup_thread_pool(threads);
            let options = CompressionOptions::new(max_size_kb)?;
            let report = batch_compress_pdfs(&input, &output, &options, recursive)?;
            // Per-file failures are in the summary; only setup errors change
            // the exit status.
            if report.failures() > 0 {
                pdf_squeeze::warn!(
                    "{} of {} files failed, see summary above",
                    report.failures(),
                    report.outcomes.len()
                );
            }
        }
        Commands::Compress {
            input,
            output,
            max_size_kb,
        } => {
            let options = CompressionOptions::new(max_size_kb)?;
            compress_pdf(input, output, options)?;
        }
        Commands::Info { input } => {
            show_pdf_info(&input)?;
        }
    }

    Ok(())
}

fn setup_thread_pool(threads: Option<usize>) {
    if let Some(num_threads) = threads {
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .unwrap_or_else(|e| {
                eprintln!("Warning: Failed to set thread pool size: {}", e);
            });
    }
}

fn show_pdf_info(input_path: &Path) -> Result<()> {
    pdf_squeeze::info!("📋 Analyzing: {:?}", input_path);
    get_pdf_info(input_path)?;
    print_detailed_info(input_path)?;
    Ok(())
}
