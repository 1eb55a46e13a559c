use crate::compress::{process_pdf_pipeline, CompressionOptions};
use crate::error::{CompressionError, Result};
use crate::utils::{calculate_compression_ratio, format_file_size, is_pdf_file};
use crate::{info, warn};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Result of processing one candidate file.
#[derive(Debug)]
pub enum Outcome {
    Compressed {
        output: PathBuf,
        original_size: u64,
        final_size: u64,
    },
    Failed(CompressionError),
}

/// One record per candidate file; the batch produces exactly one of these
/// for every PDF discovered in the input, whether it succeeded or not.
#[derive(Debug)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub outcome: Outcome,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Compressed { .. })
    }
}

/// Aggregate report over a whole batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.len() - self.successes()
    }

    pub fn total_original_size(&self) -> u64 {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.outcome {
                Outcome::Compressed { original_size, .. } => Some(*original_size),
                Outcome::Failed(_) => None,
            })
            .sum()
    }

    pub fn total_final_size(&self) -> u64 {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.outcome {
                Outcome::Compressed { final_size, .. } => Some(*final_size),
                Outcome::Failed(_) => None,
            })
            .sum()
    }

    pub fn failed_files(&self) -> impl Iterator<Item = (&Path, &CompressionError)> {
        self.outcomes.iter().filter_map(|o| match &o.outcome {
            Outcome::Failed(err) => Some((o.source.as_path(), err)),
            Outcome::Compressed { .. } => None,
        })
    }
}

/// Runs the batch: discovers candidates, compresses each one, and returns a
/// report with one outcome per file.
///
/// Setup failures (missing input, output directory cannot be created) abort
/// the run before any file is touched. A failure on an individual file is
/// recorded in its outcome and never stops the rest of the batch.
pub fn batch_compress_pdfs(
    input: &str,
    output: &Path,
    options: &CompressionOptions,
    recursive: bool,
) -> Result<BatchReport> {
    info!("🚀 Starting batch compression...");
    info!("📁 Input: {}", input);
    info!("📁 Output: {:?}", output);

    let start_time = Instant::now();

    // Output directory is created before anything else, even for an empty
    // batch. Failure here is fatal.
    fs::create_dir_all(output)
        .map_err(|_| CompressionError::DirectoryCreationFailed(output.to_path_buf()))?;

    let pdf_files = collect_pdf_files(input, recursive)?;
    let total_files = pdf_files.len();

    if total_files == 0 {
        info!("⚠️  No PDF files found in the input path");
        return Ok(BatchReport::default());
    }

    info!("📊 Found {} PDF files to process", total_files);

    let main_progress = ProgressBar::new(total_files as u64);
    main_progress.set_style(ProgressStyle::default_bar());
    if crate::logger::is_quiet() {
        main_progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    // One result slot per file, merged after all tasks complete. File tasks
    // share nothing mutable, so per-file compress-then-write stays atomic
    // with respect to the others.
    let outcomes: Vec<FileOutcome> = pdf_files
        .into_par_iter()
        .map(|source| {
            let progress = main_progress.clone();
            let outcome = match process_single_pdf(&source, output, options) {
                Ok((output_path, original_size, final_size)) => Outcome::Compressed {
                    output: output_path,
                    original_size,
                    final_size,
                },
                Err(e) => Outcome::Failed(e),
            };
            progress.inc(1);
            FileOutcome { source, outcome }
        })
        .collect();

    main_progress.finish_with_message("Batch compression complete");

    let report = BatchReport { outcomes };
    print_batch_summary(&report, start_time.elapsed().as_secs_f64());

    Ok(report)
}

fn print_batch_summary(report: &BatchReport, elapsed_secs: f64) {
    let total_before = report.total_original_size();
    let total_after = report.total_final_size();

    info!("\n📊 Batch Compression Summary:");
    info!("  ✅ Succeeded: {}", report.successes());
    info!("  ❌ Failed: {}", report.failures());
    info!(
        "  📊 Total original size: {}",
        format_file_size(total_before)
    );
    info!(
        "  📊 Total compressed size: {}",
        format_file_size(total_after)
    );
    info!(
        "  🎯 Overall compression ratio: {:.1}%",
        calculate_compression_ratio(total_before, total_after)
    );
    info!("  ⏱️  Total time: {:.2}s", elapsed_secs);

    for (source, reason) in report.failed_files() {
        warn!("{:?}: {}", source, reason);
    }
}

/// Discovers candidate PDF files from a path or glob pattern.
///
/// A single file, a directory (flat unless `recursive`), and a glob pattern
/// are all accepted. Hidden entries are skipped, non-PDF files are ignored
/// entirely. A missing input path is a fatal error; an existing but empty
/// directory simply yields no candidates.
pub fn collect_pdf_files(input: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut pdf_files = Vec::new();

    let input_path = Path::new(input);

    if input_path.is_file() {
        if is_pdf_file(input_path) {
            pdf_files.push(input_path.to_path_buf());
        }
    } else if input_path.is_dir() {
        let walker = if recursive {
            WalkDir::new(input_path).into_iter()
        } else {
            WalkDir::new(input_path).max_depth(1).into_iter()
        };

        // Depth 0 is the input directory itself; its name must not disqualify
        // the walk (temp dirs are often dot-prefixed).
        for entry in
            walker.filter_entry(|e| e.depth() == 0 || !is_hidden(&e.file_name().to_string_lossy()))
        {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_pdf_file(path) {
                pdf_files.push(path.to_path_buf());
            }
        }
    } else {
        // Not an existing path; try it as a glob pattern before giving up.
        let mut matched_any = false;
        if let Ok(entries) = glob(input) {
            for entry in entries.flatten() {
                matched_any = true;
                if entry.is_file() && is_pdf_file(&entry) {
                    pdf_files.push(entry);
                }
            }
        }
        if !matched_any {
            return Err(CompressionError::InputNotFound(input.to_string()));
        }
    }

    Ok(pdf_files)
}

fn is_hidden(file_name: &str) -> bool {
    file_name.starts_with('.') && file_name.len() > 1
}

fn process_single_pdf(
    input_path: &Path,
    output_dir: &Path,
    options: &CompressionOptions,
) -> Result<(PathBuf, u64, u64)> {
    let output_path = generate_output_path(input_path, output_dir)?;
    let (original_size, final_size) = process_pdf_pipeline(input_path, &output_path, options)?;
    Ok((output_path, original_size, final_size))
}

/// Output lands in the output directory under the same base filename.
pub fn generate_output_path(input_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    let file_name = input_path
        .file_name()
        .ok_or_else(|| CompressionError::NotAPdf(input_path.to_path_buf()))?;
    Ok(output_dir.join(file_name))
}
