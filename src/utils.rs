//! Helpers shared by the single-file and batch paths.

use crate::constants::PROGRESS_SPINNER_TEMPLATE;
use crate::error::{CompressionError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Check whether a path looks like a PDF by extension (case-insensitive).
pub fn is_pdf_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

pub fn create_progress_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(PROGRESS_SPINNER_TEMPLATE)
            .expect("Invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Format file size in human-readable form (e.g., "1.2 MB", "512 KB").
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Size reduction as a percentage. Positive means the file shrank.
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}

pub fn print_compression_result(original_size: u64, compressed_size: u64) {
    let ratio = calculate_compression_ratio(original_size, compressed_size);

    crate::info!(
        "📈 Compressed size: {} ({})",
        compressed_size,
        format_file_size(compressed_size)
    );
    crate::info!("🎯 Compression ratio: {:.1}%", ratio);

    if ratio > 0.0 {
        crate::info!("✅ Reduced file size by {:.1}%", ratio);
    } else {
        crate::info!("⚠️  No size reduction achieved, original kept");
    }
}
