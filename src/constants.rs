/// Default directory conventions. Both are plain defaults, overridable
/// from the command line.
pub const DEFAULT_INPUT_DIR: &str = "input_pdfs";
pub const DEFAULT_OUTPUT_DIR: &str = "output_pdfs";

/// Adaptive image recompression ladder: JPEG quality starts high and
/// steps down until the document fits the size target or the floor is hit.
pub const ADAPTIVE_QUALITY_START: u8 = 80;
pub const ADAPTIVE_QUALITY_FLOOR: u8 = 20;
pub const ADAPTIVE_QUALITY_STEP: u8 = 10;

/// Refuse to load anything bigger than this (512 MiB).
pub const MAX_FILE_SIZE: u64 = 512 * 1024 * 1024;

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
