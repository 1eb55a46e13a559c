pub mod batch;
pub mod cli;
pub mod compress;
pub mod constants;
pub mod error;
pub mod info;
pub mod logger;
pub mod utils;

pub use batch::{
    batch_compress_pdfs, collect_pdf_files, generate_output_path, BatchReport, FileOutcome,
    Outcome,
};
pub use compress::{
    compress_pdf, load_document, process_pdf_pipeline, recompress_images, CompressionOptions,
};
pub use error::{CompressionError, Result};
pub use info::{get_pdf_info, print_detailed_info};
pub use utils::{calculate_compression_ratio, format_file_size, is_pdf_file};
