use crate::constants::{
    ADAPTIVE_QUALITY_FLOOR, ADAPTIVE_QUALITY_START, ADAPTIVE_QUALITY_STEP, MAX_FILE_SIZE,
};
use crate::error::{CompressionError, Result};
use crate::utils::{
    create_progress_spinner, format_file_size, is_pdf_file, print_compression_result,
    validate_file_exists,
};
use crate::{info, verbose};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use lopdf::{Document, Object};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct CompressionOptions {
    /// Adaptive size target in KB. `None` means lossless-only: the document
    /// structure is recompressed but embedded images are left untouched.
    pub max_size_kb: Option<u64>,
}

impl CompressionOptions {
    pub fn new(max_size_kb: Option<u64>) -> Result<Self> {
        if let Some(kb) = max_size_kb {
            if kb == 0 || kb.checked_mul(1024).is_none() {
                return Err(CompressionError::InvalidTargetSize(kb));
            }
        }
        Ok(Self { max_size_kb })
    }

    pub fn max_size_bytes(&self) -> Option<u64> {
        self.max_size_kb.and_then(|kb| kb.checked_mul(1024))
    }
}

/// Core per-file pipeline: load -> lossless compress -> adaptive image
/// recompression (if a target is set) -> keep-smaller write.
///
/// Returns `(original_size, final_size)` in bytes. The input file is never
/// modified; an existing output file at `output_path` is overwritten.
///
/// Size policy: the output is always the smaller of the recompressed document
/// and the original bytes, so `final_size <= original_size` holds even when
/// the rewrite would expand the file.
pub fn process_pdf_pipeline(
    input_path: &Path,
    output_path: &Path,
    options: &CompressionOptions,
) -> Result<(u64, u64)> {
    let (mut doc, original_size) = load_document(input_path)?;

    // Lossless pass: stream compression only, no content changes.
    doc.compress();
    let mut bytes = serialize_document(&mut doc)?;

    if let Some(target) = options.max_size_bytes() {
        if bytes.len() as u64 > target {
            verbose!(
                "{:?} still {} after lossless pass, recompressing images",
                input_path,
                format_file_size(bytes.len() as u64)
            );
            bytes = shrink_to_target(&mut doc, bytes, target)?;
        }
    }

    let final_bytes = if bytes.len() as u64 >= original_size {
        // Rewrite did not help. Keep the original bytes.
        fs::read(input_path)?
    } else {
        bytes
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|_| CompressionError::DirectoryCreationFailed(parent.to_path_buf()))?;
        }
    }
    fs::write(output_path, &final_bytes)?;

    Ok((original_size, final_bytes.len() as u64))
}

/// Loads a PDF document and returns it along with the file size in bytes.
///
/// Validates existence, canonicalizes the path, and enforces the
/// `MAX_FILE_SIZE` guard before parsing anything.
pub fn load_document(input_path: &Path) -> Result<(Document, u64)> {
    validate_file_exists(input_path)?;

    let canonical_path = input_path
        .canonicalize()
        .map_err(|_| CompressionError::FileNotFound(input_path.to_path_buf()))?;

    let file_size = fs::metadata(&canonical_path)?.len();
    if file_size > MAX_FILE_SIZE {
        return Err(CompressionError::FileTooLarge(file_size, MAX_FILE_SIZE));
    }

    let doc = Document::load(&canonical_path)?;
    Ok((doc, file_size))
}

fn serialize_document(doc: &mut Document) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Progressively lowers the JPEG quality of embedded images until the
/// serialized document fits `target` bytes or the quality floor is reached.
///
/// Each pass re-reads the images as rewritten by the previous pass, so the
/// degradation compounds exactly like repeated re-encoding would. Returns the
/// smallest serialization seen; never larger than `best`.
fn shrink_to_target(doc: &mut Document, mut best: Vec<u8>, target: u64) -> Result<Vec<u8>> {
    let mut quality = ADAPTIVE_QUALITY_START;

    loop {
        let rewritten = recompress_images(doc, quality);
        if rewritten == 0 {
            verbose!("no images left to recompress at quality {}", quality);
            break;
        }

        let bytes = serialize_document(doc)?;
        verbose!(
            "quality {}: {} images rewritten, size {}",
            quality,
            rewritten,
            format_file_size(bytes.len() as u64)
        );
        if bytes.len() < best.len() {
            best = bytes;
        }

        if best.len() as u64 <= target || quality <= ADAPTIVE_QUALITY_FLOOR {
            break;
        }
        quality -= ADAPTIVE_QUALITY_STEP;
    }

    Ok(best)
}

/// Re-encodes every decodable image XObject in the document as JPEG at the
/// given quality. Streams the `image` crate cannot decode are skipped, as are
/// rewrites that would not shrink the stream. Returns the number of streams
/// actually rewritten.
pub fn recompress_images(doc: &mut Document, quality: u8) -> usize {
    let mut rewritten = 0;

    for (_, object) in doc.objects.iter_mut() {
        let Object::Stream(stream) = object else {
            continue;
        };

        let is_image = stream
            .dict
            .get(b"Subtype")
            .and_then(|obj| obj.as_name())
            .map(|name| name == b"Image".as_slice())
            .unwrap_or(false);
        if !is_image {
            continue;
        }

        // Raw stream content is the encoded image for DCTDecode streams;
        // anything else the decoder rejects is left alone.
        let Ok(img) = image::load_from_memory(&stream.content) else {
            continue;
        };

        let rgb = img.to_rgb8();
        let mut jpeg = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
        if encoder
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
            .is_err()
        {
            continue;
        }

        if jpeg.len() >= stream.content.len() {
            continue;
        }

        stream.dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
        stream.dict.remove(b"DecodeParms");
        stream
            .dict
            .set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
        stream.dict.set("BitsPerComponent", Object::Integer(8));
        stream
            .dict
            .set("Width", Object::Integer(i64::from(rgb.width())));
        stream
            .dict
            .set("Height", Object::Integer(i64::from(rgb.height())));
        stream.set_content(jpeg);
        rewritten += 1;
    }

    rewritten
}

/// Single-file compression flow behind the `compress` subcommand.
pub fn compress_pdf(input: PathBuf, output: PathBuf, options: CompressionOptions) -> Result<()> {
    if !is_pdf_file(&input) {
        return Err(CompressionError::NotAPdf(input));
    }

    info!("🗜️  Compressing PDF: {:?}", input);
    info!("📁 Output: {:?}", output);

    let pb = create_progress_spinner("Compressing...");
    let (original_size, compressed_size) = process_pdf_pipeline(&input, &output, &options)?;
    pb.finish_with_message("✅ Compression complete");

    info!(
        "📊 Original size: {} bytes ({})",
        original_size,
        format_file_size(original_size)
    );
    print_compression_result(original_size, compressed_size);

    Ok(())
}
