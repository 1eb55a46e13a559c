use crate::compress::load_document;
use crate::error::Result;
use crate::info;
use crate::utils::format_file_size;
use lopdf::{Document, Object};
use std::path::Path;

pub fn get_pdf_info(input_path: &Path) -> Result<()> {
    let (doc, file_size) = load_document(input_path)?;

    info!("📋 Basic Information:");
    info!("  📁 File: {:?}", input_path);
    info!("  📄 PDF version: {}", doc.version);
    info!("  📑 Pages: {}", doc.get_pages().len());
    info!("  📦 File size: {} bytes ({})", file_size, format_file_size(file_size));
    info!("  🔢 Objects: {}", doc.objects.len());

    let (stream_count, image_count) = count_streams(&doc);
    info!("  🧱 Streams: {}", stream_count);
    info!("  🖼️  Embedded images: {}", image_count);

    info!("\n💡 Compression Suggestions:");
    if file_size > 5 * 1024 * 1024 {
        info!("  🎯 Large file (>5MB): try an adaptive target, e.g. --max-size-kb 1024");
    } else if file_size > 1024 * 1024 {
        info!("  🎯 Medium file (1-5MB): the lossless pass alone may be enough");
    } else {
        info!("  🎯 Small file (<1MB): little to gain beyond the lossless pass");
    }
    if image_count > 0 {
        info!(
            "  🖼️  {} embedded images: adaptive recompression can shrink these further",
            image_count
        );
    } else {
        info!("  🖼️  No embedded images: only stream compression applies");
    }

    Ok(())
}

pub fn print_detailed_info(input_path: &Path) -> Result<()> {
    let (doc, file_size) = load_document(input_path)?;

    info!("\n🔍 Detailed Document Analysis:");

    info!("📁 File Information:");
    info!("  Path: {:?}", input_path);
    info!(
        "  Size: {} bytes ({})",
        file_size,
        format_file_size(file_size)
    );

    info!("\n📄 Document Properties:");
    info!("  Version: {}", doc.version);
    info!("  Pages: {}", doc.get_pages().len());
    info!("  Objects: {}", doc.objects.len());
    info!("  Max object id: {}", doc.max_id);

    for (key, value) in document_metadata(&doc) {
        info!("  {}: {}", key, value);
    }

    Ok(())
}

/// (total stream objects, streams that are image XObjects)
fn count_streams(doc: &Document) -> (usize, usize) {
    let mut streams = 0;
    let mut images = 0;
    for object in doc.objects.values() {
        if let Object::Stream(stream) = object {
            streams += 1;
            let is_image = stream
                .dict
                .get(b"Subtype")
                .and_then(|obj| obj.as_name())
                .map(|name| name == b"Image".as_slice())
                .unwrap_or(false);
            if is_image {
                images += 1;
            }
        }
    }
    (streams, images)
}

/// Pulls the human-readable entries out of the trailer Info dictionary.
fn document_metadata(doc: &Document) -> Vec<(String, String)> {
    let mut entries = Vec::new();

    let info_dict = doc
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .and_then(|id| doc.get_dictionary(id));

    if let Ok(dict) = info_dict {
        for key in [b"Title".as_slice(), b"Author", b"Producer", b"Creator"] {
            if let Ok(value) = dict.get(key) {
                if let Ok(bytes) = value.as_str() {
                    entries.push((
                        String::from_utf8_lossy(key).to_string(),
                        String::from_utf8_lossy(bytes).to_string(),
                    ));
                }
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompressionError;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream};
    use tempfile::TempDir;

    fn write_valid_pdf(path: &Path) {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_get_pdf_info_missing_file() {
        let result = get_pdf_info(Path::new("nonexistent.pdf"));
        assert!(matches!(result, Err(CompressionError::FileNotFound(_))));
    }

    #[test]
    fn test_get_pdf_info_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.pdf");
        write_valid_pdf(&path);

        assert!(get_pdf_info(&path).is_ok());
        assert!(print_detailed_info(&path).is_ok());
    }

    #[test]
    fn test_count_streams_no_images() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.pdf");
        write_valid_pdf(&path);

        let (doc, _) = load_document(&path).unwrap();
        let (streams, images) = count_streams(&doc);
        assert_eq!(streams, 1);
        assert_eq!(images, 0);
    }
}
