use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pdf_squeeze::compress::{process_pdf_pipeline, CompressionOptions};
use std::path::PathBuf;
use tempfile::TempDir;

fn build_pdf_bytes(lines: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
    ];
    for _ in 0..lines {
        operations.push(Operation::new("Td", vec![0.into(), (-14).into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(
                "The quick brown fox jumps over the lazy dog.",
            )],
        ));
    }
    operations.push(Operation::new("ET", vec![]));
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn write_test_pdf(lines: usize) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bench.pdf");
    std::fs::write(&path, build_pdf_bytes(lines)).unwrap();
    (path, temp_dir)
}

fn bench_lossless_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("lossless_pass");
    for lines in [50usize, 500, 2000] {
        let bytes = build_pdf_bytes(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &bytes, |b, bytes| {
            b.iter(|| {
                let mut doc = Document::load_mem(black_box(bytes)).unwrap();
                doc.compress();
                let mut out = Vec::new();
                doc.save_to(&mut out).unwrap();
                black_box(out)
            });
        });
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let (input, _temp) = write_test_pdf(500);
    let options = CompressionOptions::default();

    c.bench_function("process_pdf_pipeline", |b| {
        b.iter(|| {
            let out_dir = TempDir::new().unwrap();
            let output = out_dir.path().join("out.pdf");
            process_pdf_pipeline(black_box(&input), &output, &options).unwrap()
        });
    });
}

criterion_group!(benches, bench_lossless_pass, bench_full_pipeline);
criterion_main!(benches);
