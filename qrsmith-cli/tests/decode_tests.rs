use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrsmith_cli::commands::decode;
use qrsmith_core::constants::NOT_DETECTED;
use qrsmith_core::types::{DecodedResult, ImageKind};
use qrsmith_core::{generate, QrError};

fn write_blank(path: &std::path::Path, format: ImageFormat) {
    let blank = GrayImage::from_pixel(120, 80, Luma([255]));
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(blank)
        .write_to(&mut cursor, format)
        .unwrap();
    fs::write(path, cursor.into_inner()).unwrap();
}

#[test]
fn decode_generated_png() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("code.png");
    fs::write(&in_path, generate("HELLO-12345").unwrap()).unwrap();

    decode::execute(in_path.to_str().unwrap(), /*json*/ false).unwrap();

    let data = decode::read_upload(in_path.to_str().unwrap()).unwrap();
    let report = decode::scan(data).unwrap();
    assert_eq!(report.result, DecodedResult::Text("HELLO-12345".to_string()));
    assert_eq!(report.image.format, ImageKind::Png);
}

fn json_output(input: &str) -> serde_json::Value {
    let mut out = Vec::new();
    decode::execute_to(input, /*json*/ true, &mut out).unwrap();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn decode_json_output() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("code.png");
    fs::write(&in_path, generate("json mode").unwrap()).unwrap();
    let input = in_path.to_str().unwrap();

    let value = json_output(input);

    assert_eq!(value["source"], input);
    assert_eq!(value["format"], "PNG");
    assert_eq!(value["width"], 290);
    assert_eq!(value["height"], 290);
    assert_eq!(value["detected"], true);
    assert_eq!(value["text"], "json mode");
}

#[test]
fn decode_json_blank_image_reports_sentinel() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("blank.jpeg");
    write_blank(&in_path, ImageFormat::Jpeg);

    let value = json_output(in_path.to_str().unwrap());

    assert_eq!(value["format"], "JPEG");
    assert_eq!((value["width"].as_u64(), value["height"].as_u64()), (Some(120), Some(80)));
    assert_eq!(value["detected"], false);
    assert_eq!(value["text"], NOT_DETECTED);
}

#[test]
fn decode_text_output_lines() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("code.png");
    fs::write(&in_path, generate("HELLO-12345").unwrap()).unwrap();
    let input = in_path.to_str().unwrap();

    let mut out = Vec::new();
    decode::execute_to(input, false, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains(&format!("Uploaded image:    {} (PNG 290x290)", input)));
    assert!(text.contains("Decoded Text: HELLO-12345"));
}

#[test]
fn render_json_matches_report() {
    let report = decode::scan(generate("rendered").unwrap().to_vec()).unwrap();
    let json = decode::render_json("-", &report).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["source"], "-");
    assert_eq!(value["text"], "rendered");
    assert_eq!(value["detected"], true);
}

#[test]
fn decode_blank_jpeg_reports_sentinel() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("blank.jpg");
    write_blank(&in_path, ImageFormat::Jpeg);

    decode::execute(in_path.to_str().unwrap(), false).unwrap();

    let data = decode::read_upload(in_path.to_str().unwrap()).unwrap();
    let report = decode::scan(data).unwrap();
    assert_eq!(report.image.format, ImageKind::Jpeg);
    assert_eq!((report.image.width, report.image.height), (120, 80));
    assert_eq!(report.result.text(), NOT_DETECTED);
}

#[test]
fn decode_rejects_unsupported_extension() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("code.gif");
    fs::write(&in_path, generate("hello").unwrap()).unwrap();

    let err = decode::execute(in_path.to_str().unwrap(), false).unwrap_err();
    assert!(err.to_string().contains("Unsupported file type"));
}

#[test]
fn decode_malformed_file_fails() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("broken.png");
    fs::write(&in_path, b"this is not a png").unwrap();

    let err = decode::execute(in_path.to_str().unwrap(), false).unwrap_err();
    let cause = err.downcast_ref::<QrError>().unwrap();
    assert!(matches!(cause, QrError::InvalidImage(_)));
}

#[test]
fn decode_missing_file_fails() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("nope.png");

    let err = decode::execute(in_path.to_str().unwrap(), false).unwrap_err();
    assert!(err.to_string().contains("Failed to read input file"));
}

#[test]
fn decode_content_sniffed_not_extension() {
    // PNG bytes behind a .jpg name still decode
    let td = tempdir().unwrap();
    let in_path = td.path().join("mislabeled.jpg");
    fs::write(&in_path, generate("sniffed").unwrap()).unwrap();

    let data = decode::read_upload(in_path.to_str().unwrap()).unwrap();
    let report = decode::scan(data).unwrap();
    assert_eq!(report.image.format, ImageKind::Png);
    assert_eq!(report.result.text(), "sniffed");
}
