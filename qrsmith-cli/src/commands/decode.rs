use crate::check_upload_extension;
use anyhow::{Context, Result};
use colored::*;
use qrsmith_core::decoder::decode_request;
use qrsmith_core::types::{DecodeReport, DecodeRequest, ImageKind};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct DecodeOutput<'a> {
    source: &'a str,
    format: ImageKind,
    width: u32,
    height: u32,
    detected: bool,
    text: &'a str,
}

/// Decode the QR code in `input` (`-` for stdin) and print the result
pub fn execute(input: &str, json: bool) -> Result<()> {
    let stdout = io::stdout();
    execute_to(input, json, &mut stdout.lock())
}

/// Same as [`execute`], writing the result to `out`
pub fn execute_to<W: Write>(input: &str, json: bool, out: &mut W) -> Result<()> {
    info!("Decoding image: {}", input);

    let data = read_upload(input)?;
    let report = scan(data)?;

    if json {
        writeln!(out, "{}", render_json(input, &report)?)?;
        return Ok(());
    }

    writeln!(
        out,
        "Uploaded image:    {} ({} {}x{})",
        input, report.image.format, report.image.width, report.image.height
    )?;
    writeln!(out, "{} Decoded Text: {}", "✓".green(), report.result.text())?;

    Ok(())
}

/// Pretty JSON document for a decode report read from `source`
pub fn render_json(source: &str, report: &DecodeReport) -> Result<String> {
    let output = DecodeOutput {
        source,
        format: report.image.format,
        width: report.image.width,
        height: report.image.height,
        detected: report.result.is_detected(),
        text: report.result.text(),
    };

    serde_json::to_string_pretty(&output).context("Failed to serialize decode result")
}

/// Read upload bytes from a PNG/JPEG path, or from stdin for `-`
pub fn read_upload(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read image from stdin")?;
        return Ok(buf);
    }

    let path = Path::new(input);
    check_upload_extension(path)?;

    let data = fs::read(path).with_context(|| format!("Failed to read input file: {}", input))?;
    info!("File size: {} bytes", data.len());

    Ok(data)
}

/// Run the decoder over upload bytes
pub fn scan(data: Vec<u8>) -> Result<DecodeReport> {
    let request = DecodeRequest::new(data);
    let report = decode_request(&request).context("Failed to load image")?;

    if report.result.is_detected() {
        info!("QR code detected");
    } else {
        info!("No QR code detected: {:?}", report.result);
    }

    Ok(report)
}
