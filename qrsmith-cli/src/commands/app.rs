//! Interactive encoder/decoder session.
//!
//! One prompt loop with a mode toggle. Each action runs a single transform
//! and prints its result; failures are reported and the loop continues.

use crate::commands::{decode, generate};
use crate::EMPTY_INPUT_WARNING;
use anyhow::{Context, Result};
use colored::*;
use qrsmith_core::constants::DEFAULT_FILENAME;
use qrsmith_core::encoder::render_preview;
use qrsmith_core::EncodeRequest;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

/// Selected mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Text to QR image
    Generate,
    /// QR image to text
    Decode,
    /// Leave the session
    Quit,
}

impl Mode {
    /// Parse a mode answer; blank or unknown answers yield `None`
    pub fn parse(answer: &str) -> Option<Mode> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "g" | "generate" | "1" => Some(Mode::Generate),
            "d" | "decode" | "2" => Some(Mode::Decode),
            "q" | "quit" | "exit" => Some(Mode::Quit),
            _ => None,
        }
    }
}

/// Run the session on the terminal, saving images into `out_dir`
pub fn execute(out_dir: &str) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(stdin.lock(), stdout.lock(), Path::new(out_dir))
}

/// Run the session over arbitrary reader/writer pairs
pub fn run<R: BufRead, W: Write>(mut input: R, mut out: W, out_dir: &Path) -> Result<()> {
    info!("Starting interactive session (output dir: {})", out_dir.display());

    writeln!(out, "QR Code Encoder & Decoder")?;

    loop {
        let label = "\nMode ([g]enerate / [d]ecode / [q]uit): ";
        let Some(answer) = prompt(&mut input, &mut out, label)? else {
            break;
        };

        match Mode::parse(&answer) {
            Some(Mode::Generate) => {
                let text = prompt(&mut input, &mut out, "Enter text or URL: ")?
                    .unwrap_or_default();
                if let Err(e) = generate_step(&text, out_dir, &mut out) {
                    warn!("Generate failed: {:#}", e);
                    writeln!(out, "{} {:#}", "✗".red(), e)?;
                }
            }
            Some(Mode::Decode) => {
                let label = "Upload a QR code image (path): ";
                let Some(path) = prompt(&mut input, &mut out, label)? else {
                    break;
                };
                if let Err(e) = decode_step(path.trim(), &mut out) {
                    warn!("Decode failed: {:#}", e);
                    writeln!(out, "{} {:#}", "✗".red(), e)?;
                }
            }
            Some(Mode::Quit) => break,
            None => writeln!(out, "Unknown mode: {}", answer.trim())?,
        }
    }

    info!("Interactive session finished");
    Ok(())
}

fn generate_step<W: Write>(text: &str, out_dir: &Path, out: &mut W) -> Result<()> {
    let request = EncodeRequest::new(text);
    if request.is_empty() {
        writeln!(out, "{} {}", "!".yellow(), EMPTY_INPUT_WARNING)?;
        return Ok(());
    }

    let encoded = generate::encode(&request)?;
    let path = out_dir.join(DEFAULT_FILENAME);
    generate::save(&encoded, &path)?;

    writeln!(out, "{}", render_preview(text)?)?;
    writeln!(out, "{} Generated QR Code", "✓".green())?;
    writeln!(out, "Download:          {}", path.display())?;
    Ok(())
}

fn decode_step<W: Write>(path: &str, out: &mut W) -> Result<()> {
    let data = decode::read_upload(path).context("Upload rejected")?;
    let report = decode::scan(data)?;

    writeln!(
        out,
        "Uploaded image:    {} ({} {}x{})",
        path, report.image.format, report.image.width, report.image.height
    )?;
    writeln!(out, "{} Decoded Text: {}", "✓".green(), report.result.text())?;
    Ok(())
}

/// Print a prompt and read one line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("g"), Some(Mode::Generate));
        assert_eq!(Mode::parse(" Decode \n"), Some(Mode::Decode));
        assert_eq!(Mode::parse("q"), Some(Mode::Quit));
        assert_eq!(Mode::parse(""), None);
        assert_eq!(Mode::parse("print"), None);
    }
}
