use crate::EMPTY_INPUT_WARNING;
use anyhow::{Context, Result};
use colored::*;
use qrsmith_core::encoder::{generate_image, render_preview};
use qrsmith_core::{EncodeRequest, EncodedImage};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, warn};

/// Generate a QR image for `text` and write it to `output` (`-` for stdout)
pub fn execute(text: &str, output: &str, preview: bool) -> Result<()> {
    let stdout = io::stdout();
    execute_to(text, output, preview, &mut stdout.lock())
}

/// Same as [`execute`], with the summary or `-` PNG stream going to `out`
pub fn execute_to<W: Write>(text: &str, output: &str, preview: bool, out: &mut W) -> Result<()> {
    let request = EncodeRequest::new(text);

    if request.is_empty() {
        warn!("Refusing to generate from empty input");
        eprintln!("{} {}", "!".yellow(), EMPTY_INPUT_WARNING);
        return Ok(());
    }

    let encoded = encode(&request)?;

    if output == "-" {
        out.write_all(encoded.as_bytes())
            .and_then(|_| out.flush())
            .context("Failed to write PNG to stdout")?;
        return Ok(());
    }

    save(&encoded, Path::new(output))?;

    writeln!(out, "{} Generated QR Code", "✓".green())?;
    writeln!(out, "Version:           {}", encoded.version)?;
    writeln!(out, "Modules:           {}x{}", encoded.modules, encoded.modules)?;
    writeln!(out, "Image size:        {}x{} px", encoded.width, encoded.height)?;
    writeln!(out, "Saved to:          {}", output)?;

    if preview {
        writeln!(out, "\n{}", render_preview(text)?)?;
    }

    Ok(())
}

/// Run the encoder for a non-empty request
pub fn encode(request: &EncodeRequest) -> Result<EncodedImage> {
    info!("Generating QR code for {} byte payload", request.payload.len());

    let encoded = generate_image(request).context("Failed to generate QR code")?;

    info!(
        "Encoded as version {} ({} bytes PNG)",
        encoded.version,
        encoded.png.len()
    );

    Ok(encoded)
}

/// Write generated PNG bytes to disk
pub fn save(encoded: &EncodedImage, path: &Path) -> Result<()> {
    fs::write(path, encoded.as_bytes())
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    info!("QR code written to: {}", path.display());
    Ok(())
}
