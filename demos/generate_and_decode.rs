//! Generate a QR code, save it, and read it back

use qrsmith_core::{constants::DEFAULT_FILENAME, decode, generate_image, EncodeRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("qrsmith Generate & Decode Example\n");

    let request = EncodeRequest::new("https://example.com");
    let encoded = generate_image(&request)?;

    println!(
        "Version {} symbol, {}x{} px, {} bytes PNG",
        encoded.version,
        encoded.width,
        encoded.height,
        encoded.png.len()
    );

    std::fs::write(DEFAULT_FILENAME, encoded.as_bytes())?;
    println!("Wrote {}", DEFAULT_FILENAME);

    let bytes = std::fs::read(DEFAULT_FILENAME)?;
    let text = decode(&bytes)?;
    println!("Decoded Text: {}", text);

    println!("\nUse 'qrsmith decode --input {}' to read it back", DEFAULT_FILENAME);

    Ok(())
}
