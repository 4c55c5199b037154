//! Constants and limits for generated and decoded QR symbols

/// Pixels per symbol module in generated images
pub const BOX_SIZE: u32 = 10;

/// Quiet-zone width around the symbol, in modules
pub const BORDER: u32 = 4;

/// Smallest symbol version tried by the best-fit search
pub const MIN_VERSION: i16 = 1;

/// Largest symbol version; payloads that do not fit here are rejected
pub const MAX_VERSION: i16 = 40;

/// Byte-mode capacity of a version 40 symbol at error correction level L
pub const MAX_BYTE_CAPACITY: usize = 2953;

/// Numeric-mode capacity of a version 40 symbol at error correction level L
pub const MAX_NUMERIC_CAPACITY: usize = 7089;

/// Alphanumeric-mode capacity of a version 40 symbol at error correction level L
pub const MAX_ALPHANUMERIC_CAPACITY: usize = 4296;

/// Largest accepted side of a generated image, in pixels
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// Foreground (dark module) luma value
pub const DARK: u8 = 0;

/// Background (light module and quiet zone) luma value
pub const LIGHT: u8 = 255;

/// Text reported when an image holds no decodable symbol
pub const NOT_DETECTED: &str = "No QR code detected";

/// Filename offered for generated images
pub const DEFAULT_FILENAME: &str = "qrcode.png";

/// Number of modules per side for a symbol version (1..=40)
pub const fn modules_for_version(version: i16) -> u32 {
    17 + 4 * version as u32
}

/// Side length in pixels of a generated image for a symbol version
pub const fn image_side(version: i16, box_size: u32, border: u32) -> u32 {
    (modules_for_version(version) + 2 * border) * box_size
}

/// Error correction level used when building a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EcLevel {
    /// ~7% of codewords recoverable
    #[default]
    Low,
    /// ~15% of codewords recoverable
    Medium,
    /// ~25% of codewords recoverable
    Quartile,
    /// ~30% of codewords recoverable
    High,
}

impl EcLevel {
    /// Byte-mode capacity of a version 40 symbol at this level
    pub const fn max_bytes(self) -> usize {
        match self {
            EcLevel::Low => MAX_BYTE_CAPACITY,
            EcLevel::Medium => 2331,
            EcLevel::Quartile => 1663,
            EcLevel::High => 1273,
        }
    }

    /// Numeric-mode capacity of a version 40 symbol at this level
    pub const fn max_numeric(self) -> usize {
        match self {
            EcLevel::Low => MAX_NUMERIC_CAPACITY,
            EcLevel::Medium => 5596,
            EcLevel::Quartile => 3993,
            EcLevel::High => 3057,
        }
    }

    /// Alphanumeric-mode capacity of a version 40 symbol at this level
    pub const fn max_alphanumeric(self) -> usize {
        match self {
            EcLevel::Low => MAX_ALPHANUMERIC_CAPACITY,
            EcLevel::Medium => 3391,
            EcLevel::Quartile => 2420,
            EcLevel::High => 1852,
        }
    }

    /// Largest payload of the same character set as `payload`
    ///
    /// All digits count as numeric, the 45 character QR set as alphanumeric,
    /// anything else as bytes.
    pub fn capacity_for(self, payload: &str) -> usize {
        if payload.bytes().all(|b| b.is_ascii_digit()) {
            self.max_numeric()
        } else if payload.bytes().all(is_alphanumeric) {
            self.max_alphanumeric()
        } else {
            self.max_bytes()
        }
    }

    pub(crate) const fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            EcLevel::Low => qrcode::EcLevel::L,
            EcLevel::Medium => qrcode::EcLevel::M,
            EcLevel::Quartile => qrcode::EcLevel::Q,
            EcLevel::High => qrcode::EcLevel::H,
        }
    }
}

fn is_alphanumeric(b: u8) -> bool {
    matches!(
        b,
        b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':'
    )
}
