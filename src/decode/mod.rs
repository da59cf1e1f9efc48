//! # Raster Decoder
//!
//! Reads a barcode image file back into its payload text.
//!
//! ## Scan Strategy
//!
//! The image is loaded as 8-bit greyscale and sampled along several
//! horizontal scanlines (midline first, then spreading out), so damaged or
//! margin-heavy images still get a clean line through the bars. Each line
//! is binarized and handed to the symbology readers in turn; the first
//! verified read wins. No symbology hint is taken — detection is whatever
//! reader accepts the line, checksum and all.
//!
//! Reader coverage: Code 128 (all start sets) and EAN-13. Images of other
//! symbologies fail with `DecodeFailed`.

pub mod binarize;
pub mod code128;
pub mod ean13;

use std::path::Path;

use tracing::debug;

use crate::error::EtiquetaError;

/// Scanline positions as numerator/denominator height fractions,
/// midline outward.
const SCAN_FRACTIONS: [(u32, u32); 9] = [
    (1, 2),
    (3, 8),
    (5, 8),
    (1, 4),
    (3, 4),
    (1, 8),
    (7, 8),
    (1, 16),
    (15, 16),
];

/// Decode the barcode in an image file.
///
/// Fails with `FileNotFound` when the file is missing or unreadable as an
/// image, and `DecodeFailed` when no scanline yields a verified read.
pub fn decode(path: &Path) -> Result<String, EtiquetaError> {
    let img = image::open(path)
        .map_err(|e| EtiquetaError::FileNotFound(format!("{}: {}", path.display(), e)))?
        .to_luma8();

    let height = img.height();
    let width = img.width() as usize;

    for (num, den) in SCAN_FRACTIONS {
        let y = (height * num / den).min(height.saturating_sub(1));
        let row: Vec<u8> = (0..width as u32).map(|x| img.get_pixel(x, y)[0]).collect();

        let Some(bits) = binarize::binarize_row(&row) else {
            continue;
        };
        let (first_black, runs) = binarize::runs(&bits);

        if let Some(text) = code128::decode_runs(first_black, &runs) {
            debug!(y, symbology = "code128", "scanline decoded");
            return Ok(text);
        }
        if let Some(text) = ean13::decode_runs(first_black, &runs) {
            debug!(y, symbology = "ean13", "scanline decoded");
            return Ok(text);
        }
    }

    Err(EtiquetaError::Decode(format!(
        "no barcode found in {}",
        path.display()
    )))
}

/// Pixel dimensions of an image file, without decoding any barcode.
pub fn image_size(path: &Path) -> Result<(u32, u32), EtiquetaError> {
    image::image_dimensions(path)
        .map_err(|e| EtiquetaError::FileNotFound(format!("{}: {}", path.display(), e)))
}
