//! # Writer Backends
//!
//! Module-level output from the symbology writer libraries, normalized to
//! two shapes the raster pipeline understands:
//!
//! - a linear run of modules (`Vec<bool>`, true = bar) for the 1D types,
//! - a [`ModuleMatrix`] for the 2D types.
//!
//! Code 128 is the one symbology laid out natively (see
//! [`crate::symbology::code128`]); everything else is produced here by its
//! backend crate (`qrcode`, `datamatrix`, `barcoders`) and only *placed*
//! by this crate. Backend errors are surfaced verbatim so the caller can
//! translate them into the error taxonomy with the message preserved.

use barcoders::sym::code39::Code39;
use barcoders::sym::ean13::EAN13;
use datamatrix::{DataMatrix, SymbolList};
use qrcode::{EcLevel, QrCode};

use crate::error::EtiquetaError;

/// A 2D module grid, row-major, true = dark module.
#[derive(Debug, Clone)]
pub struct ModuleMatrix {
    pub width: usize,
    pub height: usize,
    pub modules: Vec<bool>,
}

impl ModuleMatrix {
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }
}

/// Code 39 module run from the `barcoders` writer (start/stop `*` included).
pub fn code39_modules(data: &str) -> Result<Vec<bool>, EtiquetaError> {
    let barcode =
        Code39::new(data).map_err(|e| EtiquetaError::Generation(e.to_string()))?;
    Ok(barcode.encode().iter().map(|&m| m == 1).collect())
}

/// EAN-13 module run from the `barcoders` writer.
///
/// The writer takes the 12 data digits and appends the mod-10 check digit
/// itself, so a 13-digit input is passed without its final digit.
pub fn ean13_modules(data: &str) -> Result<Vec<bool>, EtiquetaError> {
    let digits = if data.len() == 13 { &data[..12] } else { data };
    let barcode =
        EAN13::new(digits).map_err(|e| EtiquetaError::Generation(e.to_string()))?;
    Ok(barcode.encode().iter().map(|&m| m == 1).collect())
}

/// QR Code module matrix (error correction level M).
pub fn qr_matrix(data: &str) -> Result<ModuleMatrix, EtiquetaError> {
    let code = QrCode::with_error_correction_level(data, EcLevel::M)
        .map_err(|e| EtiquetaError::Generation(e.to_string()))?;
    let size = code.width();
    let mut modules = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            modules.push(code[(x, y)] == qrcode::Color::Dark);
        }
    }
    Ok(ModuleMatrix {
        width: size,
        height: size,
        modules,
    })
}

/// Data Matrix module matrix.
pub fn datamatrix_matrix(data: &str) -> Result<ModuleMatrix, EtiquetaError> {
    let code = DataMatrix::encode_str(data, SymbolList::default())
        .map_err(|e| EtiquetaError::Generation(format!("{:?}", e)))?;
    let bitmap = code.bitmap();
    let (width, height) = (bitmap.width(), bitmap.height());
    let mut modules = vec![false; width * height];
    for (x, y) in bitmap.pixels() {
        modules[y * width + x] = true;
    }
    Ok(ModuleMatrix {
        width,
        height,
        modules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code39_has_bars() {
        let modules = code39_modules("HELLO-123").unwrap();
        assert!(!modules.is_empty());
        assert!(modules.iter().any(|&m| m));
        assert!(modules.iter().any(|&m| !m));
    }

    #[test]
    fn test_ean13_accepts_12_and_13_digits() {
        let twelve = ean13_modules("123456789012").unwrap();
        assert!(!twelve.is_empty());
        let thirteen = ean13_modules("1234567890128").unwrap();
        // Same data digits, same modules
        assert_eq!(twelve, thirteen);
    }

    #[test]
    fn test_qr_matrix_is_square() {
        let matrix = qr_matrix("https://example.com").unwrap();
        assert_eq!(matrix.width, matrix.height);
        assert!(matrix.width >= 21); // version 1 is 21x21
        // Finder pattern corner is dark
        assert!(matrix.get(0, 0));
    }

    #[test]
    fn test_datamatrix_matrix_nonempty() {
        let matrix = datamatrix_matrix("SN-0042").unwrap();
        assert!(matrix.width >= 10 && matrix.height >= 10);
        let dark = matrix.modules.iter().filter(|&&m| m).count();
        assert!(dark > 0 && dark < matrix.modules.len());
    }
}
