//! # Symbologies
//!
//! Barcode symbology selection and per-symbology input validation.
//!
//! ## Supported Symbologies
//!
//! | Symbology | Character set | Length | Checksum |
//! |-----------|---------------|--------|----------|
//! | Code 128 | full byte range (via escaping) | any | mod-103, computed here |
//! | Code 39 | `A-Z 0-9 - . $ / + % space` | any | none (self-checking) |
//! | QR Code | any | any | Reed-Solomon, writer-side |
//! | Data Matrix | any | any | Reed-Solomon, writer-side |
//! | EAN-13 | digits | 12 or 13 | mod-10, writer-side |
//!
//! Validation happens before any rendering: [`validate_data`] applies the
//! table above and rejects empty input for every symbology. Bytes outside
//! printable ASCII are expected to pass through [`crate::escape`] first, so
//! the Code 128 path only ever sees subset-B characters.

pub mod code128;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EtiquetaError;

/// Barcode symbology selector.
///
/// Determines the validation rules and the rendering strategy used by
/// [`crate::render::generate`]. Code 128 is rendered natively; the other
/// symbologies delegate module layout to their writer backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeType {
    /// Code 128 subset B (full printable ASCII, high density)
    #[default]
    Code128,
    /// Code 39 (uppercase alphanumeric plus `- . $ / + %` and space)
    Code39,
    /// QR Code (2D matrix)
    QrCode,
    /// Data Matrix (2D matrix, compact)
    DataMatrix,
    /// EAN-13 retail barcode (12 or 13 digits)
    Ean13,
}

impl BarcodeType {
    /// All supported symbologies, in display order.
    pub const ALL: [BarcodeType; 5] = [
        BarcodeType::Code128,
        BarcodeType::Code39,
        BarcodeType::QrCode,
        BarcodeType::DataMatrix,
        BarcodeType::Ean13,
    ];

    /// Canonical lowercase name, also accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            BarcodeType::Code128 => "code128",
            BarcodeType::Code39 => "code39",
            BarcodeType::QrCode => "qr",
            BarcodeType::DataMatrix => "datamatrix",
            BarcodeType::Ean13 => "ean13",
        }
    }
}

impl fmt::Display for BarcodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BarcodeType {
    type Err = EtiquetaError;

    /// Parse a symbology name.
    ///
    /// Accepts the canonical lowercase names plus the legacy uppercase
    /// forms (`CODE_128`, `QR_CODE`, ...) that older configuration files
    /// carried.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code128" | "CODE_128" | "code_128" => Ok(BarcodeType::Code128),
            "code39" | "CODE_39" | "code_39" => Ok(BarcodeType::Code39),
            "qr" | "qrcode" | "QR_CODE" | "qr_code" => Ok(BarcodeType::QrCode),
            "datamatrix" | "DATA_MATRIX" | "data_matrix" => Ok(BarcodeType::DataMatrix),
            "ean13" | "EAN_13" | "ean_13" => Ok(BarcodeType::Ean13),
            other => Err(EtiquetaError::InvalidBarcodeType(other.to_string())),
        }
    }
}

/// Check whether `data` is encodable as the given symbology.
///
/// The empty string is rejected for every symbology. The remaining rules
/// are per-type:
///
/// - **Code 39**: every character must be one of `A-Z`, `0-9`, `-`, `.`,
///   `$`, `/`, `+`, `%` or space. Lowercase letters are not in the set and
///   are therefore always rejected.
/// - **EAN-13**: exactly 12 or 13 ASCII digits.
/// - **Code 128 / QR / Data Matrix**: any non-empty string.
pub fn validate_data(data: &str, ty: BarcodeType) -> bool {
    if data.is_empty() {
        return false;
    }

    match ty {
        BarcodeType::Code39 => data.chars().all(is_code39_char),
        BarcodeType::Ean13 => {
            (data.len() == 12 || data.len() == 13) && data.chars().all(|c| c.is_ascii_digit())
        }
        BarcodeType::Code128 | BarcodeType::QrCode | BarcodeType::DataMatrix => true,
    }
}

fn is_code39_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '$' | '/' | '+' | '%' | ' ')
}
