//! # Error Types
//!
//! This module defines error types used throughout the etiqueta library.
//!
//! Every public operation returns `Result<_, EtiquetaError>`; failures are
//! expected, recoverable conditions (invalid input, missing files,
//! unencodable data), never panics. Errors from backend libraries (image
//! codec, symbology writers) are caught at the boundary and translated,
//! keeping the original message as detail.
//!
//! [`ErrorCode`] is the stable, closed category taxonomy. Callers that only
//! care about the kind of failure (a host plugin, a status line) can match
//! on [`EtiquetaError::code`] instead of the full variant.

use thiserror::Error;

/// Closed set of error categories.
///
/// One category per failure kind, including the host-side conditions that
/// only an insertion sink can produce (`NoDrawingOpen`, `NoModelAssociated`,
/// `VersionIncompatible`, `ImageInsertFailed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    VersionIncompatible,
    NoDrawingOpen,
    NoModelAssociated,
    BarcodeGenerationFailed,
    ImageInsertFailed,
    ConfigLoadFailed,
    ConfigSaveFailed,
    FileNotFound,
    InvalidBarcodeType,
    InvalidData,
    BatchPartialFailure,
    DecodeFailed,
    InvalidSize,
    DataOutOfSync,
    SyncCheckFailed,
}

impl ErrorCode {
    /// Human-readable category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::VersionIncompatible => "Version incompatible",
            ErrorCode::NoDrawingOpen => "No drawing open",
            ErrorCode::NoModelAssociated => "No model associated",
            ErrorCode::BarcodeGenerationFailed => "Barcode generation failed",
            ErrorCode::ImageInsertFailed => "Image insert failed",
            ErrorCode::ConfigLoadFailed => "Config load failed",
            ErrorCode::ConfigSaveFailed => "Config save failed",
            ErrorCode::FileNotFound => "File not found",
            ErrorCode::InvalidBarcodeType => "Invalid barcode type",
            ErrorCode::InvalidData => "Invalid data",
            ErrorCode::BatchPartialFailure => "Batch partial failure",
            ErrorCode::DecodeFailed => "Decode failed",
            ErrorCode::InvalidSize => "Invalid size",
            ErrorCode::DataOutOfSync => "Data out of sync",
            ErrorCode::SyncCheckFailed => "Sync check failed",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for etiqueta operations
#[derive(Debug, Error)]
pub enum EtiquetaError {
    /// Input data rejected by validation (empty, wrong character set, wrong length)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Requested image dimensions are unusable
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// Unknown or unsupported symbology name
    #[error("Invalid barcode type: {0}")]
    InvalidBarcodeType(String),

    /// Barcode rendering or image serialization failed
    #[error("Barcode generation failed: {0}")]
    Generation(String),

    /// No barcode could be read back from the image
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Image file missing or unreadable
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Insertion sink rejected the image
    #[error("Image insert failed: {0}")]
    ImageInsert(String),

    /// Configuration file could not be read or parsed
    #[error("Config load failed: {0}")]
    ConfigLoad(String),

    /// Configuration file could not be written
    #[error("Config save failed: {0}")]
    ConfigSave(String),

    /// Insertion sink has no open drawing to place images into
    #[error("No drawing is currently open")]
    NoDrawingOpen,

    /// Insertion sink's drawing has no associated model
    #[error("No model is associated with the drawing")]
    NoModelAssociated,

    /// Host application version is not supported by the sink
    #[error("Host version incompatible: {0}")]
    VersionIncompatible(String),

    /// Barcode content no longer matches the part name it was generated from
    #[error("Barcode out of sync: part is '{expected}', barcode has '{found}'")]
    DataOutOfSync { expected: String, found: String },

    /// Sync verification could not be carried out
    #[error("Sync check failed: {0}")]
    SyncCheck(String),

    /// Batch run finished, but some items failed
    #[error("Batch finished with {failed} of {total} items failing")]
    BatchPartialFailure { failed: usize, total: usize },
}

impl EtiquetaError {
    /// Map this error onto the closed [`ErrorCode`] taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            EtiquetaError::InvalidData(_) => ErrorCode::InvalidData,
            EtiquetaError::InvalidSize(_) => ErrorCode::InvalidSize,
            EtiquetaError::InvalidBarcodeType(_) => ErrorCode::InvalidBarcodeType,
            EtiquetaError::Generation(_) => ErrorCode::BarcodeGenerationFailed,
            EtiquetaError::Decode(_) => ErrorCode::DecodeFailed,
            EtiquetaError::FileNotFound(_) => ErrorCode::FileNotFound,
            EtiquetaError::ImageInsert(_) => ErrorCode::ImageInsertFailed,
            EtiquetaError::ConfigLoad(_) => ErrorCode::ConfigLoadFailed,
            EtiquetaError::ConfigSave(_) => ErrorCode::ConfigSaveFailed,
            EtiquetaError::NoDrawingOpen => ErrorCode::NoDrawingOpen,
            EtiquetaError::NoModelAssociated => ErrorCode::NoModelAssociated,
            EtiquetaError::VersionIncompatible(_) => ErrorCode::VersionIncompatible,
            EtiquetaError::DataOutOfSync { .. } => ErrorCode::DataOutOfSync,
            EtiquetaError::SyncCheck(_) => ErrorCode::SyncCheckFailed,
            EtiquetaError::BatchPartialFailure { .. } => ErrorCode::BatchPartialFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping() {
        let err = EtiquetaError::InvalidData("empty".into());
        assert_eq!(err.code(), ErrorCode::InvalidData);

        let err = EtiquetaError::Generation("writer exploded".into());
        assert_eq!(err.code(), ErrorCode::BarcodeGenerationFailed);

        let err = EtiquetaError::BatchPartialFailure { failed: 2, total: 5 };
        assert_eq!(err.code(), ErrorCode::BatchPartialFailure);
    }

    #[test]
    fn test_code_names() {
        assert_eq!(ErrorCode::Success.as_str(), "Success");
        assert_eq!(ErrorCode::DataOutOfSync.as_str(), "Data out of sync");
        assert_eq!(
            ErrorCode::BarcodeGenerationFailed.as_str(),
            "Barcode generation failed"
        );
    }

    #[test]
    fn test_display_keeps_detail() {
        let err = EtiquetaError::Decode("no barcode found".into());
        assert_eq!(err.to_string(), "Decode failed: no barcode found");
    }
}
