//! # Data Sync Checking
//!
//! Verifies that a barcode still carries the part name it was generated
//! from — the drawing may have been renamed after the barcode was placed.
//!
//! Comparison is escape-aware: barcode payloads travel through the
//! printable-ASCII escaping of [`crate::escape`], so a part name and its
//! barcode text are considered matching when they agree directly, after
//! escaping the part name, or after unescaping the barcode text.

use std::path::Path;

use tracing::{info, warn};

use crate::decode;
use crate::error::EtiquetaError;
use crate::escape;

/// Outcome category of a sync check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Barcode data matches the current part name
    InSync,
    /// Barcode data differs from the current part name
    OutOfSync,
    /// There was no barcode data to compare
    BarcodeNotFound,
    /// The barcode image could not be decoded
    DecodeError,
    /// Inputs were insufficient to decide
    Unknown,
}

impl SyncStatus {
    /// Operator-facing status message.
    pub fn message(&self) -> &'static str {
        match self {
            SyncStatus::InSync => "Barcode data matches current part name",
            SyncStatus::OutOfSync => {
                "Barcode data does not match current part name - update recommended"
            }
            SyncStatus::BarcodeNotFound => "No barcode found in drawing",
            SyncStatus::DecodeError => "Could not decode barcode data",
            SyncStatus::Unknown => "Synchronization status unknown",
        }
    }
}

/// Result of one sync check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncCheckResult {
    pub status: SyncStatus,
    /// The part name the check ran against
    pub part_name: String,
    /// The barcode text that was compared (raw, before unescaping)
    pub barcode_data: String,
    /// Operator-facing description of the outcome
    pub message: String,
}

impl SyncCheckResult {
    fn new(status: SyncStatus, part_name: &str, barcode_data: &str) -> Self {
        Self {
            status,
            part_name: part_name.to_string(),
            barcode_data: barcode_data.to_string(),
            message: status.message().to_string(),
        }
    }

    /// The check as an error: `None` when in sync, `DataOutOfSync` for a
    /// mismatch, `SyncCheck` when the check could not be carried out.
    pub fn as_error(&self) -> Option<EtiquetaError> {
        match self.status {
            SyncStatus::InSync => None,
            SyncStatus::OutOfSync => Some(EtiquetaError::DataOutOfSync {
                expected: self.part_name.clone(),
                found: self.barcode_data.clone(),
            }),
            SyncStatus::BarcodeNotFound | SyncStatus::DecodeError | SyncStatus::Unknown => {
                Some(EtiquetaError::SyncCheck(self.message.clone()))
            }
        }
    }
}

/// Compare already-decoded barcode data against the current part name.
pub fn check_sync(part_name: &str, barcode_data: &str) -> SyncCheckResult {
    if barcode_data.is_empty() {
        warn!("sync check with empty barcode data");
        return SyncCheckResult::new(SyncStatus::BarcodeNotFound, part_name, barcode_data);
    }
    if part_name.is_empty() {
        warn!("sync check with empty part name");
        return SyncCheckResult::new(SyncStatus::Unknown, part_name, barcode_data);
    }

    if compare_data(part_name, barcode_data) {
        info!(part_name, "barcode in sync");
        SyncCheckResult::new(SyncStatus::InSync, part_name, barcode_data)
    } else {
        warn!(part_name, barcode_data, "barcode out of sync");
        SyncCheckResult::new(SyncStatus::OutOfSync, part_name, barcode_data)
    }
}

/// Decode a barcode image and compare it against the current part name.
pub fn check_sync_from_image(part_name: &str, image_path: &Path) -> SyncCheckResult {
    let barcode_data = match decode::decode(image_path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %image_path.display(), error = %e, "sync decode failed");
            let mut result = SyncCheckResult::new(SyncStatus::DecodeError, part_name, "");
            result.message = format!("Failed to decode barcode from image: {}", e);
            return result;
        }
    };
    check_sync(part_name, &barcode_data)
}

/// Whether a part name and barcode text refer to the same data.
///
/// Accepts a direct match, a match against the escaped part name, or a
/// match against the unescaped barcode text.
pub fn compare_data(part_name: &str, barcode_data: &str) -> bool {
    if part_name.is_empty() || barcode_data.is_empty() {
        return false;
    }
    if part_name == barcode_data {
        return true;
    }
    if escape::encode_special_chars(part_name.as_bytes()) == barcode_data {
        return true;
    }
    part_name.as_bytes() == escape::decode_special_chars(barcode_data).as_slice()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BarcodeConfig;
    use crate::render::generate;

    #[test]
    fn test_in_sync_direct_match() {
        let result = check_sync("PART12345", "PART12345");
        assert_eq!(result.status, SyncStatus::InSync);
        assert_eq!(result.part_name, "PART12345");
    }

    #[test]
    fn test_out_of_sync() {
        let result = check_sync("PART12345", "PART99999");
        assert_eq!(result.status, SyncStatus::OutOfSync);
        assert!(result.message.contains("update recommended"));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(check_sync("PART", "").status, SyncStatus::BarcodeNotFound);
        assert_eq!(check_sync("", "DATA").status, SyncStatus::Unknown);
    }

    #[test]
    fn test_compare_escape_aware() {
        // Part name with a non-printable byte, barcode carries the escaped form
        let part_name = "A\u{1}B";
        let escaped = escape::encode_special_chars(part_name.as_bytes());
        assert_eq!(escaped, "A\\x01B");
        assert!(compare_data(part_name, &escaped));

        // And the trivial direction
        assert!(compare_data("PLAIN", "PLAIN"));
        assert!(!compare_data("PLAIN", "OTHER"));
        assert!(!compare_data("", ""));
    }

    #[test]
    fn test_check_sync_from_image_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sync.png");
        let config = BarcodeConfig {
            width: 400,
            height: 100,
            ..BarcodeConfig::default()
        };
        generate("GEAR-77", &config, &path).unwrap();

        let result = check_sync_from_image("GEAR-77", &path);
        assert_eq!(result.status, SyncStatus::InSync);
        assert_eq!(result.barcode_data, "GEAR-77");

        let result = check_sync_from_image("GEAR-78", &path);
        assert_eq!(result.status, SyncStatus::OutOfSync);
    }

    #[test]
    fn test_check_sync_from_image_escaped_payload() {
        // The barcode carries the escaped form of a name with a control byte
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("escaped.png");
        let part_name = "AXLE\u{2}9";
        let payload = escape::encode_special_chars(part_name.as_bytes());
        let config = BarcodeConfig {
            width: 400,
            height: 100,
            ..BarcodeConfig::default()
        };
        generate(&payload, &config, &path).unwrap();

        let result = check_sync_from_image(part_name, &path);
        assert_eq!(result.status, SyncStatus::InSync);
    }

    #[test]
    fn test_result_as_error() {
        use crate::error::ErrorCode;

        assert!(check_sync("SAME", "SAME").as_error().is_none());

        let err = check_sync("PART-A", "PART-B").as_error().unwrap();
        assert_eq!(err.code(), ErrorCode::DataOutOfSync);

        let err = check_sync("PART-A", "").as_error().unwrap();
        assert_eq!(err.code(), ErrorCode::SyncCheckFailed);
    }

    #[test]
    fn test_check_sync_from_image_missing_file() {
        let result = check_sync_from_image("PART", Path::new("/no/such/image.png"));
        assert_eq!(result.status, SyncStatus::DecodeError);
        assert!(result.barcode_data.is_empty());
    }
}
