//! # Etiqueta - Barcode Engine for Part-Marking Drawings
//!
//! Etiqueta generates, decodes and validates barcode raster images for
//! part labeling, and handles the bookkeeping around doing that in bulk:
//!
//! - **Symbologies**: Code 128 (native layout), Code 39, QR Code,
//!   Data Matrix, EAN-13
//! - **Exact-size raster output**: PNG (8-bit greyscale) or BMP (24-bit),
//!   always at the requested pixel dimensions
//! - **Decoding**: scanline reader for Code 128 and EAN-13, used to verify
//!   generated images and to check barcodes against renamed parts
//! - **Escaping**: reversible printable-ASCII escaping for payloads with
//!   control or high bytes
//! - **Batch + layout**: sequential batch driver with consistent summary
//!   counts, and row-wrapped grid placement
//!
//! ## Quick Start
//!
//! ```no_run
//! use etiqueta::config::BarcodeConfig;
//! use etiqueta::{decode, render};
//! use std::path::Path;
//!
//! let config = BarcodeConfig::default();
//! let path = Path::new("part.png");
//!
//! render::generate("PART12345", &config, path)?;
//! assert_eq!(decode::decode(path)?, "PART12345");
//! # Ok::<(), etiqueta::EtiquetaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`symbology`] | Symbology types, validation, Code 128 tables |
//! | [`render`] | Raster encoder and file serialization |
//! | [`decode`] | Raster decoder and image metadata |
//! | [`escape`] | Printable-ASCII payload escaping |
//! | [`layout`] | Grid position calculation |
//! | [`batch`] | Batch driver, summaries, insertion sink |
//! | [`sync`] | Part-name / barcode consistency checks |
//! | [`config`] | Per-operation and persisted configuration |
//! | [`error`] | Error types |

pub mod batch;
pub mod config;
pub mod decode;
pub mod error;
pub mod escape;
pub mod layout;
pub mod render;
pub mod symbology;
pub mod sync;

// Re-exports for convenience
pub use config::BarcodeConfig;
pub use error::{ErrorCode, EtiquetaError};
pub use symbology::BarcodeType;
