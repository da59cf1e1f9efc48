//! # Batch Processing
//!
//! Drives a per-item operation over a queue of inputs, collecting one
//! result per item and aggregating them into a summary whose counts are
//! guaranteed to add up.
//!
//! ## Guarantees
//!
//! - the result list has exactly one entry per input, in input order;
//! - one item's failure never aborts the items after it;
//! - the progress callback fires exactly once per item, with `current`
//!   counting 1..=total and `total` fixed;
//! - in every summary, `succeeded + failed == total`,
//!   `failed_items.len() == failed` and `error_messages.len() == failed` —
//!   including the empty-queue case.
//!
//! Processing is deliberately sequential: deterministic progress ordering
//! and partial-failure behavior are worth more here than parallel wall
//! time.
//!
//! The [`InsertSink`] trait is the boundary to the host document that
//! images are placed into; [`SheetSink`] is the in-process stand-in used
//! by tests and the CLI.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::EtiquetaError;
use crate::layout::GridLayoutParams;

/// Outcome of one batch item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    /// The input descriptor (payload or file path)
    pub item: String,
    /// Whether the per-item operation succeeded
    pub success: bool,
    /// Failure description, empty on success
    pub error_message: String,
}

impl BatchResult {
    pub fn ok(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            success: true,
            error_message: String::new(),
        }
    }

    pub fn failed(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            success: false,
            error_message: message.into(),
        }
    }
}

/// Aggregated counts over a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Descriptors of failed items, one per failure
    pub failed_items: Vec<String>,
    /// Error messages, parallel to `failed_items`
    pub error_messages: Vec<String>,
}

impl BatchSummary {
    /// `BatchPartialFailure` if anything failed, otherwise `None`.
    pub fn as_error(&self) -> Option<EtiquetaError> {
        if self.failed > 0 {
            Some(EtiquetaError::BatchPartialFailure {
                failed: self.failed,
                total: self.total,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Batch Processing Summary")?;
        writeln!(f, "========================")?;
        writeln!(f, "Total items: {}", self.total)?;
        writeln!(f, "Successful: {}", self.succeeded)?;
        writeln!(f, "Failed: {}", self.failed)?;
        if !self.failed_items.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failure details:")?;
            for (item, message) in self.failed_items.iter().zip(&self.error_messages) {
                writeln!(f, "  - {}: {}", item, message)?;
            }
        }
        Ok(())
    }
}

/// Build a [`BatchSummary`] from per-item results.
pub fn summarize(results: &[BatchResult]) -> BatchSummary {
    let mut summary = BatchSummary {
        total: results.len(),
        ..BatchSummary::default()
    };
    for result in results {
        if result.success {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
            summary.failed_items.push(result.item.clone());
            summary.error_messages.push(result.error_message.clone());
        }
    }
    summary
}

/// Queue-based batch driver.
#[derive(Debug, Default)]
pub struct BatchProcessor {
    queue: Vec<String>,
}

impl BatchProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one item to the queue.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.queue.push(item.into());
    }

    /// Append several items to the queue.
    pub fn add_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queue.extend(items.into_iter().map(Into::into));
    }

    /// Drop all queued items.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Run `op` over every queued item, in order.
    ///
    /// `progress`, when given, is called once per item before the item is
    /// processed, with `(current, total)` and `current` counting from 1.
    pub fn process<F>(
        &self,
        mut op: F,
        mut progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> Vec<BatchResult>
    where
        F: FnMut(&str) -> Result<(), EtiquetaError>,
    {
        let total = self.queue.len();
        let mut results = Vec::with_capacity(total);

        for (index, item) in self.queue.iter().enumerate() {
            if let Some(callback) = &mut progress {
                callback(index + 1, total);
            }
            match op(item) {
                Ok(()) => results.push(BatchResult::ok(item.clone())),
                Err(e) => {
                    warn!(item = %item, error = %e, "batch item failed");
                    results.push(BatchResult::failed(item.clone(), e.to_string()));
                }
            }
        }

        results
    }
}

// ============================================================================
// INSERTION SINK
// ============================================================================

/// Destination for generated images — the host drawing, whatever it is.
///
/// Implementations own every host-specific failure mode (`NoDrawingOpen`,
/// `VersionIncompatible`, ...); this crate only supplies the image path
/// and placement rectangle.
pub trait InsertSink {
    fn insert_image(
        &mut self,
        path: &Path,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), EtiquetaError>;
}

/// A recorded placement on a [`SheetSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub path: PathBuf,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// In-process sink standing in for a host drawing sheet.
///
/// Validates what a real host would: a drawing must be open, the image
/// file must exist, the size must be positive, and the position must be
/// on the sheet (with a small overhang allowance). Accepted placements
/// are recorded for inspection.
#[derive(Debug)]
pub struct SheetSink {
    pub sheet_width: f64,
    pub sheet_height: f64,
    /// Whether a drawing is open to receive images
    pub drawing_open: bool,
    pub placements: Vec<Placement>,
}

impl Default for SheetSink {
    /// An A4 landscape sheet, in millimeters, with a drawing open.
    fn default() -> Self {
        Self {
            sheet_width: 297.0,
            sheet_height: 210.0,
            drawing_open: true,
            placements: Vec::new(),
        }
    }
}

impl SheetSink {
    /// Overhang tolerance outside the sheet edges.
    const EDGE_MARGIN: f64 = 10.0;

    pub fn new(sheet_width: f64, sheet_height: f64) -> Self {
        Self {
            sheet_width,
            sheet_height,
            ..Self::default()
        }
    }

    fn position_on_sheet(&self, x: f64, y: f64) -> bool {
        x >= -Self::EDGE_MARGIN
            && x <= self.sheet_width + Self::EDGE_MARGIN
            && y >= -Self::EDGE_MARGIN
            && y <= self.sheet_height + Self::EDGE_MARGIN
    }
}

impl InsertSink for SheetSink {
    fn insert_image(
        &mut self,
        path: &Path,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), EtiquetaError> {
        if !self.drawing_open {
            return Err(EtiquetaError::NoDrawingOpen);
        }
        if !path.exists() {
            return Err(EtiquetaError::FileNotFound(path.display().to_string()));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(EtiquetaError::InvalidSize(format!("{}x{}", width, height)));
        }
        if !self.position_on_sheet(x, y) {
            return Err(EtiquetaError::ImageInsert(format!(
                "position ({}, {}) is outside the sheet",
                x, y
            )));
        }
        self.placements.push(Placement {
            path: path.to_path_buf(),
            x,
            y,
            width,
            height,
        });
        Ok(())
    }
}

/// Insert a list of images into `sink` on a row-wrapped grid.
///
/// Positions come from [`GridLayoutParams::position`]; one failed insert
/// is recorded and the rest continue.
pub fn batch_insert_grid<S: InsertSink>(
    sink: &mut S,
    image_paths: &[PathBuf],
    params: &GridLayoutParams,
) -> BatchSummary {
    let columns = params.columns.max(1);
    if params.columns < 1 {
        warn!(columns = params.columns, "invalid column count, using 1");
    }
    info!(
        count = image_paths.len(),
        columns,
        start_x = params.start_x,
        start_y = params.start_y,
        "grid batch insert"
    );

    let mut results = Vec::with_capacity(image_paths.len());
    for (index, path) in image_paths.iter().enumerate() {
        let pos = params.position(index);
        match sink.insert_image(path, pos.x, pos.y, params.width, params.height) {
            Ok(()) => results.push(BatchResult::ok(path.display().to_string())),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "grid insert failed");
                results.push(BatchResult::failed(path.display().to_string(), e.to_string()));
            }
        }
    }

    let summary = summarize(&results);
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "grid batch insert complete"
    );
    summary
}
