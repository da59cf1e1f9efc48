//! # Raster Encoder
//!
//! Turns validated payload data into a barcode image on disk.
//!
//! ## Pipeline
//!
//! Every symbology flows through the same three stages:
//!
//! 1. **Modules** — a linear run (1D) or matrix (2D) of dark/light
//!    modules, from [`crate::symbology::code128`] for Code 128 or a writer
//!    backend ([`matrix`]) for everything else.
//! 2. **Natural canvas** — modules drawn at an integer pixel scale with
//!    the quiet-zone margin. The module scale is floored at
//!    [`MIN_MODULE_WIDTH`] pixels so bars stay distinguishable.
//! 3. **Exact-size output** — the canvas is nearest-neighbor rescaled so
//!    the written file is *exactly* `config.width × config.height`, then
//!    serialized through the format sink chosen by the output extension
//!    (8-bit greyscale PNG, or 24-bit RGB BMP).
//!
//! The dimension contract always holds; requests far below the natural
//! module resolution still produce an exact-size image, just not
//! necessarily a scannable one.
//!
//! ## Failure Order
//!
//! Preconditions are checked in a fixed order, each with its own error:
//! empty data (`InvalidData`), zero dimension (`InvalidSize`), then
//! symbology validation (`InvalidData`). Writer backend errors become
//! `Generation` with the backend's message preserved.

pub mod matrix;
pub mod raster;

use std::path::Path;

use image::GrayImage;
use tracing::debug;

use crate::config::BarcodeConfig;
use crate::error::EtiquetaError;
use crate::symbology::{self, BarcodeType, code128};

use matrix::ModuleMatrix;
use raster::{BLACK, blank_canvas, draw_pattern, fill_rect, scale_nearest};

/// Smallest module width drawn on the natural canvas, in pixels.
///
/// Two pixels per module keeps adjacent 1-module bars and spaces apart
/// even after a moderate downscale.
pub const MIN_MODULE_WIDTH: u32 = 2;

/// Output file format, chosen by the output path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 8-bit greyscale PNG (default)
    #[default]
    Png,
    /// 24-bit uncompressed RGB BMP
    Bmp,
}

impl OutputFormat {
    /// Pick the format for an output path; anything but `.bmp` writes PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bmp") => OutputFormat::Bmp,
            _ => OutputFormat::Png,
        }
    }
}

/// Generate a barcode image for `data` and write it to `path`.
///
/// The written image is exactly `config.width × config.height` pixels.
///
/// ```no_run
/// use etiqueta::config::BarcodeConfig;
/// use etiqueta::render::generate;
/// use std::path::Path;
///
/// let config = BarcodeConfig::default();
/// generate("PART12345", &config, Path::new("out.png"))?;
/// # Ok::<(), etiqueta::EtiquetaError>(())
/// ```
pub fn generate(data: &str, config: &BarcodeConfig, path: &Path) -> Result<(), EtiquetaError> {
    if data.is_empty() {
        return Err(EtiquetaError::InvalidData("empty data".to_string()));
    }
    if config.width == 0 || config.height == 0 {
        return Err(EtiquetaError::InvalidSize(format!(
            "{}x{} (both dimensions must be positive)",
            config.width, config.height
        )));
    }
    if !symbology::validate_data(data, config.symbology) {
        return Err(EtiquetaError::InvalidData(format!(
            "data not valid for {}",
            config.symbology
        )));
    }

    let canvas = render_natural(data, config)?;
    debug!(
        symbology = %config.symbology,
        natural_width = canvas.width(),
        natural_height = canvas.height(),
        "rendered natural canvas"
    );

    let canvas = if canvas.dimensions() == (config.width, config.height) {
        canvas
    } else {
        scale_nearest(&canvas, config.width, config.height)
    };

    write_image(canvas, path)
}

/// Render the natural-resolution canvas for a payload.
fn render_natural(data: &str, config: &BarcodeConfig) -> Result<GrayImage, EtiquetaError> {
    match config.symbology {
        BarcodeType::Code128 => Ok(render_code128(data, config)),
        BarcodeType::Code39 => Ok(render_linear(&matrix::code39_modules(data)?, config)),
        BarcodeType::Ean13 => Ok(render_linear(&matrix::ean13_modules(data)?, config)),
        BarcodeType::QrCode => Ok(render_matrix(&matrix::qr_matrix(data)?, config)),
        BarcodeType::DataMatrix => Ok(render_matrix(&matrix::datamatrix_matrix(data)?, config)),
    }
}

/// Native Code 128 path: START-B, one pattern per character, checksum,
/// STOP, drawn straight from the run-length table.
fn render_code128(data: &str, config: &BarcodeConfig) -> GrayImage {
    let count = code128::total_modules(data.chars().count());
    let available = config.width.saturating_sub(2 * config.margin);
    let module_width = (available / count).max(MIN_MODULE_WIDTH);

    let natural_width = count * module_width + 2 * config.margin;
    let natural_height = config.height;
    let mut canvas = blank_canvas(natural_width, natural_height);

    let (top, bottom) = vertical_span(natural_height, config.margin);
    let mut x = config.margin;
    for value in code128::symbol_sequence(data) {
        let pattern = code128::PATTERNS[usize::from(value)];
        x = draw_pattern(&mut canvas, pattern, x, top, bottom, module_width);
    }
    canvas
}

/// Vertical bar extent: between the margins when there is room, the full
/// height otherwise.
fn vertical_span(height: u32, margin: u32) -> (u32, u32) {
    if height > 2 * margin + 1 {
        (margin, height - margin)
    } else {
        (0, height)
    }
}

/// Draw a linear module run as solid bars on a fresh canvas.
fn render_linear(modules: &[bool], config: &BarcodeConfig) -> GrayImage {
    let count = modules.len() as u32;
    let available = config.width.saturating_sub(2 * config.margin);
    let module_width = (available / count.max(1)).max(MIN_MODULE_WIDTH);

    let natural_width = count * module_width + 2 * config.margin;
    let natural_height = config.height;
    let mut canvas = blank_canvas(natural_width, natural_height);

    let (top, bottom) = vertical_span(natural_height, config.margin);
    let mut x = config.margin;
    for &is_bar in modules {
        if is_bar {
            fill_rect(&mut canvas, x, top, x + module_width, bottom, BLACK);
        }
        x += module_width;
    }
    canvas
}

/// Draw a 2D module matrix as filled cells on a fresh canvas.
fn render_matrix(matrix: &ModuleMatrix, config: &BarcodeConfig) -> GrayImage {
    let (mw, mh) = (matrix.width as u32, matrix.height as u32);
    let avail_w = config.width.saturating_sub(2 * config.margin);
    let avail_h = config.height.saturating_sub(2 * config.margin);
    let cell = (avail_w / mw.max(1))
        .min(avail_h / mh.max(1))
        .max(MIN_MODULE_WIDTH);

    let natural_width = mw * cell + 2 * config.margin;
    let natural_height = mh * cell + 2 * config.margin;
    let mut canvas = blank_canvas(natural_width, natural_height);

    for y in 0..matrix.height {
        for x in 0..matrix.width {
            if matrix.get(x, y) {
                let px = config.margin + x as u32 * cell;
                let py = config.margin + y as u32 * cell;
                fill_rect(&mut canvas, px, py, px + cell, py + cell, BLACK);
            }
        }
    }
    canvas
}

/// Serialize the canvas through the format sink for `path`.
fn write_image(canvas: GrayImage, path: &Path) -> Result<(), EtiquetaError> {
    let result = match OutputFormat::from_path(path) {
        OutputFormat::Png => canvas.save_with_format(path, image::ImageFormat::Png),
        OutputFormat::Bmp => {
            // BMP goes out as 24-bit RGB for maximum viewer compatibility
            let rgb = image::DynamicImage::ImageLuma8(canvas).to_rgb8();
            rgb.save_with_format(path, image::ImageFormat::Bmp)
        }
    };
    result.map_err(|e| EtiquetaError::Generation(format!("failed to write image: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn config(symbology: BarcodeType, width: u32, height: u32) -> BarcodeConfig {
        BarcodeConfig {
            symbology,
            width,
            height,
            margin: 10,
            show_text: false,
            dpi: 300,
        }
    }

    #[test]
    fn test_empty_data_rejected_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        // Even with a broken size, empty data wins the precondition order
        let bad = config(BarcodeType::Code128, 0, 0);
        let err = generate("", &bad, &path).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidData);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        for (w, h) in [(0, 100), (300, 0), (0, 0)] {
            let err = generate("DATA", &config(BarcodeType::Code128, w, h), &path).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidSize, "{}x{}", w, h);
        }
    }

    #[test]
    fn test_invalid_data_for_type_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let err = generate("lowercase", &config(BarcodeType::Code39, 300, 100), &path).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidData);
        let err = generate("12345", &config(BarcodeType::Ean13, 300, 100), &path).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidData);
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a.png")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a.bmp")), OutputFormat::Bmp);
        assert_eq!(OutputFormat::from_path(Path::new("a.BMP")), OutputFormat::Bmp);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), OutputFormat::Png);
    }

    #[test]
    fn test_exact_dimensions_png() {
        let dir = tempfile::tempdir().unwrap();
        for (w, h) in [(300, 100), (50, 30), (137, 61), (1000, 500)] {
            let path = dir.path().join(format!("out_{}x{}.png", w, h));
            generate("PART12345", &config(BarcodeType::Code128, w, h), &path).unwrap();
            let (rw, rh) = image::image_dimensions(&path).unwrap();
            assert_eq!((rw, rh), (w, h));
        }
    }

    #[test]
    fn test_exact_dimensions_bmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bmp");
        generate("PART12345", &config(BarcodeType::Code128, 300, 100), &path).unwrap();
        let (w, h) = image::image_dimensions(&path).unwrap();
        assert_eq!((w, h), (300, 100));
    }

    #[test]
    fn test_every_symbology_renders() {
        let dir = tempfile::tempdir().unwrap();
        let cases = [
            (BarcodeType::Code128, "PART12345"),
            (BarcodeType::Code39, "PART-123"),
            (BarcodeType::QrCode, "https://example.com/p/42"),
            (BarcodeType::DataMatrix, "SN-0042"),
            (BarcodeType::Ean13, "123456789012"),
        ];
        for (symbology, data) in cases {
            let path = dir.path().join(format!("{}.png", symbology));
            generate(data, &config(symbology, 300, 300), &path).unwrap();
            assert_eq!(image::image_dimensions(&path).unwrap(), (300, 300));
        }
    }

    #[test]
    fn test_rendered_image_has_bars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.png");
        generate("PART12345", &config(BarcodeType::Code128, 400, 100), &path).unwrap();
        let img = image::open(&path).unwrap().to_luma8();
        let mid = img.height() / 2;
        let blacks = (0..img.width()).filter(|&x| img.get_pixel(x, mid)[0] == 0).count();
        let whites = (0..img.width()).filter(|&x| img.get_pixel(x, mid)[0] == 255).count();
        assert!(blacks > 50, "expected solid bars, got {}", blacks);
        assert!(whites > 50, "expected spaces, got {}", whites);
        // Nearest-neighbor keeps the image strictly bilevel
        assert_eq!(blacks + whites, img.width() as usize);
    }

    #[test]
    fn test_vertical_span_margins() {
        assert_eq!(vertical_span(100, 10), (10, 90));
        // No room for margins: full height
        assert_eq!(vertical_span(15, 10), (0, 15));
    }
}
