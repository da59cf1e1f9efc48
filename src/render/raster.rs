//! # Raster Primitives
//!
//! Greyscale canvas helpers shared by every symbology path: blank-canvas
//! creation, bar/module drawing and nearest-neighbor rescaling.
//!
//! Everything here works on [`image::GrayImage`] — one byte per pixel,
//! 0 = black bar, 255 = white background.

use image::{GrayImage, Luma};

/// Pixel value of a bar.
pub const BLACK: u8 = 0;

/// Pixel value of the background.
pub const WHITE: u8 = 255;

/// A white canvas of the given size.
pub fn blank_canvas(width: u32, height: u32) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([WHITE]))
}

/// Fill a solid rectangle, clipped to the canvas.
pub fn fill_rect(canvas: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, value: u8) {
    let x1 = x1.min(canvas.width());
    let y1 = y1.min(canvas.height());
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, Luma([value]));
        }
    }
}

/// Draw one run-length pattern and return the x coordinate just past it.
///
/// `pattern` is a digit string of module widths; even positions are bars
/// (drawn black between `top` and `bottom`), odd positions are spaces
/// (left as background). Each digit spans `digit * module_width` pixels.
pub fn draw_pattern(
    canvas: &mut GrayImage,
    pattern: &str,
    start_x: u32,
    top: u32,
    bottom: u32,
    module_width: u32,
) -> u32 {
    let mut x = start_x;
    for (i, digit) in pattern.bytes().enumerate() {
        let run = u32::from(digit - b'0') * module_width;
        if i % 2 == 0 {
            fill_rect(canvas, x, top, x + run, bottom, BLACK);
        }
        x += run;
    }
    x
}

/// Nearest-neighbor rescale to exactly `dst_width` × `dst_height`.
///
/// Each destination pixel samples the source at
/// `(x * src_w / dst_w, y * src_h / dst_h)` — the plain floor mapping, so
/// the same inputs always produce the same output pixels.
pub fn scale_nearest(src: &GrayImage, dst_width: u32, dst_height: u32) -> GrayImage {
    let (src_w, src_h) = (src.width() as u64, src.height() as u64);
    let mut dst = GrayImage::new(dst_width, dst_height);
    for y in 0..dst_height {
        let sy = (u64::from(y) * src_h / u64::from(dst_height)) as u32;
        for x in 0..dst_width {
            let sx = (u64::from(x) * src_w / u64::from(dst_width)) as u32;
            dst.put_pixel(x, y, *src.get_pixel(sx, sy));
        }
    }
    dst
}
