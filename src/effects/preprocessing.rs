use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb};
use imageproc::edges::canny;
use imageproc::filter::separable_filter_equal;

use crate::config::validate_kernel_size;
use crate::error::Result;

/// Convert image to grayscale using BT.601 luma weights.
///
/// 8-bit single channel input is copied unchanged.
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => img.to_luma8(),
        _ => {
            let rgb = img.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let Rgb([r, g, b]) = *rgb.get_pixel(x, y);
                Luma([luma(r, g, b)])
            })
        }
    }
}

/// Fixed-point `0.299 R + 0.587 G + 0.114 B`, rounded to nearest
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
    ((weighted + 500) / 1000) as u8
}

/// Replace every pixel with `255 - value`
pub fn invert(img: &GrayImage) -> GrayImage {
    let mut inverted = img.clone();
    image::imageops::invert(&mut inverted);
    inverted
}

/// Normalized 1D Gaussian kernel of `size` taps.
///
/// Sigma is derived from the size: `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian_kernel(size: u32) -> Result<Vec<f32>> {
    let size = validate_kernel_size(size)?;
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size / 2) as f32;
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for w in kernel.iter_mut() {
        *w /= sum;
    }
    Ok(kernel)
}

/// Gaussian blur with a fixed square kernel.
///
/// Both passes run in `f32` and the result is rounded once, so a constant
/// image comes back unchanged.
pub fn apply_blur(img: &GrayImage, kernel_size: u32) -> Result<GrayImage> {
    let kernel = gaussian_kernel(kernel_size)?;
    let (width, height) = img.dimensions();

    let float: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_fn(width, height, |x, y| Luma([img.get_pixel(x, y)[0] as f32]));
    let blurred = separable_filter_equal(&float, &kernel);

    Ok(GrayImage::from_fn(width, height, |x, y| {
        Luma([blurred.get_pixel(x, y)[0].round().clamp(0.0, 255.0) as u8])
    }))
}

/// Color-dodge blend: `base * 256 / (255 - blend)`, rounded and clamped.
///
/// A zero divisor saturates to 255.
pub fn color_dodge(base: &GrayImage, blend: &GrayImage) -> GrayImage {
    GrayImage::from_fn(base.width(), base.height(), |x, y| {
        let b = base.get_pixel(x, y)[0] as u32;
        let divisor = 255 - blend.get_pixel(x, y)[0] as u32;
        if divisor == 0 {
            return Luma([255]);
        }
        let value = (b * 256 + divisor / 2) / divisor;
        Luma([value.min(255) as u8])
    })
}

/// Detect edges using Canny edge detector
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}

/// Binarize: 255 where the value is strictly above `cutoff`, 0 elsewhere
pub fn binarize(img: &GrayImage, cutoff: u8) -> GrayImage {
    map_intensity(img, |v| if v > cutoff { 255 } else { 0 })
}

/// Quantize to `levels` bands of width `256 / levels`
pub fn quantize(img: &GrayImage, levels: u32) -> GrayImage {
    let step = 256 / levels;
    map_intensity(img, |v| ((v as u32 / step) * step) as u8)
}

fn map_intensity(img: &GrayImage, f: impl Fn(u8) -> u8) -> GrayImage {
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        pixel[0] = f(pixel[0]);
    }
    out
}
