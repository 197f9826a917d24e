use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use tempfile::NamedTempFile;

/// 3x3 image of primaries, secondaries and grays:
/// red, green, blue / yellow, cyan, magenta / black, gray, white
pub fn sample_image() -> DynamicImage {
    let pixels = [
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [255, 255, 0],
        [0, 255, 255],
        [255, 0, 255],
        [0, 0, 0],
        [127, 127, 127],
        [255, 255, 255],
    ];
    let img = RgbImage::from_fn(3, 3, |x, y| Rgb(pixels[(y * 3 + x) as usize]));
    DynamicImage::ImageRgb8(img)
}

/// Solid white color image
pub fn white_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb([255u8, 255, 255])))
}

/// Horizontal color gradient, every column distinct
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        Rgb([r, g, 128])
    });
    DynamicImage::ImageRgb8(img)
}

/// Black canvas with a filled white square in the middle
pub fn square_image(size: u32, margin: u32) -> DynamicImage {
    let img = RgbImage::from_fn(size, size, |x, y| {
        let inside = x >= margin && x < size - margin && y >= margin && y < size - margin;
        if inside {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    DynamicImage::ImageRgb8(img)
}

/// Single-channel image from a row-major list of values
pub fn gray_image(width: u32, height: u32, values: &[u8]) -> DynamicImage {
    let img = GrayImage::from_fn(width, height, |x, y| Luma([values[(y * width + x) as usize]]));
    DynamicImage::ImageLuma8(img)
}

/// Writes `img` to a temporary PNG file that is removed on drop
pub fn write_temp_png(img: &DynamicImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// Every pixel byte of `img`
pub fn values(img: &DynamicImage) -> Vec<u8> {
    img.as_bytes().to_vec()
}
