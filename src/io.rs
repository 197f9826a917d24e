use image::{DynamicImage, ImageReader};
use std::path::Path;
use tracing::info;

/// Extensions offered by file dialogs
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Output file used when the caller does not choose one
pub const DEFAULT_OUTPUT: &str = "output.jpg";

/// Load an image from disk, guessing the format from its content
pub fn load_image(path: &Path) -> anyhow::Result<DynamicImage> {
    let img = ImageReader::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", path.display(), e))?
        .with_guessed_format()?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image {}: {}", path.display(), e))?;
    info!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "Image loaded"
    );
    Ok(img)
}

/// Decode an image from encoded bytes (PNG, JPEG, BMP, ...)
pub fn decode_image(data: &[u8]) -> anyhow::Result<DynamicImage> {
    image::load_from_memory(data).map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))
}

/// Save an image, picking the encoder from the file extension
pub fn save_image(img: &DynamicImage, path: &Path) -> anyhow::Result<()> {
    img.save(path)
        .map_err(|e| anyhow::anyhow!("Failed to save image {}: {}", path.display(), e))?;
    info!(path = %path.display(), "Image saved");
    Ok(())
}

/// Whether `path` has one of the supported extensions (case-insensitive)
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
