mod common;

use common::*;
use sketchify::io::{decode_image, is_supported, load_image, save_image};
use std::path::Path;

#[test]
fn test_saved_gray_image_reads_back_identical() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("saved_image.png");

    let processed = posterize_white(100);
    save_image(&processed, &path)?;

    let saved = load_image(&path)?;
    assert_eq!(saved.to_luma8(), processed.to_luma8());
    Ok(())
}

fn posterize_white(size: u32) -> image::DynamicImage {
    sketchify::posterize(&white_image(size, size), 4).unwrap()
}

#[test]
fn test_load_apply_save_round_trip() -> anyhow::Result<()> {
    let input = write_temp_png(&white_image(100, 100));
    let img = load_image(input.path())?;

    let sketch = sketchify::sketch(&img)?;
    assert_eq!((sketch.width(), sketch.height()), (100, 100));
    assert_eq!(sketch.color().channel_count(), 1);

    let dir = tempfile::TempDir::new()?;
    let output = dir.path().join("output.jpg");
    save_image(&sketch, &output)?;
    assert!(output.exists());
    Ok(())
}

#[test]
fn test_contour_output_saves_as_color() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("contours.bmp");

    let contours = sketchify::contour_highlight(&square_image(32, 8), EdgeThresholds::default())?;
    save_image(&contours, &path)?;

    let saved = load_image(&path)?;
    assert_eq!(saved.to_rgb8(), contours.to_rgb8());
    Ok(())
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = load_image(&dir.path().join("nope.png")).unwrap_err();
    assert!(err.to_string().contains("nope.png"));
}

#[test]
fn test_decode_garbage_fails() {
    assert!(decode_image(b"definitely not an image").is_err());
}

#[test]
fn test_decode_png_bytes() -> anyhow::Result<()> {
    let file = write_temp_png(&sample_image());
    let bytes = std::fs::read(file.path())?;
    let img = decode_image(&bytes)?;
    assert_eq!(img.to_rgb8(), sample_image().to_rgb8());
    Ok(())
}

#[test]
fn test_supported_extensions() {
    assert!(is_supported(Path::new("photo.JPG")));
    assert!(is_supported(Path::new("dir/scan.bmp")));
    assert!(is_supported(Path::new("a.jpeg")));
    assert!(!is_supported(Path::new("notes.txt")));
    assert!(!is_supported(Path::new("no_extension")));
}
