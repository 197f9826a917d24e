mod common;

use common::*;
use sketchify::effects::steps::{GrayscaleStep, InvertStep, ThresholdStep};
use sketchify::{DebugConfig, Effect, EffectError, Pipeline};
use std::sync::Arc;

#[test]
fn test_sketch_pipeline_steps() {
    let pipeline = Effect::Sketch { kernel_size: 21 }.pipeline().unwrap();
    assert_eq!(
        pipeline.step_names(),
        vec!["Grayscale Conversion", "Invert", "Gaussian Blur", "Color Dodge"]
    );
}

#[test]
fn test_contour_pipeline_steps() {
    let pipeline = Effect::ContourHighlight(EdgeThresholds::default())
        .pipeline()
        .unwrap();
    assert_eq!(
        pipeline.step_names(),
        vec!["Grayscale Conversion", "Edge Detection", "Contour Drawing"]
    );
}

#[test]
fn test_custom_pipeline_matches_threshold_effect() {
    let img = gradient_image(20, 10);
    let custom = Pipeline::new()
        .add_step_boxed(Box::new(GrayscaleStep))
        .add_step(Arc::new(ThresholdStep { cutoff: 127 }));

    let expected = Effect::Threshold { cutoff: 127 }.apply(&img).unwrap();
    assert_eq!(custom.apply(&img).unwrap(), expected);
}

#[test]
fn test_run_partial_stops_early() {
    let pipeline = Pipeline::new()
        .add_step(Arc::new(GrayscaleStep))
        .add_step(Arc::new(InvertStep));

    let data = pipeline.run_partial(white_image(4, 4), 1).unwrap();
    assert!(values(&data.image).iter().all(|&v| v == 255));

    let data = pipeline.run_partial(white_image(4, 4), 2).unwrap();
    assert!(values(&data.image).iter().all(|&v| v == 0));

    // Asking for more steps than exist runs them all
    let data = pipeline.run_partial(white_image(4, 4), 10).unwrap();
    assert!(values(&data.image).iter().all(|&v| v == 0));
}

#[test]
fn test_original_is_kept_alongside_result() {
    let img = sample_image();
    let data = Effect::Grayscale.pipeline().unwrap().run(img.clone()).unwrap();
    assert_eq!(*data.original, img);
    assert_eq!(data.image.color().channel_count(), 1);
}

#[test]
fn test_debug_writes_every_step() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let debug_dir = dir.path().join("debug");

    let pipeline = Effect::Sketch { kernel_size: 21 }
        .pipeline()?
        .with_debug(&debug_dir)?;
    pipeline.run(gradient_image(16, 16))?;

    let mut files: Vec<String> = std::fs::read_dir(&debug_dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_, _>>()?;
    files.sort();

    assert_eq!(
        files,
        vec![
            "00_input.png",
            "01_grayscale_conversion.png",
            "02_invert.png",
            "03_gaussian_blur.png",
            "04_color_dodge.png",
        ]
    );
    Ok(())
}

#[test]
fn test_debug_rejects_non_empty_directory() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    std::fs::write(dir.path().join("leftover.txt"), "x")?;

    let result = Effect::Grayscale.pipeline()?.with_debug(dir.path());
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_apply_never_writes_debug_files() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let pipeline = Effect::Grayscale.pipeline()?.with_debug(dir.path())?;

    pipeline.apply(&sample_image())?;
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_step_filename() {
    assert_eq!(DebugConfig::step_filename(3, "Gaussian Blur"), "03_gaussian_blur.png");
    assert_eq!(DebugConfig::step_filename(12, "Invert"), "12_invert.png");
}

#[test]
fn test_contour_metadata() -> anyhow::Result<()> {
    let pipeline = Effect::ContourHighlight(EdgeThresholds::default()).pipeline()?;

    let data = pipeline.run(square_image(32, 8))?;
    assert!(data.get_int("contour_count").unwrap_or(0) > 0);
    assert!(data.get_float("edge_fraction").unwrap_or(0.0) > 0.0);
    // The square's outline encloses its interior
    assert!(data.get_int("hole_count").unwrap_or(0) >= 1);

    let data = pipeline.run(white_image(16, 16))?;
    assert_eq!(data.get_int("contour_count"), Some(0));
    assert_eq!(data.get_int("hole_count"), Some(0));
    Ok(())
}

#[test]
fn test_posterize_records_step() -> anyhow::Result<()> {
    let data = Effect::Posterize { levels: 4 }.pipeline()?.run(sample_image())?;
    assert_eq!(data.get_int("posterize_step"), Some(64));
    Ok(())
}

#[test]
fn test_run_rejects_empty_image() {
    let err = Effect::Grayscale
        .pipeline()
        .unwrap()
        .run(image::DynamicImage::new_rgb8(0, 0))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<EffectError>(),
        Some(EffectError::InvalidImage(_))
    ));
}
