use image::{GrayImage, Rgb, RgbImage};
use imageproc::contours::{BorderType, Contour};
use imageproc::drawing::draw_line_segment_mut;

/// Stroke color for contour outlines
pub const CONTOUR_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Trace the full contour hierarchy (outer borders and holes) of a binary
/// edge image. Non-zero pixels are foreground.
pub fn find_contours(edges: &GrayImage) -> Vec<Contour<i32>> {
    imageproc::contours::find_contours::<i32>(edges)
}

/// Number of hole borders in a traced hierarchy
pub fn count_holes(contours: &[Contour<i32>]) -> usize {
    contours
        .iter()
        .filter(|c| c.border_type == BorderType::Hole)
        .count()
}

/// Draw every contour as a closed 1-pixel polyline onto a black canvas.
///
/// Contours must come from an image of `width` x `height`.
pub fn draw_contours(width: u32, height: u32, contours: &[Contour<i32>]) -> RgbImage {
    let mut canvas = RgbImage::new(width, height);

    for contour in contours {
        let points = &contour.points;
        match points.len() {
            0 => continue,
            1 => {
                let p = points[0];
                canvas.put_pixel(p.x as u32, p.y as u32, CONTOUR_COLOR);
            }
            n => {
                // Close the polyline back onto its first point
                for i in 0..n {
                    let start = points[i];
                    let end = points[(i + 1) % n];
                    draw_line_segment_mut(
                        &mut canvas,
                        (start.x as f32, start.y as f32),
                        (end.x as f32, end.y as f32),
                        CONTOUR_COLOR,
                    );
                }
            }
        }
    }

    canvas
}
