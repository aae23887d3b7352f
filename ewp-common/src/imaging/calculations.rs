//! Dimension math shared by the batch tools. Pure functions, no I/O.

use super::Dimensions;

/// Height for `width` that keeps the source aspect ratio, rounded to the nearest pixel
pub fn scaled_height(source: Dimensions, width: u32) -> u32 {
    if source.width == 0 {
        return 0;
    }
    let height = (width as f64 * source.height as f64 / source.width as f64).round();
    (height as u32).max(1)
}

/// Cap the width at `max_width`, never upscaling
///
/// Sources already narrower than (or equal to) `max_width` keep their size.
pub fn fit_to_width(source: Dimensions, max_width: u32) -> Dimensions {
    if source.is_empty() || source.width <= max_width {
        return source;
    }
    Dimensions::new(max_width, scaled_height(source, max_width))
}

/// Largest aspect-preserving box inside `bounds`, never upscaling
pub fn fit_inside(source: Dimensions, bounds: Dimensions) -> Dimensions {
    if source.is_empty() || bounds.is_empty() {
        return source;
    }
    if source.width <= bounds.width && source.height <= bounds.height {
        return source;
    }

    let width_ratio = bounds.width as f64 / source.width as f64;
    let height_ratio = bounds.height as f64 / source.height as f64;
    if width_ratio <= height_ratio {
        Dimensions::new(bounds.width, scaled_height(source, bounds.width).min(bounds.height))
    } else {
        let width = (source.width as f64 * height_ratio).round() as u32;
        Dimensions::new(width.clamp(1, bounds.width), bounds.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downscale_preserves_aspect() {
        assert_eq!(
            fit_to_width(Dimensions::new(3000, 2000), 1200),
            Dimensions::new(1200, 800)
        );
        assert_eq!(
            fit_to_width(Dimensions::new(2400, 1600), 1920),
            Dimensions::new(1920, 1280)
        );
    }

    #[test]
    fn test_never_upscales() {
        let small = Dimensions::new(800, 533);
        assert_eq!(fit_to_width(small, 1200), small);
        assert_eq!(fit_to_width(Dimensions::new(1200, 900), 1200), Dimensions::new(1200, 900));
    }

    #[test]
    fn test_height_rounds_to_nearest() {
        // 1000 * 1333 / 2000 = 666.5 -> 667
        assert_eq!(scaled_height(Dimensions::new(2000, 1333), 1000), 667);
        // 400 * 999 / 1600 = 249.75 -> 250
        assert_eq!(scaled_height(Dimensions::new(1600, 999), 400), 250);
    }

    #[test]
    fn test_extreme_panorama_keeps_one_pixel() {
        assert_eq!(fit_to_width(Dimensions::new(10000, 2), 128), Dimensions::new(128, 1));
    }

    #[test]
    fn test_empty_source_untouched() {
        assert_eq!(fit_to_width(Dimensions::new(0, 0), 400), Dimensions::new(0, 0));
        assert_eq!(scaled_height(Dimensions::new(0, 100), 400), 0);
    }

    #[test]
    fn test_fit_inside_tall_source() {
        // Height is the binding constraint
        assert_eq!(
            fit_inside(Dimensions::new(1000, 2000), Dimensions::new(800, 800)),
            Dimensions::new(400, 800)
        );
        // Width is the binding constraint
        assert_eq!(
            fit_inside(Dimensions::new(2000, 1000), Dimensions::new(800, 800)),
            Dimensions::new(800, 400)
        );
        // Already inside
        assert_eq!(
            fit_inside(Dimensions::new(300, 200), Dimensions::new(800, 800)),
            Dimensions::new(300, 200)
        );
    }
}
