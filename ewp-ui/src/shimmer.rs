//! Animated SVG shimmer used when no blur preview exists for an image

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const SHIMMER_WIDTH: u32 = 700;
pub const SHIMMER_HEIGHT: u32 = 475;

const BASE: &str = "#fdf2f8";
const HIGHLIGHT: &str = "#fce7f3";

/// Blush gradient sweeping left to right once per second
pub fn shimmer_svg(width: u32, height: u32) -> String {
    format!(
        concat!(
            r##"<svg width="{w}" height="{h}" version="1.1" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">"##,
            r##"<defs><linearGradient id="g">"##,
            r##"<stop stop-color="{base}" offset="20%" />"##,
            r##"<stop stop-color="{highlight}" offset="50%" />"##,
            r##"<stop stop-color="{base}" offset="70%" />"##,
            r##"</linearGradient></defs>"##,
            r##"<rect width="{w}" height="{h}" fill="{base}" />"##,
            r##"<rect id="r" width="{w}" height="{h}" fill="url(#g)" />"##,
            r##"<animate xlink:href="#r" attributeName="x" from="-{w}" to="{w}" dur="1s" repeatCount="indefinite" />"##,
            r##"</svg>"##
        ),
        w = width,
        h = height,
        base = BASE,
        highlight = HIGHLIGHT,
    )
}

/// `data:image/svg+xml;base64,...` form of [`shimmer_svg`]
pub fn shimmer_data_url(width: u32, height: u32) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(shimmer_svg(width, height))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_uses_requested_size() {
        let svg = shimmer_svg(700, 475);
        assert!(svg.starts_with(r#"<svg width="700" height="475""#));
        assert!(svg.contains(r#"from="-700" to="700""#));
        assert!(svg.contains(r##"fill="url(#g)""##));
    }

    #[test]
    fn test_data_url_decodes_to_svg() {
        let url = shimmer_data_url(SHIMMER_WIDTH, SHIMMER_HEIGHT);
        let encoded = url.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, shimmer_svg(700, 475));
    }
}
