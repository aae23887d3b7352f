//! Responsive image component
//!
//! [`ImageProps`] describes one image render (source, alt text, sizing,
//! quality, priority). [`OptimizedImage`] is a rendered instance: it shows a
//! blurred placeholder while loading, cross-fades to the sharp image on load,
//! and swaps to a static fallback asset on error.
//!
//! Load handling is a three-state machine per instance:
//!
//! ```text
//! Loading --load--> Loaded    (on_load fires once)
//! Loading --error-> Errored   (src becomes ERROR_FALLBACK_SRC)
//! ```
//!
//! `Errored` is terminal: a failed load is never retried.

use crate::blur_placeholders::BlurPlaceholders;
use crate::shimmer::{shimmer_data_url, SHIMMER_HEIGHT, SHIMMER_WIDTH};
use crate::templates::{Templates, IMAGE_TEMPLATE};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_SIZES: &str = "(max-width: 640px) 100vw, (max-width: 1024px) 50vw, 33vw";
pub const DEFAULT_QUALITY: u8 = 85;

/// Shown in place of an image that failed to load
pub const ERROR_FALLBACK_SRC: &str = "/images/misc/placeholder.webp";

const TRANSITION_CLASSES: &str = "duration-700 ease-in-out";
const LOADING_CLASSES: &str = "scale-105 blur-lg grayscale";
const SETTLED_CLASSES: &str = "scale-100 blur-0 grayscale-0";

/// Invalid component props
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropsError {
    #[error("src must not be empty")]
    EmptySource,

    #[error("alt text is required")]
    MissingAlt,

    #[error("quality must be between 1 and 100 (got {0})")]
    QualityOutOfRange(u8),

    #[error("width and height are required unless fill is set")]
    MissingDimensions,

    #[error("width and height must be positive")]
    ZeroDimensions,

    #[error("breakpoints must be positive widths")]
    ZeroBreakpoint,
}

/// How the image occupies its box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    Fixed { width: u32, height: u32 },
    /// Stretch to the positioned parent
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectFit {
    Contain,
    #[default]
    Cover,
    Fill,
    None,
    ScaleDown,
}

impl ObjectFit {
    pub fn as_css(&self) -> &'static str {
        match self {
            ObjectFit::Contain => "contain",
            ObjectFit::Cover => "cover",
            ObjectFit::Fill => "fill",
            ObjectFit::None => "none",
            ObjectFit::ScaleDown => "scale-down",
        }
    }
}

impl std::str::FromStr for ObjectFit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contain" => Ok(ObjectFit::Contain),
            "cover" => Ok(ObjectFit::Cover),
            "fill" => Ok(ObjectFit::Fill),
            "none" => Ok(ObjectFit::None),
            "scale-down" => Ok(ObjectFit::ScaleDown),
            other => Err(format!("unknown object-fit '{}'", other)),
        }
    }
}

/// Outer box some presets wrap the image in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub class: String,
    pub style: String,
}

impl Frame {
    /// Full-width box with a CSS aspect ratio such as `4/3`
    pub fn aspect_ratio(ratio: &str) -> Self {
        Self {
            class: "relative w-full".to_string(),
            style: format!("aspect-ratio: {}", ratio),
        }
    }

    /// Round `size`-pixel square
    pub fn avatar(size: u32) -> Self {
        Self {
            class: "relative rounded-full overflow-hidden".to_string(),
            style: format!("width: {size}px; height: {size}px"),
        }
    }
}

/// Validated props for one image render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub sizing: Sizing,
    pub sizes: String,
    pub quality: u8,
    pub priority: bool,
    /// Explicit placeholder; wins over the lookup and the shimmer
    pub blur_data_url: Option<String>,
    /// Widths for an explicit `srcset`, ascending and deduplicated
    pub breakpoints: Vec<u32>,
    pub object_fit: ObjectFit,
    pub object_position: String,
    pub class_name: String,
    pub frame: Option<Frame>,
}

impl ImageProps {
    pub fn builder(src: impl Into<String>, alt: impl Into<String>) -> ImagePropsBuilder {
        ImagePropsBuilder::new(src, alt)
    }

    /// Full-bleed hero: fill, priority, `100vw`, quality 80
    pub fn hero(src: impl Into<String>, alt: impl Into<String>) -> ImagePropsBuilder {
        Self::builder(src, alt)
            .fill()
            .priority(true)
            .sizes("100vw")
            .quality(80)
    }

    /// Card image in a 4/3 box, quality 70
    pub fn card(src: impl Into<String>, alt: impl Into<String>) -> ImagePropsBuilder {
        Self::builder(src, alt)
            .fill()
            .quality(70)
            .frame(Frame::aspect_ratio("4/3"))
    }

    /// Round avatar of `size` pixels, quality 80
    pub fn avatar(src: impl Into<String>, alt: impl Into<String>, size: u32) -> ImagePropsBuilder {
        Self::builder(src, alt)
            .fill()
            .sizes(format!("{}px", size))
            .quality(80)
            .frame(Frame::avatar(size))
    }

    pub fn is_fill(&self) -> bool {
        self.sizing == Sizing::Fill
    }

    /// `srcset` candidates appending `w`/`q` query parameters to the source,
    /// or `None` without explicit breakpoints
    pub fn src_set(&self) -> Option<String> {
        if self.breakpoints.is_empty() {
            return None;
        }
        let separator = if self.src.contains('?') { '&' } else { '?' };
        Some(
            self.breakpoints
                .iter()
                .map(|w| format!("{}{}w={}&q={} {}w", self.src, separator, w, self.quality, w))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Builder for [`ImageProps`]; `build` validates
#[derive(Debug, Clone)]
pub struct ImagePropsBuilder {
    src: String,
    alt: String,
    width: Option<u32>,
    height: Option<u32>,
    fill: bool,
    sizes: Option<String>,
    quality: u8,
    priority: bool,
    blur_data_url: Option<String>,
    breakpoints: Vec<u32>,
    object_fit: ObjectFit,
    object_position: Option<String>,
    class_name: String,
    frame: Option<Frame>,
}

impl ImagePropsBuilder {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            width: None,
            height: None,
            fill: false,
            sizes: None,
            quality: DEFAULT_QUALITY,
            priority: false,
            blur_data_url: None,
            breakpoints: Vec::new(),
            object_fit: ObjectFit::default(),
            object_position: None,
            class_name: String::new(),
            frame: None,
        }
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn fill(mut self) -> Self {
        self.fill = true;
        self
    }

    pub fn sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = Some(sizes.into());
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    pub fn blur_data_url(mut self, url: impl Into<String>) -> Self {
        self.blur_data_url = Some(url.into());
        self
    }

    pub fn breakpoints(mut self, widths: impl IntoIterator<Item = u32>) -> Self {
        self.breakpoints = widths.into_iter().collect();
        self
    }

    pub fn object_fit(mut self, fit: ObjectFit) -> Self {
        self.object_fit = fit;
        self
    }

    pub fn object_position(mut self, position: impl Into<String>) -> Self {
        self.object_position = Some(position.into());
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = class.into();
        self
    }

    pub fn frame(mut self, frame: Frame) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn build(self) -> Result<ImageProps, PropsError> {
        if self.src.trim().is_empty() {
            return Err(PropsError::EmptySource);
        }
        if self.alt.trim().is_empty() {
            return Err(PropsError::MissingAlt);
        }
        if !(1..=100).contains(&self.quality) {
            return Err(PropsError::QualityOutOfRange(self.quality));
        }

        let sizing = if self.fill {
            Sizing::Fill
        } else {
            match (self.width, self.height) {
                (Some(0), _) | (_, Some(0)) => return Err(PropsError::ZeroDimensions),
                (Some(width), Some(height)) => Sizing::Fixed { width, height },
                _ => return Err(PropsError::MissingDimensions),
            }
        };

        let mut breakpoints = self.breakpoints;
        if breakpoints.contains(&0) {
            return Err(PropsError::ZeroBreakpoint);
        }
        breakpoints.sort_unstable();
        breakpoints.dedup();

        Ok(ImageProps {
            src: self.src,
            alt: self.alt,
            sizing,
            sizes: self.sizes.unwrap_or_else(|| DEFAULT_SIZES.to_string()),
            quality: self.quality,
            priority: self.priority,
            blur_data_url: self.blur_data_url.filter(|url| !url.is_empty()),
            breakpoints,
            object_fit: self.object_fit,
            object_position: self.object_position.unwrap_or_else(|| "center".to_string()),
            class_name: self.class_name,
            frame: self.frame,
        })
    }
}

/// Placeholder for `props`: explicit URL, else the lookup's value (its own
/// entry or [`DEFAULT_BLUR`](crate::blur_placeholders::DEFAULT_BLUR)), else a
/// shimmer sized like the image when the lookup yields nothing
pub fn resolve_placeholder(props: &ImageProps, placeholders: &BlurPlaceholders) -> String {
    if let Some(url) = &props.blur_data_url {
        return url.clone();
    }
    let looked_up = placeholders.get(&props.src);
    if !looked_up.is_empty() {
        return looked_up.to_string();
    }
    match props.sizing {
        Sizing::Fixed { width, height } => shimmer_data_url(width, height),
        Sizing::Fill => shimmer_data_url(SHIMMER_WIDTH, SHIMMER_HEIGHT),
    }
}

/// `url("...")` for inline CSS; characters that could end the string are
/// percent-encoded
fn css_url(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 7);
    quoted.push_str("url(\"");
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("%22"),
            '\\' => quoted.push_str("%5C"),
            '\n' => quoted.push_str("%0A"),
            '\r' => quoted.push_str("%0D"),
            other => quoted.push(other),
        }
    }
    quoted.push_str("\")");
    quoted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Loaded,
    Errored,
}

impl LoadState {
    /// Transition for `event`; settled states absorb everything
    pub fn next(self, event: LoadEvent) -> LoadState {
        match (self, event) {
            (LoadState::Loading, LoadEvent::Load) => LoadState::Loaded,
            (LoadState::Loading, LoadEvent::Error) => LoadState::Errored,
            (settled, _) => settled,
        }
    }

    pub fn is_loading(self) -> bool {
        self == LoadState::Loading
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoadState::Loading => "loading",
            LoadState::Loaded => "loaded",
            LoadState::Errored => "errored",
        })
    }
}

/// Completion signal from the image element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEvent {
    Load,
    Error,
}

/// One rendered image instance
pub struct OptimizedImage<'a> {
    props: ImageProps,
    placeholder: String,
    state: LoadState,
    on_load: Option<Box<dyn FnMut() + Send + 'a>>,
}

impl fmt::Debug for OptimizedImage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimizedImage")
            .field("props", &self.props)
            .field("state", &self.state)
            .field("on_load", &self.on_load.is_some())
            .finish()
    }
}

impl<'a> OptimizedImage<'a> {
    pub fn new(props: ImageProps, placeholders: &BlurPlaceholders) -> Self {
        let placeholder = resolve_placeholder(&props, placeholders);
        Self {
            props,
            placeholder,
            state: LoadState::Loading,
            on_load: None,
        }
    }

    /// Callback run when the image finishes loading
    pub fn on_load(mut self, callback: impl FnMut() + Send + 'a) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }

    /// Apply a load/error event; returns the resulting state
    pub fn handle(&mut self, event: LoadEvent) -> LoadState {
        let next = self.state.next(event);
        if self.state == LoadState::Loading && next == LoadState::Loaded {
            if let Some(callback) = self.on_load.as_mut() {
                callback();
            }
        }
        self.state = next;
        next
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn props(&self) -> &ImageProps {
        &self.props
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Source currently shown: the fallback asset once errored
    pub fn current_src(&self) -> &str {
        match self.state {
            LoadState::Errored => ERROR_FALLBACK_SRC,
            _ => &self.props.src,
        }
    }

    /// Class list for the `<img>`
    pub fn image_class(&self) -> String {
        let mut class = format!(
            "{} {}",
            TRANSITION_CLASSES,
            if self.state.is_loading() {
                LOADING_CLASSES
            } else {
                SETTLED_CLASSES
            }
        );
        if self.props.is_fill() {
            class.push_str(" object-cover");
        }
        class
    }

    /// Inline style for the `<img>`
    pub fn image_style(&self) -> String {
        let mut style = format!(
            "object-fit: {}; object-position: {}",
            self.props.object_fit.as_css(),
            self.props.object_position
        );
        if self.props.is_fill() {
            style.push_str("; position: absolute; inset: 0; width: 100%; height: 100%");
        }
        if self.state.is_loading() {
            style.push_str(&format!(
                "; background-size: cover; background-position: center; background-image: {}",
                css_url(&self.placeholder)
            ));
        }
        style
    }

    /// Template data for the current state
    pub fn view(&self) -> ImageView<'_> {
        let (width, height) = match self.props.sizing {
            Sizing::Fixed { width, height } => (Some(width), Some(height)),
            Sizing::Fill => (None, None),
        };
        let wrapper_class = match self.props.class_name.trim() {
            "" => "relative overflow-hidden".to_string(),
            extra => format!("relative overflow-hidden {}", extra),
        };

        ImageView {
            src: self.current_src(),
            alt: &self.props.alt,
            width,
            height,
            loading: if self.props.priority { "eager" } else { "lazy" },
            priority: self.props.priority,
            srcset: match self.state {
                LoadState::Errored => None,
                _ => self.props.src_set(),
            },
            sizes: &self.props.sizes,
            class: self.image_class(),
            style: self.image_style(),
            wrapper_class,
            frame: self.props.frame.as_ref(),
            state: self.state,
        }
    }

    pub fn render(&self, templates: &Templates) -> Result<String, handlebars::RenderError> {
        templates.render(IMAGE_TEMPLATE, &self.view())
    }
}

/// Everything the image template needs
#[derive(Debug, Clone, Serialize)]
pub struct ImageView<'a> {
    pub src: &'a str,
    pub alt: &'a str,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub loading: &'static str,
    pub priority: bool,
    pub srcset: Option<String>,
    pub sizes: &'a str,
    pub class: String,
    pub style: String,
    pub wrapper_class: String,
    pub frame: Option<&'a Frame>,
    pub state: LoadState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blur_placeholders::DEFAULT_BLUR;
    use ewp_common::blur_data::BlurDataEntry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn tracked_lookup() -> BlurPlaceholders {
        BlurPlaceholders::from_entries([(
            "/images/venues/w-goa/hero.webp".to_string(),
            BlurDataEntry {
                blur: "data:image/webp;base64,TRACKED".to_string(),
                width: 1920,
                height: 1280,
            },
        )])
    }

    #[test]
    fn test_builder_defaults() {
        let props = ImageProps::builder("/images/a.webp", "Mandap at dusk")
            .size(800, 600)
            .build()
            .unwrap();
        assert_eq!(props.sizes, DEFAULT_SIZES);
        assert_eq!(props.quality, 85);
        assert_eq!(props.object_fit, ObjectFit::Cover);
        assert_eq!(props.object_position, "center");
        assert!(!props.priority);
        assert_eq!(props.sizing, Sizing::Fixed { width: 800, height: 600 });
    }

    #[test]
    fn test_builder_validation() {
        let build = |b: ImagePropsBuilder| b.build().unwrap_err();
        assert_eq!(build(ImageProps::builder("", "x").fill()), PropsError::EmptySource);
        assert_eq!(build(ImageProps::builder("/a.webp", "  ").fill()), PropsError::MissingAlt);
        assert_eq!(
            build(ImageProps::builder("/a.webp", "x").fill().quality(0)),
            PropsError::QualityOutOfRange(0)
        );
        assert_eq!(
            build(ImageProps::builder("/a.webp", "x").quality(101).fill()),
            PropsError::QualityOutOfRange(101)
        );
        assert_eq!(build(ImageProps::builder("/a.webp", "x")), PropsError::MissingDimensions);
        assert_eq!(
            build(ImageProps::builder("/a.webp", "x").size(0, 10)),
            PropsError::ZeroDimensions
        );
        assert_eq!(
            build(ImageProps::builder("/a.webp", "x").fill().breakpoints([0, 640])),
            PropsError::ZeroBreakpoint
        );
    }

    #[test]
    fn test_presets() {
        let hero = ImageProps::hero("/images/hero.webp", "Palace").build().unwrap();
        assert!(hero.is_fill());
        assert!(hero.priority);
        assert_eq!(hero.sizes, "100vw");
        assert_eq!(hero.quality, 80);

        let card = ImageProps::card("/images/card.webp", "Lawn").build().unwrap();
        assert_eq!(card.quality, 70);
        assert_eq!(card.frame.unwrap().style, "aspect-ratio: 4/3");

        let avatar = ImageProps::avatar("/images/p.webp", "Planner", 64).build().unwrap();
        assert_eq!(avatar.sizes, "64px");
        assert_eq!(avatar.quality, 80);
        assert_eq!(avatar.frame.unwrap().style, "width: 64px; height: 64px");
    }

    #[test]
    fn test_src_set_from_breakpoints() {
        let props = ImageProps::builder("/images/a.webp", "x")
            .fill()
            .quality(75)
            .breakpoints([1024, 640, 1024])
            .build()
            .unwrap();
        assert_eq!(
            props.src_set().unwrap(),
            "/images/a.webp?w=640&q=75 640w, /images/a.webp?w=1024&q=75 1024w"
        );

        let remote = ImageProps::builder("https://images.unsplash.com/p?fm=webp", "x")
            .fill()
            .breakpoints([400])
            .build()
            .unwrap();
        assert_eq!(
            remote.src_set().unwrap(),
            "https://images.unsplash.com/p?fm=webp&w=400&q=85 400w"
        );

        let plain = ImageProps::builder("/a.webp", "x").fill().build().unwrap();
        assert_eq!(plain.src_set(), None);
    }

    #[test]
    fn test_placeholder_resolution_order() {
        let lookup = tracked_lookup();

        let explicit = ImageProps::builder("/images/venues/w-goa/hero.webp", "x")
            .fill()
            .blur_data_url("data:image/png;base64,EXPLICIT")
            .build()
            .unwrap();
        assert_eq!(resolve_placeholder(&explicit, &lookup), "data:image/png;base64,EXPLICIT");

        let tracked = ImageProps::builder("/images/venues/w-goa/hero.webp", "x")
            .fill()
            .build()
            .unwrap();
        assert_eq!(resolve_placeholder(&tracked, &lookup), "data:image/webp;base64,TRACKED");

        let untracked = ImageProps::builder("/images/venues/untracked.webp", "x")
            .fill()
            .build()
            .unwrap();
        assert_eq!(resolve_placeholder(&untracked, &lookup), DEFAULT_BLUR);
        assert_eq!(
            resolve_placeholder(&untracked, &BlurPlaceholders::empty()),
            DEFAULT_BLUR
        );

        let sized = ImageProps::builder("/images/other.webp", "x")
            .size(320, 200)
            .build()
            .unwrap();
        assert_eq!(resolve_placeholder(&sized, &lookup), DEFAULT_BLUR);
    }

    #[test]
    fn test_css_url_is_quoted() {
        assert_eq!(css_url("data:image/webp;base64,AA=="), r#"url("data:image/webp;base64,AA==")"#);
        assert_eq!(
            css_url("x\");color:red;background:url(\"evil"),
            r#"url("x%22);color:red;background:url(%22evil")"#
        );
        assert_eq!(css_url("a\\b\nc"), r#"url("a%5Cb%0Ac")"#);
    }

    #[test]
    fn test_explicit_blur_cannot_break_out_of_style() {
        let props = ImageProps::builder("/images/a.webp", "x")
            .fill()
            .blur_data_url("x\");position:fixed;z-index:9")
            .build()
            .unwrap();
        let image = OptimizedImage::new(props, &BlurPlaceholders::empty());
        let style = image.image_style();
        assert!(style.ends_with(r#"background-image: url("x%22);position:fixed;z-index:9")"#));
        assert_eq!(style.matches('"').count(), 2);
    }

    #[test]
    fn test_state_machine_transitions() {
        assert_eq!(LoadState::Loading.next(LoadEvent::Load), LoadState::Loaded);
        assert_eq!(LoadState::Loading.next(LoadEvent::Error), LoadState::Errored);
        assert_eq!(LoadState::Loaded.next(LoadEvent::Load), LoadState::Loaded);
        assert_eq!(LoadState::Loaded.next(LoadEvent::Error), LoadState::Loaded);
        assert_eq!(LoadState::Errored.next(LoadEvent::Load), LoadState::Errored);
        assert_eq!(LoadState::Errored.next(LoadEvent::Error), LoadState::Errored);
    }

    #[test]
    fn test_404_goes_to_fallback_without_on_load() {
        let calls = AtomicUsize::new(0);
        let props = ImageProps::builder("/images/venues/missing.webp", "Missing venue")
            .size(1200, 800)
            .build()
            .unwrap();
        let mut image = OptimizedImage::new(props, &BlurPlaceholders::empty()).on_load(|| {
            calls.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(image.state(), LoadState::Loading);
        assert_eq!(image.current_src(), "/images/venues/missing.webp");
        assert!(image
            .image_style()
            .contains(&format!(r#"background-image: url("{}")"#, DEFAULT_BLUR)));

        assert_eq!(image.handle(LoadEvent::Error), LoadState::Errored);
        assert_eq!(image.current_src(), ERROR_FALLBACK_SRC);

        // The fallback itself loading does not leave the error state
        assert_eq!(image.handle(LoadEvent::Load), LoadState::Errored);
        assert_eq!(image.handle(LoadEvent::Error), LoadState::Errored);
        assert_eq!(image.current_src(), ERROR_FALLBACK_SRC);
        drop(image);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_on_load_fires_once() {
        let calls = AtomicUsize::new(0);
        let props = ImageProps::hero("/images/hero.webp", "Hero").build().unwrap();
        let mut image = OptimizedImage::new(props, &BlurPlaceholders::empty()).on_load(|| {
            calls.fetch_add(1, Ordering::SeqCst);
        });

        image.handle(LoadEvent::Load);
        image.handle(LoadEvent::Load);
        image.handle(LoadEvent::Error);
        assert_eq!(image.state(), LoadState::Loaded);
        assert_eq!(image.current_src(), "/images/hero.webp");
        drop(image);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_classes_follow_state() {
        let props = ImageProps::builder("/images/a.webp", "x").fill().build().unwrap();
        let mut image = OptimizedImage::new(props, &BlurPlaceholders::empty());
        assert_eq!(
            image.image_class(),
            "duration-700 ease-in-out scale-105 blur-lg grayscale object-cover"
        );

        image.handle(LoadEvent::Load);
        assert_eq!(
            image.image_class(),
            "duration-700 ease-in-out scale-100 blur-0 grayscale-0 object-cover"
        );
        assert!(!image.image_style().contains("background-image"));
    }

    #[test]
    fn test_view_loading_attributes() {
        let lookup = BlurPlaceholders::empty();
        let hero = OptimizedImage::new(ImageProps::hero("/h.webp", "h").build().unwrap(), &lookup);
        let view = hero.view();
        assert_eq!(view.loading, "eager");
        assert!(view.priority);
        assert_eq!(view.width, None);

        let lazy = OptimizedImage::new(
            ImageProps::builder("/l.webp", "l").size(10, 10).build().unwrap(),
            &lookup,
        );
        let view = lazy.view();
        assert_eq!(view.loading, "lazy");
        assert_eq!((view.width, view.height), (Some(10), Some(10)));
        assert_eq!(view.wrapper_class, "relative overflow-hidden");
    }

    #[test]
    fn test_errored_view_drops_srcset() {
        let props = ImageProps::builder("/a.webp", "x")
            .fill()
            .breakpoints([640])
            .build()
            .unwrap();
        let mut image = OptimizedImage::new(props, &BlurPlaceholders::empty());
        assert!(image.view().srcset.is_some());

        image.handle(LoadEvent::Error);
        let view = image.view();
        assert_eq!(view.src, ERROR_FALLBACK_SRC);
        assert_eq!(view.srcset, None);
    }
}
