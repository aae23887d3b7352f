//! HTML fragment templates
//!
//! Templates are compiled into the binary and registered once at startup.
//! Every `{{value}}` is escaped for use inside double-quoted attributes.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

pub const IMAGE_TEMPLATE: &str = "optimized_image";
pub const GALLERY_TEMPLATE: &str = "gallery_picture";

const IMAGE_SOURCE: &str = include_str!("../templates/optimized_image.hbs");
const GALLERY_SOURCE: &str = include_str!("../templates/gallery_picture.hbs");

/// Escape the characters that matter in HTML text and quoted attributes
///
/// Unlike the handlebars default this leaves `=` alone, so URLs and base64
/// data URIs stay readable in the output.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Registry of the component templates
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(escape_html);
        registry.register_template_string(IMAGE_TEMPLATE, IMAGE_SOURCE.trim_end())?;
        registry.register_template_string(GALLERY_TEMPLATE, GALLERY_SOURCE.trim_end())?;
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        self.registry.render(name, data)
    }
}
