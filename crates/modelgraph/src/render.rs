//! Template-string rendering.

use serde::Serialize;

use crate::error::Error;
use crate::format::TemplateFormat;

/// Options for rendering a template as a string.
#[derive(Debug, Clone)]
pub struct TemplateStringOptions {
    /// Export redundant fields as well (complete template).
    pub complete: bool,
    /// Render multi-line with indentation; single-line otherwise.
    pub new_line: bool,
    /// Indentation width for multi-line rendering.
    pub indentation: usize,
    /// Rendering format for library-specific values.
    pub format: TemplateFormat,
}

impl Default for TemplateStringOptions {
    fn default() -> Self {
        TemplateStringOptions {
            complete: false,
            new_line: true,
            indentation: 4,
            format: TemplateFormat::Explicit,
        }
    }
}

/// Render any template value as a JSON template string.
pub(crate) fn render_template<T: Serialize>(
    value: &T,
    options: &TemplateStringOptions,
) -> Result<String, Error> {
    if options.new_line {
        let indent = " ".repeat(options.indentation);
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value
            .serialize(&mut serializer)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| Error::Serialization(e.to_string()))
    } else {
        serde_json::to_string(value).map_err(|e| Error::Serialization(e.to_string()))
    }
}
