use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::errors::WikiError;
use crate::types::Page;
use crate::utils::escape_html;

/// The template names the registry knows about.
const TEMPLATE_NAMES: [&str; 2] = ["view", "edit"];

/// Immutable set of page templates, loaded once at startup.
///
/// Templates are plain HTML with `{{TITLE}}` and `{{BODY}}` placeholders;
/// rendering substitutes both with HTML-escaped page fields. The registry
/// is built before the listener starts and handed to the handlers through
/// the application state, so there is no per-request file access and no
/// global template state.
pub struct TemplateRegistry {
    templates: HashMap<String, String>,
}

impl TemplateRegistry {
    /// Build a registry from the built-in templates only.
    pub fn builtin() -> Self {
        let mut templates = HashMap::new();
        templates.insert("view".to_string(), DEFAULT_VIEW.to_string());
        templates.insert("edit".to_string(), DEFAULT_EDIT.to_string());
        Self { templates }
    }

    /// Load `view.html` and `edit.html` from the template directory,
    /// falling back to the built-in markup for any file that cannot be
    /// read. Called once at startup.
    pub fn load(dir: &Path) -> Self {
        let mut registry = Self::builtin();
        for name in TEMPLATE_NAMES {
            let path = dir.join(format!("{}.html", name));
            match fs::read_to_string(&path) {
                Ok(source) => {
                    debug!("loaded template '{}' from {:?}", name, path);
                    registry.templates.insert(name.to_string(), source);
                }
                Err(e) => {
                    warn!("template {:?} not readable ({}), using built-in", path, e);
                }
            }
        }
        registry
    }

    /// Render the named template against a page, escaping every
    /// interpolated value.
    ///
    /// The title pass runs before the body pass so placeholder syntax
    /// inside a page body is never treated as a placeholder.
    pub fn render(&self, name: &str, page: &Page) -> Result<String, WikiError> {
        let source = self
            .templates
            .get(name)
            .ok_or_else(|| WikiError::Template(format!("unknown template '{}'", name)))?;
        Ok(source
            .replace("{{TITLE}}", &escape_html(&page.title))
            .replace("{{BODY}}", &escape_html(&page.body)))
    }
}

const DEFAULT_VIEW: &str = "<!doctype html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<title>{{TITLE}}</title>\n\
</head>\n\
<body>\n\
<h1>{{TITLE}}</h1>\n\
<p>[<a href=\"/edit/{{TITLE}}\">edit</a>]</p>\n\
<div class=\"page-body\"><pre>{{BODY}}</pre></div>\n\
<p><a href=\"/\">All pages</a></p>\n\
</body>\n\
</html>\n";

const DEFAULT_EDIT: &str = "<!doctype html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<title>Editing {{TITLE}}</title>\n\
</head>\n\
<body>\n\
<h1>Editing {{TITLE}}</h1>\n\
<form action=\"/save/{{TITLE}}\" method=\"POST\">\n\
<p><textarea name=\"body\" rows=\"20\" cols=\"80\">{{BODY}}</textarea></p>\n\
<p><input type=\"submit\" value=\"Save\"></p>\n\
</form>\n\
<p><a href=\"/\">All pages</a></p>\n\
</body>\n\
</html>\n";
