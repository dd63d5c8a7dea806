use crate::utils::{escape_attr, escape_html};

/// Renders the index page enumerating the stored pages.
pub struct PageListing;

impl PageListing {
    pub fn new() -> Self {
        Self
    }

    /// Build the full index document from a sorted list of titles.
    pub fn render(&self, titles: &[String]) -> String {
        let mut html = String::new();
        html.push_str("<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">");
        html.push_str("<title>All pages</title></head><body>");
        html.push_str("<h1>All pages</h1>");

        if titles.is_empty() {
            html.push_str(
                "<p>No pages yet. Open <code>/edit/&lt;Title&gt;</code> to create one.</p>",
            );
        } else {
            html.push_str("<ul class=\"listing\">\n");
            for title in titles {
                html.push_str(&format!(
                    "  <li><a href=\"/view/{}\">{}</a> [<a href=\"/edit/{}\">edit</a>]</li>\n",
                    escape_attr(title),
                    escape_html(title),
                    escape_attr(title)
                ));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("</body></html>");
        html
    }
}

impl Default for PageListing {
    fn default() -> Self {
        Self::new()
    }
}
