use scraper::{Html, Selector};
use serde::Serialize;

pub const SNIPPET_CHARS: usize = 220;

pub const PAGE_MESSAGE_HEADER: &str = "🗳️ ChunabLive – Live Update";

/// Something visible from a scraped page. Placeholder until a deployment
/// knows which parts of its page actually matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub title: String,
    pub snippet: String,
}

impl PageSnapshot {
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);

        let title = select_text(&document, "title")
            .map(|title| title.trim().to_string())
            .unwrap_or_default();

        let body = select_text(&document, "body").unwrap_or_default();
        let snippet: String = collapse_whitespace(&body).chars().take(SNIPPET_CHARS).collect();

        PageSnapshot {
            title,
            snippet: snippet.trim().to_string(),
        }
    }

    /// Hash material: `{"title":…,"snippet":…}` as compact JSON.
    pub fn change_material(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn format_message(&self, source_url: &str) -> String {
        let mut message = format!("{}\n\n", PAGE_MESSAGE_HEADER);
        if !self.title.is_empty() {
            message.push_str(&self.title);
            message.push_str("\n\n");
        }
        message.push_str(&self.snippet);
        message.push_str(&format!("\n\nSource: {}", source_url));
        message
    }
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect())
}

// Runs of whitespace become one space; ends are left alone.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        match c.is_whitespace() {
            true if in_space => {}
            true => {
                in_space = true;
                out.push(' ');
            }
            false => {
                in_space = false;
                out.push(c);
            }
        }
    }
    out
}
