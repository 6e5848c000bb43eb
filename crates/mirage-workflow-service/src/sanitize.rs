//! Safe rendering of model-written Markdown
//!
//! Synthesized prompts come straight from the model and are treated as
//! untrusted. Raw HTML in the Markdown is escaped to text and link targets
//! with script-capable schemes are neutralized, so the rendered HTML can be
//! inserted into the page as-is.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Schemes allowed in link and image targets. Relative targets are also allowed.
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Render untrusted Markdown to HTML with all raw HTML escaped
pub fn render_markdown_safe(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) => Event::Html(escape_html(&raw).into()),
        Event::Start(tag) => Event::Start(neutralize(tag)),
        Event::End(tag) => Event::End(neutralize(tag)),
        other => other,
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, events);
    output
}

/// Raw HTML from the model is shown as literal text
fn escape_html(raw: &str) -> String {
    html_escape::encode_text(raw).into_owned()
}

fn neutralize(tag: Tag<'_>) -> Tag<'_> {
    match tag {
        Tag::Link(kind, url, title) => Tag::Link(kind, safe_url(url), title),
        Tag::Image(kind, url, title) => Tag::Image(kind, safe_url(url), title),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        CowStr::Borrowed("#")
    }
}

fn is_safe_url(url: &str) -> bool {
    let trimmed = url.trim();
    // Browsers ignore control characters and whitespace inside schemes
    let compact: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    match compact.find(':') {
        None => true,
        Some(colon) => {
            let before = &compact[..colon];
            // A colon after a path, query or fragment delimiter is not a scheme
            if before.contains(|c: char| matches!(c, '/' | '?' | '#')) {
                return true;
            }
            let scheme = before.to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
    }
}
