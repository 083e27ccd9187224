use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static PAGE_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

/// Feed title for the page: first `<h1>`, else `<title>`, else the caller's
/// default. Never empty.
pub fn extract_title(document: &Html, default_title: &str) -> String {
    for selector in [&*H1, &*PAGE_TITLE] {
        if let Some(element) = document.select(selector).next() {
            let text = element.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return text;
            }
        }
    }
    default_title.to_string()
}
