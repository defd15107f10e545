//! Thin adapter over the `scraper` crate.
//!
//! Extraction only needs three operations from an HTML document: find all
//! elements by tag and class (in document order), read an attribute, and
//! descend to the first nested tag. Keeping them behind this adapter keeps
//! selector mechanics out of the extraction logic.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw HTML. Parsing never fails; malformed markup yields a
    /// best-effort tree, like any browser.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// All elements matching `tag` with `class`, in document order.
    ///
    /// Selectors are validated when source configuration is loaded; an
    /// invalid tag/class pair reaching this point yields no matches.
    pub fn find_all(&self, tag: &str, class: &str) -> Vec<Element<'_>> {
        let selector = match tag_class_selector(tag, class) {
            Ok(selector) => selector,
            Err(reason) => {
                warn!(tag = %tag, class = %class, reason = %reason, "unusable selector");
                return Vec::new();
            }
        };
        self.html
            .select(&selector)
            .map(|inner| Element { inner })
            .collect()
    }
}

/// Handle to one element inside a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Read an attribute off this element.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// The raw serialized element: the tag itself plus nested markup.
    ///
    /// This is what the city filter runs against, so location names inside
    /// nested tags or attribute values still match.
    pub fn serialized(&self) -> String {
        self.inner.html()
    }

    /// First element with the given tag nested inside this one.
    pub fn find_first(&self, tag: &str) -> Option<Element<'a>> {
        let selector = Selector::parse(tag).ok()?;
        self.inner
            .select(&selector)
            .next()
            .map(|inner| Element { inner })
    }
}

/// Build a selector matching `tag` elements carrying every class token in
/// `class` (`"div"` + `"ad box"` becomes `div.ad.box`).
pub(crate) fn tag_class_selector(tag: &str, class: &str) -> std::result::Result<Selector, String> {
    let mut css = tag.to_string();
    for token in class.split_whitespace() {
        css.push('.');
        css.push_str(token);
    }
    Selector::parse(&css).map_err(|e| format!("invalid selector `{}`: {}", css, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <div class="ad first"><a href="/x/1">Wohnung in Meersburg</a></div>
            <div class="other"><a href="/x/2">skipped</a></div>
            <div class="ad"><span>no anchor here</span></div>
        </body></html>
    "#;

    #[test]
    fn test_find_all_by_tag_and_class() {
        let document = Document::parse(PAGE);
        let matches = document.find_all("div", "ad");
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_find_all_multi_token_class() {
        let document = Document::parse(PAGE);
        let matches = document.find_all("div", "ad first");
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_serialized_includes_nested_markup() {
        let document = Document::parse(PAGE);
        let element = document.find_all("div", "ad first").remove(0);
        let serialized = element.serialized();
        assert!(serialized.contains("Meersburg"));
        assert!(serialized.contains("href=\"/x/1\""));
    }

    #[test]
    fn test_find_first_and_attr() {
        let document = Document::parse(PAGE);
        let element = document.find_all("div", "ad first").remove(0);
        let anchor = element.find_first("a").unwrap();
        assert_eq!(anchor.attr("href"), Some("/x/1"));
        assert_eq!(anchor.attr("data-href"), None);
    }

    #[test]
    fn test_find_first_missing() {
        let document = Document::parse(PAGE);
        let elements = document.find_all("div", "ad");
        assert!(elements[1].find_first("a").is_none());
    }

    #[test]
    fn test_invalid_selector_rejected() {
        assert!(tag_class_selector("div", "ad").is_ok());
        assert!(tag_class_selector("div", "{bad}").is_err());
    }
}
