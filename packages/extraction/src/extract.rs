//! Rule-driven link extraction from one fetched page.

use tracing::debug;

use crate::document::Document;
use crate::filter::CityFilter;
use crate::source::SourceConfig;

/// Apply one source rule to one parsed document.
///
/// Matched elements are processed in document order. An element is dropped
/// when the city filter rejects its serialized content, when the rule asks
/// for a nested anchor and none exists, or when the link attribute is
/// missing. None of these abort the pass; the element simply contributes
/// nothing. Duplicates within one pass are legal and collapse later during
/// reconciliation.
pub fn extract_links(document: &Document, rule: &SourceConfig, filter: &CityFilter) -> Vec<String> {
    let mut links = Vec::new();

    for element in document.find_all(&rule.match_tag, &rule.match_class) {
        if !filter.accepts(&element.serialized()) {
            continue;
        }

        let carrier = if rule.nested_anchor_lookup {
            match element.find_first("a") {
                Some(anchor) => anchor,
                None => {
                    debug!(source = %rule.name, "matched element has no nested anchor, skipping");
                    continue;
                }
            }
        } else {
            element
        };

        let Some(value) = carrier.attr(rule.link_attribute.as_str()) else {
            debug!(
                source = %rule.name,
                attribute = rule.link_attribute.as_str(),
                "matched element is missing the link attribute, skipping"
            );
            continue;
        };

        // Plain concatenation: the attribute value is either a full URL or
        // a root-relative path matching the configured prefix.
        let link = format!("{}{}", rule.url_prefix, value);
        debug!(source = %rule.name, link = %link, "extracted listing link");
        links.push(link);
    }

    links
}

/// Parse `html` and extract in one step.
///
/// The parsed document is not `Send`, so async callers use this wrapper to
/// keep it off await boundaries.
pub fn extract_from_html(html: &str, rule: &SourceConfig, filter: &CityFilter) -> Vec<String> {
    let document = Document::parse(html);
    extract_links(&document, rule, filter)
}
