//! Per-source extraction rules.
//!
//! Each configured website is described by one [`SourceConfig`]: which
//! tag/class marks a listing container, which attribute carries the link,
//! and how to turn the raw attribute value into an absolute URL. One
//! generic extractor consumes these records; per-source behavior lives in
//! data, not in a type per website.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::document::tag_class_selector;
use crate::error::{ConfigError, ConfigResult};

/// Attribute read off the matched (or nested) element to obtain the link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum LinkAttribute {
    /// Standard anchor attribute
    #[default]
    #[serde(rename = "href")]
    Href,

    /// Data attribute used by sources whose containers carry the link
    /// themselves instead of a nested anchor
    #[serde(rename = "data-href")]
    DataHref,
}

impl LinkAttribute {
    /// The attribute name as it appears in markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkAttribute::Href => "href",
            LinkAttribute::DataHref => "data-href",
        }
    }
}

/// Extraction rule for one configured website. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Source name, the key in the configuration file
    pub name: String,

    /// Listing/search-results pages to fetch for this source
    pub seed_urls: Vec<String>,

    /// Tag of the listing container element
    pub match_tag: String,

    /// Class of the listing container element (may be several tokens)
    pub match_class: String,

    /// Attribute holding the link
    pub link_attribute: LinkAttribute,

    /// Prefix prepended to the attribute value, possibly empty. Plain
    /// string concatenation; whether the attribute holds a full URL or a
    /// root-relative path is a per-source contract fixed here.
    pub url_prefix: String,

    /// Whether the link lives on the first anchor nested inside the
    /// matched container rather than on the container itself
    pub nested_anchor_lookup: bool,
}

/// On-disk shape of one source entry.
#[derive(Debug, Deserialize)]
struct RawSource {
    urls: Vec<String>,
    html_tag: String,
    html_class: String,
    #[serde(default)]
    link_attribute: LinkAttribute,
    #[serde(default)]
    url_prefix: String,
    #[serde(default)]
    nested_anchor: bool,
}

impl SourceConfig {
    fn from_raw(name: String, raw: RawSource) -> ConfigResult<Self> {
        tag_class_selector(&raw.html_tag, &raw.html_class).map_err(|reason| {
            ConfigError::InvalidSource {
                name: name.clone(),
                reason,
            }
        })?;

        Ok(Self {
            name,
            seed_urls: raw.urls,
            match_tag: raw.html_tag,
            match_class: raw.html_class,
            link_attribute: raw.link_attribute,
            url_prefix: raw.url_prefix,
            nested_anchor_lookup: raw.nested_anchor,
        })
    }
}

/// Load all source rules from a JSON file keyed by source name.
///
/// Sources come back in name order, which is also the order the
/// orchestrator runs them in. Selectors are validated here so a bad
/// tag/class pair fails at startup instead of silently matching nothing.
pub fn load_sources(path: impl AsRef<Path>) -> ConfigResult<Vec<SourceConfig>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sources(&raw).map_err(|source| ConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })?
}

/// Parse source rules from a JSON string. Split from [`load_sources`] so
/// tests can feed configuration without touching the filesystem.
fn parse_sources(raw: &str) -> serde_json::Result<ConfigResult<Vec<SourceConfig>>> {
    let entries: BTreeMap<String, RawSource> = serde_json::from_str(raw)?;
    Ok(entries
        .into_iter()
        .map(|(name, raw)| SourceConfig::from_raw(name, raw))
        .collect())
}
