//! Rule-Driven Listing Link Extraction
//!
//! A small library that pulls real-estate listing links out of configured
//! source websites and reconciles them into a persisted whitelist, minus a
//! persisted blacklist a human curates.
//!
//! # Design Philosophy
//!
//! - Per-source behavior is data, not a type per website: one generic
//!   extractor consumes [`SourceConfig`] records
//! - Extraction is a pure function of one parsed document; the network
//!   sits behind the [`PageFetcher`] trait
//! - Reconciliation is set algebra: union new links into the whitelist,
//!   subtract the blacklist, exactly once per pass
//! - Links are plain strings compared by exact equality, never normalized
//!
//! # Usage
//!
//! ```rust,ignore
//! use extraction::{CityFilter, HttpFetcher, ListingFile, Scraper, load_sources};
//!
//! let sources = load_sources("websites.json")?;
//! let filter = CityFilter::new(["Überlingen", "Meersburg"]);
//! let scraper = Scraper::new(
//!     HttpFetcher::new(),
//!     filter,
//!     sources,
//!     ListingFile::new("list.json"),
//! );
//! let report = scraper.run().await?;
//! ```
//!
//! # Modules
//!
//! - [`source`] - Per-source extraction rules and their JSON format
//! - [`filter`] - Location predicate over serialized elements
//! - [`document`] - Adapter over the HTML parser
//! - [`extract`] - The rule-driven extractor
//! - [`fetch`] - Page fetching ([`HttpFetcher`], [`PageFetcher`] trait)
//! - [`store`] - Whitelist/blacklist store and its JSON file
//! - [`orchestrator`] - One full scrape pass
//! - [`testing`] - Mock fetcher for tests

pub mod document;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod orchestrator;
pub mod source;
pub mod store;
pub mod testing;

// Re-export core types at crate root
pub use error::{ConfigError, FetchError, Result, ScrapeError, StoreError};
pub use extract::{extract_from_html, extract_links};
pub use fetch::{HttpFetcher, PageFetcher};
pub use filter::CityFilter;
pub use orchestrator::{ScrapeReport, Scraper};
pub use source::{load_sources, LinkAttribute, SourceConfig};
pub use store::{ListingFile, ListingStore};

pub use document::{Document, Element};
