//! The scrape pass: fetch every seed URL, extract, reconcile once, persist.

use tracing::{info, warn};

use crate::error::Result;
use crate::extract::extract_from_html;
use crate::fetch::PageFetcher;
use crate::filter::CityFilter;
use crate::source::SourceConfig;
use crate::store::ListingFile;

/// Outcome of one scrape pass, for operator visibility. Has no effect on
/// reconciliation semantics.
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    /// Links extracted per source, in configured order (pre-dedup)
    pub links_per_source: Vec<(String, usize)>,

    /// Seed URLs whose fetch failed
    pub failed_urls: Vec<String>,

    /// Links newly admitted to the whitelist by this pass
    pub new_whitelisted: usize,

    /// Whitelist size after reconciliation
    pub whitelist_size: usize,
}

impl ScrapeReport {
    /// Total links extracted across all sources, duplicates included.
    pub fn links_found(&self) -> usize {
        self.links_per_source.iter().map(|(_, n)| n).sum()
    }

    /// Whether every seed URL was fetched successfully.
    pub fn is_complete(&self) -> bool {
        self.failed_urls.is_empty()
    }
}

/// Runs scrape passes: one generic extractor over many source rules,
/// feeding a single reconciliation against the listing file.
pub struct Scraper<F> {
    fetcher: F,
    filter: CityFilter,
    sources: Vec<SourceConfig>,
    listings: ListingFile,
}

impl<F: PageFetcher> Scraper<F> {
    /// Assemble a scrape pass. All configuration is threaded in here;
    /// nothing is read from process-wide state.
    pub fn new(
        fetcher: F,
        filter: CityFilter,
        sources: Vec<SourceConfig>,
        listings: ListingFile,
    ) -> Self {
        Self {
            fetcher,
            filter,
            sources,
            listings,
        }
    }

    /// Run one pass.
    ///
    /// Sources run in configured order, seed URLs in listed order. A fetch
    /// failure skips that URL only; a source whose every seed URL fails
    /// contributes nothing and does not stop the others. All extracted
    /// links are accumulated and reconciled in a single step at the end,
    /// so the result does not depend on source order and duplicates
    /// collapse once over everything. The store is loaded before the first
    /// fetch and written back once; a missing listing file starts as an
    /// empty store, an unreadable or malformed one aborts the pass before
    /// any write.
    pub async fn run(&self) -> Result<ScrapeReport> {
        let store = self.listings.load_or_default()?;

        let mut report = ScrapeReport::default();
        let mut found = Vec::new();

        for source in &self.sources {
            let mut source_links = 0usize;

            for url in &source.seed_urls {
                info!(source = %source.name, url = %url, "fetching seed URL");
                let body = match self.fetcher.fetch(url).await {
                    Ok(body) => body,
                    Err(e) => {
                        warn!(url = %url, error = %e, "fetch failed, seed URL contributes nothing");
                        report.failed_urls.push(url.clone());
                        continue;
                    }
                };

                let links = extract_from_html(&body, source, &self.filter);
                source_links += links.len();
                found.extend(links);
            }

            info!(source = %source.name, links = source_links, "source finished");
            report
                .links_per_source
                .push((source.name.clone(), source_links));
        }

        let seen_before = store.whitelist.clone();
        let store = store.reconcile(found);
        report.new_whitelisted = store.whitelist.difference(&seen_before).count();
        report.whitelist_size = store.whitelist.len();

        self.listings.save(&store)?;
        info!(
            found = report.links_found(),
            new = report.new_whitelisted,
            whitelist = report.whitelist_size,
            failed_urls = report.failed_urls.len(),
            "scrape pass complete"
        );

        Ok(report)
    }
}
