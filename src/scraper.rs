use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::models::AggregateSnapshot;
use crate::sites::SiteAdapter;
use crate::utils::error::{AppError, Result};

/// Fans a fetch out over every configured site and assembles the combined
/// snapshot. The adapter set is fixed at startup.
pub struct AggregateScraper {
    adapters: HashMap<String, Box<dyn SiteAdapter>>,
}

impl AggregateScraper {
    pub fn new(adapters: HashMap<String, Box<dyn SiteAdapter>>) -> Self {
        Self { adapters }
    }

    pub fn site_count(&self) -> usize {
        self.adapters.len()
    }

    /// Scrapes every site with a configured URL, sequentially, and returns
    /// the aggregate keyed by site identifier.
    ///
    /// All-or-nothing: if any adapter fails, the whole call fails naming
    /// every failed site, so no partial data can reach the baseline.
    pub async fn fetch_all(&self) -> Result<AggregateSnapshot> {
        let mut aggregate = AggregateSnapshot::new();
        let mut failed: Vec<String> = Vec::new();

        for (site, adapter) in &self.adapters {
            if adapter.url().is_none() {
                debug!("{}: no URL configured, skipping", site);
                continue;
            }

            info!("Scraping {}...", site);
            match adapter.get_products().await {
                Ok(snapshot) => {
                    debug!("{}: {} product(s)", site, snapshot.len());
                    aggregate.insert(site.clone(), snapshot);
                }
                Err(err) => {
                    warn!("{}: {}", site, err);
                    failed.push(site.clone());
                }
            }
        }

        if !failed.is_empty() {
            failed.sort();
            return Err(AppError::FetchFailed { sites: failed });
        }

        Ok(aggregate)
    }
}
