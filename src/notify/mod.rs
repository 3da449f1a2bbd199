pub mod email;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::models::AggregateSnapshot;
use crate::utils::error::Result;

pub use email::EmailNotifier;

/// Delivers a snapshot to the operator. Delivery failure is handled by the
/// poll loop with the same swallow-and-log policy as a failed scrape.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, subject: &str, snapshot: &AggregateSnapshot) -> Result<()>;
}

/// Renders the plain-text message body: per site, an upper-cased header,
/// every product sorted by name with its status, then the site's source URL.
pub fn format_body(snapshot: &AggregateSnapshot, site_urls: &HashMap<String, String>) -> String {
    let mut body = String::new();

    let mut site_names: Vec<&String> = snapshot.keys().collect();
    site_names.sort();

    for site in site_names {
        body.push_str(&format!("{}:\n", site.to_uppercase()));

        let mut product_names: Vec<&String> = snapshot[site].keys().collect();
        product_names.sort();
        for product in product_names {
            body.push_str(&format!("- {}: {}\n", product, snapshot[site][product]));
        }

        if let Some(url) = site_urls.get(site) {
            body.push_str(&format!("\nURL: {}\n\n\n", url));
        } else {
            body.push_str("\n\n");
        }
    }

    body
}
