pub mod cetrogar;
pub mod discovea;
pub mod falabella;
pub mod fravega;
pub mod jumbo;
pub mod sony;
pub mod walmart;

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;

use async_trait::async_trait;
use config::ConfigError;
use regex::Regex;
use reqwest::Client;
use rust_decimal::Decimal;
use scraper::Selector;

use crate::config::AppConfig;
use crate::models::CatalogSnapshot;
use crate::utils::error::{AppError, Result};

pub use cetrogar::CetrogarAdapter;
pub use discovea::DiscoVeaAdapter;
pub use falabella::FalabellaAdapter;
pub use fravega::FravegaAdapter;
pub use jumbo::JumboAdapter;
pub use sony::SonyAdapter;
pub use walmart::WalmartAdapter;

/// One monitored storefront. Adapters are stateless across calls: every
/// `get_products` performs a full fetch and parse of the configured URL and
/// returns either a complete snapshot or a single fetch error carrying the
/// site identity. No partial snapshots.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Site identifier used in snapshots, logs and error messages.
    fn name(&self) -> &str;

    /// Target catalog URL. `None` means "do not scrape this site this
    /// cycle"; it is not an error.
    fn url(&self) -> Option<&str>;

    async fn get_products(&self) -> Result<CatalogSnapshot>;
}

/// Builds the site registry from configuration. The site identifier selects
/// which concrete parser handles the page; an identifier with no parser is a
/// fatal configuration error.
pub fn build_adapters(
    config: &AppConfig,
    client: &Client,
) -> Result<HashMap<String, Box<dyn SiteAdapter>>> {
    let mut adapters: HashMap<String, Box<dyn SiteAdapter>> = HashMap::new();

    for (site, site_config) in &config.sites {
        let adapter: Box<dyn SiteAdapter> = match site.as_str() {
            "Frávega" => Box::new(FravegaAdapter::new(site, site_config, client.clone())),
            "Cetrogar" => Box::new(CetrogarAdapter::new(site, site_config, client.clone())),
            "Sony" => Box::new(SonyAdapter::new(site, site_config, client.clone())),
            "Jumbo" => Box::new(JumboAdapter::new(site, site_config, client.clone())),
            // Disco and Vea Digital run the same platform and share a parser
            "Disco" | "Vea Digital" => {
                Box::new(DiscoVeaAdapter::new(site, site_config, client.clone()))
            }
            "Falabella" => Box::new(FalabellaAdapter::new(site, site_config, client.clone())),
            "Walmart" => Box::new(WalmartAdapter::new(site, site_config, client.clone())),
            other => {
                return Err(AppError::Config(ConfigError::Message(format!(
                    "no adapter registered for site '{}'",
                    other
                ))));
            }
        };
        adapters.insert(site.clone(), adapter);
    }

    Ok(adapters)
}

/// Fetches the raw markup for a site, folding transport and HTTP-status
/// failures into the site's fetch error.
pub(crate) async fn fetch_text(client: &Client, site: &str, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::fetch(site, e))?
        .error_for_status()
        .map_err(|e| AppError::fetch(site, e))?;

    response.text().await.map_err(|e| AppError::fetch(site, e))
}

/// Compiles a CSS selector, attributing failures to the site whose parser
/// asked for it.
pub(crate) fn selector(site: &str, css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| AppError::fetch(site, format!("bad selector '{}': {:?}", css, e)))
}

fn price_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,3}(?:\.\d{3})+|\d+)(?:,(\d+))?").expect("valid price regex")
    })
}

/// Extracts a decimal price from raw storefront text.
///
/// The monitored stores print Argentine formats: "." groups thousands and
/// "," is the decimal separator ("$ 1.234,56"). Currency symbols and any
/// surrounding text are ignored.
pub(crate) fn parse_price(site: &str, text: &str) -> Result<Decimal> {
    let captures = price_regex()
        .captures(text)
        .ok_or_else(|| AppError::fetch(site, format!("no price in '{}'", text.trim())))?;

    let integer = captures[1].replace('.', "");
    let normalized = match captures.get(2) {
        Some(frac) => format!("{}.{}", integer, frac.as_str()),
        None => integer,
    };

    Decimal::from_str(&normalized)
        .map_err(|e| AppError::fetch(site, format!("bad price '{}': {}", text.trim(), e)))
}

/// Drops products whose name matches none of the configured keywords.
/// Matching is a case-insensitive substring test; no keywords means no
/// filtering.
pub(crate) fn apply_keywords(
    products: CatalogSnapshot,
    keywords: Option<&[String]>,
) -> CatalogSnapshot {
    let Some(keywords) = keywords else {
        return products;
    };

    products
        .into_iter()
        .filter(|(name, _)| {
            let name = name.to_lowercase();
            keywords.iter().any(|k| name.contains(&k.to_lowercase()))
        })
        .collect()
}
