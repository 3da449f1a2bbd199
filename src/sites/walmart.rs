use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use crate::config::SiteConfig;
use crate::models::{CatalogSnapshot, ProductStatus};
use crate::sites::{apply_keywords, fetch_text, parse_price, selector, SiteAdapter};
use crate::utils::error::{AppError, Result};

/// Walmart product tiles show an explicit out-of-stock paragraph; otherwise
/// the sale price is in the tile's price block.
pub struct WalmartAdapter {
    name: String,
    url: Option<String>,
    keywords: Option<Vec<String>>,
    client: Client,
}

impl WalmartAdapter {
    pub fn new(name: &str, config: &SiteConfig, client: Client) -> Self {
        Self {
            name: name.to_string(),
            url: config.url.clone(),
            keywords: config.keywords.clone(),
            client,
        }
    }

    fn parse_catalog(&self, body: &str) -> Result<CatalogSnapshot> {
        let document = Html::parse_document(body);
        let tile = selector(&self.name, "div.product-tile")?;
        let name_sel = selector(&self.name, "div.product-title")?;
        let price_sel = selector(&self.name, "div.product-price span.sale-price")?;
        let out_of_stock = selector(&self.name, "p.out-of-stock")?;

        let mut products = CatalogSnapshot::new();
        for element in document.select(&tile) {
            let name = element
                .select(&name_sel)
                .next()
                .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
                .unwrap_or_default();

            let status = if element.select(&out_of_stock).next().is_some() {
                ProductStatus::OutOfStock
            } else {
                match element.select(&price_sel).next() {
                    Some(price) => {
                        let text = price.text().collect::<Vec<_>>().join(" ");
                        ProductStatus::InStock(parse_price(&self.name, &text)?)
                    }
                    None => ProductStatus::OutOfStock,
                }
            };

            products.insert(name, status);
        }

        Ok(apply_keywords(products, self.keywords.as_deref()))
    }
}

#[async_trait]
impl SiteAdapter for WalmartAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    async fn get_products(&self) -> Result<CatalogSnapshot> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| AppError::fetch(&self.name, "no URL configured"))?;
        let body = fetch_text(&self.client, &self.name, url).await?;
        self.parse_catalog(&body)
    }
}
