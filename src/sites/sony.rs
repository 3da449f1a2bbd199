use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use scraper::Html;

use crate::config::SiteConfig;
use crate::models::{CatalogSnapshot, ProductStatus};
use crate::sites::{apply_keywords, fetch_text, parse_price, selector, SiteAdapter};
use crate::utils::error::{AppError, Result};

/// The Sony store exposes the numeric amount in a `data-price-amount`
/// attribute (dot-decimal, no grouping); the rendered text is only a
/// fallback.
pub struct SonyAdapter {
    name: String,
    url: Option<String>,
    keywords: Option<Vec<String>>,
    client: Client,
}

impl SonyAdapter {
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
        let info = selector(&self.name, "div.product-item-info")?;
        let name_sel = selector(&self.name, "strong.product-item-name a")?;
        let price_sel = selector(&self.name, "span.price-wrapper")?;

        let mut products = CatalogSnapshot::new();
        for element in document.select(&info) {
            let name = element
                .select(&name_sel)
                .next()
                .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
                .unwrap_or_default();

            let status = match element.select(&price_sel).next() {
                Some(wrapper) => {
                    let amount = match wrapper.value().attr("data-price-amount") {
                        Some(raw) => Decimal::from_str(raw).map_err(|e| {
                            AppError::fetch(&self.name, format!("bad price amount '{}': {}", raw, e))
                        })?,
                        None => {
                            let text = wrapper.text().collect::<Vec<_>>().join(" ");
                            parse_price(&self.name, &text)?
                        }
                    };
                    ProductStatus::InStock(amount)
                }
                None => ProductStatus::OutOfStock,
            };

            products.insert(name, status);
        }

        Ok(apply_keywords(products, self.keywords.as_deref()))
    }
}

#[async_trait]
impl SiteAdapter for SonyAdapter {
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
