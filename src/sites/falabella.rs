use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use crate::config::SiteConfig;
use crate::models::{CatalogSnapshot, ProductStatus};
use crate::sites::{apply_keywords, fetch_text, parse_price, selector, SiteAdapter};
use crate::utils::error::{AppError, Result};

/// Falabella pods carry the internet price in a `data-internet-price`
/// attribute (Argentine grouping). A pod without the attribute is sold out.
pub struct FalabellaAdapter {
    name: String,
    url: Option<String>,
    keywords: Option<Vec<String>>,
    client: Client,
}

impl FalabellaAdapter {
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
        let pod = selector(&self.name, r#"div[data-pod="catalyst-pod"]"#)?;
        let name_sel = selector(&self.name, "b.pod-subTitle")?;
        let price_sel = selector(&self.name, "li[data-internet-price]")?;

        let mut products = CatalogSnapshot::new();
        for element in document.select(&pod) {
            let name = element
                .select(&name_sel)
                .next()
                .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
                .unwrap_or_default();

            let status = match element
                .select(&price_sel)
                .next()
                .and_then(|li| li.value().attr("data-internet-price"))
            {
                Some(raw) => ProductStatus::InStock(parse_price(&self.name, raw)?),
                None => ProductStatus::OutOfStock,
            };

            products.insert(name, status);
        }

        Ok(apply_keywords(products, self.keywords.as_deref()))
    }
}

#[async_trait]
impl SiteAdapter for FalabellaAdapter {
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
