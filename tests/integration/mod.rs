// Shared fixtures: a scripted in-memory site adapter and a recording
// notifier, so loop behavior is testable without any real network.

pub mod aggregate_tests;
pub mod poll_cycle_tests;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use stockwatch::models::{AggregateSnapshot, CatalogSnapshot, ProductStatus};
use stockwatch::notify::Notifier;
use stockwatch::sites::SiteAdapter;
use stockwatch::{AppError, Result};

/// Adapter that replays a queue of canned results, one per `get_products`
/// call.
pub struct ScriptedAdapter {
    name: String,
    url: Option<String>,
    responses: Mutex<VecDeque<Result<CatalogSnapshot>>>,
}

impl ScriptedAdapter {
    pub fn new(
        name: &str,
        url: Option<&str>,
        responses: Vec<Result<CatalogSnapshot>>,
    ) -> Box<Self> {
        Box::new(Self {
            name: name.to_string(),
            url: url.map(str::to_string),
            responses: Mutex::new(responses.into()),
        })
    }
}

#[async_trait]
impl SiteAdapter for ScriptedAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    async fn get_products(&self) -> Result<CatalogSnapshot> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted adapter ran out of responses")
    }
}

/// Notifier that records every delivery; can be switched to fail on demand.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<(String, AggregateSnapshot)>>>,
    pub fail: Arc<AtomicBool>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, subject: &str, snapshot: &AggregateSnapshot) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::fetch("notifier", "simulated delivery failure"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_string(), snapshot.clone()));
        Ok(())
    }
}

pub fn in_stock(price: i64) -> ProductStatus {
    ProductStatus::InStock(Decimal::from(price))
}

pub fn catalog(products: &[(&str, ProductStatus)]) -> CatalogSnapshot {
    products
        .iter()
        .map(|(name, status)| (name.to_string(), status.clone()))
        .collect()
}

pub fn aggregate(site: &str, products: &[(&str, ProductStatus)]) -> AggregateSnapshot {
    AggregateSnapshot::from([(site.to_string(), catalog(products))])
}
