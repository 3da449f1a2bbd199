use std::collections::HashMap;

use super::*;
use stockwatch::scraper::AggregateScraper;
use stockwatch::sites::SiteAdapter;

#[tokio::test]
async fn test_fetch_all_skips_sites_without_url() {
    let mut adapters: HashMap<String, Box<dyn SiteAdapter>> = HashMap::new();
    adapters.insert(
        "S1".to_string(),
        ScriptedAdapter::new(
            "S1",
            Some("https://s1.example.com"),
            vec![Ok(catalog(&[("WidgetA", in_stock(10))]))],
        ),
    );
    // no URL: never scraped, never fails
    adapters.insert("S2".to_string(), ScriptedAdapter::new("S2", None, vec![]));

    let scraper = AggregateScraper::new(adapters);
    let snapshot = scraper.fetch_all().await.unwrap();

    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.contains_key("S1"));
    assert!(!snapshot.contains_key("S2"));
}

#[tokio::test]
async fn test_fetch_all_is_all_or_nothing() {
    let mut adapters: HashMap<String, Box<dyn SiteAdapter>> = HashMap::new();
    adapters.insert(
        "Good".to_string(),
        ScriptedAdapter::new(
            "Good",
            Some("https://good.example.com"),
            vec![Ok(catalog(&[("WidgetA", in_stock(10))]))],
        ),
    );
    adapters.insert(
        "Bad".to_string(),
        ScriptedAdapter::new(
            "Bad",
            Some("https://bad.example.com"),
            vec![Err(AppError::fetch("Bad", "HTTP 503"))],
        ),
    );

    let scraper = AggregateScraper::new(adapters);
    match scraper.fetch_all().await {
        Err(AppError::FetchFailed { sites }) => assert_eq!(sites, vec!["Bad".to_string()]),
        other => panic!("expected FetchFailed, got {:?}", other.map(|s| s.len())),
    }
}
